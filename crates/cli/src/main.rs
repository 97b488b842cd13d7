mod output;
mod renderer;

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use itertools::Itertools;
use phasestack_core::summary::benchmarks_per_kind;
use phasestack_core::views::single::render_single;
use phasestack_core::{
    EmptyCellPolicy, GroupKey, GroupLayout, NormalizedRecord, Phase, Profile, RenderOptions,
    Scenario, TargetKind, exclude_empty, load_records, normalize,
};
use tracing_subscriber::EnvFilter;

/// Where does compile time go? Nested stacked bars of compiler phase shares.
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    #[command(flatten)]
    verbose: Verbosity<InfoLevel>,

    #[command(subcommand)]
    command: Commands,
}

/// Categorical filters shared by the single-view commands.
#[derive(Args, Debug, Clone, Default)]
struct Filters {
    #[arg(long)]
    benchmark: Option<String>,

    /// check, debug or opt
    #[arg(long)]
    profile: Option<Profile>,

    /// full, incrfull, incrpatched0 or incrunchanged
    #[arg(long)]
    scenario: Option<Scenario>,

    /// bin or lib
    #[arg(long)]
    kind: Option<TargetKind>,
}

impl Filters {
    fn key(&self) -> GroupKey {
        GroupKey {
            profile: self.profile,
            scenario: self.scenario,
            kind: self.kind,
            benchmark: self.benchmark.clone(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Draw one filtered view as a single nested bar
    Single {
        /// Results table (CSV with one row per run)
        csv: PathBuf,

        /// Output file name, without extension
        #[arg(long)]
        name: String,

        #[command(flatten)]
        filters: Filters,

        /// Show the metadata swatch in the legend
        #[arg(long)]
        metadata: bool,

        #[arg(long, default_value = "out")]
        out_dir: PathBuf,
    },
    /// Draw the profile × scenario grid
    Grid {
        csv: PathBuf,

        #[arg(long)]
        name: String,

        #[arg(long)]
        benchmark: Option<String>,

        #[arg(long)]
        kind: Option<TargetKind>,

        #[arg(long)]
        metadata: bool,

        /// Leave cells without rows blank instead of drawing empty axes
        #[arg(long)]
        omit_empty: bool,

        #[arg(long, default_value = "out")]
        out_dir: PathBuf,
    },
    /// Write the standard figure set for each benchmark and both target kinds
    Report {
        csv: PathBuf,

        /// Restrict to these benchmarks (default: every benchmark in the table)
        #[arg(long)]
        benchmark: Vec<String>,

        #[arg(long, default_value = "out")]
        out_dir: PathBuf,
    },
    /// Print the aggregated means and nested layout of one view
    Means {
        csv: PathBuf,

        #[command(flatten)]
        filters: Filters,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Count distinct benchmarks per target kind
    Summary { csv: PathBuf },
    /// Show one filtered view in the terminal
    Preview {
        csv: PathBuf,

        #[command(flatten)]
        filters: Filters,

        #[arg(long)]
        metadata: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so `means --json` stays pipeable.
    const CRATES: &[&str] = &["phasestack_core", "phasestack_cli"];
    let level = cli.verbose.tracing_level_filter();
    let allowlist = CRATES.iter().map(|c| format!("{c}={level}")).join(",");
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(format!("warn,{allowlist}")))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Single {
            csv,
            name,
            filters,
            metadata,
            out_dir,
        } => {
            let data = load(&csv)?;
            let options = RenderOptions {
                include_metadata: metadata,
                ..RenderOptions::default()
            };
            output::write_single(&data, &filters.key(), &options, &out_dir, &name)?;
        }
        Commands::Grid {
            csv,
            name,
            benchmark,
            kind,
            metadata,
            omit_empty,
            out_dir,
        } => {
            let data = load(&csv)?;
            let options = RenderOptions {
                include_metadata: metadata,
                empty_cells: if omit_empty {
                    EmptyCellPolicy::Omit
                } else {
                    EmptyCellPolicy::Render
                },
                ..RenderOptions::default()
            };
            let base = GroupKey {
                kind,
                benchmark,
                ..GroupKey::all()
            };
            output::write_grid(&data, &base, &options, &out_dir, &name)?;
        }
        Commands::Report {
            csv,
            benchmark,
            out_dir,
        } => {
            let data = load(&csv)?;
            let written = output::write_report(&data, &benchmark, &out_dir)?;
            tracing::info!(figures = written.len(), dir = %out_dir.display(), "report done");
        }
        Commands::Means {
            csv,
            filters,
            json,
        } => {
            let data = load(&csv)?;
            let group = GroupLayout::compute(&data, &filters.key());
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            if json {
                serde_json::to_writer_pretty(&mut out, &group)?;
                writeln!(out)?;
            } else {
                print_means(&mut out, &group)?;
            }
        }
        Commands::Summary { csv } => {
            let data = load(&csv)?;
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            for (kind, count) in benchmarks_per_kind(&data) {
                writeln!(out, "{kind}\t{count}")?;
            }
        }
        Commands::Preview {
            csv,
            filters,
            metadata,
        } => {
            let data = load(&csv)?;
            let options = RenderOptions {
                include_metadata: metadata,
                ..RenderOptions::default()
            };
            let key = filters.key();
            let view = render_single(&data, &key, &options);
            renderer::render_tui(&view.figure, &options.palette, &key.to_string())?;
        }
    }

    Ok(())
}

/// Read and normalize a results table, dropping runs with no recorded time.
fn load(path: &Path) -> Result<Vec<NormalizedRecord>> {
    let mut records =
        load_records(path).with_context(|| format!("loading {}", path.display()))?;
    let dropped = exclude_empty(&mut records);
    if records.is_empty() {
        tracing::warn!(dropped, "no usable rows in results table");
    }
    Ok(normalize(&records))
}

fn print_means(out: &mut impl Write, group: &GroupLayout) -> Result<()> {
    writeln!(out, "group: {} ({} rows)", group.key, group.means.rows)?;
    for phase in Phase::ALL {
        writeln!(out, "{:<10}{:>9.3}", phase.column(), group.means.get(phase))?;
    }
    writeln!(out)?;
    writeln!(out, "{:<10}{:<7}{:>9}{:>9}", "segment", "layer", "offset", "width")?;
    for segment in group.stack.segments() {
        writeln!(
            out,
            "{:<10}{:<7}{:>9.3}{:>9.3}",
            segment.phase.column(),
            format!("{:?}", segment.layer).to_lowercase(),
            segment.offset,
            segment.width,
        )?;
    }
    for anomaly in group.stack.anomalies() {
        writeln!(out, "anomaly: {anomaly}")?;
    }
    Ok(())
}
