//! Figure files on disk.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use phasestack_core::svg::render_svg;
use phasestack_core::views::grid::{GridView, render_grid_view};
use phasestack_core::views::single::render_single;
use phasestack_core::{
    Figure, GroupKey, LayoutAnomaly, NormalizedRecord, Palette, Profile, RenderOptions, Scenario,
    TargetKind,
};

/// The single views a report draws for every benchmark, with their file suffix.
const REPORT_VIEWS: [(&str, Profile, Scenario); 4] = [
    ("debug-full", Profile::Debug, Scenario::Full),
    ("debug-incr-patched", Profile::Debug, Scenario::IncrPatched0),
    ("opt-incr-patched", Profile::Opt, Scenario::IncrPatched0),
    ("check-incr-patched", Profile::Check, Scenario::IncrPatched0),
];

fn write_figure(figure: &Figure, palette: &Palette, out_dir: &Path, name: &str) -> Result<PathBuf> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("creating output directory {}", out_dir.display()))?;
    let path = out_dir.join(format!("{name}.svg"));
    fs::write(&path, render_svg(figure, palette))
        .with_context(|| format!("writing {}", path.display()))?;
    tracing::info!(path = %path.display(), "wrote figure");
    Ok(path)
}

pub fn write_single(
    data: &[NormalizedRecord],
    key: &GroupKey,
    options: &RenderOptions,
    out_dir: &Path,
    name: &str,
) -> Result<PathBuf> {
    let view = render_single(data, key, options);
    if view.group.means.is_empty() {
        tracing::warn!(%key, name, "view has no rows");
    }
    for anomaly in view.group.stack.anomalies() {
        tracing::warn!(%key, name, %anomaly, "layout anomaly");
    }
    write_figure(&view.figure, &options.palette, out_dir, name)
}

pub fn write_grid(
    data: &[NormalizedRecord],
    base: &GroupKey,
    options: &RenderOptions,
    out_dir: &Path,
    name: &str,
) -> Result<PathBuf> {
    let view = render_grid_view(data, base, options);
    for (profile, scenario, anomaly) in grid_anomalies(&view) {
        tracing::warn!(
            %base,
            name,
            %profile,
            %scenario,
            %anomaly,
            "layout anomaly"
        );
    }
    let empty = view
        .cells
        .iter()
        .filter(|c| c.group.means.is_empty())
        .count();
    if empty > 0 {
        tracing::debug!(%base, name, empty, "grid has empty cells");
    }
    write_figure(&view.figure, &options.palette, out_dir, name)
}

/// Anomalies of every grid cell, tagged with the cell's facet.
fn grid_anomalies(view: &GridView) -> Vec<(Profile, Scenario, LayoutAnomaly)> {
    view.cells
        .iter()
        .flat_map(|cell| {
            cell.group
                .stack
                .anomalies()
                .iter()
                .map(move |a| (cell.profile, cell.scenario, *a))
        })
        .collect()
}

/// Write the standard figure set. An empty `benchmarks` list means every
/// benchmark present in `data`.
///
/// Returns the written paths in the order they were produced.
pub fn write_report(
    data: &[NormalizedRecord],
    benchmarks: &[String],
    out_dir: &Path,
) -> Result<Vec<PathBuf>> {
    let benchmarks: Vec<String> = if benchmarks.is_empty() {
        data.iter()
            .map(|r| r.benchmark.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    } else {
        benchmarks.to_vec()
    };

    let detailed = RenderOptions {
        include_metadata: true,
        ..RenderOptions::default()
    };
    let plain = RenderOptions::default();
    let mut written = Vec::new();

    for benchmark in &benchmarks {
        let base = GroupKey::all().with_benchmark(benchmark.as_str());
        for (suffix, profile, scenario) in REPORT_VIEWS {
            let key = base.clone().with_profile(profile).with_scenario(scenario);
            let name = format!("{benchmark}-{suffix}");
            written.push(write_single(data, &key, &detailed, out_dir, &name)?);
        }
        written.push(write_grid(data, &base, &plain, out_dir, benchmark)?);
    }

    for (name, kind) in [("binaries", TargetKind::Bin), ("libraries", TargetKind::Lib)] {
        let base = GroupKey::all().with_kind(kind);
        written.push(write_grid(data, &base, &plain, out_dir, name)?);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use phasestack_core::normalize::normalize_record;
    use phasestack_core::{PhaseShares, PhaseValues, Record};

    fn row(benchmark: &str, kind: TargetKind, profile: Profile, scenario: Scenario) -> NormalizedRecord {
        NormalizedRecord {
            benchmark: benchmark.into(),
            profile,
            scenario,
            kind,
            shares: PhaseShares::new(PhaseValues {
                frontend: 60.0,
                backend: 30.0,
                linker: 10.0,
                borrowck: 10.0,
                typeck: 20.0,
                metadata: 5.0,
            })
            .unwrap(),
        }
    }

    fn file_names(paths: &[PathBuf]) -> Vec<String> {
        paths
            .iter()
            .filter_map(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn report_writes_the_standard_set() {
        let dir = tempfile::tempdir().unwrap();
        let data = vec![
            row("ripgrep", TargetKind::Bin, Profile::Debug, Scenario::Full),
            row("diesel", TargetKind::Lib, Profile::Opt, Scenario::IncrPatched0),
        ];
        let written = write_report(&data, &[], dir.path()).unwrap();
        assert_eq!(
            file_names(&written),
            [
                "diesel-debug-full.svg",
                "diesel-debug-incr-patched.svg",
                "diesel-opt-incr-patched.svg",
                "diesel-check-incr-patched.svg",
                "diesel.svg",
                "ripgrep-debug-full.svg",
                "ripgrep-debug-incr-patched.svg",
                "ripgrep-opt-incr-patched.svg",
                "ripgrep-check-incr-patched.svg",
                "ripgrep.svg",
                "binaries.svg",
                "libraries.svg",
            ]
        );
        for path in &written {
            let svg = fs::read_to_string(path).unwrap();
            assert!(svg.starts_with("<svg"));
        }
    }

    #[test]
    fn report_restricted_to_named_benchmarks() {
        let dir = tempfile::tempdir().unwrap();
        let data = vec![
            row("ripgrep", TargetKind::Bin, Profile::Debug, Scenario::Full),
            row("diesel", TargetKind::Lib, Profile::Opt, Scenario::IncrPatched0),
        ];
        let written = write_report(&data, &["ripgrep".to_string()], dir.path()).unwrap();
        assert_eq!(written.len(), 7);
        assert!(!dir.path().join("diesel.svg").exists());
    }

    #[test]
    fn single_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested").join("figures");
        let data = vec![row("ripgrep", TargetKind::Bin, Profile::Debug, Scenario::Full)];
        let path = write_single(
            &data,
            &GroupKey::all(),
            &RenderOptions::default(),
            &out,
            "all",
        )
        .unwrap();
        assert_eq!(path, out.join("all.svg"));
        let svg = fs::read_to_string(path).unwrap();
        assert!(svg.contains(r#"width="1500" height="600""#));
    }

    #[test]
    fn grid_figure_is_grid_sized() {
        let dir = tempfile::tempdir().unwrap();
        let data = vec![row("ripgrep", TargetKind::Bin, Profile::Debug, Scenario::Full)];
        let path = write_grid(
            &data,
            &GroupKey::all(),
            &RenderOptions::default(),
            dir.path(),
            "grid",
        )
        .unwrap();
        let svg = fs::read_to_string(path).unwrap();
        assert!(svg.contains(r#"width="4200" height="1800""#));
    }

    #[test]
    fn grid_anomalies_carry_their_cell() {
        let mut data = vec![row("ripgrep", TargetKind::Bin, Profile::Debug, Scenario::Full)];
        // Sub-phases recorded larger than the frontend they belong to.
        data.push(normalize_record(&Record {
            benchmark: "ripgrep".into(),
            profile: Profile::Opt,
            scenario: Scenario::IncrFull,
            kind: TargetKind::Bin,
            durations: PhaseValues {
                frontend: 50.0,
                backend: 40.0,
                linker: 10.0,
                borrowck: 40.0,
                typeck: 30.0,
                metadata: 0.0,
            },
        }));
        let view = render_grid_view(&data, &GroupKey::all(), &RenderOptions::default());
        let anomalies = grid_anomalies(&view);
        assert_eq!(anomalies.len(), 1);
        let (profile, scenario, anomaly) = anomalies[0];
        assert_eq!((profile, scenario), (Profile::Opt, Scenario::IncrFull));
        assert!(matches!(anomaly, LayoutAnomaly::Overflow { .. }));

        let dir = tempfile::tempdir().unwrap();
        let path = write_grid(&data, &GroupKey::all(), &RenderOptions::default(), dir.path(), "g")
            .unwrap();
        assert!(path.exists());
    }
}
