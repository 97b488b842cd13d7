//! Profile × scenario facet grid.
//!
//! Rows are profiles (Check, Debug, Opt), columns are scenarios (Full,
//! IncrFull, IncrPatched0, IncrUnchanged). Each cell narrows the base key
//! with its own profile and scenario and is laid out on its own; nothing is
//! shared between cells except the palette.

use phasestack_protocol::{Point, Rect, RenderCommand, TextAlign, ThemeToken};

use super::axis::{AXIS_HEIGHT, render_percent_axis};
use super::bar::render_bar;
use super::legend::{legend_size, render_legend};
use super::{EmptyCellPolicy, Figure, FigureMode, RenderOptions};
use crate::group::GroupLayout;
use crate::model::{NormalizedRecord, Profile, Scenario};
use crate::select::GroupKey;

const MARGIN: f64 = 40.0;
const CELL_PADDING: f64 = 30.0;
const TITLE_FONT_SIZE: f64 = 34.0;
const TITLE_HEIGHT: f64 = TITLE_FONT_SIZE + 16.0;
const LEGEND_GAP: f64 = 30.0;

#[derive(Debug, Clone)]
pub struct GridCell {
    pub profile: Profile,
    pub scenario: Scenario,
    pub group: GroupLayout,
}

impl GridCell {
    pub fn title(&self) -> String {
        format!("profile = {} | scenario = {}", self.profile, self.scenario)
    }
}

#[derive(Debug, Clone)]
pub struct GridView {
    pub cells: Vec<GridCell>,
    pub figure: Figure,
}

/// Lay out every profile × scenario cell under `base`, row-major.
///
/// `base`'s own profile and scenario, if set, are overridden per cell.
pub fn compute_grid(records: &[NormalizedRecord], base: &GroupKey) -> Vec<GridCell> {
    let mut cells = Vec::with_capacity(Profile::ALL.len() * Scenario::ALL.len());
    for profile in Profile::ALL {
        for scenario in Scenario::ALL {
            let key = base.clone().with_profile(profile).with_scenario(scenario);
            cells.push(GridCell {
                profile,
                scenario,
                group: GroupLayout::compute(records, &key),
            });
        }
    }
    cells
}

/// Bounds of the cell at (`row`, `col`).
fn cell_bounds(row: usize, col: usize, options: &RenderOptions) -> Rect {
    let (width, height) = FigureMode::Grid.pixels();
    let (legend_w, _) = legend_size(&options.palette, options.include_metadata);
    let grid_w = width - 2.0 * MARGIN - LEGEND_GAP - legend_w;
    let grid_h = height - 2.0 * MARGIN;
    let cell_w = grid_w / Scenario::ALL.len() as f64;
    let cell_h = grid_h / Profile::ALL.len() as f64;
    Rect::new(
        MARGIN + col as f64 * cell_w,
        MARGIN + row as f64 * cell_h,
        cell_w,
        cell_h,
    )
}

/// Where a cell's bar goes inside its bounds.
fn bar_area(cell: Rect) -> Rect {
    cell.inset(
        CELL_PADDING,
        TITLE_HEIGHT,
        CELL_PADDING,
        AXIS_HEIGHT + CELL_PADDING,
    )
}

fn render_cell(cell: &GridCell, bounds: Rect, options: &RenderOptions) -> Vec<RenderCommand> {
    if cell.group.means.is_empty() && options.empty_cells == EmptyCellPolicy::Omit {
        tracing::debug!(profile = %cell.profile, scenario = %cell.scenario, "omitting empty cell");
        return Vec::new();
    }

    let title = cell.title();
    let area = bar_area(bounds);
    let mut commands = vec![
        RenderCommand::BeginGroup {
            id: format!("cell-{}-{}", cell.profile, cell.scenario),
            label: Some(title.clone()),
        },
        RenderCommand::DrawText {
            position: Point::new(area.x + area.w / 2.0, bounds.y + TITLE_FONT_SIZE),
            text: title,
            color: ThemeToken::TextPrimary,
            font_size: TITLE_FONT_SIZE,
            align: TextAlign::Center,
        },
    ];
    commands.extend(render_bar(&cell.group.stack, &options.palette, area));
    commands.extend(render_percent_axis(area));
    commands.push(RenderCommand::EndGroup);
    commands
}

/// Draw already-computed cells plus a single shared legend.
pub fn render_grid(cells: &[GridCell], options: &RenderOptions) -> Figure {
    let cols = Scenario::ALL.len();
    let mut commands = Vec::new();
    for (i, cell) in cells.iter().enumerate() {
        commands.extend(render_cell(cell, cell_bounds(i / cols, i % cols, options), options));
    }

    // Legend hangs off the right edge of the last row, 40% up its bar.
    let last_row = Profile::ALL.len() - 1;
    let anchor_bar = bar_area(cell_bounds(last_row, cols - 1, options));
    commands.extend(render_legend(
        &options.palette,
        options.include_metadata,
        Point::new(
            anchor_bar.right() + CELL_PADDING + LEGEND_GAP,
            anchor_bar.bottom() - anchor_bar.h * 0.4,
        ),
    ));

    Figure::new(FigureMode::Grid, commands)
}

/// Compute and draw the whole grid.
pub fn render_grid_view(
    records: &[NormalizedRecord],
    base: &GroupKey,
    options: &RenderOptions,
) -> GridView {
    let cells = compute_grid(records, base);
    let figure = render_grid(&cells, options);
    GridView { cells, figure }
}
