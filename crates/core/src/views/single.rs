use phasestack_protocol::{Point, Rect};

use super::axis::{AXIS_HEIGHT, render_percent_axis};
use super::bar::render_bar;
use super::legend::{legend_size, render_legend};
use super::{Figure, FigureMode, RenderOptions};
use crate::group::GroupLayout;
use crate::model::NormalizedRecord;
use crate::select::GroupKey;

const MARGIN: f64 = 40.0;
const LEGEND_GAP: f64 = 30.0;

/// A single filtered view and the figure drawn from it.
#[derive(Debug, Clone)]
pub struct SingleView {
    pub group: GroupLayout,
    pub figure: Figure,
}

/// Plot area of the bar inside a single-view figure.
pub fn bar_area(options: &RenderOptions) -> Rect {
    let (width, height) = FigureMode::Single.pixels();
    let (legend_w, _) = legend_size(&options.palette, options.include_metadata);
    Rect::new(0.0, 0.0, width, height).inset(
        MARGIN,
        MARGIN,
        MARGIN + LEGEND_GAP + legend_w,
        MARGIN + AXIS_HEIGHT,
    )
}

/// Render one filtered view: the nested bar, its x axis and the legend to
/// the right of the plot.
pub fn render_single(
    records: &[NormalizedRecord],
    key: &GroupKey,
    options: &RenderOptions,
) -> SingleView {
    let group = GroupLayout::compute(records, key);
    let area = bar_area(options);

    let mut commands = render_bar(&group.stack, &options.palette, area);
    commands.extend(render_percent_axis(area));
    commands.extend(render_legend(
        &options.palette,
        options.include_metadata,
        Point::new(area.right() + LEGEND_GAP, area.bottom() - area.h * 0.1),
    ));

    SingleView {
        group,
        figure: Figure::new(FigureMode::Single, commands),
    }
}
