use phasestack_protocol::{Rect, RenderCommand};

use crate::layout::{AXIS_SPAN, Layer, NestedStack};
use crate::palette::Palette;

/// Share of the bar height the inner layer occupies, measured from the top.
const INNER_HEIGHT_FRACTION: f64 = 0.5;

/// Paint a nested stack into `area`, which spans the 0–100 axis.
///
/// Outer segments fill the full height; inner segments fill the top half.
/// Segments with a non-finite offset or width (groups without data) are
/// skipped.
pub fn render_bar(stack: &NestedStack, palette: &Palette, area: Rect) -> Vec<RenderCommand> {
    let x_scale = area.w / AXIS_SPAN;
    let mut commands = Vec::with_capacity(stack.segments().len() + 2);
    commands.push(RenderCommand::BeginGroup {
        id: "bar".into(),
        label: None,
    });

    for segment in stack.segments() {
        if !segment.is_finite() {
            tracing::debug!(phase = %segment.phase, "skipping undefined segment");
            continue;
        }
        let h = match segment.layer {
            Layer::Outer => area.h,
            Layer::Inner => area.h * INNER_HEIGHT_FRACTION,
        };
        commands.push(RenderCommand::DrawRect {
            rect: Rect::new(
                area.x + segment.offset * x_scale,
                area.y,
                segment.width * x_scale,
                h,
            ),
            color: Palette::token(segment.phase),
            border_color: None,
            label: Some(format!(
                "{}: {:.1}%",
                palette.label(segment.phase),
                segment.width
            )),
        });
    }

    commands.push(RenderCommand::EndGroup);
    commands
}
