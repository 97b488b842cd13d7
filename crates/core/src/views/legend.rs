use phasestack_protocol::{Point, Rect, RenderCommand, TextAlign, ThemeToken};

use crate::palette::Palette;

const PADDING: f64 = 16.0;
const ROW_HEIGHT: f64 = 48.0;
const SWATCH_W: f64 = 56.0;
const SWATCH_H: f64 = 28.0;
const FONT_SIZE: f64 = 32.0;
const CHAR_WIDTH: f64 = FONT_SIZE * 0.55;

/// Size of the legend box for the given entries.
pub fn legend_size(palette: &Palette, include_metadata: bool) -> (f64, f64) {
    let entries = palette.legend(include_metadata);
    let longest = entries
        .iter()
        .map(|e| e.label.chars().count())
        .max()
        .unwrap_or(0);
    let w = PADDING * 3.0 + SWATCH_W + longest as f64 * CHAR_WIDTH;
    let h = PADDING * 2.0 + entries.len() as f64 * ROW_HEIGHT;
    (w, h)
}

/// Render the legend with its lower-left corner at `anchor`: one swatch and
/// label per phase, metadata only when requested.
pub fn render_legend(palette: &Palette, include_metadata: bool, anchor: Point) -> Vec<RenderCommand> {
    let (w, h) = legend_size(palette, include_metadata);
    let top = anchor.y - h;
    let mut commands = Vec::with_capacity(16);
    commands.push(RenderCommand::BeginGroup {
        id: "legend".into(),
        label: None,
    });
    commands.push(RenderCommand::DrawRect {
        rect: Rect::new(anchor.x, top, w, h),
        color: ThemeToken::Background,
        border_color: Some(ThemeToken::LegendBorder),
        label: None,
    });

    for (i, entry) in palette.legend(include_metadata).into_iter().enumerate() {
        let row_y = top + PADDING + i as f64 * ROW_HEIGHT;
        commands.push(RenderCommand::DrawRect {
            rect: Rect::new(
                anchor.x + PADDING,
                row_y + (ROW_HEIGHT - SWATCH_H) / 2.0,
                SWATCH_W,
                SWATCH_H,
            ),
            color: Palette::token(entry.phase),
            border_color: None,
            label: None,
        });
        commands.push(RenderCommand::DrawText {
            position: Point::new(
                anchor.x + PADDING * 2.0 + SWATCH_W,
                row_y + ROW_HEIGHT / 2.0 + FONT_SIZE * 0.35,
            ),
            text: entry.label.clone(),
            color: ThemeToken::TextPrimary,
            font_size: FONT_SIZE,
            align: TextAlign::Left,
        });
    }

    commands.push(RenderCommand::EndGroup);
    commands
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(commands: &[RenderCommand]) -> Vec<&str> {
        commands
            .iter()
            .filter_map(|c| match c {
                RenderCommand::DrawText { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn lists_phases_in_palette_order() {
        let cmds = render_legend(&Palette::default(), true, Point::new(0.0, 500.0));
        assert_eq!(
            labels(&cmds),
            vec!["Frontend", "Backend", "Linker", "borrowck", "typeck", "metadata"]
        );
    }

    #[test]
    fn metadata_swatch_is_optional() {
        let cmds = render_legend(&Palette::default(), false, Point::new(0.0, 500.0));
        assert!(!labels(&cmds).contains(&"metadata"));
        let swatches = cmds
            .iter()
            .filter(|c| matches!(c, RenderCommand::DrawRect { color: ThemeToken::Slot(_), .. }))
            .count();
        assert_eq!(swatches, 5);
    }

    #[test]
    fn box_sits_above_anchor() {
        let palette = Palette::default();
        let (_, h) = legend_size(&palette, false);
        let cmds = render_legend(&palette, false, Point::new(10.0, 400.0));
        let frame = cmds.iter().find_map(RenderCommand::rect).copied();
        assert_eq!(frame.map(|r| (r.x, r.bottom())), Some((10.0, 400.0)));
        assert_eq!(frame.map(|r| r.h), Some(h));
    }
}
