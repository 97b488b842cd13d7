use phasestack_protocol::{Point, Rect, RenderCommand, TextAlign, ThemeToken};

use crate::layout::AXIS_SPAN;

pub const AXIS_TITLE: &str = "Percent out of whole compilation";

const TICK_LENGTH: f64 = 12.0;
const TICK_FONT_SIZE: f64 = 34.0;
const TITLE_FONT_SIZE: f64 = 38.0;
const LABEL_GAP: f64 = 8.0;
const MIN_TICK_SPACING_PX: f64 = 150.0;

/// Vertical space [`render_percent_axis`] needs below the bar.
pub const AXIS_HEIGHT: f64 = TICK_LENGTH + LABEL_GAP + TICK_FONT_SIZE + LABEL_GAP + TITLE_FONT_SIZE;

/// Render the x axis for a bar occupying `bar`: tick marks and percentage
/// labels under the bar, then the axis title. No spines and no y axis.
pub fn render_percent_axis(bar: Rect) -> Vec<RenderCommand> {
    if bar.w <= 0.0 {
        return Vec::new();
    }

    let x_scale = bar.w / AXIS_SPAN;
    let step = tick_step(bar.w);
    let top = bar.bottom();
    let mut commands = Vec::with_capacity(32);
    commands.push(RenderCommand::BeginGroup {
        id: "x-axis".into(),
        label: None,
    });

    let ticks = (AXIS_SPAN / step).round() as u32;
    for i in 0..=ticks {
        let value = f64::from(i) * step;
        let x = bar.x + value * x_scale;
        commands.push(RenderCommand::DrawLine {
            from: Point::new(x, top),
            to: Point::new(x, top + TICK_LENGTH),
            color: ThemeToken::AxisLine,
            width: 2.0,
        });
        commands.push(RenderCommand::DrawText {
            position: Point::new(x, top + TICK_LENGTH + LABEL_GAP + TICK_FONT_SIZE * 0.8),
            text: format_tick(value),
            color: ThemeToken::TextPrimary,
            font_size: TICK_FONT_SIZE,
            align: TextAlign::Center,
        });
    }

    commands.push(RenderCommand::DrawText {
        position: Point::new(bar.x + bar.w / 2.0, top + AXIS_HEIGHT - TITLE_FONT_SIZE * 0.2),
        text: AXIS_TITLE.into(),
        color: ThemeToken::TextPrimary,
        font_size: TITLE_FONT_SIZE,
        align: TextAlign::Center,
    });

    commands.push(RenderCommand::EndGroup);
    commands
}

/// Pick the smallest "nice" tick step that keeps ticks at least
/// `MIN_TICK_SPACING_PX` apart.
fn tick_step(width_px: f64) -> f64 {
    let max_ticks = (width_px / MIN_TICK_SPACING_PX).max(1.0);
    let raw = AXIS_SPAN / max_ticks;
    [5.0, 10.0, 20.0, 25.0, 50.0]
        .into_iter()
        .find(|&step| step >= raw)
        .unwrap_or(AXIS_SPAN)
}

fn format_tick(value: f64) -> String {
    format!("{value:.0}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(commands: &[RenderCommand]) -> Vec<String> {
        commands
            .iter()
            .filter_map(|c| match c {
                RenderCommand::DrawText { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn step_follows_width() {
        assert_eq!(tick_step(1100.0), 20.0);
        assert_eq!(tick_step(3000.0), 5.0);
        assert_eq!(tick_step(400.0), 50.0);
        assert_eq!(tick_step(50.0), 100.0);
    }

    #[test]
    fn ticks_from_zero_to_hundred() {
        let cmds = render_percent_axis(Rect::new(0.0, 0.0, 1000.0, 100.0));
        let labels = texts(&cmds);
        assert_eq!(labels, vec!["0", "20", "40", "60", "80", "100", AXIS_TITLE]);

        let lines = cmds
            .iter()
            .filter(|c| matches!(c, RenderCommand::DrawLine { .. }))
            .count();
        assert_eq!(lines, 6);
    }

    #[test]
    fn ticks_sit_under_the_bar() {
        let cmds = render_percent_axis(Rect::new(10.0, 20.0, 1000.0, 100.0));
        let first_tick = cmds.iter().find_map(|c| match c {
            RenderCommand::DrawLine { from, .. } => Some(*from),
            _ => None,
        });
        assert_eq!(first_tick, Some(Point::new(10.0, 120.0)));
    }

    #[test]
    fn zero_width_draws_nothing() {
        assert!(render_percent_axis(Rect::new(0.0, 0.0, 0.0, 10.0)).is_empty());
    }
}
