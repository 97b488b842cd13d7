use serde::{Deserialize, Serialize};

use crate::theme::ThemeToken;
use crate::types::{Point, Rect};

/// A single, stateless draw instruction.
///
/// Views emit a `Vec<RenderCommand>` per figure. Backends consume the list
/// sequentially and paint in order, so later commands sit on top of earlier
/// ones. Each command carries all the data it needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RenderCommand {
    /// Draw a filled rectangle, optionally outlined and labelled (the label
    /// is used as a tooltip by backends that support one).
    DrawRect {
        rect: Rect,
        color: ThemeToken,
        border_color: Option<ThemeToken>,
        label: Option<String>,
    },

    /// Draw a text string anchored at a position.
    DrawText {
        position: Point,
        text: String,
        color: ThemeToken,
        font_size: f64,
        align: TextAlign,
    },

    /// Draw a line segment.
    DrawLine {
        from: Point,
        to: Point,
        color: ThemeToken,
        width: f64,
    },

    /// Begin a logical group (a bar, an axis, a legend, a grid cell).
    BeginGroup { id: String, label: Option<String> },

    /// End the current group.
    EndGroup,
}

impl RenderCommand {
    /// Rectangle of a `DrawRect`, `None` for every other command.
    pub fn rect(&self) -> Option<&Rect> {
        match self {
            Self::DrawRect { rect, .. } => Some(rect),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_accessor_only_matches_draw_rect() {
        let rect = RenderCommand::DrawRect {
            rect: Rect::new(1.0, 2.0, 3.0, 4.0),
            color: ThemeToken::Slot(0),
            border_color: None,
            label: None,
        };
        assert_eq!(rect.rect(), Some(&Rect::new(1.0, 2.0, 3.0, 4.0)));
        assert!(RenderCommand::EndGroup.rect().is_none());
    }

    #[test]
    fn serializes_with_variant_tag() {
        let cmd = RenderCommand::BeginGroup {
            id: "legend".into(),
            label: None,
        };
        let json = serde_json::to_string(&cmd).unwrap_or_default();
        assert_eq!(json, r#"{"BeginGroup":{"id":"legend","label":null}}"#);
    }
}
