use serde::{Deserialize, Serialize};

/// Semantic color tokens resolved by the backend.
///
/// Chart chrome uses the named tokens; data marks use `Slot(n)`, an index
/// into the palette the figure was rendered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThemeToken {
    Slot(u8),

    Background,
    TextPrimary,
    TextSecondary,
    AxisLine,
    LegendBorder,
}
