use phasestack_protocol::{Color, ThemeToken};
use serde::{Deserialize, Serialize};

use crate::model::Phase;

/// Color and legend label for one phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteEntry {
    pub phase: Phase,
    pub color: Color,
    pub label: String,
}

/// Phase → palette slot → (color, legend label).
///
/// Slots follow [`Phase::ALL`]: 0 frontend, 1 backend, 2 linker,
/// 3 borrowck, 4 typeck, 5 metadata. Views emit `ThemeToken::Slot(n)` and
/// backends resolve the slot through the palette they are handed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Palette {
    entries: Vec<PaletteEntry>,
}

impl Default for Palette {
    fn default() -> Self {
        // First six colors of the ten-color categorical cycle.
        const COLORS: [Color; 6] = [
            Color::rgb(0x1f, 0x77, 0xb4),
            Color::rgb(0xff, 0x7f, 0x0e),
            Color::rgb(0x2c, 0xa0, 0x2c),
            Color::rgb(0xd6, 0x27, 0x28),
            Color::rgb(0x94, 0x67, 0xbd),
            Color::rgb(0x8c, 0x56, 0x4b),
        ];
        let entries = Phase::ALL
            .into_iter()
            .zip(COLORS)
            .map(|(phase, color)| PaletteEntry {
                phase,
                color,
                label: default_label(phase).to_string(),
            })
            .collect();
        Self { entries }
    }
}

fn default_label(phase: Phase) -> &'static str {
    match phase {
        Phase::Frontend => "Frontend",
        Phase::Backend => "Backend",
        Phase::Linker => "Linker",
        Phase::Borrowck => "borrowck",
        Phase::Typeck => "typeck",
        Phase::Metadata => "metadata",
    }
}

impl Palette {
    pub fn slot(phase: Phase) -> u8 {
        phase.index() as u8
    }

    pub fn token(phase: Phase) -> ThemeToken {
        ThemeToken::Slot(Self::slot(phase))
    }

    pub fn entry(&self, phase: Phase) -> &PaletteEntry {
        &self.entries[phase.index()]
    }

    pub fn color(&self, phase: Phase) -> Color {
        self.entry(phase).color
    }

    pub fn label(&self, phase: Phase) -> &str {
        &self.entry(phase).label
    }

    /// Color for a palette slot token; `None` for chrome tokens or slots
    /// outside the palette.
    pub fn resolve(&self, token: ThemeToken) -> Option<Color> {
        match token {
            ThemeToken::Slot(n) => self.entries.get(usize::from(n)).map(|e| e.color),
            _ => None,
        }
    }

    /// Legend entries in palette order; the metadata swatch is optional.
    pub fn legend(&self, include_metadata: bool) -> Vec<&PaletteEntry> {
        self.entries
            .iter()
            .filter(|e| include_metadata || e.phase != Phase::Metadata)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_follow_phase_order() {
        let palette = Palette::default();
        assert_eq!(Palette::slot(Phase::Frontend), 0);
        assert_eq!(Palette::slot(Phase::Metadata), 5);
        assert_eq!(palette.color(Phase::Backend).hex(), "#ff7f0e");
        assert_eq!(palette.label(Phase::Borrowck), "borrowck");
    }

    #[test]
    fn resolve_slot_tokens_only() {
        let palette = Palette::default();
        assert_eq!(
            palette.resolve(ThemeToken::Slot(2)),
            Some(Color::rgb(0x2c, 0xa0, 0x2c))
        );
        assert_eq!(palette.resolve(ThemeToken::Slot(9)), None);
        assert_eq!(palette.resolve(ThemeToken::TextPrimary), None);
    }

    #[test]
    fn legend_metadata_toggle() {
        let palette = Palette::default();
        let with: Vec<_> = palette.legend(true).iter().map(|e| e.phase).collect();
        let without: Vec<_> = palette.legend(false).iter().map(|e| e.phase).collect();
        assert_eq!(with, Phase::ALL.to_vec());
        assert_eq!(without.len(), 5);
        assert!(!without.contains(&Phase::Metadata));
    }
}
