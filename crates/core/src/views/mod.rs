//! Figures built from laid-out stacks.
//!
//! Every view returns plain [`RenderCommand`] lists; the SVG and terminal
//! backends turn them into pixels.

pub mod axis;
pub mod bar;
pub mod grid;
pub mod legend;
pub mod single;

use phasestack_protocol::RenderCommand;
use serde::Serialize;

use crate::palette::Palette;

/// Output resolution both figure modes are sized at.
pub const DPI: f64 = 300.0;

/// Which kind of figure is being produced; fixes the output dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FigureMode {
    Single,
    Grid,
}

impl FigureMode {
    /// Size in inches.
    pub fn inches(self) -> (f64, f64) {
        match self {
            Self::Single => (5.0, 2.0),
            Self::Grid => (14.0, 6.0),
        }
    }

    /// Size in pixels at [`DPI`].
    pub fn pixels(self) -> (f64, f64) {
        let (w, h) = self.inches();
        (w * DPI, h * DPI)
    }
}

/// What to do with a grid cell whose group has no rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum EmptyCellPolicy {
    /// Draw the cell's title and axis with no bar.
    #[default]
    Render,
    /// Leave the cell blank.
    Omit,
}

/// Presentation settings shared by every view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderOptions {
    pub palette: Palette,
    /// Show the metadata swatch in the legend. Does not affect the layout.
    pub include_metadata: bool,
    pub empty_cells: EmptyCellPolicy,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            palette: Palette::default(),
            include_metadata: false,
            empty_cells: EmptyCellPolicy::default(),
        }
    }
}

/// A finished figure: fixed dimensions and the commands to paint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub mode: FigureMode,
    pub width: f64,
    pub height: f64,
    pub commands: Vec<RenderCommand>,
}

impl Figure {
    pub fn new(mode: FigureMode, commands: Vec<RenderCommand>) -> Self {
        let (width, height) = mode.pixels();
        Self {
            mode,
            width,
            height,
            commands,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_pixel_sizes() {
        assert_eq!(FigureMode::Single.pixels(), (1500.0, 600.0));
        assert_eq!(FigureMode::Grid.pixels(), (4200.0, 1800.0));
    }

    #[test]
    fn defaults() {
        let options = RenderOptions::default();
        assert!(!options.include_metadata);
        assert_eq!(options.empty_cells, EmptyCellPolicy::Render);
    }
}
