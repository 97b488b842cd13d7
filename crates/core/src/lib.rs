//! Where does compile time go?
//!
//! Turns per-benchmark compiler phase timings into nested stacked bars:
//!
//! ```text
//!   results.csv ─▶ Record ─▶ NormalizedRecord ─▶ GroupKey ─▶ AggregatedMeans ─▶ NestedStack ─▶ RenderCommand[] ─▶ SVG
//!               (loader)   (normalize)         (select)    (aggregate)        (layout)       (views)            (svg)
//! ```

pub mod aggregate;
pub mod group;
pub mod layout;
pub mod loader;
pub mod model;
pub mod normalize;
pub mod palette;
pub mod select;
pub mod summary;
pub mod svg;
pub mod views;

pub use aggregate::{AggregatedMeans, aggregate};
pub use group::GroupLayout;
pub use layout::{Layer, LayoutAnomaly, NestedStack, Segment, layout};
pub use loader::{LoadError, load_records, read_records};
pub use model::{NormalizedRecord, Phase, PhaseShares, PhaseValues, Profile, Record, Scenario, TargetKind};
pub use normalize::{exclude_empty, normalize};
pub use palette::Palette;
pub use select::GroupKey;
pub use views::{EmptyCellPolicy, Figure, FigureMode, RenderOptions};
