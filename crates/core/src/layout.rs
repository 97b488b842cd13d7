//! Nested stacked-bar layout.
//!
//! Turns six phase means into ordered segments on a shared 0–100 axis. The
//! outer layer partitions the axis as `linker | backend | frontend`; the
//! inner layer subdivides the frontend span into `borrowck | typeck |
//! metadata`, starting right where the frontend begins.
//!
//! ```text
//!  0        ld       ld+be                                        100
//!  |linker  |backend |borrowck   |typeck      |metadata|          |   inner
//!  |linker  |backend |frontend ...............................    |   outer
//! ```
//!
//! Segments are emitted in paint order: the full-width frontend background
//! first, the inner sub-phases next, then backend and linker on top. Every
//! segment's offset and width stand on their own; order only matters for
//! layering.

use serde::{Deserialize, Serialize};

use crate::model::{Phase, PhaseValues, SHARE_TOLERANCE};

/// Length of the shared percentage axis.
pub const AXIS_SPAN: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    /// Full-height bar: frontend, backend, linker.
    Outer,
    /// Reduced-height bar inside the frontend span.
    Inner,
}

/// One drawable span on the percentage axis. `phase` doubles as the palette
/// key for its color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub phase: Phase,
    pub layer: Layer,
    pub offset: f64,
    pub width: f64,
}

impl Segment {
    fn new(phase: Phase, offset: f64, width: f64) -> Self {
        let layer = if phase.is_inner() { Layer::Inner } else { Layer::Outer };
        Self {
            phase,
            layer,
            offset,
            width,
        }
    }

    pub fn end(&self) -> f64 {
        self.offset + self.width
    }

    pub fn is_finite(&self) -> bool {
        self.offset.is_finite() && self.width.is_finite()
    }
}

/// Something off about the means a stack was built from. Reported, never
/// corrected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LayoutAnomaly {
    /// The sub-phases do not fit in the frontend span; the last inner
    /// segment ends at `end` past the axis.
    Overflow {
        inner_width: f64,
        available: f64,
        end: f64,
    },
    /// The frontend mean disagrees with `100 - backend - linker`.
    FrontendMismatch { derived: f64, measured: f64 },
}

impl std::fmt::Display for LayoutAnomaly {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Overflow {
                inner_width,
                available,
                end,
            } => write!(
                f,
                "sub-phases span {inner_width:.3}% but frontend only has {available:.3}% (ends at {end:.3})"
            ),
            Self::FrontendMismatch { derived, measured } => write!(
                f,
                "frontend mean {measured:.3}% differs from 100 - backend - linker = {derived:.3}%"
            ),
        }
    }
}

/// The laid-out bar: segments in paint order plus any anomalies found.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NestedStack {
    segments: Vec<Segment>,
    anomalies: Vec<LayoutAnomaly>,
}

impl NestedStack {
    /// All segments in paint order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn outer(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter().filter(|s| s.layer == Layer::Outer)
    }

    pub fn inner(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter().filter(|s| s.layer == Layer::Inner)
    }

    pub fn segment(&self, phase: Phase) -> Option<&Segment> {
        self.segments.iter().find(|s| s.phase == phase)
    }

    pub fn anomalies(&self) -> &[LayoutAnomaly] {
        &self.anomalies
    }

    pub fn overflows(&self) -> bool {
        self.anomalies
            .iter()
            .any(|a| matches!(a, LayoutAnomaly::Overflow { .. }))
    }

    /// The axis span each outer phase actually shows: linker and backend at
    /// their width, frontend for whatever is left of the background. Sums to
    /// [`AXIS_SPAN`].
    pub fn visible_outer_widths(&self) -> [(Phase, f64); 3] {
        let width = |phase| self.segment(phase).map_or(f64::NAN, |s| s.width);
        let linker = width(Phase::Linker);
        let backend = width(Phase::Backend);
        [
            (Phase::Linker, linker),
            (Phase::Backend, backend),
            (Phase::Frontend, AXIS_SPAN - linker - backend),
        ]
    }
}

/// Lay out the nested stack for one group's means.
///
/// Only backend, linker and the three sub-phases drive the geometry; the
/// frontend share is implied as `100 - backend - linker` and compared against
/// the measured mean. NaN means produce NaN segments rather than an error.
pub fn layout(means: &PhaseValues) -> NestedStack {
    let backend = means.backend;
    let linker = means.linker;
    let mut segments = Vec::with_capacity(6);
    let mut anomalies = Vec::new();

    // An undefined group has no frontend span either.
    let fe_start = backend + linker;
    let background = if fe_start.is_nan() { f64::NAN } else { AXIS_SPAN };
    segments.push(Segment::new(Phase::Frontend, 0.0, background));

    let mut fe_base = fe_start;
    segments.push(Segment::new(Phase::Borrowck, fe_base, means.borrowck));
    fe_base += means.borrowck;
    segments.push(Segment::new(Phase::Typeck, fe_base, means.typeck));
    fe_base += means.typeck;
    segments.push(Segment::new(Phase::Metadata, fe_base, means.metadata));

    segments.push(Segment::new(Phase::Backend, linker, backend));
    segments.push(Segment::new(Phase::Linker, 0.0, linker));

    let derived = AXIS_SPAN - fe_start;
    if (derived - means.frontend).abs() > SHARE_TOLERANCE {
        tracing::warn!(derived, measured = means.frontend, "frontend mean mismatch");
        anomalies.push(LayoutAnomaly::FrontendMismatch {
            derived,
            measured: means.frontend,
        });
    }

    let inner_width = means.inner_sum();
    let end = fe_start + inner_width;
    if end > AXIS_SPAN + SHARE_TOLERANCE {
        let anomaly = LayoutAnomaly::Overflow {
            inner_width,
            available: derived,
            end,
        };
        tracing::warn!(%anomaly, "nested stack overflows the axis");
        anomalies.push(anomaly);
    }

    NestedStack {
        segments,
        anomalies,
    }
}
