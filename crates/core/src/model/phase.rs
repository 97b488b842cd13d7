use serde::{Deserialize, Serialize};

/// A named stage of a compilation run.
///
/// `Frontend`, `Backend` and `Linker` partition the total build time. The
/// remaining three are sub-phases measured inside the frontend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Frontend,
    Backend,
    Linker,
    Borrowck,
    Typeck,
    Metadata,
}

impl Phase {
    /// All phases, in palette order.
    pub const ALL: [Phase; 6] = [
        Phase::Frontend,
        Phase::Backend,
        Phase::Linker,
        Phase::Borrowck,
        Phase::Typeck,
        Phase::Metadata,
    ];

    /// Phases that together make up the total.
    pub const OUTER: [Phase; 3] = [Phase::Frontend, Phase::Backend, Phase::Linker];

    /// Sub-phases nested inside the frontend.
    pub const INNER: [Phase; 3] = [Phase::Borrowck, Phase::Typeck, Phase::Metadata];

    /// Position in [`Phase::ALL`].
    pub fn index(self) -> usize {
        match self {
            Self::Frontend => 0,
            Self::Backend => 1,
            Self::Linker => 2,
            Self::Borrowck => 3,
            Self::Typeck => 4,
            Self::Metadata => 5,
        }
    }

    /// Column name in the results table.
    pub fn column(self) -> &'static str {
        match self {
            Self::Frontend => "frontend",
            Self::Backend => "backend",
            Self::Linker => "linker",
            Self::Borrowck => "borrowck",
            Self::Typeck => "typeck",
            Self::Metadata => "metadata",
        }
    }

    pub fn is_inner(self) -> bool {
        Self::INNER.contains(&self)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.column())
    }
}

/// One value per phase, indexed by [`Phase`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PhaseValues {
    pub frontend: f64,
    pub backend: f64,
    pub linker: f64,
    pub borrowck: f64,
    pub typeck: f64,
    pub metadata: f64,
}

impl PhaseValues {
    /// Every field set to `value`.
    pub fn splat(value: f64) -> Self {
        Self::from_fn(|_| value)
    }

    pub fn from_fn(mut f: impl FnMut(Phase) -> f64) -> Self {
        Self {
            frontend: f(Phase::Frontend),
            backend: f(Phase::Backend),
            linker: f(Phase::Linker),
            borrowck: f(Phase::Borrowck),
            typeck: f(Phase::Typeck),
            metadata: f(Phase::Metadata),
        }
    }

    pub fn get(&self, phase: Phase) -> f64 {
        match phase {
            Phase::Frontend => self.frontend,
            Phase::Backend => self.backend,
            Phase::Linker => self.linker,
            Phase::Borrowck => self.borrowck,
            Phase::Typeck => self.typeck,
            Phase::Metadata => self.metadata,
        }
    }

    pub fn map(&self, mut f: impl FnMut(Phase, f64) -> f64) -> Self {
        Self::from_fn(|phase| f(phase, self.get(phase)))
    }

    /// `frontend + backend + linker`.
    pub fn outer_sum(&self) -> f64 {
        Phase::OUTER.into_iter().map(|p| self.get(p)).sum()
    }

    /// `borrowck + typeck + metadata`.
    pub fn inner_sum(&self) -> f64 {
        Phase::INNER.into_iter().map(|p| self.get(p)).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Phase, f64)> + '_ {
        Phase::ALL.into_iter().map(|phase| (phase, self.get(phase)))
    }
}
