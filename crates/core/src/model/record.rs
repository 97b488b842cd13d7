use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::phase::{Phase, PhaseValues};

/// Tolerance, in percentage points, for the share invariants.
pub const SHARE_TOLERANCE: f64 = 1e-4;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {field} `{value}`")]
pub struct ParseFieldError {
    pub field: &'static str,
    pub value: String,
}

/// Build configuration a benchmark was compiled with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Profile {
    Check,
    Debug,
    Opt,
}

impl Profile {
    /// Facet row order.
    pub const ALL: [Profile; 3] = [Profile::Check, Profile::Debug, Profile::Opt];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Check => "Check",
            Self::Debug => "Debug",
            Self::Opt => "Opt",
        }
    }
}

/// Incremental-compilation condition of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Scenario {
    Full,
    IncrFull,
    IncrPatched0,
    IncrUnchanged,
}

impl Scenario {
    /// Facet column order.
    pub const ALL: [Scenario; 4] = [
        Scenario::Full,
        Scenario::IncrFull,
        Scenario::IncrPatched0,
        Scenario::IncrUnchanged,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Full => "Full",
            Self::IncrFull => "IncrFull",
            Self::IncrPatched0 => "IncrPatched0",
            Self::IncrUnchanged => "IncrUnchanged",
        }
    }
}

/// Whether the benchmark's primary target is a binary or a library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    Bin,
    Lib,
}

impl TargetKind {
    pub const ALL: [TargetKind; 2] = [TargetKind::Bin, TargetKind::Lib];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bin => "bin",
            Self::Lib => "lib",
        }
    }
}

macro_rules! text_enum {
    ($ty:ty, $field:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = ParseFieldError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$ty>::ALL
                    .into_iter()
                    .find(|v| v.as_str().eq_ignore_ascii_case(s.trim()))
                    .ok_or_else(|| ParseFieldError {
                        field: $field,
                        value: s.to_string(),
                    })
            }
        }
    };
}

text_enum!(Profile, "profile");
text_enum!(Scenario, "scenario");
text_enum!(TargetKind, "kind");

/// One profiling run with absolute phase durations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub benchmark: String,
    pub profile: Profile,
    pub scenario: Scenario,
    pub kind: TargetKind,
    /// Durations in whatever unit the collector wrote; only ratios matter.
    pub durations: PhaseValues,
}

impl Record {
    /// `frontend + backend + linker`.
    pub fn total(&self) -> f64 {
        self.durations.outer_sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ShareError {
    #[error("share is undefined (zero total duration)")]
    Undefined,
    #[error("{phase} share is negative ({value}%)")]
    Negative { phase: Phase, value: f64 },
    #[error("frontend + backend + linker = {sum}%, expected 100%")]
    OuterSum { sum: f64 },
    #[error("borrowck + typeck + metadata = {inner}% exceeds frontend {frontend}%")]
    InnerExceedsFrontend { inner: f64, frontend: f64 },
}

/// The six phase durations of one record as percentages of its total.
///
/// Build one with [`PhaseShares::new`], which enforces that the outer phases
/// sum to 100 and the sub-phases fit inside the frontend. The normalizer
/// builds them unchecked so that undefined shares can flow downstream.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PhaseValues", into = "PhaseValues")]
pub struct PhaseShares(PhaseValues);

impl TryFrom<PhaseValues> for PhaseShares {
    type Error = ShareError;

    fn try_from(values: PhaseValues) -> Result<Self, Self::Error> {
        Self::new(values)
    }
}

impl From<PhaseShares> for PhaseValues {
    fn from(shares: PhaseShares) -> Self {
        shares.0
    }
}

impl PhaseShares {
    pub fn new(values: PhaseValues) -> Result<Self, ShareError> {
        let shares = Self(values);
        shares.check()?;
        Ok(shares)
    }

    pub(crate) fn new_unchecked(values: PhaseValues) -> Self {
        Self(values)
    }

    /// Verify the share invariants.
    pub fn check(&self) -> Result<(), ShareError> {
        let v = &self.0;
        if v.iter().any(|(_, x)| x.is_nan()) {
            return Err(ShareError::Undefined);
        }
        if let Some((phase, value)) = v.iter().find(|(_, x)| *x < 0.0) {
            return Err(ShareError::Negative { phase, value });
        }
        let sum = v.outer_sum();
        if (sum - 100.0).abs() > SHARE_TOLERANCE {
            return Err(ShareError::OuterSum { sum });
        }
        let inner = v.inner_sum();
        if inner > v.frontend + SHARE_TOLERANCE {
            return Err(ShareError::InnerExceedsFrontend {
                inner,
                frontend: v.frontend,
            });
        }
        Ok(())
    }

    pub fn get(&self, phase: Phase) -> f64 {
        self.0.get(phase)
    }

    pub fn values(&self) -> &PhaseValues {
        &self.0
    }

    /// Whether every share is a number (the record had a non-zero total).
    pub fn is_defined(&self) -> bool {
        self.0.iter().all(|(_, x)| !x.is_nan())
    }
}

/// A record whose durations were rewritten as percentages of its total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    pub benchmark: String,
    pub profile: Profile,
    pub scenario: Scenario,
    pub kind: TargetKind,
    pub shares: PhaseShares,
}
