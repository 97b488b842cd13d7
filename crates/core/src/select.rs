//! Exact-match categorical filtering.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::{NormalizedRecord, Profile, Record, Scenario, TargetKind};

/// Rows that carry the four categorical columns.
pub trait Categorized {
    fn benchmark(&self) -> &str;
    fn profile(&self) -> Profile;
    fn scenario(&self) -> Scenario;
    fn kind(&self) -> TargetKind;
}

impl Categorized for Record {
    fn benchmark(&self) -> &str {
        &self.benchmark
    }
    fn profile(&self) -> Profile {
        self.profile
    }
    fn scenario(&self) -> Scenario {
        self.scenario
    }
    fn kind(&self) -> TargetKind {
        self.kind
    }
}

impl Categorized for NormalizedRecord {
    fn benchmark(&self) -> &str {
        &self.benchmark
    }
    fn profile(&self) -> Profile {
        self.profile
    }
    fn scenario(&self) -> Scenario {
        self.scenario
    }
    fn kind(&self) -> TargetKind {
        self.kind
    }
}

/// Identifies a filtered view: zero or more categorical values that a row
/// must match exactly. Unset fields impose no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupKey {
    pub profile: Option<Profile>,
    pub scenario: Option<Scenario>,
    pub kind: Option<TargetKind>,
    pub benchmark: Option<String>,
}

impl GroupKey {
    /// The key that matches every row.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.profile = Some(profile);
        self
    }

    pub fn with_scenario(mut self, scenario: Scenario) -> Self {
        self.scenario = Some(scenario);
        self
    }

    pub fn with_kind(mut self, kind: TargetKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn with_benchmark(mut self, benchmark: impl Into<String>) -> Self {
        self.benchmark = Some(benchmark.into());
        self
    }

    /// Logical AND of every predicate that is set.
    pub fn matches<T: Categorized>(&self, row: &T) -> bool {
        self.profile.is_none_or(|p| row.profile() == p)
            && self.scenario.is_none_or(|s| row.scenario() == s)
            && self.kind.is_none_or(|k| row.kind() == k)
            && self
                .benchmark
                .as_deref()
                .is_none_or(|b| row.benchmark() == b)
    }

    /// Rows satisfying the key, in input order. The input is left untouched.
    pub fn select<'a, T: Categorized>(&self, rows: &'a [T]) -> Vec<&'a T> {
        rows.iter().filter(|row| self.matches(*row)).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.profile.is_none()
            && self.scenario.is_none()
            && self.kind.is_none()
            && self.benchmark.is_none()
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("all");
        }
        let mut parts = Vec::with_capacity(4);
        if let Some(b) = &self.benchmark {
            parts.push(format!("benchmark={b}"));
        }
        if let Some(p) = self.profile {
            parts.push(format!("profile={p}"));
        }
        if let Some(s) = self.scenario {
            parts.push(format!("scenario={s}"));
        }
        if let Some(k) = self.kind {
            parts.push(format!("kind={k}"));
        }
        f.write_str(&parts.join(","))
    }
}
