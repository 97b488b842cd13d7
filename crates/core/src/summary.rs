use std::collections::{BTreeMap, BTreeSet};

use crate::model::TargetKind;
use crate::select::Categorized;

/// Number of distinct benchmarks of each target kind.
pub fn benchmarks_per_kind<T: Categorized>(rows: &[T]) -> BTreeMap<TargetKind, usize> {
    let mut seen: BTreeSet<(&str, TargetKind)> = BTreeSet::new();
    for row in rows {
        seen.insert((row.benchmark(), row.kind()));
    }
    let mut counts = BTreeMap::new();
    for (_, kind) in seen {
        *counts.entry(kind).or_default() += 1;
    }
    counts
}
