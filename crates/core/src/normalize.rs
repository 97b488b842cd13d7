//! Absolute durations → percentages of each record's total.

use crate::model::{NormalizedRecord, PhaseShares, Record};

/// Rewrite one record's six durations as `value / total * 100`.
///
/// A zero total yields NaN shares rather than an error, so a single empty
/// run cannot abort a whole dataset. Callers that want to avoid this should
/// drop such records first with [`exclude_empty`]. An unmeasured (NaN)
/// sub-phase leaves only its own share undefined; an unmeasured outer phase
/// makes the total, and so every share, undefined.
pub fn normalize_record(record: &Record) -> NormalizedRecord {
    let total = record.total();
    let values = record.durations.map(|_, v| v / total * 100.0);
    let shares = PhaseShares::new_unchecked(values);

    if total == 0.0 {
        tracing::warn!(
            benchmark = %record.benchmark,
            profile = %record.profile,
            scenario = %record.scenario,
            "zero total duration, shares are undefined"
        );
    } else if !shares.is_defined() {
        tracing::debug!(
            benchmark = %record.benchmark,
            profile = %record.profile,
            scenario = %record.scenario,
            "record has unmeasured phases"
        );
    } else if let Err(err) = shares.check() {
        tracing::warn!(
            benchmark = %record.benchmark,
            profile = %record.profile,
            scenario = %record.scenario,
            %err,
            "normalized shares violate invariant"
        );
    }

    NormalizedRecord {
        benchmark: record.benchmark.clone(),
        profile: record.profile,
        scenario: record.scenario,
        kind: record.kind,
        shares,
    }
}

/// Normalize a whole dataset in one pass.
pub fn normalize(records: &[Record]) -> Vec<NormalizedRecord> {
    records.iter().map(normalize_record).collect()
}

/// Drop records whose total duration is zero. Returns the number removed.
///
/// Records with an unmeasured phase are kept; their gaps are skipped per
/// field when groups are averaged.
pub fn exclude_empty(records: &mut Vec<Record>) -> usize {
    let before = records.len();
    records.retain(|r| r.total() != 0.0);
    let removed = before - records.len();
    if removed > 0 {
        tracing::info!(removed, "excluded records with zero total duration");
    }
    removed
}
