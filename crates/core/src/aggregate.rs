//! Per-phase means over a filtered view.

use serde::{Deserialize, Serialize};

use crate::model::{NormalizedRecord, Phase, PhaseValues};

/// Mean percentage of each phase over a group of normalized records.
///
/// Each mean is taken over the rows where that phase is defined, so a
/// record with an undefined (NaN) share does not poison the group. An
/// empty group has NaN for every phase.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AggregatedMeans {
    pub means: PhaseValues,
    /// Number of rows that went into the group.
    pub rows: usize,
}

impl AggregatedMeans {
    pub fn get(&self, phase: Phase) -> f64 {
        self.means.get(phase)
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }
}

/// Reduce a group of records to its six means.
pub fn aggregate<'a, I>(rows: I) -> AggregatedMeans
where
    I: IntoIterator<Item = &'a NormalizedRecord>,
{
    let mut sums = [0.0_f64; 6];
    let mut counts = [0_usize; 6];
    let mut total_rows = 0;

    for row in rows {
        total_rows += 1;
        for (phase, value) in row.shares.values().iter() {
            if value.is_nan() {
                continue;
            }
            sums[phase.index()] += value;
            counts[phase.index()] += 1;
        }
    }

    let means = PhaseValues::from_fn(|phase| {
        let i = phase.index();
        if counts[i] == 0 {
            f64::NAN
        } else {
            sums[i] / counts[i] as f64
        }
    });

    if total_rows == 0 {
        tracing::debug!("aggregating an empty group");
    }

    AggregatedMeans {
        means,
        rows: total_rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PhaseShares, Profile, Scenario, TargetKind};

    fn normalized(v: PhaseValues) -> NormalizedRecord {
        NormalizedRecord {
            benchmark: "ripgrep-14.1.0".into(),
            profile: Profile::Debug,
            scenario: Scenario::Full,
            kind: TargetKind::Bin,
            shares: PhaseShares::new_unchecked(v),
        }
    }

    fn shares(fe: f64, be: f64, ld: f64, bc: f64, tc: f64, md: f64) -> PhaseValues {
        PhaseValues {
            frontend: fe,
            backend: be,
            linker: ld,
            borrowck: bc,
            typeck: tc,
            metadata: md,
        }
    }

    #[test]
    fn single_row_returns_its_own_shares() {
        let v = shares(61.3, 27.9, 10.8, 12.1, 22.2, 3.3);
        let rows = [normalized(v)];
        let agg = aggregate(&rows);
        assert_eq!(agg.means, v);
        assert_eq!(agg.rows, 1);
    }

    #[test]
    fn means_each_phase_independently() {
        let rows = [
            normalized(shares(60.0, 30.0, 10.0, 20.0, 25.0, 5.0)),
            normalized(shares(80.0, 10.0, 10.0, 40.0, 15.0, 1.0)),
        ];
        let agg = aggregate(&rows);
        assert_eq!(agg.get(Phase::Frontend), 70.0);
        assert_eq!(agg.get(Phase::Backend), 20.0);
        assert_eq!(agg.get(Phase::Linker), 10.0);
        assert_eq!(agg.get(Phase::Borrowck), 30.0);
        assert_eq!(agg.get(Phase::Typeck), 20.0);
        assert_eq!(agg.get(Phase::Metadata), 3.0);
    }

    #[test]
    fn undefined_rows_are_skipped_per_phase() {
        let rows = [
            normalized(shares(60.0, 30.0, 10.0, 20.0, 25.0, 5.0)),
            normalized(PhaseValues::splat(f64::NAN)),
        ];
        let agg = aggregate(&rows);
        assert_eq!(agg.rows, 2);
        assert_eq!(agg.get(Phase::Backend), 30.0);
    }

    #[test]
    fn missing_field_is_averaged_over_the_rows_that_have_it() {
        let rows = [
            normalized(shares(60.0, 30.0, 10.0, 20.0, 25.0, 5.0)),
            normalized(shares(80.0, 10.0, 10.0, 40.0, 15.0, f64::NAN)),
            normalized(shares(70.0, 20.0, 10.0, 30.0, 20.0, 3.0)),
        ];
        let agg = aggregate(&rows);
        assert_eq!(agg.rows, 3);
        assert_eq!(agg.get(Phase::Metadata), 4.0);
        assert_eq!(agg.get(Phase::Frontend), 70.0);
        assert_eq!(agg.get(Phase::Backend), 20.0);
        assert_eq!(agg.get(Phase::Linker), 10.0);
        assert_eq!(agg.get(Phase::Borrowck), 30.0);
        assert_eq!(agg.get(Phase::Typeck), 20.0);
    }

    #[test]
    fn empty_group_is_all_nan() {
        let agg = aggregate(std::iter::empty());
        assert!(agg.is_empty());
        for phase in Phase::ALL {
            assert!(agg.get(phase).is_nan(), "{phase}");
        }
    }
}
