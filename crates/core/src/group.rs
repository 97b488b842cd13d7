use serde::Serialize;

use crate::aggregate::{AggregatedMeans, aggregate};
use crate::layout::{NestedStack, layout};
use crate::model::NormalizedRecord;
use crate::select::GroupKey;

/// One filtered view carried through aggregation and layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupLayout {
    pub key: GroupKey,
    pub means: AggregatedMeans,
    pub stack: NestedStack,
}

impl GroupLayout {
    /// Select, aggregate and lay out the rows matching `key`.
    pub fn compute(records: &[NormalizedRecord], key: &GroupKey) -> Self {
        let means = aggregate(key.select(records));
        if means.is_empty() {
            tracing::debug!(%key, "no rows match group");
        }
        let stack = layout(&means.means);
        Self {
            key: key.clone(),
            means,
            stack,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Phase, PhaseShares, PhaseValues, Profile, Scenario, TargetKind};

    fn row(profile: Profile, backend: f64) -> NormalizedRecord {
        NormalizedRecord {
            benchmark: "ripgrep-14.1.0".into(),
            profile,
            scenario: Scenario::Full,
            kind: TargetKind::Bin,
            shares: PhaseShares::new_unchecked(PhaseValues {
                frontend: 90.0 - backend,
                backend,
                linker: 10.0,
                borrowck: 5.0,
                typeck: 5.0,
                metadata: 1.0,
            }),
        }
    }

    #[test]
    fn computes_only_the_selected_rows() {
        let rows = [row(Profile::Debug, 30.0), row(Profile::Opt, 60.0)];
        let key = GroupKey::all().with_profile(Profile::Opt);
        let group = GroupLayout::compute(&rows, &key);
        assert_eq!(group.means.rows, 1);
        assert_eq!(group.means.get(Phase::Backend), 60.0);
        let borrowck = group.stack.segment(Phase::Borrowck).map(|s| s.offset);
        assert_eq!(borrowck, Some(70.0));
    }

    #[test]
    fn empty_group_still_lays_out() {
        let rows = [row(Profile::Debug, 30.0)];
        let key = GroupKey::all().with_profile(Profile::Check);
        let group = GroupLayout::compute(&rows, &key);
        assert!(group.means.is_empty());
        assert_eq!(group.stack.segments().len(), 6);
    }

    #[test]
    fn json_writes_undefined_means_as_null() {
        let rows = [row(Profile::Debug, 30.0)];
        let empty = GroupLayout::compute(&rows, &GroupKey::all().with_profile(Profile::Check));
        let json = serde_json::to_value(&empty).unwrap();
        assert_eq!(json["key"]["profile"], "Check");
        assert_eq!(json["means"]["rows"], 0);
        assert!(json["means"]["means"]["backend"].is_null());

        let full = GroupLayout::compute(&rows, &GroupKey::all());
        let json = serde_json::to_value(&full).unwrap();
        assert_eq!(json["means"]["means"]["backend"], 30.0);
    }
}
