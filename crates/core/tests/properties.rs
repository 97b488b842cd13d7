//! Property tests for normalization, selection, aggregation, and layout.

use phasestack_core::layout::AXIS_SPAN;
use phasestack_core::normalize::normalize_record;
use phasestack_core::{
    GroupKey, Layer, PhaseValues, Profile, Record, Scenario, TargetKind, aggregate, layout,
    normalize,
};
use proptest::prelude::*;

const TOL: f64 = 1e-4;

fn arb_profile() -> impl Strategy<Value = Profile> {
    prop::sample::select(Profile::ALL.to_vec())
}

fn arb_scenario() -> impl Strategy<Value = Scenario> {
    prop::sample::select(Scenario::ALL.to_vec())
}

fn arb_kind() -> impl Strategy<Value = TargetKind> {
    prop::sample::select(TargetKind::ALL.to_vec())
}

/// Durations with a positive total and sub-phases that fit in the frontend.
fn arb_durations() -> impl Strategy<Value = PhaseValues> {
    (
        1.0..1e9_f64,
        0.0..1e9_f64,
        0.0..1e9_f64,
        0.0..=1.0_f64,
        0.0..=1.0_f64,
        0.0..=1.0_f64,
    )
        .prop_map(|(frontend, backend, linker, a, b, c)| {
            // Split a random fraction of the frontend across the sub-phases.
            let weight = a + b + c;
            let budget = frontend * a.max(b).max(c);
            let part = |x: f64| if weight > 0.0 { budget * x / weight } else { 0.0 };
            PhaseValues {
                frontend,
                backend,
                linker,
                borrowck: part(a),
                typeck: part(b),
                metadata: part(c),
            }
        })
}

fn arb_record() -> impl Strategy<Value = Record> {
    (
        prop::sample::select(vec!["ripgrep-14.1.0", "diesel-1.4.8", "regex-automata-0.4.6"]),
        arb_profile(),
        arb_scenario(),
        arb_kind(),
        arb_durations(),
    )
        .prop_map(|(benchmark, profile, scenario, kind, durations)| Record {
            benchmark: benchmark.to_string(),
            profile,
            scenario,
            kind,
            durations,
        })
}

fn arb_key() -> impl Strategy<Value = GroupKey> {
    (
        prop::option::of(arb_profile()),
        prop::option::of(arb_scenario()),
        prop::option::of(arb_kind()),
        prop::option::of(prop::sample::select(vec!["ripgrep-14.1.0", "diesel-1.4.8"])),
    )
        .prop_map(|(profile, scenario, kind, benchmark)| GroupKey {
            profile,
            scenario,
            kind,
            benchmark: benchmark.map(str::to_string),
        })
}

proptest! {
    #[test]
    fn outer_shares_sum_to_hundred(record in arb_record()) {
        let n = normalize_record(&record);
        prop_assert!((n.shares.values().outer_sum() - 100.0).abs() < TOL);
    }

    #[test]
    fn sub_phases_fit_in_frontend(record in arb_record()) {
        let n = normalize_record(&record);
        let v = n.shares.values();
        prop_assert!(v.inner_sum() <= v.frontend + TOL);
    }

    #[test]
    fn selection_is_idempotent(records in prop::collection::vec(arb_record(), 0..40), key in arb_key()) {
        let data = normalize(&records);
        let once: Vec<_> = key.select(&data).into_iter().cloned().collect();
        let twice: Vec<_> = key.select(&once).into_iter().cloned().collect();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn single_record_group_is_exact(record in arb_record()) {
        let n = normalize_record(&record);
        let means = aggregate([&n]);
        prop_assert_eq!(means.means, *n.shares.values());
    }

    #[test]
    fn visible_outer_widths_cover_axis(records in prop::collection::vec(arb_record(), 1..20)) {
        let data = normalize(&records);
        let stack = layout(&aggregate(&data).means);
        let total: f64 = stack.visible_outer_widths().iter().map(|(_, w)| w).sum();
        prop_assert!((total - AXIS_SPAN).abs() < TOL);
        prop_assert!(!stack.overflows());
    }

    #[test]
    fn inner_segments_stay_on_axis(records in prop::collection::vec(arb_record(), 1..20)) {
        let data = normalize(&records);
        let stack = layout(&aggregate(&data).means);
        let mut cursor: Option<f64> = None;
        for segment in stack.inner() {
            prop_assert!(segment.end() <= AXIS_SPAN + TOL);
            if let Some(prev) = cursor {
                prop_assert!((segment.offset - prev).abs() < 1e-9);
            }
            cursor = Some(segment.end());
        }
        prop_assert_eq!(stack.outer().count(), 3);
        prop_assert!(stack.inner().all(|s| s.layer == Layer::Inner));
    }
}
