//! Property tests for enablement diffing.

use std::collections::BTreeSet;

use proptest::prelude::*;

use ezproxy::domain::entities::EnablementMap;
use ezproxy::domain::services::StateDiff;

const NAMES: [&str; 8] = [
    "system_ca", "env_vars", "git", "pip", "npm", "docker", "apt", "ssh",
];

fn stored() -> impl Strategy<Value = EnablementMap> {
    proptest::collection::vec(proptest::option::of(any::<bool>()), NAMES.len()).prop_map(|states| {
        let mut map = EnablementMap::new();
        for (name, state) in NAMES.iter().zip(states) {
            if let Some(on) = state {
                map.set(*name, on);
            }
        }
        map
    })
}

fn selection() -> impl Strategy<Value = Vec<bool>> {
    proptest::collection::vec(any::<bool>(), NAMES.len())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: every desired name lands in exactly one bucket.
    #[test]
    fn property_buckets_partition_names(current in stored(), wanted in selection()) {
        let desired: Vec<(&str, bool)> = NAMES.iter().copied().zip(wanted).collect();
        let diff = StateDiff::compute(&current, desired);

        let all: Vec<&String> = diff
            .newly_enabled
            .iter()
            .chain(&diff.newly_disabled)
            .chain(&diff.unchanged)
            .collect();
        let unique: BTreeSet<&String> = all.iter().copied().collect();
        prop_assert_eq!(all.len(), NAMES.len());
        prop_assert_eq!(unique.len(), NAMES.len());
    }

    /// PROPERTY: the persisted map matches the selection, and deltas match flips.
    #[test]
    fn property_next_reflects_selection(current in stored(), wanted in selection()) {
        let desired: Vec<(&str, bool)> = NAMES.iter().copied().zip(wanted.clone()).collect();
        let diff = StateDiff::compute(&current, desired);

        for (name, on) in NAMES.iter().zip(wanted) {
            prop_assert_eq!(diff.next.is_enabled(name), on);
            let was = current.is_enabled(name);
            prop_assert_eq!(diff.newly_enabled.iter().any(|n| n == name), !was && on);
            prop_assert_eq!(diff.newly_disabled.iter().any(|n| n == name), was && !on);
        }
    }

    /// PROPERTY: re-diffing against the persisted map is empty.
    #[test]
    fn property_second_diff_is_empty(current in stored(), wanted in selection()) {
        let desired: Vec<(&str, bool)> = NAMES.iter().copied().zip(wanted).collect();
        let first = StateDiff::compute(&current, desired.clone());
        let second = StateDiff::compute(&first.next, desired);
        prop_assert!(second.is_empty());
    }
}
