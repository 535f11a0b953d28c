//! Property tests for the merge over randomly shaped, well-formed inputs.

use proptest::prelude::*;

use evmerge_types::{Event, EventStore, Partition, PartitionSet};

use crate::engine::{merge, MergeEngine};
use crate::options::MergeOptions;
use crate::verify::verify;

/// Per-partition timestamp increments. Each inner vec becomes one
/// contiguous, non-empty, sorted partition.
fn increments() -> impl Strategy<Value = Vec<Vec<u32>>> {
    prop::collection::vec(prop::collection::vec(0u32..5, 1..24), 0..12)
}

/// Lay partitions out contiguously, then list them in the set in reverse
/// (or forward) so scan order does not simply follow store order.
fn build(increments: &[Vec<u32>], reverse: bool) -> (EventStore, PartitionSet) {
    let mut store = EventStore::new();
    let mut partitions = Vec::with_capacity(increments.len());
    for steps in increments {
        let start = store.len();
        let mut ts = 0u32;
        for &step in steps {
            ts += step;
            let payload = store.len() as i32;
            store.push(Event::new(payload, ts));
        }
        partitions.push(Partition::from_len(start, steps.len()));
    }
    if reverse {
        partitions.reverse();
    }
    (store, partitions.into())
}

proptest! {
    #[test]
    fn output_is_complete_and_ordered(incs in increments(), reverse in any::<bool>()) {
        let (store, partitions) = build(&incs, reverse);
        let snapshot = partitions.clone();
        let mut set = partitions;

        let out = merge(&store, &mut set).unwrap();

        prop_assert_eq!(out.len(), snapshot.total_events());
        prop_assert!(verify(&store, &snapshot, &out).is_ok());
    }

    #[test]
    fn partitions_are_drained(incs in increments()) {
        let (store, mut set) = build(&incs, false);
        merge(&store, &mut set).unwrap();
        prop_assert!(set.is_empty());
    }

    #[test]
    fn store_is_untouched(incs in increments()) {
        let (store, mut set) = build(&incs, true);
        let before = store.clone();
        merge(&store, &mut set).unwrap();
        prop_assert_eq!(store, before);
    }

    #[test]
    fn repeated_merges_agree(incs in increments(), reverse in any::<bool>()) {
        let (store, set) = build(&incs, reverse);
        let first = merge(&store, &mut set.clone()).unwrap();
        let second = merge(&store, &mut set.clone()).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn timestamps_match_a_full_sort(incs in increments()) {
        let (store, mut set) = build(&incs, true);
        let out = merge(&store, &mut set).unwrap();

        let merged: Vec<u32> = out
            .iter()
            .map(|&i| store.as_slice()[i].timestamp.ticks())
            .collect();
        let mut sorted: Vec<u32> = store.iter().map(|e| e.timestamp.ticks()).collect();
        sorted.sort_unstable();
        prop_assert_eq!(merged, sorted);
    }

    #[test]
    fn strict_validation_accepts_well_formed_input(incs in increments(), reverse in any::<bool>()) {
        let (store, set) = build(&incs, reverse);
        let engine = MergeEngine::new(MergeOptions::strict());
        prop_assert!(engine.validate(&store, &set).is_ok());
    }
}
