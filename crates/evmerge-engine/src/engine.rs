//! The k-way merge itself.
//!
//! [`MergeEngine`] repeatedly scans the live partition heads, emits the index
//! of the earliest one, and advances that partition. It stops once every
//! partition is exhausted.
//!
//! # Invariants
//!
//! - Every index emitted belongs to exactly one input partition, and each is
//!   emitted once.
//! - The emitted timestamps never decrease, provided each partition is
//!   internally sorted and no two partitions overlap.
//! - On success the partition set is left empty; on error it is untouched.
//!
//! # Concurrency
//!
//! A merge borrows the store immutably and the partition set mutably. Any
//! number of merges over disjoint partition sets may share one store; a
//! single partition set can only ever be merged by one caller at a time.

use serde::{Deserialize, Serialize};
use tracing::debug;

use evmerge_types::{Event, EventStore, Partition, PartitionSet};

use crate::error::{MergeError, MergeResult};
use crate::options::MergeOptions;

/// Counters collected while merging.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeStats {
    /// Indices appended to the output.
    pub events_merged: usize,
    /// Live partitions the merge started with.
    pub partitions_merged: usize,
    /// Head timestamp comparisons performed by the scan.
    pub comparisons: u64,
}

/// Linear-scan k-way merge over partitions of one event store.
#[derive(Clone, Debug, Default)]
pub struct MergeEngine {
    options: MergeOptions,
}

impl MergeEngine {
    pub fn new(options: MergeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &MergeOptions {
        &self.options
    }

    /// Merge `partitions` into a freshly allocated index sequence.
    pub fn merge(
        &self,
        store: &EventStore,
        partitions: &mut PartitionSet,
    ) -> MergeResult<Vec<usize>> {
        let mut out = Vec::new();
        self.merge_into(store, partitions, &mut out)?;
        Ok(out)
    }

    /// Merge `partitions`, appending the ordered indices to `out`.
    ///
    /// `out` is only grown once validation has passed, so a rejected call
    /// never allocates for the claimed partition sizes. It is not cleared
    /// first. Partitions are drained in place: cursors
    /// advance and exhausted partitions are swap-removed, so the set is
    /// empty when this returns `Ok`.
    ///
    /// Ties between equal head timestamps go to the partition earliest in
    /// the set's current order. Because removal moves the last partition
    /// into the vacated slot, that order shifts as partitions run out; the
    /// result is deterministic for a given initial arrangement, but equal
    /// timestamps from different partitions are not emitted in any fixed
    /// partition order.
    pub fn merge_into(
        &self,
        store: &EventStore,
        partitions: &mut PartitionSet,
        out: &mut Vec<usize>,
    ) -> MergeResult<MergeStats> {
        self.validate(store, partitions)?;

        if !self.options.reject_empty {
            let dropped = partitions.retain_live();
            if dropped > 0 {
                debug!(dropped, "dropped exhausted partitions before merge");
            }
        }

        let events = store.as_slice();
        let total = partitions.total_events();
        let mut stats = MergeStats {
            partitions_merged: partitions.len(),
            ..MergeStats::default()
        };
        debug!(
            partitions = stats.partitions_merged,
            events = total,
            "merge started"
        );

        out.reserve(total);
        let start_len = out.len();

        while !partitions.is_empty() {
            let live = partitions.as_mut_slice();
            stats.comparisons += (live.len() - 1) as u64;
            let best = select_earliest(events, live);

            let partition = &mut live[best];
            if let Some(index) = partition.advance() {
                out.push(index);
                debug_assert!(
                    partition.is_exhausted()
                        || events[partition.cursor()].timestamp >= events[index].timestamp,
                    "partition ending at {} is not sorted at index {}",
                    partition.end(),
                    partition.cursor(),
                );
            }
            let exhausted = partition.is_exhausted();
            if exhausted {
                partitions.swap_remove(best);
            }
        }

        stats.events_merged = out.len() - start_len;
        debug!(
            events = stats.events_merged,
            comparisons = stats.comparisons,
            "merge complete"
        );
        Ok(stats)
    }

    /// Run the configured checks without mutating anything.
    pub fn validate(&self, store: &EventStore, partitions: &PartitionSet) -> MergeResult<()> {
        let store_len = store.len();
        for (position, p) in partitions.iter().enumerate() {
            if p.end() > store_len {
                return Err(MergeError::OutOfBounds {
                    position,
                    end: p.end(),
                    store_len,
                });
            }
            if self.options.reject_empty && p.is_exhausted() {
                return Err(MergeError::EmptyPartition {
                    position,
                    cursor: p.cursor(),
                    end: p.end(),
                });
            }
        }

        if self.options.check_overlap {
            check_overlap(partitions)?;
        }
        if self.options.check_sorted {
            check_sorted(store.as_slice(), partitions)?;
        }
        Ok(())
    }
}

/// Merge with [`MergeOptions::default`].
pub fn merge(store: &EventStore, partitions: &mut PartitionSet) -> MergeResult<Vec<usize>> {
    MergeEngine::default().merge(store, partitions)
}

/// Position of the partition whose head is earliest. Strict `<` keeps the
/// first one found on ties.
///
/// `live` must be non-empty and every partition in it live and in bounds.
fn select_earliest(events: &[Event], live: &[Partition]) -> usize {
    let mut best = 0;
    let mut best_ts = events[live[0].cursor()].timestamp;
    for (position, p) in live.iter().enumerate().skip(1) {
        let ts = events[p.cursor()].timestamp;
        if ts < best_ts {
            best = position;
            best_ts = ts;
        }
    }
    best
}

fn check_overlap(partitions: &PartitionSet) -> MergeResult<()> {
    let mut ranges: Vec<(usize, usize, usize)> = partitions
        .iter()
        .enumerate()
        .filter(|(_, p)| !p.is_exhausted())
        .map(|(position, p)| (p.cursor(), p.end(), position))
        .collect();
    ranges.sort_unstable();

    for pair in ranges.windows(2) {
        let (_, end, first) = pair[0];
        let (start, _, second) = pair[1];
        if start < end {
            return Err(MergeError::OverlappingPartitions {
                first: first.min(second),
                second: first.max(second),
            });
        }
    }
    Ok(())
}

fn check_sorted(events: &[Event], partitions: &PartitionSet) -> MergeResult<()> {
    for (position, p) in partitions.iter().enumerate() {
        let slice = &events[p.range()];
        if let Some(offset) = slice
            .windows(2)
            .position(|w| w[1].timestamp < w[0].timestamp)
        {
            return Err(MergeError::UnsortedPartition {
                position,
                index: p.cursor() + offset + 1,
            });
        }
    }
    Ok(())
}
