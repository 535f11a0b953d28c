//! Random workloads with per-partition sorted timestamps.
//!
//! Partitions are laid out back to back in one store. Each starts at
//! timestamp zero and accumulates non-negative random steps, which is all
//! the merge requires of its input.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use evmerge_types::{Event, EventStore, Partition, PartitionSet, Timestamp, Workload};

use crate::config::WorkloadConfig;
use crate::error::HarnessResult;

/// RNG for `config`: seeded when a seed is set, from OS entropy otherwise.
pub fn rng_for(config: &WorkloadConfig) -> StdRng {
    match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Generate a workload with a random partition count below
/// `config.max_partitions` (but at least one).
pub fn generate<R: Rng>(config: &WorkloadConfig, rng: &mut R) -> HarnessResult<Workload> {
    config.validate()?;
    let partitions = rng.gen_range(0..config.max_partitions).max(1);
    Ok(build(config, partitions, rng))
}

/// Generate a workload with exactly `partitions` partitions.
pub fn generate_with_partitions<R: Rng>(
    config: &WorkloadConfig,
    partitions: usize,
    rng: &mut R,
) -> HarnessResult<Workload> {
    config.validate()?;
    Ok(build(config, partitions.max(1), rng))
}

fn build<R: Rng>(config: &WorkloadConfig, partition_count: usize, rng: &mut R) -> Workload {
    // Each partition draws fewer than `average` extra events, so the store
    // never grows past `total`.
    let total = partition_count + rng.gen_range(0..config.max_extra_events);
    let average = total / partition_count;

    let mut store = EventStore::with_capacity(total);
    let mut partitions = PartitionSet::with_capacity(partition_count);

    for _ in 0..partition_count {
        let start = store.len();
        let len = 1 + rng.gen_range(0..average);
        let mut ts = Timestamp::zero();
        for _ in 0..len {
            ts = ts.saturating_add(rng.gen_range(0..config.max_increment));
            let payload = i32::try_from(store.len()).unwrap_or(i32::MAX);
            store.push(Event {
                payload,
                timestamp: ts,
            });
        }
        partitions.push(Partition::from_len(start, len));
    }

    debug!(
        events = store.len(),
        partitions = partitions.len(),
        "generated workload"
    );
    Workload::new(store, partitions)
}
