//! Timed generate → merge → verify runs.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use evmerge_engine::{verify, MergeEngine, MergeOptions};
use evmerge_types::Workload;

use crate::config::HarnessConfig;
use crate::error::HarnessResult;
use crate::generator::{generate, rng_for};

/// Outcome of merging one workload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    /// Events in the store.
    pub events: usize,
    /// Partitions the merge started with.
    pub partitions: usize,
    /// Wall time spent inside the merge call only.
    pub elapsed_ns: u64,
    pub comparisons: u64,
    pub verified: bool,
    /// Why verification failed, if it did.
    pub failure: Option<String>,
}

/// Generate `config.iterations` workloads from one RNG stream and merge each.
pub fn run(config: &HarnessConfig) -> HarnessResult<Vec<RunReport>> {
    config.validate()?;
    let mut rng = rng_for(&config.workload);
    (0..config.iterations)
        .map(|_| {
            let workload = generate(&config.workload, &mut rng)?;
            run_workload(&workload, &config.merge)
        })
        .collect()
}

/// Merge a copy of `workload`'s partitions, timing the merge and verifying
/// its output against the untouched originals.
pub fn run_workload(workload: &Workload, options: &MergeOptions) -> HarnessResult<RunReport> {
    let engine = MergeEngine::new(options.clone());
    let mut partitions = workload.partitions.clone();
    let mut indices = Vec::new();

    let started = Instant::now();
    let stats = engine.merge_into(&workload.store, &mut partitions, &mut indices)?;
    let elapsed_ns = u64::try_from(started.elapsed().as_nanos()).unwrap_or(u64::MAX);

    let failure = match verify(&workload.store, &workload.partitions, &indices) {
        Ok(()) => None,
        Err(e) => {
            warn!(error = %e, "merged sequence failed verification");
            Some(e.to_string())
        }
    };

    info!(
        events = workload.store.len(),
        partitions = stats.partitions_merged,
        elapsed_ns,
        verified = failure.is_none(),
        "merge run finished"
    );

    Ok(RunReport {
        events: workload.store.len(),
        partitions: stats.partitions_merged,
        elapsed_ns,
        comparisons: stats.comparisons,
        verified: failure.is_none(),
        failure,
    })
}
