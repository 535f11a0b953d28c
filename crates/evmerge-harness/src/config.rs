use std::path::Path;

use serde::{Deserialize, Serialize};

use evmerge_engine::MergeOptions;

use crate::error::{HarnessError, HarnessResult};

/// Shape of randomly generated workloads.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkloadConfig {
    /// Exclusive upper bound on the partition count. At least one partition
    /// is always generated.
    pub max_partitions: usize,
    /// Exclusive upper bound on events added on top of one per partition.
    pub max_extra_events: usize,
    /// Exclusive upper bound on the timestamp step between neighbours.
    pub max_increment: u32,
    /// Fixed RNG seed. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            max_partitions: 256,
            max_extra_events: 8192,
            max_increment: 10,
            seed: None,
        }
    }
}

impl WorkloadConfig {
    /// Reject bounds the generator cannot sample from.
    pub fn validate(&self) -> HarnessResult<()> {
        if self.max_partitions == 0 {
            return Err(HarnessError::InvalidConfig(
                "max_partitions must be at least 1".into(),
            ));
        }
        if self.max_extra_events == 0 {
            return Err(HarnessError::InvalidConfig(
                "max_extra_events must be at least 1".into(),
            ));
        }
        if self.max_increment == 0 {
            return Err(HarnessError::InvalidConfig(
                "max_increment must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Everything a harness run needs, loadable from a TOML file:
///
/// ```toml
/// iterations = 4
///
/// [workload]
/// max_partitions = 64
/// seed = 20091972
///
/// [merge]
/// check_sorted = true
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    pub workload: WorkloadConfig,
    pub merge: MergeOptions,
    /// Number of workloads to generate and merge per run.
    pub iterations: usize,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            workload: WorkloadConfig::default(),
            merge: MergeOptions::default(),
            iterations: 1,
        }
    }
}

impl HarnessConfig {
    /// Load and validate a config file.
    pub fn load(path: &Path) -> HarnessResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&text).map_err(|source| HarnessError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> HarnessResult<()> {
        if self.iterations == 0 {
            return Err(HarnessError::InvalidConfig(
                "iterations must be at least 1".into(),
            ));
        }
        self.workload.validate()
    }
}
