//! Harness around the evmerge merge engine.
//!
//! Generates random workloads whose partitions satisfy the sortedness
//! precondition, times merges over them, verifies the results, and moves
//! workloads and index sequences to and from disk.

pub mod config;
pub mod error;
pub mod generator;
pub mod io;
pub mod runner;

pub use config::{HarnessConfig, WorkloadConfig};
pub use error::{HarnessError, HarnessResult};
pub use generator::{generate, generate_with_partitions, rng_for};
pub use runner::{run, run_workload, RunReport};
