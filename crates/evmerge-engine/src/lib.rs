//! Merge engine for evmerge.
//!
//! Given an [`EventStore`](evmerge_types::EventStore) and a set of
//! partitions, each already ordered by timestamp, the engine produces one
//! sequence of store indices in non-decreasing timestamp order. Events are
//! never copied or moved; only the index permutation is built.
//!
//! Selection is a flat linear scan over the live partition heads. Ties go to
//! the partition found first in scan order. Exhausted partitions are
//! swap-removed, which reorders the scan for later ties (but never changes
//! which timestamps are emitted).
//!
//! [`verify()`] checks an output sequence for ordering and completeness.

pub mod engine;
pub mod error;
pub mod options;
pub mod verify;

#[cfg(test)]
mod property_tests;

pub use engine::{merge, MergeEngine, MergeStats};
pub use error::{MergeError, MergeResult, VerifyError};
pub use options::MergeOptions;
pub use verify::{verify, verify_complete, verify_order};
