//! Error types for merging and verification.

use evmerge_types::Timestamp;

/// Errors that reject a merge before any partition is touched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MergeError {
    /// A partition had no unconsumed events at call entry.
    #[error("partition #{position} is empty (cursor {cursor}, end {end})")]
    EmptyPartition {
        /// Position of the partition in the set.
        position: usize,
        cursor: usize,
        end: usize,
    },

    /// A partition reaches past the end of the event store.
    #[error("partition #{position} ends at {end} but the store holds {store_len} events")]
    OutOfBounds {
        position: usize,
        end: usize,
        store_len: usize,
    },

    /// Two partitions cover at least one common store index.
    #[error("partitions #{first} and #{second} overlap")]
    OverlappingPartitions { first: usize, second: usize },

    /// A partition's timestamps decrease at `index`.
    #[error("partition #{position} is not ordered by timestamp at store index {index}")]
    UnsortedPartition { position: usize, index: usize },
}

/// Convenience alias for merge results.
pub type MergeResult<T> = Result<T, MergeError>;

/// Ways an index sequence can fail verification.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VerifyError {
    #[error("expected {expected} indices, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// A merged partition reaches past the end of the store.
    #[error("partition #{position} ends at {end} but the store holds {store_len} events")]
    PartitionOutOfBounds {
        position: usize,
        end: usize,
        store_len: usize,
    },

    #[error("index {index} at position {position} is outside the store ({store_len} events)")]
    IndexOutOfBounds {
        position: usize,
        index: usize,
        store_len: usize,
    },

    /// Timestamp at `position` is earlier than the one before it.
    #[error("out of order at position {position}: {current} follows {previous}")]
    OutOfOrder {
        position: usize,
        previous: Timestamp,
        current: Timestamp,
    },

    #[error("index {index} appears more than once (again at position {position})")]
    DuplicateIndex { position: usize, index: usize },

    /// The index is in the store but in none of the merged partitions.
    #[error("index {index} at position {position} belongs to no partition")]
    ForeignIndex { position: usize, index: usize },
}
