//! Foundation types for evmerge.
//!
//! This crate provides the data model shared by every other evmerge crate:
//! the events themselves, the append-only buffer that holds them, and the
//! half-open ranges that carve that buffer into independently ordered
//! partitions.
//!
//! # Key Types
//!
//! - [`Timestamp`] — Unsigned event time; the only ordering key the merge uses
//! - [`Event`] — Immutable `(payload, timestamp)` record
//! - [`EventStore`] — Append-only buffer of events, borrowed read-only by merges
//! - [`Partition`] — Half-open `[cursor, end)` range over the store
//! - [`PartitionSet`] — Contiguous, unordered collection of live partitions
//! - [`Workload`] — A store plus the partitions that cover it

pub mod error;
pub mod event;
pub mod partition;
pub mod store;
pub mod workload;

pub use error::TypeError;
pub use event::{Event, Timestamp};
pub use partition::{Partition, PartitionSet, PartitionState};
pub use store::EventStore;
pub use workload::Workload;
