use serde::{Deserialize, Serialize};

use crate::partition::PartitionSet;
use crate::store::EventStore;

/// An event store together with the partitions that carve it up.
///
/// This is the unit handed to a merge, and the shape persisted when a
/// workload is written to disk.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workload {
    pub store: EventStore,
    pub partitions: PartitionSet,
}

impl Workload {
    pub fn new(store: EventStore, partitions: PartitionSet) -> Self {
        Self { store, partitions }
    }

    /// Number of events the partitions cover.
    pub fn total_events(&self) -> usize {
        self.partitions.total_events()
    }
}
