use std::fmt;

use serde::{Deserialize, Serialize};

/// Event time.
///
/// A plain unsigned tick count with no wall-clock meaning. Producers only
/// guarantee that timestamps never decrease within their own partition.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(u32);

impl Timestamp {
    /// Create a timestamp from a raw tick count.
    pub const fn new(ticks: u32) -> Self {
        Self(ticks)
    }

    /// The zero timestamp.
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Raw tick count.
    pub const fn ticks(&self) -> u32 {
        self.0
    }

    /// Advance by `delta` ticks, saturating at `u32::MAX`.
    pub fn saturating_add(&self, delta: u32) -> Self {
        Self(self.0.saturating_add(delta))
    }
}

impl From<u32> for Timestamp {
    fn from(ticks: u32) -> Self {
        Self(ticks)
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timestamp({})", self.0)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}

/// A single event held in an [`EventStore`](crate::EventStore).
///
/// Events are never modified after they are appended; merges only ever read
/// the timestamp to decide ordering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Event {
    /// Opaque producer data.
    pub payload: i32,
    /// Ordering key.
    pub timestamp: Timestamp,
}

impl Event {
    pub fn new(payload: i32, ticks: u32) -> Self {
        Self {
            payload,
            timestamp: Timestamp::new(ticks),
        }
    }
}
