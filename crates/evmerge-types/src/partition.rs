use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Lifecycle of a partition. Transitions only from `Live` to `Exhausted`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartitionState {
    /// Unconsumed events remain (`cursor < end`).
    Live,
    /// Every event has been consumed (`cursor == end`).
    Exhausted,
}

/// Half-open range `[cursor, end)` over an [`EventStore`](crate::EventStore).
///
/// The cursor marks the first unconsumed event. Events inside the range are
/// expected to be ordered by non-decreasing timestamp; nothing here checks
/// that, it is the producer's guarantee.
///
/// `cursor <= end` always holds: construction rejects inverted ranges and
/// [`advance`](Partition::advance) never moves past `end`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPartition")]
pub struct Partition {
    cursor: usize,
    end: usize,
}

#[derive(Deserialize)]
struct RawPartition {
    cursor: usize,
    end: usize,
}

impl TryFrom<RawPartition> for Partition {
    type Error = TypeError;

    fn try_from(raw: RawPartition) -> Result<Self, Self::Error> {
        Self::new(raw.cursor, raw.end)
    }
}

impl Partition {
    /// Create a partition covering `[start, end)`.
    pub fn new(start: usize, end: usize) -> Result<Self, TypeError> {
        if start > end {
            return Err(TypeError::InvalidRange { start, end });
        }
        Ok(Self { cursor: start, end })
    }

    /// Create a partition of `len` events starting at `start`. The end
    /// saturates at `usize::MAX`.
    pub fn from_len(start: usize, len: usize) -> Self {
        Self {
            cursor: start,
            end: start.saturating_add(len),
        }
    }

    /// Index of the next unconsumed event.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// One past the last index of the partition.
    pub fn end(&self) -> usize {
        self.end
    }

    /// Number of unconsumed events.
    pub fn remaining(&self) -> usize {
        self.end - self.cursor
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor == self.end
    }

    pub fn state(&self) -> PartitionState {
        if self.is_exhausted() {
            PartitionState::Exhausted
        } else {
            PartitionState::Live
        }
    }

    /// The unconsumed index range.
    pub fn range(&self) -> Range<usize> {
        self.cursor..self.end
    }

    /// Consume the head event, returning its store index.
    ///
    /// Returns `None` once the partition is exhausted; the cursor is never
    /// moved past `end`.
    pub fn advance(&mut self) -> Option<usize> {
        if self.is_exhausted() {
            return None;
        }
        let index = self.cursor;
        self.cursor += 1;
        Some(index)
    }
}

/// Unordered collection of partitions backed by contiguous storage.
///
/// Removal is O(1) via [`swap_remove`](PartitionSet::swap_remove): the last
/// partition moves into the vacated slot. Callers that depend on scan order
/// must account for that reordering.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartitionSet {
    parts: Vec<Partition>,
}

impl PartitionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            parts: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, partition: Partition) {
        self.parts.push(partition);
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&Partition> {
        self.parts.get(position)
    }

    pub fn get_mut(&mut self, position: usize) -> Option<&mut Partition> {
        self.parts.get_mut(position)
    }

    pub fn as_slice(&self) -> &[Partition] {
        &self.parts
    }

    pub fn as_mut_slice(&mut self) -> &mut [Partition] {
        &mut self.parts
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Partition> {
        self.parts.iter()
    }

    /// Remove the partition at `position`, moving the last partition into
    /// its slot.
    ///
    /// # Panics
    ///
    /// Panics if `position` is out of bounds.
    pub fn swap_remove(&mut self, position: usize) -> Partition {
        self.parts.swap_remove(position)
    }

    /// Drop every exhausted partition, returning how many were removed.
    pub fn retain_live(&mut self) -> usize {
        let before = self.parts.len();
        self.parts.retain(|p| !p.is_exhausted());
        before - self.parts.len()
    }

    /// Total number of unconsumed events across all partitions, saturating
    /// at `usize::MAX`.
    pub fn total_events(&self) -> usize {
        self.parts
            .iter()
            .fold(0usize, |acc, p| acc.saturating_add(p.remaining()))
    }
}

impl From<Vec<Partition>> for PartitionSet {
    fn from(parts: Vec<Partition>) -> Self {
        Self { parts }
    }
}

impl FromIterator<Partition> for PartitionSet {
    fn from_iter<I: IntoIterator<Item = Partition>>(iter: I) -> Self {
        Self {
            parts: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a PartitionSet {
    type Item = &'a Partition;
    type IntoIter = std::slice::Iter<'a, Partition>;

    fn into_iter(self) -> Self::IntoIter {
        self.parts.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_inverted_range() {
        assert_eq!(
            Partition::new(5, 2),
            Err(TypeError::InvalidRange { start: 5, end: 2 })
        );
        assert!(Partition::new(3, 3).unwrap().is_exhausted());
    }

    #[test]
    fn advance_walks_to_end_then_stops() {
        let mut p = Partition::from_len(4, 2);
        assert_eq!(p.state(), PartitionState::Live);
        assert_eq!(p.remaining(), 2);
        assert_eq!(p.advance(), Some(4));
        assert_eq!(p.advance(), Some(5));
        assert_eq!(p.state(), PartitionState::Exhausted);
        assert_eq!(p.advance(), None);
        assert_eq!(p.cursor(), p.end());
        assert_eq!(p.range(), 6..6);
    }

    #[test]
    fn swap_remove_moves_last_into_slot() {
        let mut set: PartitionSet = vec![
            Partition::from_len(0, 1),
            Partition::from_len(1, 1),
            Partition::from_len(2, 1),
        ]
        .into();
        let removed = set.swap_remove(0);
        assert_eq!(removed.cursor(), 0);
        assert_eq!(set.len(), 2);
        assert_eq!(set.get(0).map(Partition::cursor), Some(2));
        assert_eq!(set.get(1).map(Partition::cursor), Some(1));
    }

    #[test]
    fn total_events_counts_remaining_only() {
        let mut first = Partition::from_len(0, 3);
        first.advance();
        let set: PartitionSet = [first, Partition::from_len(3, 4)].into_iter().collect();
        assert_eq!(set.total_events(), 6);
    }

    #[test]
    fn total_events_saturates() {
        let huge = Partition::new(0, usize::MAX).unwrap();
        let set: PartitionSet = vec![huge, huge].into();
        assert_eq!(set.total_events(), usize::MAX);
    }

    #[test]
    fn from_len_saturates_end() {
        let p = Partition::from_len(usize::MAX - 1, 5);
        assert_eq!(p.end(), usize::MAX);
        assert_eq!(p.remaining(), 1);
    }

    #[test]
    fn retain_live_drops_exhausted() {
        let mut set: PartitionSet = vec![
            Partition::from_len(0, 0),
            Partition::from_len(0, 2),
            Partition::from_len(2, 0),
        ]
        .into();
        assert_eq!(set.retain_live(), 2);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn deserialize_rejects_inverted_range() {
        let ok: Partition = serde_json::from_str(r#"{"cursor":1,"end":4}"#).unwrap();
        assert_eq!(ok.remaining(), 3);
        let bad = serde_json::from_str::<Partition>(r#"{"cursor":4,"end":1}"#);
        assert!(bad.is_err());
    }
}
