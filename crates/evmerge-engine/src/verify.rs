//! Post-merge checks over an index sequence.
//!
//! These are independent of the engine: they only look at the store, the
//! partitions a merge started from, and the indices it produced.

use evmerge_types::{EventStore, PartitionSet, Timestamp};

use crate::error::VerifyError;

/// Check that `indices` are in bounds and their timestamps never decrease.
pub fn verify_order(store: &EventStore, indices: &[usize]) -> Result<(), VerifyError> {
    let mut previous: Option<Timestamp> = None;
    for (position, &index) in indices.iter().enumerate() {
        let current = store
            .timestamp(index)
            .ok_or(VerifyError::IndexOutOfBounds {
                position,
                index,
                store_len: store.len(),
            })?;
        if let Some(previous) = previous {
            if current < previous {
                return Err(VerifyError::OutOfOrder {
                    position,
                    previous,
                    current,
                });
            }
        }
        previous = Some(current);
    }
    Ok(())
}

/// Check that `indices` names every event of `partitions` exactly once and
/// nothing else.
///
/// `partitions` must be a snapshot taken before the merge, since the merge
/// drains the set it is given.
pub fn verify_complete(
    store: &EventStore,
    partitions: &PartitionSet,
    indices: &[usize],
) -> Result<(), VerifyError> {
    let store_len = store.len();
    for (position, p) in partitions.iter().enumerate() {
        if p.end() > store_len {
            return Err(VerifyError::PartitionOutOfBounds {
                position,
                end: p.end(),
                store_len,
            });
        }
    }

    let expected = partitions.total_events();
    if indices.len() != expected {
        return Err(VerifyError::LengthMismatch {
            expected,
            actual: indices.len(),
        });
    }

    let mut owned = vec![false; store_len];
    for p in partitions {
        for index in p.range() {
            owned[index] = true;
        }
    }

    let mut seen = vec![false; store_len];
    for (position, &index) in indices.iter().enumerate() {
        if index >= store_len {
            return Err(VerifyError::IndexOutOfBounds {
                position,
                index,
                store_len,
            });
        }
        if !owned[index] {
            return Err(VerifyError::ForeignIndex { position, index });
        }
        if seen[index] {
            return Err(VerifyError::DuplicateIndex { position, index });
        }
        seen[index] = true;
    }
    Ok(())
}

/// [`verify_complete`] followed by [`verify_order`].
pub fn verify(
    store: &EventStore,
    partitions: &PartitionSet,
    indices: &[usize],
) -> Result<(), VerifyError> {
    verify_complete(store, partitions, indices)?;
    verify_order(store, indices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use evmerge_types::{Event, Partition};

    fn store_of(timestamps: &[u32]) -> EventStore {
        timestamps
            .iter()
            .enumerate()
            .map(|(i, &ts)| Event::new(i as i32, ts))
            .collect()
    }

    #[test]
    fn accepts_ordered_sequence() {
        let store = store_of(&[0, 2, 1, 3]);
        assert!(verify_order(&store, &[0, 2, 1, 3]).is_ok());
        assert!(verify_order(&store, &[]).is_ok());
    }

    #[test]
    fn detects_descending_neighbours() {
        let store = store_of(&[0, 2, 1, 3]);
        assert_eq!(
            verify_order(&store, &[0, 1, 2, 3]),
            Err(VerifyError::OutOfOrder {
                position: 2,
                previous: Timestamp::new(2),
                current: Timestamp::new(1),
            })
        );
    }

    #[test]
    fn detects_out_of_bounds_index() {
        let store = store_of(&[0]);
        assert!(matches!(
            verify_order(&store, &[0, 4]),
            Err(VerifyError::IndexOutOfBounds { index: 4, .. })
        ));
    }

    #[test]
    fn completeness_checks() {
        let store = store_of(&[0, 1, 2, 3]);
        let set: PartitionSet = vec![Partition::from_len(0, 2), Partition::from_len(2, 1)].into();

        assert!(verify_complete(&store, &set, &[0, 2, 1]).is_ok());
        assert_eq!(
            verify_complete(&store, &set, &[0, 1]),
            Err(VerifyError::LengthMismatch {
                expected: 3,
                actual: 2
            })
        );
        assert_eq!(
            verify_complete(&store, &set, &[0, 0, 1]),
            Err(VerifyError::DuplicateIndex {
                position: 1,
                index: 0
            })
        );
        assert_eq!(
            verify_complete(&store, &set, &[0, 1, 3]),
            Err(VerifyError::ForeignIndex {
                position: 2,
                index: 3
            })
        );
    }

    #[test]
    fn partition_past_store_is_reported() {
        let store = store_of(&[0]);
        let huge = Partition::new(0, usize::MAX).unwrap();
        let set: PartitionSet = vec![huge, huge].into();
        assert_eq!(
            verify_complete(&store, &set, &[0]),
            Err(VerifyError::PartitionOutOfBounds {
                position: 0,
                end: usize::MAX,
                store_len: 1
            })
        );
    }

    #[test]
    fn verify_runs_both_checks() {
        let store = store_of(&[5, 1]);
        let set: PartitionSet = vec![Partition::from_len(0, 1), Partition::from_len(1, 1)].into();
        assert!(verify(&store, &set, &[1, 0]).is_ok());
        assert!(matches!(
            verify(&store, &set, &[0, 1]),
            Err(VerifyError::OutOfOrder { position: 1, .. })
        ));
    }
}
