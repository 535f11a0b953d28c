use serde::{Deserialize, Serialize};

use crate::event::{Event, Timestamp};

/// Append-only buffer of events.
///
/// Several producers append into one store, each into its own contiguous
/// region. The store hands out shared borrows only, so a merge holding
/// `&EventStore` can never alter payloads or timestamps, and any number of
/// merges over disjoint partition sets may read the same store at once.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store with room for `capacity` events.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: Vec::with_capacity(capacity),
        }
    }

    /// Append an event and return its index.
    pub fn push(&mut self, event: Event) -> usize {
        self.events.push(event);
        self.events.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<&Event> {
        self.events.get(index)
    }

    /// Timestamp of the event at `index`, if it exists.
    pub fn timestamp(&self, index: usize) -> Option<Timestamp> {
        self.events.get(index).map(|e| e.timestamp)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn as_slice(&self) -> &[Event] {
        &self.events
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Event> {
        self.events.iter()
    }
}

impl From<Vec<Event>> for EventStore {
    fn from(events: Vec<Event>) -> Self {
        Self { events }
    }
}

impl FromIterator<Event> for EventStore {
    fn from_iter<I: IntoIterator<Item = Event>>(iter: I) -> Self {
        Self {
            events: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a EventStore {
    type Item = &'a Event;
    type IntoIter = std::slice::Iter<'a, Event>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_returns_sequential_indices() {
        let mut store = EventStore::with_capacity(2);
        assert!(store.is_empty());
        assert_eq!(store.push(Event::new(10, 1)), 0);
        assert_eq!(store.push(Event::new(11, 1)), 1);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(1).map(|e| e.payload), Some(11));
        assert!(store.get(2).is_none());
    }

    #[test]
    fn timestamp_lookup() {
        let store: EventStore = vec![Event::new(0, 5), Event::new(1, 8)].into();
        assert_eq!(store.timestamp(1), Some(Timestamp::new(8)));
        assert_eq!(store.timestamp(2), None);
    }

    #[test]
    fn collect_from_iterator() {
        let store: EventStore = (0..4).map(|i| Event::new(i, i as u32)).collect();
        let payloads: Vec<i32> = store.iter().map(|e| e.payload).collect();
        assert_eq!(payloads, vec![0, 1, 2, 3]);
    }

    #[test]
    fn serializes_as_plain_array() {
        let store: EventStore = vec![Event::new(7, 2)].into();
        let json = serde_json::to_string(&store).unwrap();
        assert_eq!(json, r#"[{"payload":7,"timestamp":2}]"#);
    }
}
