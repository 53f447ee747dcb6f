use crate::queue::{EventKey, EventQueue, HalfEdgeId};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

/// Tree key: event position, then newest insertion first.
#[derive(Clone, Copy, Debug)]
struct Entry {
    key: EventKey,
    seq: u64,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key
            .sweep_cmp(&other.key)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// A circle event queue backed by a `BTreeMap`, with O(log n) deletion by half-edge.
#[derive(Default)]
pub struct OrderedQueue {
    entries: BTreeMap<Entry, HalfEdgeId>,
    index: HashMap<HalfEdgeId, Entry>,
    seq: u64,
}

impl OrderedQueue {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventQueue for OrderedQueue {
    fn insert(&mut self, he: HalfEdgeId, key: EventKey) {
        let entry = Entry { key, seq: self.seq };
        self.seq += 1;
        if let Some(stale) = self.index.insert(he, entry) {
            debug_assert!(false, "half-edge {he} already owns a circle event");
            self.entries.remove(&stale);
        }
        self.entries.insert(entry, he);
    }

    fn delete(&mut self, he: HalfEdgeId, _key: EventKey) -> bool {
        match self.index.remove(&he) {
            Some(entry) => {
                self.entries.remove(&entry);
                true
            }
            None => false,
        }
    }

    fn min_key(&mut self) -> Option<EventKey> {
        self.entries.first_key_value().map(|(entry, _)| entry.key)
    }

    fn extract_min(&mut self) -> Option<(HalfEdgeId, EventKey)> {
        let (entry, he) = self.entries.pop_first()?;
        self.index.remove(&he);
        Some((he, entry.key))
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
