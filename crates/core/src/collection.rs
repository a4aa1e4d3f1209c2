//! Keyed collection with a persisted monotonic id counter.
//!
//! Both the product ledger and the movement log are a `SequencedMap`: the
//! counter is stored alongside the records, so allocating the next id never
//! scans existing keys and never hands out an id that was used before, even
//! after the record behind it is removed.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::id::SequenceId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "K: Serialize + Ord, V: Serialize",
    deserialize = "K: Deserialize<'de> + Ord, V: Deserialize<'de>"
))]
pub struct SequencedMap<K, V> {
    /// Sequence number the next allocated id will carry.
    next_seq: u64,
    records: BTreeMap<K, V>,
}

impl<K: SequenceId, V> Default for SequencedMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: SequenceId, V> SequencedMap<K, V> {
    pub fn new() -> Self {
        Self {
            next_seq: 1,
            records: BTreeMap::new(),
        }
    }

    /// The id the next call to [`allocate`](Self::allocate) will return.
    pub fn peek_next(&self) -> K {
        K::from_seq(self.next_seq)
    }

    /// Allocate the next id. Ids are never reused.
    pub fn allocate(&mut self) -> K {
        let id = K::from_seq(self.next_seq);
        self.next_seq += 1;
        id
    }

    pub fn insert(&mut self, id: K, value: V) -> Option<V> {
        if id.seq() >= self.next_seq {
            self.next_seq = id.seq() + 1;
        }
        self.records.insert(id, value)
    }

    pub fn get(&self, id: &K) -> Option<&V> {
        self.records.get(id)
    }

    pub fn get_mut(&mut self, id: &K) -> Option<&mut V> {
        self.records.get_mut(id)
    }

    pub fn remove(&mut self, id: &K) -> Option<V> {
        self.records.remove(id)
    }

    /// Records in allocation order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&K, &V)> + ExactSizeIterator {
        self.records.iter()
    }

    pub fn values(&self) -> impl DoubleEndedIterator<Item = &V> + ExactSizeIterator {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Raise the counter past every stored key.
    ///
    /// Returns `true` if the counter had to move, i.e. the persisted counter
    /// was behind the records it was saved with.
    pub fn repair_counter(&mut self) -> bool {
        let floor = self
            .records
            .keys()
            .next_back()
            .map(|k| k.seq() + 1)
            .unwrap_or(1);
        if self.next_seq < floor {
            self.next_seq = floor;
            true
        } else {
            false
        }
    }
}
