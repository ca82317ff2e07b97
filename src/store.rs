//! Module defining the last-known-state store of processed records
//!
//! Keyed by record identity with last-write-wins semantics. Bounded: once full, the
//! identity inserted first is evicted to make room.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::domain::{Record, Stage};

#[derive(Debug)]
pub struct RecordStore<R> {
    capacity: usize,
    inner: Mutex<StoreInner<R>>,
}

#[derive(Debug)]
struct StoreInner<R> {
    records: HashMap<String, R>,
    insertion_order: VecDeque<String>,
}

impl<R: Record> RecordStore<R> {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            inner: Mutex::new(StoreInner {
                records: HashMap::new(),
                insertion_order: VecDeque::new(),
            }),
        }
    }

    /// Inserts or overwrites the record with the same identity and returns the previous one.
    pub fn upsert(&self, record: R) -> Option<R> {
        let id = record.id().to_string();
        let mut inner = self.lock();

        if let Some(previous) = inner.records.insert(id.clone(), record) {
            return Some(previous);
        }

        inner.insertion_order.push_back(id);
        while inner.insertion_order.len() > self.capacity {
            if let Some(oldest) = inner.insertion_order.pop_front() {
                inner.records.remove(&oldest);
            }
        }
        None
    }

    pub fn get(&self, id: &str) -> Option<R> {
        self.lock().records.get(id).cloned()
    }

    pub fn stage_of(&self, id: &str) -> Option<Stage> {
        self.lock().records.get(id).map(Record::stage)
    }

    pub fn len(&self) -> usize {
        self.lock().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().records.is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, StoreInner<R>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
