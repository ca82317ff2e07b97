//! Module defining the bounded in-memory history of per-record metrics

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{Money, Record, Stage};

#[cfg(test)]
mod tests;

/// Metrics computed once for a processed record. Immutable after creation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    pub kind: &'static str,
    pub id: String,
    pub subject: String,
    pub category: String,
    pub value: Money,
    pub score: f64,
    pub stage: Stage,
    pub status: &'static str,
    pub processed_at: DateTime<Utc>,
}

impl MetricsSnapshot {
    pub(crate) fn capture<R: Record>(record: &R, score: f64) -> Self {
        Self {
            kind: R::KIND,
            id: record.id().to_string(),
            subject: record.subject().to_string(),
            category: record.category().to_string(),
            value: record.value(),
            score,
            stage: record.stage(),
            status: R::stage_label(record.stage()),
            processed_at: Utc::now(),
        }
    }
}

/// Keeps the most recent snapshots, oldest first. Shared between all records processed
/// concurrently, so every access goes through the lock.
#[derive(Debug)]
pub struct MetricsLedger {
    capacity: usize,
    entries: Mutex<VecDeque<MetricsSnapshot>>,
}

impl MetricsLedger {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }

    /// Appends a snapshot, returning the entry evicted to make room for it (if any).
    pub fn record(&self, snapshot: MetricsSnapshot) -> Option<MetricsSnapshot> {
        let mut entries = self.lock();
        entries.push_back(snapshot);
        if entries.len() > self.capacity {
            entries.pop_front()
        } else {
            None
        }
    }

    /// All retained snapshots in insertion order.
    pub fn snapshots(&self) -> Vec<MetricsSnapshot> {
        self.lock().iter().cloned().collect()
    }

    pub fn latest(&self) -> Option<MetricsSnapshot> {
        self.lock().back().cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // A panic while holding the lock cannot leave the deque half-updated
    fn lock(&self) -> MutexGuard<'_, VecDeque<MetricsSnapshot>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
