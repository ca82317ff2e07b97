//! Module for the core logic of the pipeline
//!
//! A batch goes through three steps: its messages are decoded, every decoded record is
//! processed on its own task, and the successfully processed records are summarized.
//! A failure at any step is confined to the record it concerns.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::{
    Error,
    analytics::aggregate,
    config::PipelineConfig,
    domain::Record,
    input::{Decode, DecodedBatch, decode_batch},
    ledger::MetricsLedger,
    output::BatchReport,
    store::RecordStore,
};

mod logic;
mod orchestration;


use orchestration::{Shared, process_concurrently};

/// Batch processor for one record kind.
///
/// Cloning is cheap: all clones share the same metrics ledger and record store.
#[derive(Debug)]
pub struct Pipeline<R> {
    config: PipelineConfig,
    shared: Shared<R>,
}

impl<R> Clone for Pipeline<R> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            shared: self.shared.clone(),
        }
    }
}

impl<R: Record + Decode> Pipeline<R> {
    pub fn new(config: PipelineConfig) -> Self {
        let shared = Shared {
            ledger: Arc::new(MetricsLedger::new(config.ledger_capacity)),
            store: Arc::new(RecordStore::new(config.store_capacity)),
        };
        Self { config, shared }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// History of the most recently processed records.
    pub fn ledger(&self) -> &MetricsLedger {
        &self.shared.ledger
    }

    /// Last known state of every processed record.
    pub fn store(&self) -> &RecordStore<R> {
        &self.shared.store
    }

    ///
    /// Decodes, processes and summarizes one batch of raw message bodies.
    ///
    /// Never fails as a whole: every failure ends up in the returned report, and the
    /// summary covers the records which were processed successfully, in arrival order.
    ///
    pub async fn process_batch<M: AsRef<[u8]>>(&self, messages: &[M]) -> BatchReport {
        let DecodedBatch { records, failures } = decode_batch::<R, M>(messages);
        for failure in &failures {
            warn!(kind = R::KIND, "{failure}");
        }
        info!(
            kind = R::KIND,
            "decoded {}, failed {} in batch of {}",
            records.len(),
            failures.len(),
            messages.len()
        );

        let mut report = BatchReport::new(messages.len(), records.len(), failures);
        if records.is_empty() {
            return report;
        }

        let outcomes = process_concurrently(records, &self.shared, self.config.record_timeout).await;

        let mut processed = Vec::with_capacity(outcomes.len());
        for outcome in outcomes {
            match outcome {
                Ok(record) => processed.push(record),
                Err(err) => {
                    log_failure(&err);
                    report.add_failure(err);
                }
            }
        }
        report.processed = processed.len();

        if processed.is_empty() {
            debug!(kind = R::KIND, "nothing processed, no summary");
            return report;
        }

        let summary = aggregate(&processed);
        info!(kind = R::KIND, "batch summary: {summary}");
        for pattern in summary.patterns.iter().filter(|p| p.count > 0) {
            info!(kind = R::KIND, pattern = pattern.name, count = pattern.count, "pattern detected");
        }
        report.summary = Some(summary);
        report
    }
}

fn log_failure(err: &Error) {
    match err {
        Error::Validation { .. } => warn!("{err}"),
        _ => error!("{err}"),
    }
}
