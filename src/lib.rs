mod analytics;
pub mod config;
mod domain;
mod engine;
mod error;
pub mod generator;
mod input;
mod ledger;
mod output;
mod store;
mod telemetry;
pub mod transport;

pub use analytics::{BatchSummary, PatternCount, RankEntry, Ranking, StageCount, TOP_N, aggregate};
pub use domain::{
    Article, Grouping, Highlight, Order, Pattern, Record, ScoreInputs, ScoreWeights, Stage,
    Transition, article, order,
};
pub use engine::Pipeline;
pub use error::Error;
pub use input::{Decode, decode_message, split_messages};
pub use ledger::{MetricsLedger, MetricsSnapshot};
pub use output::{BatchReport, Encode, OutboundMessage};
pub use store::RecordStore;
pub use telemetry::{LogFormat, setup_logging};

/// Processes one batch of order messages with a default pipeline.
///
/// Convenience wrapper around [`Pipeline::process_batch`] for one-off batches. Long-lived
/// consumers should keep a [`Pipeline`] around instead, so that the metrics ledger and
/// the record store persist across batches.
///
/// # Error handling
///
/// Not every message of a batch may be usable: a body can be malformed, or decode to a
/// record which violates domain rules (e.g. an order with a zero quantity). Instead of
/// failing the whole batch, every such message is reported in
/// [`BatchReport::failures`] and the remaining records are still processed.
///
/// # Example
///
/// ```no_run
/// use event_pipeline_rs::process_orders;
///
/// # async fn run() {
/// let report = process_orders(&[
///     r#"{"orderId":"O1","customerName":"A","product":"P","quantity":2,"price":10.00,"status":0}"#,
///     "{not json",
/// ])
/// .await;
///
/// for failure in &report.failures {
///     eprintln!("skipped: {failure}");
/// }
/// if let Some(summary) = &report.summary {
///     println!("{summary}");
/// }
/// # }
/// ```
pub async fn process_orders<M: AsRef<[u8]>>(messages: &[M]) -> BatchReport {
    Pipeline::<Order>::new(config::PipelineConfig::default())
        .process_batch(messages)
        .await
}
