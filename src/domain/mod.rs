//! Module for the types defining the record domain.
//!
//! Both record kinds (orders and news articles) flow through the same pipeline. What
//! differs between them is captured by the [`Record`] trait: which fields are
//! required, when a record gets promoted, how its score is weighted, and which fields
//! the batch analytics group by.

use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;

pub mod article;
pub mod order;
mod stage;

pub use article::Article;
pub use order::Order;
pub use stage::{Stage, Transition};

pub(crate) use stage::advance;


pub(crate) type Money = Decimal;

/// A kind of record processed by the pipeline.
pub trait Record: Clone + fmt::Debug + Send + Sync + 'static {
    /// Lowercase name of the kind, used in logs and errors.
    const KIND: &'static str;

    /// Display names of the stages, in [`Stage::ALL`] order.
    const STAGE_LABELS: [&'static str; 4];

    const SCORE_WEIGHTS: ScoreWeights;

    /// Categorical fields ranked by the batch analytics.
    const GROUPINGS: &'static [Grouping<Self>];

    /// Threshold tests counted by the batch analytics.
    const PATTERNS: &'static [Pattern<Self>];

    fn id(&self) -> &str;

    /// The person or headline the record is about.
    fn subject(&self) -> &str;

    fn category(&self) -> &str;

    fn stage(&self) -> Stage;

    fn set_stage(&mut self, stage: Stage);

    /// Every rule this record violates. Empty for a valid record.
    fn violations(&self) -> Vec<String>;

    /// Whether a record in [`Stage::Intermediate`] moves on to [`Stage::Success`].
    fn promotes(&self) -> bool;

    /// The value-like quantity summed up by the batch analytics.
    fn value(&self) -> Money;

    /// [`Record::value`], or `None` when it cannot be represented.
    fn checked_value(&self) -> Option<Money> {
        Some(self.value())
    }

    fn score_inputs(&self) -> ScoreInputs;

    /// Signed score averaged by the batch analytics, for kinds that carry one.
    fn secondary_score(&self) -> Option<f64> {
        None
    }

    /// Notable properties worth a log line of their own.
    fn highlights(&self) -> Vec<Highlight>;

    fn stage_label(stage: Stage) -> &'static str {
        Self::STAGE_LABELS[stage.ordinal()]
    }

    fn score(&self) -> f64 {
        Self::SCORE_WEIGHTS.score(&self.score_inputs())
    }
}

/// Weights of the derived score:
/// `log10(max(1, primary)) * primary_weight + |secondary| * secondary_weight + aux_len * auxiliary_weight`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    pub primary: f64,
    pub secondary: f64,
    pub auxiliary: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreInputs {
    pub primary_count: f64,
    pub secondary_score: f64,
    pub auxiliary_len: usize,
}

impl ScoreWeights {
    /// Computes the score, rounded to two decimals (ties to even).
    pub fn score(&self, inputs: &ScoreInputs) -> f64 {
        let base = inputs.primary_count.max(1.0).log10() * self.primary;
        let secondary = inputs.secondary_score.abs() * self.secondary;
        let auxiliary = inputs.auxiliary_len as f64 * self.auxiliary;
        round_cents(base + secondary + auxiliary)
    }
}

pub(crate) fn round_cents(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// A categorical field of a record kind.
pub struct Grouping<R> {
    pub name: &'static str,
    pub key: fn(&R) -> &str,
}

/// A named threshold test over a record.
pub struct Pattern<R> {
    pub name: &'static str,
    pub matches: fn(&R) -> bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Highlight {
    pub name: &'static str,
    pub detail: String,
}

impl Highlight {
    pub(crate) fn new(name: &'static str, detail: impl Into<String>) -> Self {
        Self {
            name,
            detail: detail.into(),
        }
    }
}

pub(crate) fn require(violations: &mut Vec<String>, value: &str, field: &str) {
    if value.trim().is_empty() {
        violations.push(format!("{field} is required"));
    }
}
