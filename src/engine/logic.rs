//! Module focused on the logic of processing individual records.
//!
//! Processing is split in two halves: [`evaluate`] is pure and may run on any thread
//! under a deadline, [`commit`] publishes the result to the shared ledger and store.

use tracing::{debug, info};

use crate::{
    Error,
    domain::{Highlight, Record, Stage, Transition, advance},
    error::{processing_error, validation_error},
    ledger::{MetricsLedger, MetricsSnapshot},
    store::RecordStore,
};

/// A record which passed validation, with its stage already advanced.
#[derive(Debug)]
pub(super) struct Evaluated<R> {
    pub(super) record: R,
    pub(super) transition: Transition,
    pub(super) score: f64,
    pub(super) highlights: Vec<Highlight>,
}

/// Validates the record, advances its stage and computes its score.
pub(super) fn evaluate<R: Record>(mut record: R) -> Result<Evaluated<R>, Error> {
    let violations = record.violations();
    if !violations.is_empty() {
        return Err(validation_error(R::KIND, record.id(), violations));
    }
    debug!(kind = R::KIND, id = record.id(), "passed validation");

    if record.checked_value().is_none() {
        return Err(processing_error(
            R::KIND,
            record.id(),
            "value does not fit a decimal",
        ));
    }

    let transition = advance(&mut record);

    let score = record.score();
    if !score.is_finite() {
        return Err(processing_error(
            R::KIND,
            record.id(),
            format!("score is not a finite number: {score}"),
        ));
    }

    let highlights = record.highlights();
    Ok(Evaluated {
        record,
        transition,
        score,
        highlights,
    })
}

/// Logs the outcome, appends the metrics snapshot and stores the record.
pub(super) fn commit<R: Record>(
    evaluated: Evaluated<R>,
    ledger: &MetricsLedger,
    store: &RecordStore<R>,
) -> R {
    let Evaluated {
        record,
        transition,
        score,
        highlights,
    } = evaluated;
    let id = record.id();

    log_transition::<R>(id, transition);
    for highlight in &highlights {
        info!(
            kind = R::KIND,
            id,
            highlight = highlight.name,
            "{}",
            highlight.detail
        );
    }

    ledger.record(MetricsSnapshot::capture(&record, score));
    if store.upsert(record.clone()).is_some() {
        debug!(kind = R::KIND, id = record.id(), "overwrote stored record");
    }

    info!(
        kind = R::KIND,
        id = record.id(),
        subject = record.subject(),
        score,
        "processed record"
    );
    record
}

fn log_transition<R: Record>(id: &str, transition: Transition) {
    match transition {
        Transition::Advanced { from, to } => info!(
            kind = R::KIND,
            id,
            from = R::stage_label(from),
            to = R::stage_label(to),
            "moved to {}",
            R::stage_label(to)
        ),
        Transition::Held => info!(
            kind = R::KIND,
            id,
            "remains {}",
            R::stage_label(Stage::Intermediate)
        ),
        Transition::Unchanged(stage) => info!(
            kind = R::KIND,
            id,
            "already {}, nothing to do",
            R::stage_label(stage)
        ),
    }
}
