//! Module focusing on the way the records of a batch are fanned out to concurrent tasks

use std::{sync::Arc, time::Duration};

use tokio::task::JoinSet;
use tracing::error;

use crate::{
    Error,
    domain::Record,
    engine::logic::{commit, evaluate},
    error::processing_error,
    ledger::MetricsLedger,
    store::RecordStore,
};

/// Handles to the state shared by all record tasks.
#[derive(Debug)]
pub(super) struct Shared<R> {
    pub(super) ledger: Arc<MetricsLedger>,
    pub(super) store: Arc<RecordStore<R>>,
}

impl<R> Clone for Shared<R> {
    fn clone(&self) -> Self {
        Self {
            ledger: Arc::clone(&self.ledger),
            store: Arc::clone(&self.store),
        }
    }
}

///
/// Processes every record on its own task and waits for all of them. The outcomes are
/// returned in the order of the input; a failing record never cancels its siblings.
///
pub(super) async fn process_concurrently<R: Record>(
    records: Vec<R>,
    shared: &Shared<R>,
    record_timeout: Duration,
) -> Vec<Result<R, Error>> {
    let ids: Vec<String> = records.iter().map(|r| r.id().to_string()).collect();
    let mut tasks = JoinSet::new();

    for (idx, record) in records.into_iter().enumerate() {
        let shared = shared.clone();
        let id = ids[idx].clone();
        tasks.spawn(async move { (idx, process_one(record, id, shared, record_timeout).await) });
    }

    let mut outcomes: Vec<Option<Result<R, Error>>> = ids.iter().map(|_| None).collect();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((idx, outcome)) => outcomes[idx] = Some(outcome),
            // Left as `None` and reported below
            Err(err) => error!(kind = R::KIND, "join error while waiting on record task: {err}"),
        }
    }

    outcomes
        .into_iter()
        .zip(ids)
        .map(|(outcome, id)| {
            outcome.unwrap_or_else(|| Err(processing_error(R::KIND, id, "record task was lost")))
        })
        .collect()
}

async fn process_one<R: Record>(
    record: R,
    id: String,
    shared: Shared<R>,
    record_timeout: Duration,
) -> Result<R, Error> {
    // The evaluation runs off the async workers so that the deadline can fire even
    // when it blocks. A late result is discarded and never reaches the shared state.
    let work = tokio::task::spawn_blocking(move || evaluate(record));

    let evaluated = match tokio::time::timeout(record_timeout, work).await {
        Ok(Ok(result)) => result?,
        Ok(Err(join_err)) if join_err.is_panic() => {
            return Err(processing_error(R::KIND, id, "processing panicked"));
        }
        Ok(Err(join_err)) => return Err(processing_error(R::KIND, id, join_err.to_string())),
        Err(_) => {
            return Err(processing_error(
                R::KIND,
                id,
                format!("timed out after {record_timeout:?}"),
            ));
        }
    };

    Ok(commit(evaluated, &shared.ledger, &shared.store))
}
