//! Module producing synthetic records and publishing them on a fixed schedule

use chrono::{DateTime, Utc};
use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::{debug, info};
use uuid::Uuid;

use crate::Error;
use crate::config::GeneratorConfig;
use crate::domain::Record;
use crate::output::Encode;
use crate::transport::StreamProducer;

mod article;
mod order;


/// Record kinds which can be produced synthetically.
pub trait Generate: Record + Encode {
    /// Fewest records produced per firing by default.
    const MIN_PER_FIRING: usize;
    /// Most records produced per firing by default (inclusive).
    const MAX_PER_FIRING: usize;

    fn generate<G: Rng>(rng: &mut G, now: DateTime<Utc>) -> Self;
}

/// Identity of a generated record: `PREFIX-yyyyMMdd-XXXXXXXX`, where the suffix is the
/// first eight hex digits of a random UUID in upper case.
pub(crate) fn record_id(prefix: &str, now: DateTime<Utc>) -> String {
    let uuid = Uuid::new_v4().simple().to_string();
    format!("{prefix}-{}-{}", now.format("%Y%m%d"), uuid[..8].to_uppercase())
}

/// Produces the records of one firing: between `min_records` and `max_records` of them.
pub fn generate_batch<R: Generate, G: Rng>(
    rng: &mut G,
    config: &GeneratorConfig,
    now: DateTime<Utc>,
) -> Vec<R> {
    let count = rng.gen_range(config.min_records..=config.max_records.max(config.min_records));
    (0..count).map(|_| R::generate(&mut *rng, now)).collect()
}

///
/// Publishes a generated batch every `config.interval`, the first one right away.
///
/// Runs for `firings` firings, or until the stream fails when `firings` is `None`.
/// Returns the number of completed firings.
///
pub async fn run_generator<R: Generate>(
    config: &GeneratorConfig,
    producer: &StreamProducer,
    firings: Option<u64>,
) -> Result<u64, Error> {
    config.validate().map_err(Error::Config)?;

    let mut rng = StdRng::from_entropy();
    let mut interval = tokio::time::interval(config.interval);
    let mut fired = 0;

    while firings.is_none_or(|limit| fired < limit) {
        interval.tick().await;

        let records: Vec<R> = generate_batch(&mut rng, config, Utc::now());
        for record in &records {
            debug!(kind = R::KIND, id = record.id(), subject = record.subject(), "generated record");
            producer.publish(record.encode()?).await?;
        }
        fired += 1;

        info!(
            kind = R::KIND,
            topic = producer.topic(),
            count = records.len(),
            firing = fired,
            "published generated records"
        );
    }

    Ok(fired)
}
