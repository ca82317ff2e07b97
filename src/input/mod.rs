//! Module defining the decoding logic used to convert raw stream messages into domain records that can be provided to the core logic of the pipeline.
//!
//! Message bodies are flat JSON objects. Field names are matched case-insensitively and
//! absent (or `null`) fields fall back to their defaults: empty strings, zero, the Unix
//! epoch and the initial stage.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, de};
use serde_json::{Map, Value};
use tracing::debug;

use crate::domain::{Record, Stage};
use crate::error::{Error, malformed};

mod article;
mod order;


/// Record kinds which can be decoded from a message body.
pub trait Decode: Sized {
    /// Builds the record from a JSON object whose keys are already lowercased.
    fn decode_fields(fields: Value) -> Result<Self, Error>;
}

/// Result of decoding one batch of messages.
#[derive(Debug)]
pub(crate) struct DecodedBatch<R> {
    pub(crate) records: Vec<R>,
    pub(crate) failures: Vec<Error>,
}

/// Decodes every message of the batch, keeping arrival order. A message which fails
/// to decode is reported in `failures` and does not affect the others.
pub(crate) fn decode_batch<R, M>(messages: &[M]) -> DecodedBatch<R>
where
    R: Record + Decode,
    M: AsRef<[u8]>,
{
    let mut records = Vec::with_capacity(messages.len());
    let mut failures = Vec::new();

    for body in messages {
        match decode_message::<R>(body.as_ref()) {
            Ok(record) => {
                debug!(kind = R::KIND, id = record.id(), "received record");
                records.push(record);
            }
            Err(err) => failures.push(err),
        }
    }

    DecodedBatch { records, failures }
}

/// Splits newline-delimited input into message bodies, skipping blank lines. Lines are
/// not required to be valid UTF-8: a bad line decodes to a failure of its own.
pub fn split_messages(input: &[u8]) -> Vec<&[u8]> {
    input
        .split(|&byte| byte == b'\n')
        .map(<[u8]>::trim_ascii)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Decodes a single message body.
pub fn decode_message<R: Decode>(body: &[u8]) -> Result<R, Error> {
    let text = std::str::from_utf8(body)?;
    let Value::Object(fields) = serde_json::from_str::<Value>(text)? else {
        return Err(malformed("message body is not a JSON object"));
    };

    let fields: Map<String, Value> = fields
        .into_iter()
        .map(|(name, value)| (name.to_lowercase(), value))
        .collect();

    R::decode_fields(Value::Object(fields))
}

// Status as written by the producers: either its ordinal or its name
#[derive(Deserialize)]
#[serde(untagged)]
enum RawStatus {
    Ordinal(u64),
    Label(String),
}

fn resolve_stage<R: Record>(status: Option<RawStatus>) -> Result<Stage, Error> {
    match status {
        None => Ok(Stage::Initial),
        Some(RawStatus::Ordinal(ordinal)) => Stage::from_ordinal(ordinal)
            .ok_or_else(|| malformed(format!("unknown {} status: {ordinal}", R::KIND))),
        Some(RawStatus::Label(label)) => Stage::from_label::<R>(&label)
            .ok_or_else(|| malformed(format!("unknown {} status: {label}", R::KIND))),
    }
}

/// Reads a timestamp with an offset, or a local one (date and time, or just the date)
/// taken as UTC.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(text) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    parse_timestamp(text.trim())
        .map(Some)
        .ok_or_else(|| de::Error::custom(format!("invalid timestamp: {text}")))
}

fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(timestamp) = text.parse::<DateTime<FixedOffset>>() {
        return Some(timestamp.with_timezone(&Utc));
    }
    if let Ok(naive) = text.parse::<NaiveDateTime>() {
        return Some(naive.and_utc());
    }
    text.parse::<NaiveDate>()
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
