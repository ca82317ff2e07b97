//! Module defining what leaves the pipeline: encoded stream messages and batch reports

use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};

use crate::Error;
use crate::analytics::BatchSummary;

mod article;
mod order;


/// A message ready to be published: a JSON body plus routing attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundMessage {
    pub body: String,
    pub attributes: BTreeMap<String, String>,
}

impl OutboundMessage {
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

/// Record kinds which can be written to the stream in the shape the decoder accepts.
pub trait Encode {
    fn encode(&self) -> Result<OutboundMessage, Error>;
}

fn encode_with<T: Serialize>(
    wire: &T,
    attributes: [(&str, String); 3],
) -> Result<OutboundMessage, Error> {
    Ok(OutboundMessage {
        body: serde_json::to_string(wire)?,
        attributes: attributes
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect(),
    })
}

/// Routing key derived from a display name: spaces removed, lowercased.
fn routing_key(name: &str) -> String {
    name.replace(' ', "").to_lowercase()
}

/// Outcome of one batch.
///
/// Counts always add up: `decoded + decode_failures == received` and
/// `processed + validation_failures + processing_failures == decoded`.
#[derive(Debug, Serialize)]
pub struct BatchReport {
    pub received: usize,
    pub decoded: usize,
    pub decode_failures: usize,
    pub processed: usize,
    pub validation_failures: usize,
    pub processing_failures: usize,
    /// Absent when no record of the batch was processed
    pub summary: Option<BatchSummary>,
    #[serde(serialize_with = "as_messages")]
    pub failures: Vec<Error>,
}

impl BatchReport {
    pub(crate) fn new(received: usize, decoded: usize, decode_failures: Vec<Error>) -> Self {
        Self {
            received,
            decoded,
            decode_failures: decode_failures.len(),
            processed: 0,
            validation_failures: 0,
            processing_failures: 0,
            summary: None,
            failures: decode_failures,
        }
    }

    pub(crate) fn add_failure(&mut self, err: Error) {
        match err {
            Error::Validation { .. } => self.validation_failures += 1,
            _ => self.processing_failures += 1,
        }
        self.failures.push(err);
    }

    /// Whether every message of the batch made it through.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "received {}, decoded {}, processed {}, rejected {}, failed {}",
            self.received,
            self.decoded,
            self.processed,
            self.validation_failures,
            self.decode_failures + self.processing_failures
        )
    }
}

fn as_messages<S: Serializer>(failures: &[Error], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(failures.iter().map(ToString::to_string))
}
