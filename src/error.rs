//! Module defining the errors which are exposed to the users of the crate

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Message body is not UTF-8 text
    #[error("decode error: message body is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// Message body is not JSON, or a field has the wrong JSON type
    #[error("decode error: {0}")]
    Json(#[from] serde_json::Error),

    /// Valid JSON which still cannot be turned into a record, e.g., an array instead of an object
    #[error("decode error: {0}")]
    Malformed(String),

    /// Decoded record violating one or more domain rules, e.g., an order with a zero quantity
    #[error("validation error: {kind} {id}: {}", violations.join(", "))]
    Validation {
        kind: &'static str,
        id: String,
        violations: Vec<String>,
    },

    /// Valid record which could not be processed, e.g., a task which panicked or timed out
    #[error("processing error: {kind} {id}: {message}")]
    Processing {
        kind: &'static str,
        id: String,
        message: String,
    },

    /// Settings which cannot be run with, e.g., a zero generator interval
    #[error("configuration error: {0}")]
    Config(String),

    /// Stream which can no longer carry messages, e.g., after its consumer went away
    #[error("transport error: {0}")]
    Transport(String),
}

impl Error {
    /// Returns `true` for the failures produced while decoding a raw message.
    pub fn is_decode(&self) -> bool {
        matches!(self, Error::Utf8(_) | Error::Json(_) | Error::Malformed(_))
    }
}

pub(crate) fn malformed(message: impl Into<String>) -> Error {
    Error::Malformed(message.into())
}

pub(crate) fn validation_error(
    kind: &'static str,
    id: impl Into<String>,
    violations: Vec<String>,
) -> Error {
    Error::Validation {
        kind,
        id: id.into(),
        violations,
    }
}

pub(crate) fn processing_error(
    kind: &'static str,
    id: impl Into<String>,
    message: impl Into<String>,
) -> Error {
    Error::Processing {
        kind,
        id: id.into(),
        message: message.into(),
    }
}
