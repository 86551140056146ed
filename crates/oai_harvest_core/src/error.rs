use thiserror::Error;

/// One harvested entry could not be turned into a canonical record.
///
/// Recoverable: the driver skips the entry and keeps going.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed record {}: {reason}", .identity.as_deref().unwrap_or("<unknown>"))]
pub struct MalformedRecord {
    /// Best-effort identity (metadata `id`, else the OAI header identifier).
    pub identity: Option<String>,
    pub reason: MalformedReason,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedReason {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
    #[error("field `{field}` is not a YYYY-MM-DD date: {value:?}")]
    InvalidDate { field: &'static str, value: String },
    #[error("author #{position} has no keyname")]
    MissingKeyname { position: usize },
}

/// The response breaks the pagination protocol. Fatal to the current run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    #[error("response is not well-formed XML: {0}")]
    InvalidXml(String),
    #[error("unexpected root element <{0}>, expected <OAI-PMH>")]
    UnexpectedRoot(String),
    #[error("response has no ListRecords element")]
    MissingListRecords,
    #[error("OAI-PMH error {code}: {message}")]
    OaiError { code: String, message: String },
    #[error("resumption token {0:?} was handed back unchanged")]
    TokenDidNotAdvance(String),
    #[error("harvest already complete, no further pages to request")]
    CursorExhausted,
}
