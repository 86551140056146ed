use std::fmt;
use std::time::Duration;

use oai_harvest_core::{HarvestStats, MalformedRecord, ProtocolError, PutOutcome};
use thiserror::Error;

use crate::store::StoreError;

/// The network exchange failed or the endpoint answered with a non-success status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct TransportError {
    pub kind: FailureKind,
    pub message: String,
    /// Server-requested wait (`Retry-After`), when it sent one.
    pub retry_after: Option<Duration>,
}

impl TransportError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            retry_after: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    RedirectLimitExceeded,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    UnsupportedContentType { content_type: String },
    InvalidUtf8,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::UnsupportedContentType { content_type } => {
                write!(f, "unsupported content type {content_type}")
            }
            FailureKind::InvalidUtf8 => write!(f, "response body is not utf-8"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

/// Anything that ends a harvest run early.
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HarvestEvent {
    PageFetched {
        page: usize,
        entries: usize,
        cursor: Option<u64>,
        complete_list_size: Option<u64>,
    },
    RecordStored {
        identity: String,
        outcome: PutOutcome,
    },
    EntrySkipped {
        identity: Option<String>,
        reason: SkipReason,
    },
    Finished(HarvestStats),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    Malformed(MalformedRecord),
    Deleted,
    OutsideAllowList,
}
