use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::UploadError;

pub type TurnId = u64;
pub type MessageId = u64;

/// Open metadata mapping attached to every indexed document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DocumentMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: i64,
    pub content: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: DocumentMetadata,
}

/// A document returned by `/search`, with its score against the query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: i64,
    pub content: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: DocumentMetadata,
    pub similarity: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    SearchCompleted {
        turn: TurnId,
        result: Result<Vec<SearchResult>, TransportError>,
    },
    RevealProgress {
        message_id: MessageId,
        visible: String,
    },
    RevealFinished {
        message_id: MessageId,
        outcome: RevealOutcome,
    },
    DocumentsListed(Result<Vec<Document>, TransportError>),
    UploadCompleted {
        filename: String,
        result: Result<Document, UploadError>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealOutcome {
    Completed,
    Cancelled,
}

/// Any failure to obtain a successful response from the backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct TransportError {
    pub kind: TransportFailure,
    pub message: String,
}

impl TransportError {
    pub(crate) fn new(kind: TransportFailure, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Status code of a non-2xx response, if that is what failed.
    pub fn status(&self) -> Option<u16> {
        match self.kind {
            TransportFailure::HttpStatus(code) => Some(code),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportFailure {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    Network,
    InvalidBody,
}

impl fmt::Display for TransportFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportFailure::InvalidUrl => write!(f, "invalid url"),
            TransportFailure::HttpStatus(code) => write!(f, "http status {code}"),
            TransportFailure::Timeout => write!(f, "timeout"),
            TransportFailure::Network => write!(f, "network error"),
            TransportFailure::InvalidBody => write!(f, "invalid response body"),
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
