//! Axiom engine: retrieval backend client, reveal engine and effect execution.
mod client;
mod engine;
mod reveal;
mod types;
mod upload;

pub use client::{ClientSettings, HttpRetrievalClient, RetrievalClient, DEFAULT_BASE_URL};
pub use engine::EngineHandle;
pub use reveal::{reveal, ChannelRevealSink, RevealSettings, RevealSink};
pub use types::{
    Document, DocumentMetadata, EngineEvent, MessageId, RevealOutcome, SearchResult,
    TransportError, TransportFailure, TurnId,
};
pub use upload::{UploadError, UploadFile};
