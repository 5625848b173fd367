use axiom_core::{DocumentEntry, Effect, Msg, RevealOutcome, SearchHit};
use axiom_engine::{Document, EngineEvent, EngineHandle};
use engine_logging::{engine_debug, engine_info};

/// Hands controller effects to the engine.
pub(crate) struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub(crate) fn new(engine: EngineHandle) -> Self {
        Self { engine }
    }

    pub(crate) fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Search { turn, query, top_k } => {
                    engine_info!("Search query_len={} top_k={}", query.len(), top_k);
                    self.engine.search(turn, query, top_k);
                }
                Effect::Reveal {
                    turn,
                    message_id,
                    text,
                } => {
                    engine_debug!(
                        "Reveal message_id={} chars={}",
                        message_id,
                        text.chars().count()
                    );
                    self.engine.reveal(turn, message_id, text);
                }
                Effect::CancelTurn { turn } => {
                    self.engine.cancel(turn);
                }
                Effect::LoadDocuments => {
                    self.engine.list_documents();
                }
                Effect::UploadDocument { path } => {
                    engine_info!("UploadDocument path={}", path.display());
                    self.engine.upload(path);
                }
            }
        }
    }
}

/// Translates an engine report into the controller message it stands for.
pub(crate) fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::SearchCompleted { turn, result } => match result {
            Ok(results) => Msg::SearchSucceeded {
                turn,
                results: results
                    .into_iter()
                    .map(|result| SearchHit {
                        content: result.content,
                        similarity: result.similarity,
                        source_id: result.id.to_string(),
                    })
                    .collect(),
            },
            Err(err) => Msg::SearchFailed {
                turn,
                error: err.to_string(),
            },
        },
        EngineEvent::RevealProgress {
            message_id,
            visible,
        } => Msg::RevealProgress {
            message_id,
            visible,
        },
        EngineEvent::RevealFinished {
            message_id,
            outcome,
        } => Msg::RevealFinished {
            message_id,
            outcome: map_outcome(outcome),
        },
        EngineEvent::DocumentsListed(Ok(documents)) => {
            Msg::DocumentsLoaded(documents.iter().map(map_document).collect())
        }
        EngineEvent::DocumentsListed(Err(err)) => Msg::DocumentsFailed {
            error: err.to_string(),
        },
        EngineEvent::UploadCompleted { result, .. } => match result {
            Ok(document) => Msg::UploadSucceeded {
                document: map_document(&document),
            },
            Err(err) => Msg::UploadFailed {
                error: err.to_string(),
            },
        },
    }
}

fn map_document(document: &Document) -> DocumentEntry {
    DocumentEntry {
        id: document.id,
        filename: document.metadata.filename.clone(),
    }
}

fn map_outcome(outcome: axiom_engine::RevealOutcome) -> RevealOutcome {
    match outcome {
        axiom_engine::RevealOutcome::Completed => RevealOutcome::Completed,
        axiom_engine::RevealOutcome::Cancelled => RevealOutcome::Cancelled,
    }
}
