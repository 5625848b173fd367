use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use engine_logging::{engine_debug, engine_info, engine_warn};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::reveal::{reveal, ChannelRevealSink, RevealSettings};
use crate::upload::display_name;
use crate::{EngineEvent, MessageId, RetrievalClient, TurnId, UploadFile};

/// Executes backend calls and reveals as tasks on the caller's tokio runtime.
///
/// Every method must be called from within a runtime. Results come back as
/// [`EngineEvent`]s on the receiver returned by [`EngineHandle::new`], in the
/// order the tasks produce them.
#[derive(Clone)]
pub struct EngineHandle {
    client: Arc<dyn RetrievalClient>,
    reveal: RevealSettings,
    event_tx: mpsc::UnboundedSender<EngineEvent>,
    active: Arc<Mutex<Option<(TurnId, CancellationToken)>>>,
}

impl EngineHandle {
    pub fn new(
        client: Arc<dyn RetrievalClient>,
        reveal: RevealSettings,
    ) -> (Self, mpsc::UnboundedReceiver<EngineEvent>) {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let handle = Self {
            client,
            reveal,
            event_tx,
            active: Arc::new(Mutex::new(None)),
        };
        (handle, event_rx)
    }

    /// Starts the retrieval step of `turn`.
    ///
    /// Cancelling the turn does not abort the request; its result is still
    /// reported and left for the session to discard.
    pub fn search(&self, turn: TurnId, query: String, top_k: usize) {
        self.token_for(turn);
        let client = self.client.clone();
        let event_tx = self.event_tx.clone();
        tokio::spawn(async move {
            let result = client.search(&query, top_k).await;
            match &result {
                Ok(results) => engine_info!("search returned {} results", results.len()),
                Err(err) => engine_warn!("search failed: {}", err),
            }
            let _ = event_tx.send(EngineEvent::SearchCompleted { turn, result });
        });
    }

    pub fn reveal(&self, turn: TurnId, message_id: MessageId, text: String) {
        let token = self.token_for(turn);
        let tick = self.reveal.tick;
        let event_tx = self.event_tx.clone();
        tokio::spawn(async move {
            let sink = ChannelRevealSink::new(message_id, event_tx.clone());
            let outcome = reveal(&text, tick, &sink, &token).await;
            engine_debug!("reveal of message {} ended: {:?}", message_id, outcome);
            let _ = event_tx.send(EngineEvent::RevealFinished {
                message_id,
                outcome,
            });
        });
    }

    /// Trips the cancellation token of `turn` if it is the active one.
    pub fn cancel(&self, turn: TurnId) {
        let guard = self.active.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some((active, token)) = guard.as_ref() {
            if *active == turn {
                engine_info!("cancelling turn {}", turn);
                token.cancel();
            }
        }
    }

    pub fn list_documents(&self) {
        let client = self.client.clone();
        let event_tx = self.event_tx.clone();
        tokio::spawn(async move {
            let result = client.list_documents().await;
            if let Err(err) = &result {
                engine_warn!("listing documents failed: {}", err);
            }
            let _ = event_tx.send(EngineEvent::DocumentsListed(result));
        });
    }

    pub fn upload(&self, path: PathBuf) {
        let client = self.client.clone();
        let event_tx = self.event_tx.clone();
        tokio::spawn(async move {
            let filename = display_name(&path);
            let result = match UploadFile::read(&path).await {
                Ok(file) => client.upload(file).await.map_err(Into::into),
                Err(err) => Err(err),
            };
            if let Err(err) = &result {
                engine_warn!("upload of {} failed: {}", filename, err);
            }
            let _ = event_tx.send(EngineEvent::UploadCompleted { filename, result });
        });
    }

    /// Token shared by every step of `turn`; a new turn replaces the old one.
    fn token_for(&self, turn: TurnId) -> CancellationToken {
        let mut guard = self.active.lock().unwrap_or_else(PoisonError::into_inner);
        match guard.as_ref() {
            Some((active, token)) if *active == turn => token.clone(),
            _ => {
                let token = CancellationToken::new();
                *guard = Some((turn, token.clone()));
                token
            }
        }
    }
}
