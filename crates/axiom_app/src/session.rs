//! The single active conversation: controller state plus the engine driving it.

use std::sync::Arc;

use axiom_core::{update, AppState, AppViewModel, Msg};
use axiom_engine::{
    EngineEvent, EngineHandle, HttpRetrievalClient, RetrievalClient, TransportError,
};
use engine_logging::{engine_debug, engine_info};
use tokio::sync::mpsc;

use crate::config::AppConfig;
use crate::effects::{map_event, EffectRunner};

/// Owns the controller state and routes messages, effects and engine events.
///
/// All work runs as tasks on the caller's tokio runtime; on a current-thread
/// runtime retrieval and reveal interleave cooperatively with user input.
pub struct Session {
    state: AppState,
    runner: EffectRunner,
    events: mpsc::UnboundedReceiver<EngineEvent>,
}

impl Session {
    /// Must be called from within a tokio runtime.
    pub fn new(client: Arc<dyn RetrievalClient>, config: &AppConfig) -> Self {
        let (engine, events) = EngineHandle::new(client, config.reveal_settings());
        Self {
            state: AppState::with_top_k(config.top_k),
            runner: EffectRunner::new(engine),
            events,
        }
    }

    /// Session backed by the HTTP backend at `config.api_url`.
    pub fn connect(config: &AppConfig) -> Result<Self, TransportError> {
        let client = HttpRetrievalClient::new(config.client_settings())?;
        engine_info!("Session backend {}", client.base_url());
        Ok(Self::new(Arc::new(client), config))
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn view(&self) -> AppViewModel {
        self.state.view()
    }

    pub fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        engine_logging::set_active_turn(self.state.active_turn());
        if !effects.is_empty() {
            engine_debug!("dispatching {} effects", effects.len());
        }
        self.runner.run(effects);
    }

    /// Replaces the draft with `query` and submits it.
    pub fn submit(&mut self, query: &str) {
        self.dispatch(Msg::InputChanged(query.to_string()));
        self.dispatch(Msg::QuerySubmitted);
    }

    pub fn stop(&mut self) {
        self.dispatch(Msg::StopClicked);
    }

    pub fn reset(&mut self) {
        self.dispatch(Msg::ResetClicked);
    }

    /// Waits for the next engine event and applies it. Returns `false` once
    /// the engine can no longer report anything.
    pub async fn pump(&mut self) -> bool {
        match self.events.recv().await {
            Some(event) => {
                self.dispatch(map_event(event));
                true
            }
            None => false,
        }
    }

    /// Pumps until the active turn and any upload have finished.
    pub async fn settle(&mut self) {
        while self.state.is_busy() || self.state.is_uploading() {
            if !self.pump().await {
                break;
            }
        }
    }

    /// View of the state if anything changed since the last call.
    pub fn take_changes(&mut self) -> Option<AppViewModel> {
        if self.state.consume_dirty() {
            Some(self.state.view())
        } else {
            None
        }
    }
}
