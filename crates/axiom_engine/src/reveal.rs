use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;

use crate::{EngineEvent, MessageId, RevealOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealSettings {
    /// Fixed delay between two revealed characters.
    pub tick: Duration,
}

impl Default for RevealSettings {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(5),
        }
    }
}

pub trait RevealSink: Send + Sync {
    fn update(&self, visible: &str);
}

/// Forwards every visible prefix to the session as an engine event.
pub struct ChannelRevealSink {
    message_id: MessageId,
    tx: UnboundedSender<EngineEvent>,
}

impl ChannelRevealSink {
    pub fn new(message_id: MessageId, tx: UnboundedSender<EngineEvent>) -> Self {
        Self { message_id, tx }
    }
}

impl RevealSink for ChannelRevealSink {
    fn update(&self, visible: &str) {
        let _ = self.tx.send(EngineEvent::RevealProgress {
            message_id: self.message_id,
            visible: visible.to_string(),
        });
    }
}

/// Reveals `text` one character per tick until done or `cancel` fires.
///
/// The token is only observed between characters: before each tick and while
/// waiting out the delay. A cancelled reveal leaves the last emitted prefix as
/// is and emits nothing more. An empty text produces a single empty update.
pub async fn reveal(
    text: &str,
    tick: Duration,
    sink: &dyn RevealSink,
    cancel: &CancellationToken,
) -> RevealOutcome {
    if text.is_empty() {
        sink.update("");
        return RevealOutcome::Completed;
    }

    let mut visible = String::with_capacity(text.len());
    for ch in text.chars() {
        if cancel.is_cancelled() {
            return RevealOutcome::Cancelled;
        }
        visible.push(ch);
        sink.update(&visible);

        tokio::select! {
            biased;
            () = cancel.cancelled() => return RevealOutcome::Cancelled,
            () = tokio::time::sleep(tick) => {}
        }
    }
    RevealOutcome::Completed
}
