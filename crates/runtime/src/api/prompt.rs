//! Channel-backed confirmation surface.
//!
//! The flow side holds a [`PromptChannel`]; whoever drives the UI drains
//! [`PromptRequest`]s from the receiver and answers each one. Dropping a
//! request without answering counts as a cancellation.
use async_trait::async_trait;
use game_core::AccDiffData;
use tokio::sync::{mpsc, oneshot};

use super::providers::AccDiffPrompt;

/// A pending confirmation awaiting the operator's answer.
#[derive(Debug)]
pub struct PromptRequest {
    pub data: AccDiffData,
    reply: oneshot::Sender<Option<AccDiffData>>,
}

impl PromptRequest {
    /// Confirms with a (possibly edited) bundle.
    pub fn accept(self, data: AccDiffData) {
        // The flow may have gone away; nothing left to answer then.
        let _ = self.reply.send(Some(data));
    }

    /// Confirms the bundle as presented.
    pub fn accept_unchanged(self) {
        let data = self.data.clone();
        self.accept(data);
    }

    pub fn cancel(self) {
        let _ = self.reply.send(None);
    }
}

#[derive(Debug, Clone)]
pub struct PromptChannel {
    tx: mpsc::Sender<PromptRequest>,
}

impl PromptChannel {
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<PromptRequest>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self { tx }, rx)
    }
}

#[async_trait]
impl AccDiffPrompt for PromptChannel {
    async fn confirm(&self, data: &AccDiffData) -> Option<AccDiffData> {
        let (reply, answer) = oneshot::channel();
        let request = PromptRequest {
            data: data.clone(),
            reply,
        };
        if self.tx.send(request).await.is_err() {
            tracing::warn!(target: "runtime::prompt", "confirmation surface closed");
            return None;
        }
        answer.await.ok().flatten()
    }
}
