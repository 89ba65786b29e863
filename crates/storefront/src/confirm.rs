//! Non-blocking confirmation requests
//!
//! Instead of freezing the caller on a modal prompt, a confirmation is a
//! request/response pair: the UI side gets a [`ConfirmationRequest`] to
//! answer, and the code that wants the answer awaits a [`PendingDecision`].
//! Only an explicit affirmative answer lets the downstream action proceed;
//! an unanswered request that gets dropped counts as declined.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::oneshot;

/// Answer to a confirmation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Affirmed,
    Declined,
}

/// Question waiting for the user's answer
#[derive(Debug)]
pub struct ConfirmationRequest {
    prompt: String,
    responder: oneshot::Sender<Decision>,
}

/// Future resolving to the user's answer
#[derive(Debug)]
pub struct PendingDecision {
    rx: oneshot::Receiver<Decision>,
}

/// Create a confirmation request and the decision future it resolves
pub fn confirmation(prompt: impl Into<String>) -> (ConfirmationRequest, PendingDecision) {
    let (tx, rx) = oneshot::channel();
    (
        ConfirmationRequest {
            prompt: prompt.into(),
            responder: tx,
        },
        PendingDecision { rx },
    )
}

impl ConfirmationRequest {
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn respond(self, decision: Decision) {
        // Nobody waiting any more; nothing to do
        let _ = self.responder.send(decision);
    }

    pub fn affirm(self) {
        self.respond(Decision::Affirmed);
    }

    pub fn decline(self) {
        self.respond(Decision::Declined);
    }
}

impl PendingDecision {
    /// Run `action` only if the request is affirmed
    pub async fn then<T, F>(self, action: F) -> Option<T>
    where
        F: FnOnce() -> T,
    {
        match self.await {
            Decision::Affirmed => Some(action()),
            Decision::Declined => None,
        }
    }
}

impl Future for PendingDecision {
    type Output = Decision;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Decision> {
        Pin::new(&mut self.rx)
            .poll(cx)
            .map(|answer| answer.unwrap_or(Decision::Declined))
    }
}
