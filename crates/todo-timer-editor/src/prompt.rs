/*
[INPUT]:  Confirmation message from the timer coordinator
[OUTPUT]: Yes/no answer from a human (terminal, TUI modal) or a scripted stand-in
[POS]:    Boundary layer - the only blocking human-interaction primitive
[UPDATE]: When adding a new front end that answers prompts
*/

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

/// Asks the user whether to discard the in-progress draft.
#[async_trait]
pub trait ConfirmPrompt: Send + Sync {
    async fn confirm(&self, message: &str) -> Result<bool>;
}

/// A confirmation waiting for a front end to answer it.
#[derive(Debug)]
pub struct PromptRequest {
    pub message: String,
    reply: oneshot::Sender<bool>,
}

impl PromptRequest {
    pub fn new(message: impl Into<String>) -> (Self, oneshot::Receiver<bool>) {
        let (reply, rx) = oneshot::channel();
        (
            Self {
                message: message.into(),
                reply,
            },
            rx,
        )
    }

    /// Send the answer back. Fails only if the asker is gone.
    pub fn answer(self, confirmed: bool) -> Result<()> {
        self.reply
            .send(confirmed)
            .map_err(|_| anyhow!("prompt requester dropped before answer"))
    }
}

/// Forwards prompts to whichever UI loop owns the receiving side.
#[derive(Debug, Clone)]
pub struct ChannelPrompt {
    tx: mpsc::UnboundedSender<PromptRequest>,
}

impl ChannelPrompt {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<PromptRequest>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

#[async_trait]
impl ConfirmPrompt for ChannelPrompt {
    async fn confirm(&self, message: &str) -> Result<bool> {
        let (request, rx) = PromptRequest::new(message);
        self.tx
            .send(request)
            .map_err(|_| anyhow!("prompt receiver closed"))?;
        rx.await
            .map_err(|_| anyhow!("prompt dismissed without an answer"))
    }
}

/// Answers every prompt immediately from a script, recording the messages.
///
/// Falls back to `default_answer` once the script is exhausted.
#[derive(Debug)]
pub struct ScriptedPrompt {
    answers: Mutex<VecDeque<bool>>,
    default_answer: bool,
    asked: Mutex<Vec<String>>,
}

impl ScriptedPrompt {
    pub fn always(answer: bool) -> Self {
        Self::with_answers(Vec::new(), answer)
    }

    pub fn with_answers(answers: impl IntoIterator<Item = bool>, default_answer: bool) -> Self {
        Self {
            answers: Mutex::new(answers.into_iter().collect()),
            default_answer,
            asked: Mutex::new(Vec::new()),
        }
    }

    /// Messages seen so far, in order.
    pub fn asked(&self) -> Vec<String> {
        self.asked
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl ConfirmPrompt for ScriptedPrompt {
    async fn confirm(&self, message: &str) -> Result<bool> {
        self.asked
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_string());
        let next = self
            .answers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();
        Ok(next.unwrap_or(self.default_answer))
    }
}
