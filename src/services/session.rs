// src/services/session.rs
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::{
    answer_client::AnswerService,
    transcript::{Message, Transcript},
};
use crate::{error::AskError, message::AnswerResponse};

/// Bot text shown for any failed answer request.
pub const FALLBACK_REPLY: &str = "Sorry, there was an error processing your request.";

/// Proof that a request is in flight. Consumed by [`ChatSession::resolve`],
/// so each request resolves exactly once.
#[derive(Debug)]
pub struct PendingQuery {
    session_id: Uuid,
    query: String,
}

impl PendingQuery {
    pub fn query(&self) -> &str {
        &self.query
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Draft was blank or a request was already pending. Nothing changed.
    Ignored,
    Answered { references: Option<String> },
    Failed,
}

/// Chat session controller: owns the transcript, the composer draft and
/// the pending flag.
#[derive(Debug)]
pub struct ChatSession {
    id: Uuid,
    transcript: Transcript,
    draft: String,
    pending: bool,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            transcript: Transcript::new(),
            draft: String::new(),
            pending: false,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn can_submit(&self) -> bool {
        !self.pending && !self.draft.trim().is_empty()
    }

    /// Record the user's message, clear the draft and mark the session
    /// pending. Returns `None` when the draft is blank or a request is
    /// already in flight.
    pub fn begin_submit(&mut self) -> Option<PendingQuery> {
        if self.pending {
            debug!(session = %self.id, "submit ignored: request pending");
            return None;
        }
        if self.draft.trim().is_empty() {
            debug!(session = %self.id, "submit ignored: empty draft");
            return None;
        }

        let query = self.draft.clone();
        let len = self.transcript.push(Message::user(query.clone()));
        self.draft.clear();
        self.pending = true;

        info!(session = %self.id, messages = len, "query submitted");
        Some(PendingQuery { session_id: self.id, query })
    }

    /// Append the bot reply for `pending` and clear the pending flag.
    pub fn resolve(
        &mut self,
        pending: PendingQuery,
        result: Result<AnswerResponse, AskError>,
    ) -> SubmitOutcome {
        if pending.session_id != self.id {
            warn!(session = %self.id, other = %pending.session_id, "dropping reply for another session");
            return SubmitOutcome::Ignored;
        }

        let outcome = match result {
            Ok(resp) => {
                self.transcript.push(Message::bot(resp.answer));
                SubmitOutcome::Answered { references: resp.references }
            }
            Err(err) => {
                warn!(session = %self.id, error = %err, "answer request failed");
                self.transcript.push(Message::bot(FALLBACK_REPLY));
                SubmitOutcome::Failed
            }
        };
        self.pending = false;
        outcome
    }

    /// Full submit cycle against `service`: one request per accepted draft.
    pub async fn submit<S>(&mut self, service: &S) -> SubmitOutcome
    where
        S: AnswerService + ?Sized,
    {
        let Some(pending) = self.begin_submit() else {
            return SubmitOutcome::Ignored;
        };
        let result = service.ask(pending.query()).await;
        self.resolve(pending, result)
    }

    /// Replace the draft with `text`, then submit it.
    pub async fn submit_text<S>(&mut self, text: impl Into<String>, service: &S) -> SubmitOutcome
    where
        S: AnswerService + ?Sized,
    {
        if self.pending {
            debug!(session = %self.id, "submit ignored: request pending");
            return SubmitOutcome::Ignored;
        }
        self.set_draft(text);
        self.submit(service).await
    }
}
