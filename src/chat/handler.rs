use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{Error, Result};

use super::models::MessageEntry;
use super::session::SessionContext;
use crate::ask::{AskRequest, SharedAskBackend, reply_text, strict_reply_text};
use crate::ui::{InputField, SharedView, lock_view};

/// Shown instead of the reply when `ResponsePolicy::Strict` rejects it.
pub const REJECTED_REPLY: &str = "Error: the server sent a reply that could not be read.";

/// What happens when the trigger fires while a send is still pending.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SendPolicy {
    /// Every trigger starts its own send. Replies are appended in the
    /// order they arrive, which may differ from the order sent.
    #[default]
    Overlap,
    /// The trigger is disabled until the pending send settles.
    Exclusive,
}

/// How much of the reply body is trusted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ResponsePolicy {
    /// Render `response` whatever it is, `undefined` when missing.
    #[default]
    Lenient,
    /// Require a string `response` and show `REJECTED_REPLY` otherwise.
    Strict,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandlerState {
    Idle,
    Sending,
}

#[derive(Debug, PartialEq, Eq)]
pub enum SendOutcome {
    /// The input was blank so nothing happened.
    Ignored,
    /// The trigger is disabled because a send is pending.
    Busy,
    Replied(MessageEntry),
}

/// Result of the synchronous half of a send.
pub enum Trigger {
    Ignored,
    Busy,
    Sent(PendingSend),
}

/// Counts a send as in flight until dropped.
struct InFlight(Arc<AtomicUsize>);

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Handles the send trigger of a chat input: echoes the user's text
/// into the transcript, asks the backend and appends the reply.
///
/// Sending is split in two. `trigger` does everything that happens
/// immediately (read, validate, echo, clear) and `PendingSend::complete`
/// does the network round trip. `send_message` runs both back to back.
pub struct ChatInputHandler {
    backend: SharedAskBackend,
    session: SessionContext,
    input: InputField,
    view: SharedView,
    send_policy: SendPolicy,
    response_policy: ResponsePolicy,
    in_flight: Arc<AtomicUsize>,
}

impl ChatInputHandler {
    pub fn new(backend: SharedAskBackend, input: InputField, view: SharedView) -> Self {
        Self {
            backend,
            session: SessionContext::default(),
            input,
            view,
            send_policy: SendPolicy::default(),
            response_policy: ResponsePolicy::default(),
            in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn session(mut self, session: SessionContext) -> Self {
        self.session = session;
        self
    }

    pub fn send_policy(mut self, policy: SendPolicy) -> Self {
        self.send_policy = policy;
        self
    }

    pub fn response_policy(mut self, policy: ResponsePolicy) -> Self {
        self.response_policy = policy;
        self
    }

    pub fn session_id(&self) -> &str {
        self.session.id()
    }

    pub fn input(&self) -> &InputField {
        &self.input
    }

    pub fn state(&self) -> HandlerState {
        if self.in_flight.load(Ordering::SeqCst) == 0 {
            HandlerState::Idle
        } else {
            HandlerState::Sending
        }
    }

    fn acquire(&self) -> Option<InFlight> {
        match self.send_policy {
            SendPolicy::Overlap => {
                self.in_flight.fetch_add(1, Ordering::SeqCst);
            }
            SendPolicy::Exclusive => {
                self.in_flight
                    .compare_exchange(0, 1, Ordering::SeqCst, Ordering::SeqCst)
                    .ok()?;
            }
        }
        Some(InFlight(self.in_flight.clone()))
    }

    /// Reads the input and, if there is anything to send, appends the
    /// user entry and clears the input. Nothing here waits on I/O so
    /// the next trigger always sees the cleared input.
    pub fn trigger(&self) -> Result<Trigger> {
        let text = self.input.value().trim().to_string();
        if text.is_empty() {
            return Ok(Trigger::Ignored);
        }

        let Some(guard) = self.acquire() else {
            tracing::debug!("Send already pending, ignoring trigger");
            return Ok(Trigger::Busy);
        };

        lock_view(&self.view).append(MessageEntry::user(&text))?;
        self.input.clear();

        Ok(Trigger::Sent(PendingSend {
            request: AskRequest::new(&text, self.session.id()),
            backend: self.backend.clone(),
            view: self.view.clone(),
            response_policy: self.response_policy,
            _in_flight: guard,
        }))
    }

    pub async fn send_message(&self) -> Result<SendOutcome> {
        match self.trigger()? {
            Trigger::Ignored => Ok(SendOutcome::Ignored),
            Trigger::Busy => Ok(SendOutcome::Busy),
            Trigger::Sent(pending) => Ok(SendOutcome::Replied(pending.complete().await?)),
        }
    }
}

/// The awaited half of a send. Owns everything it needs so it can be
/// spawned onto its own task.
pub struct PendingSend {
    request: AskRequest,
    backend: SharedAskBackend,
    view: SharedView,
    response_policy: ResponsePolicy,
    _in_flight: InFlight,
}

impl PendingSend {
    pub fn request(&self) -> &AskRequest {
        &self.request
    }

    /// Waits for the reply and appends it as a bot entry. Transport
    /// and parse failures, and a `null` body under the lenient policy,
    /// are returned as-is without touching the transcript.
    pub async fn complete(self) -> Result<MessageEntry, Error> {
        let body = self.backend.ask(&self.request).await?;

        let text = match self.response_policy {
            ResponsePolicy::Lenient => reply_text(&body)?,
            ResponsePolicy::Strict => match strict_reply_text(&body) {
                Ok(text) => text,
                Err(err) => {
                    tracing::warn!("Rejected reply: {:#}", err);
                    REJECTED_REPLY.to_string()
                }
            },
        };

        let entry = MessageEntry::bot(&text);
        {
            let mut view = lock_view(&self.view);
            view.append(entry.clone())?;
            view.scroll_to_bottom()?;
        }

        Ok(entry)
    }
}
