//! Per-request state machine
//!
//! `Idle → InFlight → {Succeeded | Failed}`. A tracker hands out a [`Ticket`]
//! when a request starts and accepts the outcome only for the ticket it is
//! still waiting on. Starting again while in flight is refused, and resetting
//! or tearing the tracker down invalidates whatever is outstanding, so a late
//! response can never touch state that is no longer displayed.

use thiserror::Error;

use crate::gateway::{ApiError, ApiResult};
use crate::model::FormError;

/// Why a page shows an error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PageError {
    /// Rejected before any request was sent
    #[error(transparent)]
    Form(#[from] FormError),

    /// The backend call failed
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl PageError {
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Whether the session should be cleared
    pub fn is_auth(&self) -> bool {
        matches!(self, PageError::Api(e) if e.is_auth())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestState<T> {
    Idle,
    InFlight,
    Succeeded(T),
    Failed(PageError),
}

/// Proof that a request was started. Only the latest ticket is honoured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
}

/// Why a submission did not start
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Blocked {
    #[error("A request is already in progress")]
    InFlight,

    /// The form was rejected; the error is also recorded on the tracker
    #[error(transparent)]
    Invalid(#[from] FormError),

    /// The page needs a session and there is none
    #[error("Please sign in first")]
    SignedOut,

    /// Nothing to send; the submission is ignored
    #[error("Nothing to send")]
    Empty,

    /// The owning controller has been torn down
    #[error("Page closed")]
    Closed,
}

/// What applying a response did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// The response belonged to a superseded request and was dropped
    Discarded,
    Succeeded,
    Failed,
    /// The backend rejected the token; the shell must sign out
    SessionExpired,
}

/// A started request: its ticket plus what to send
#[derive(Debug, Clone, PartialEq)]
pub struct Pending<R> {
    pub ticket: Ticket,
    pub request: R,
}

/// A finished request, ready to be applied to its controller
#[derive(Debug, Clone, PartialEq)]
pub struct Settled<T> {
    pub ticket: Ticket,
    pub outcome: ApiResult<T>,
}

impl<T> Settled<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Settled<U> {
        Settled {
            ticket: self.ticket,
            outcome: self.outcome.map(f),
        }
    }
}

impl<R> Pending<R> {
    /// Pair this ticket with the outcome of the call it stands for
    pub fn settle<T>(&self, outcome: ApiResult<T>) -> Settled<T> {
        Settled {
            ticket: self.ticket,
            outcome,
        }
    }
}

/// Tracks one kind of request for one controller
#[derive(Debug, Clone)]
pub struct RequestTracker<T> {
    state: RequestState<T>,
    generation: u64,
    live: bool,
}

impl<T> Default for RequestTracker<T> {
    fn default() -> Self {
        Self {
            state: RequestState::Idle,
            generation: 0,
            live: true,
        }
    }
}

impl<T> RequestTracker<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &RequestState<T> {
        &self.state
    }

    pub fn is_in_flight(&self) -> bool {
        matches!(self.state, RequestState::InFlight)
    }

    pub fn is_live(&self) -> bool {
        self.live
    }

    pub fn value(&self) -> Option<&T> {
        match &self.state {
            RequestState::Succeeded(value) => Some(value),
            _ => None,
        }
    }

    pub fn value_mut(&mut self) -> Option<&mut T> {
        match &mut self.state {
            RequestState::Succeeded(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&PageError> {
        match &self.state {
            RequestState::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// Check that a new request may start
    pub fn check_ready(&self) -> Result<(), Blocked> {
        if !self.live {
            return Err(Blocked::Closed);
        }
        if self.is_in_flight() {
            return Err(Blocked::InFlight);
        }
        Ok(())
    }

    /// Move to `InFlight` and issue a ticket
    pub fn begin(&mut self) -> Result<Ticket, Blocked> {
        self.check_ready()?;
        self.generation += 1;
        self.state = RequestState::InFlight;
        Ok(Ticket {
            generation: self.generation,
        })
    }

    /// Start a request even if one is in flight. The outstanding ticket is
    /// superseded, so its response is discarded when it lands.
    pub fn restart(&mut self) -> Result<Ticket, Blocked> {
        if !self.live {
            return Err(Blocked::Closed);
        }
        self.generation += 1;
        self.state = RequestState::InFlight;
        Ok(Ticket {
            generation: self.generation,
        })
    }

    /// Record a client-side rejection. Ignored while a request is in flight.
    pub fn reject(&mut self, error: FormError) -> Blocked {
        if let Err(blocked) = self.check_ready() {
            return blocked;
        }
        self.state = RequestState::Failed(PageError::Form(error.clone()));
        Blocked::Invalid(error)
    }

    /// Whether an outcome for `ticket` would be applied
    pub fn accepts(&self, ticket: Ticket) -> bool {
        self.live && self.is_in_flight() && ticket.generation == self.generation
    }

    /// Apply an outcome. Returns `false` (and changes nothing) for stale tickets.
    pub fn settle(&mut self, ticket: Ticket, outcome: ApiResult<T>) -> bool {
        if !self.accepts(ticket) {
            tracing::debug!(
                ticket = ticket.generation,
                current = self.generation,
                "Discarding response for a superseded request"
            );
            return false;
        }

        self.state = match outcome {
            Ok(value) => RequestState::Succeeded(value),
            Err(e) => RequestState::Failed(PageError::Api(e)),
        };
        true
    }

    /// Apply a settled request and report what happened
    pub fn apply(&mut self, settled: Settled<T>) -> Applied {
        let expired = matches!(&settled.outcome, Err(e) if e.is_auth());
        if !self.settle(settled.ticket, settled.outcome) {
            return Applied::Discarded;
        }
        match self.state {
            RequestState::Succeeded(_) => Applied::Succeeded,
            _ if expired => Applied::SessionExpired,
            _ => Applied::Failed,
        }
    }

    /// Back to `Idle`, invalidating any outstanding ticket
    pub fn reset(&mut self) {
        self.generation += 1;
        self.state = RequestState::Idle;
    }

    /// The owning controller is going away; nothing may settle or start
    pub fn teardown(&mut self) {
        self.reset();
        self.live = false;
    }
}

impl RequestTracker<()> {
    /// Apply a settled request, handing the value back to the caller instead
    /// of storing it. The value is returned only when the outcome was applied.
    pub fn apply_with<U>(&mut self, settled: Settled<U>) -> (Applied, Option<U>) {
        let Settled { ticket, outcome } = settled;
        match outcome {
            Ok(value) => {
                let applied = self.apply(Settled {
                    ticket,
                    outcome: Ok(()),
                });
                (applied, (applied == Applied::Succeeded).then_some(value))
            }
            Err(e) => (
                self.apply(Settled {
                    ticket,
                    outcome: Err(e),
                }),
                None,
            ),
        }
    }
}
