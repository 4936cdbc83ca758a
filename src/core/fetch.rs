//! Per-page fetch lifecycle: idle → loading → success or error, with a
//! retry path back through loading. Completions are matched to the request
//! that produced them, so a response that arrives after the page moved on
//! is discarded instead of clobbering newer state.

use crate::core::api::{ApiError, ApiResult};

/// Message shown when a failure carries no text of its own.
const UNKNOWN_ERROR: &str = "Unknown error occurred";

/// Identifies one dispatched request. Tokens increase monotonically per
/// controller; only the most recent one is live.
pub type RequestToken = u64;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum FetchState<T> {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// A request is in flight. `retrying` distinguishes the spinner-retry
    /// affordance from the initial skeleton; the fetch path is identical.
    Loading { retrying: bool },
    Success(T),
    Error { message: String },
}

impl<T> FetchState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading { .. })
    }

    pub fn is_retrying(&self) -> bool {
        matches!(self, FetchState::Loading { retrying: true })
    }
}

/// Drives the fetch lifecycle for one page.
///
/// `start` and `retry` hand back the token for the request they open;
/// the caller runs the fetch and feeds the outcome to `resolve` with that
/// token. Starting a new request while one is in flight supersedes it:
/// the newer token wins and the older completion is dropped on arrival.
#[derive(Debug, Default)]
pub struct FetchController<T> {
    state: FetchState<T>,
    next_token: RequestToken,
    current: Option<RequestToken>,
}

impl<T> FetchController<T> {
    pub fn new() -> Self {
        FetchController {
            state: FetchState::Idle,
            next_token: 0,
            current: None,
        }
    }

    pub fn state(&self) -> &FetchState<T> {
        &self.state
    }

    pub fn data(&self) -> Option<&T> {
        match &self.state {
            FetchState::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            FetchState::Error { message } => Some(message),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    pub fn is_retrying(&self) -> bool {
        self.state.is_retrying()
    }

    /// Open a fresh request. Clears any previous data or error; the
    /// loading view fully replaces content.
    pub fn start(&mut self) -> RequestToken {
        self.begin(false)
    }

    /// Open a retry request. Identical fetch path, but the state carries
    /// the retrying indicator so the page can show a lighter affordance.
    pub fn retry(&mut self) -> RequestToken {
        self.begin(true)
    }

    fn begin(&mut self, retrying: bool) -> RequestToken {
        let token = self.next_token;
        self.next_token += 1;
        self.current = Some(token);
        self.state = FetchState::Loading { retrying };
        token
    }

    /// Apply a completed fetch. Returns false (leaving state untouched)
    /// when the token is no longer current: a stale response from a
    /// superseded request or from a page the user already left.
    pub fn resolve(&mut self, token: RequestToken, result: ApiResult<T>) -> bool {
        if self.current != Some(token) {
            tracing::debug!(token, "discarding stale fetch completion");
            return false;
        }
        self.current = None;
        self.state = match result {
            Ok(data) => FetchState::Success(data),
            Err(error) => FetchState::Error {
                message: error_message(&error),
            },
        };
        true
    }
}

fn error_message(error: &ApiError) -> String {
    let message = error.to_string();
    if message.is_empty() {
        UNKNOWN_ERROR.to_string()
    } else {
        message
    }
}
