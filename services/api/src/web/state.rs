//! services/api/src/web/state.rs
//!
//! Defines the application's shared and connection-specific states.

use crate::config::Config;
use health_assistant_core::ports::{DoctorDirectory, KeyValueStore};
use health_assistant_core::{Locale, ResponseAggregator};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

//=========================================================================================
// AppState (Shared Across All Connections)
//=========================================================================================

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn KeyValueStore>,
    pub directory: Arc<dyn DoctorDirectory>,
    pub aggregator: Arc<ResponseAggregator>,
    pub config: Arc<Config>,
}

impl AppState {
    /// The request's locale, or the configured default.
    pub fn locale_or_default(&self, requested: Option<Locale>) -> Locale {
        requested.unwrap_or(self.config.default_locale)
    }
}

//=========================================================================================
// ChatSession (Specific to One WebSocket Connection)
//=========================================================================================

/// The state for a single, active WebSocket chat connection.
pub struct ChatSession {
    pub user_id: Uuid,
    /// The token of the aggregation currently in flight, if any.
    in_flight: Option<CancellationToken>,
}

impl ChatSession {
    pub fn new(user_id: Uuid) -> Self {
        Self {
            user_id,
            in_flight: None,
        }
    }

    /// Cancels whatever is in flight and hands out the token for a new request.
    pub fn begin_request(&mut self) -> CancellationToken {
        self.cancel_in_flight();
        let token = CancellationToken::new();
        self.in_flight = Some(token.clone());
        token
    }

    /// Returns `true` when there was something to cancel.
    pub fn cancel_in_flight(&mut self) -> bool {
        match self.in_flight.take() {
            Some(token) if !token.is_cancelled() => {
                token.cancel();
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_request_cancels_the_previous_one() {
        let mut session = ChatSession::new(Uuid::new_v4());
        let first = session.begin_request();
        let second = session.begin_request();

        assert!(first.is_cancelled());
        assert!(!second.is_cancelled());
        assert!(session.cancel_in_flight());
        assert!(second.is_cancelled());
        assert!(!session.cancel_in_flight());
    }
}
