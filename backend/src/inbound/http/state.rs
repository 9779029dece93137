//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{RosterCommand, RosterQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub roster_command: Arc<dyn RosterCommand>,
    pub roster_query: Arc<dyn RosterQuery>,
}

impl HttpState {
    /// Construct state from the roster driving ports.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use roster::domain::ports::{FixtureRosterCommand, FixtureRosterQuery};
    /// use roster::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(Arc::new(FixtureRosterCommand), Arc::new(FixtureRosterQuery));
    /// let _query = state.roster_query.clone();
    /// ```
    pub fn new(roster_command: Arc<dyn RosterCommand>, roster_query: Arc<dyn RosterQuery>) -> Self {
        Self {
            roster_command,
            roster_query,
        }
    }

    /// Construct state where one service implements both ports.
    pub fn from_service<T>(service: Arc<T>) -> Self
    where
        T: RosterCommand + RosterQuery + 'static,
    {
        Self {
            roster_command: service.clone(),
            roster_query: service,
        }
    }
}
