//! Builders wiring the identity store into the HTTP state.

use std::sync::Arc;

use actix_web::web;
use tracing::{info, warn};

use roster::domain::RosterService;
use roster::domain::ports::RosterStore;
use roster::inbound::http::state::HttpState;
use roster::outbound::memory::InMemoryRosterStore;
use roster::outbound::persistence::{DbPool, DieselRosterStore};

use super::ServerConfig;

/// Pick the identity store: PostgreSQL when a pool is configured, otherwise a
/// process-local in-memory roster.
pub(super) fn build_roster_store(db_pool: Option<&DbPool>) -> Arc<dyn RosterStore> {
    match db_pool {
        Some(pool) => {
            info!(max_connections = pool.max_size(), "using PostgreSQL identity store");
            Arc::new(DieselRosterStore::new(pool.clone()))
        }
        None => {
            warn!("no database configured; roster data will not survive a restart");
            Arc::new(InMemoryRosterStore::new())
        }
    }
}

/// Build the shared handler state for the configured store.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let store = build_roster_store(config.db_pool.as_ref());
    let service = Arc::new(RosterService::new(store));
    web::Data::new(HttpState::from_service(service))
}
