//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! This module provides the concrete identity store backed by PostgreSQL via
//! the Diesel ORM with async support through `diesel-async` and `bb8`
//! connection pooling.
//!
//! # Architecture
//!
//! The persistence layer follows these principles:
//!
//! - **Thin adapters**: the store only translates between Diesel models and
//!   domain types. Roster rules live in the domain service.
//! - **Internal models**: Diesel row structs (`models.rs`) and schema
//!   definitions (`schema.rs`) are internal implementation details, never
//!   exposed to the domain layer.
//! - **Explicit transactions**: each roster operation checks out one
//!   connection and runs every statement on it between `BEGIN` and
//!   `COMMIT`/`ROLLBACK`.
//! - **Strongly typed errors**: all database errors are mapped to
//!   `RosterStoreError`.
//!
//! # Example
//!
//! ```ignore
//! use roster::outbound::persistence::{DbPool, DieselRosterStore, PoolConfig};
//!
//! let config = PoolConfig::new("postgres://localhost/mydb");
//! let pool = DbPool::new(config).await?;
//! let store = DieselRosterStore::new(pool);
//! ```

pub(crate) mod diesel_helpers;
mod diesel_roster_store;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_roster_store::DieselRosterStore;
pub use migrations::{MIGRATIONS, MigrationError, apply_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
