//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! Two identity stores implement the `RosterStore` port:
//!
//! - **persistence**: PostgreSQL-backed store using Diesel ORM
//! - **memory**: in-process store used when no database is configured and in
//!   tests
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod memory;
pub mod persistence;
