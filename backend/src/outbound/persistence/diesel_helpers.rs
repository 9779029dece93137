//! Shared helpers for the Diesel identity store.
//!
//! This module maps pool and Diesel failures onto [`RosterStoreError`] and
//! collects converted rows.

use tracing::debug;

use crate::domain::ports::RosterStoreError;

use super::pool::PoolError;

/// Map pool errors to identity store connection errors.
pub fn map_pool_error(error: PoolError) -> RosterStoreError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            RosterStoreError::connection(message)
        }
    }
}

/// Map Diesel errors to identity store errors.
///
/// Unique violations keep the constraint name so the service can tell which
/// insert collided.
pub fn map_diesel_error(error: diesel::result::Error) -> RosterStoreError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => RosterStoreError::query("record not found"),
        DieselError::QueryBuilderError(_) => RosterStoreError::query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            RosterStoreError::unique_violation(info.constraint_name().unwrap_or("unknown"))
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            RosterStoreError::connection("database connection error")
        }
        DieselError::BrokenTransactionManager => {
            RosterStoreError::connection("database transaction state lost")
        }
        _ => RosterStoreError::query("database error"),
    }
}

/// Collect row conversion results, mapping the first error through `map_err`.
pub fn collect_rows<T, E>(
    results: impl Iterator<Item = Result<T, String>>,
    map_err: impl FnOnce(String) -> E,
) -> Result<Vec<T>, E> {
    results.collect::<Result<Vec<_>, _>>().map_err(map_err)
}
