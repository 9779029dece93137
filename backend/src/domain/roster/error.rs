//! Failures raised by the roster service.

use tracing::error;

use crate::domain::Error;
use crate::domain::ports::RosterStoreError;

use super::identity::{LecturerId, StudentId};

/// Typed failure of a roster operation.
///
/// Every variant aborts the enclosing transaction; none leaves partial state
/// behind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RosterError {
    /// The requested lecturer does not exist.
    #[error("Lecturer with ID '{0}' not found")]
    LecturerNotFound(LecturerId),
    /// The requested student does not exist.
    #[error("Student with ID '{0}' not found")]
    StudentNotFound(StudentId),
    /// A lecturer with the requested id already exists.
    #[error("Lecturer with ID '{0}' already exists")]
    LecturerAlreadyExists(LecturerId),
    /// The student id is already held by a person with a different name.
    #[error("Student with ID '{0}' already exists with different name/surname")]
    StudentIdentityConflict(StudentId),
    /// The student is already assigned to the lecturer.
    #[error("Student with ID '{0}' is already assigned to this lecturer")]
    StudentAlreadyAssigned(StudentId),
    /// Another request created the same student first; the caller may retry.
    #[error("Student with ID '{0}' was created by a concurrent request; retry the assignment")]
    ConcurrentStudentCreation(StudentId),
    /// The identity store failed.
    #[error("identity store failure: {0}")]
    Store(#[from] RosterStoreError),
}

impl From<RosterError> for Error {
    fn from(value: RosterError) -> Self {
        match value {
            RosterError::LecturerNotFound(_) | RosterError::StudentNotFound(_) => {
                Self::not_found(value.to_string())
            }
            RosterError::LecturerAlreadyExists(_)
            | RosterError::StudentIdentityConflict(_)
            | RosterError::StudentAlreadyAssigned(_)
            | RosterError::ConcurrentStudentCreation(_) => Self::conflict(value.to_string()),
            RosterError::Store(RosterStoreError::Connection { message }) => {
                error!(%message, "identity store unavailable");
                Self::service_unavailable("Identity store unavailable")
            }
            RosterError::Store(store_error) => {
                error!(error = %store_error, "unexpected identity store failure");
                Self::internal("An unexpected error occurred")
            }
        }
    }
}
