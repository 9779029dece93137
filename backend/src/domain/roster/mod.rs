//! Lecturer/student roster domain types.
//!
//! Lecturers and students are independent records linked by an association
//! edge set held in the identity store. The roster service is the only
//! component that adds edges.

mod error;
mod identity;
mod model;

pub use error::RosterError;
pub use identity::{IdentityValidationError, LecturerId, PersonName, StudentId};
pub use model::{Lecturer, LecturerWithStudents, Student, StudentWithLecturers};
