//! Domain primitives, aggregates, and services.
//!
//! Purpose: keep the roster rules (identity, conflict detection, assignment)
//! free of HTTP and database concerns. Inbound adapters call the driving ports
//! in [`ports`]; outbound adapters implement the driven ones.
//!
//! Public surface:
//! - `Error` / `ErrorCode`: transport-agnostic failure payload.
//! - `LecturerId`, `StudentId`, `PersonName`: validated identity newtypes.
//! - `Lecturer`, `Student` and their joined views.
//! - `RosterService` / `RosterError`: the assignment core.
//! - `TraceId`: request-scoped correlation identifier.

pub mod error;
pub mod ports;
pub mod roster;
mod roster_service;
pub mod trace_id;

pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::roster::{
    IdentityValidationError, Lecturer, LecturerId, LecturerWithStudents, PersonName, RosterError,
    Student, StudentId, StudentWithLecturers,
};
pub use self::roster_service::RosterService;
pub use self::trace_id::TraceId;
