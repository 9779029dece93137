//! Driving port for roster reads.

use async_trait::async_trait;

use crate::domain::{Error, LecturerId, LecturerWithStudents, StudentId, StudentWithLecturers};

/// Driving port for roster read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RosterQuery: Send + Sync {
    /// Fetch a lecturer with the summaries of their students.
    async fn lecturer_with_students(&self, id: &LecturerId)
    -> Result<LecturerWithStudents, Error>;

    /// Fetch a student with the summaries of their lecturers.
    async fn student_with_lecturers(&self, id: &StudentId)
    -> Result<StudentWithLecturers, Error>;
}

/// Fixture query implementation for tests that do not need persistence.
///
/// Behaves like an empty roster.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRosterQuery;

#[async_trait]
impl RosterQuery for FixtureRosterQuery {
    async fn lecturer_with_students(
        &self,
        id: &LecturerId,
    ) -> Result<LecturerWithStudents, Error> {
        Err(Error::not_found(format!("Lecturer with ID '{id}' not found")))
    }

    async fn student_with_lecturers(
        &self,
        id: &StudentId,
    ) -> Result<StudentWithLecturers, Error> {
        Err(Error::not_found(format!("Student with ID '{id}' not found")))
    }
}
