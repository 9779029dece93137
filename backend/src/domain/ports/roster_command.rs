//! Driving port for roster mutations: creating lecturers and assigning
//! students to them.

use async_trait::async_trait;

use crate::domain::{Error, Lecturer, LecturerId, PersonName, Student, StudentId, StudentWithLecturers};

/// Request to create a lecturer with no students.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateLecturerRequest {
    pub lecturer_id: LecturerId,
    pub name: PersonName,
    pub surname: PersonName,
}

/// Request to assign a student, created on first use, to a lecturer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignStudentRequest {
    pub lecturer_id: LecturerId,
    pub student_id: StudentId,
    pub name: PersonName,
    pub surname: PersonName,
}

/// Driving port for roster write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RosterCommand: Send + Sync {
    /// Create a lecturer. Fails with a conflict when the id is taken.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use roster::domain::{LecturerId, PersonName};
    /// # use roster::domain::ports::{CreateLecturerRequest, FixtureRosterCommand, RosterCommand};
    /// # async fn example() -> Result<(), roster::domain::Error> {
    /// let command = FixtureRosterCommand;
    /// let lecturer = command
    ///     .register_lecturer(CreateLecturerRequest {
    ///         lecturer_id: LecturerId::new("L1").expect("valid id"),
    ///         name: PersonName::new("Jane").expect("valid name"),
    ///         surname: PersonName::new("Smith").expect("valid surname"),
    ///     })
    ///     .await?;
    /// assert_eq!(lecturer.id().as_str(), "L1");
    /// # Ok(())
    /// # }
    /// ```
    async fn register_lecturer(&self, request: CreateLecturerRequest) -> Result<Lecturer, Error>;

    /// Assign a student to a lecturer and return the student with every
    /// lecturer they now belong to.
    async fn assign_student(
        &self,
        request: AssignStudentRequest,
    ) -> Result<StudentWithLecturers, Error>;
}

/// Fixture command implementation for tests that do not need persistence.
///
/// Echoes requests back as if every lecturer existed and every student were
/// new.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRosterCommand;

#[async_trait]
impl RosterCommand for FixtureRosterCommand {
    async fn register_lecturer(&self, request: CreateLecturerRequest) -> Result<Lecturer, Error> {
        Ok(Lecturer::new(
            request.lecturer_id,
            request.name,
            request.surname,
        ))
    }

    async fn assign_student(
        &self,
        request: AssignStudentRequest,
    ) -> Result<StudentWithLecturers, Error> {
        let lecturer = Lecturer::new(
            request.lecturer_id,
            PersonName::new("Fixture").map_err(|err| Error::internal(err.to_string()))?,
            PersonName::new("Lecturer").map_err(|err| Error::internal(err.to_string()))?,
        );
        Ok(StudentWithLecturers {
            student: Student::new(request.student_id, request.name, request.surname),
            lecturers: vec![lecturer],
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[tokio::test]
    async fn fixture_assign_echoes_the_student() {
        let request = AssignStudentRequest {
            lecturer_id: LecturerId::new("L1").expect("valid id"),
            student_id: StudentId::new("S1").expect("valid id"),
            name: PersonName::new("Erika").expect("valid name"),
            surname: PersonName::new("Musterfrau").expect("valid surname"),
        };

        let view = FixtureRosterCommand
            .assign_student(request.clone())
            .await
            .expect("fixture assign succeeds");

        assert_eq!(view.student.id(), &request.student_id);
        assert_eq!(view.lecturers.len(), 1);
        assert_eq!(
            view.lecturers.first().map(Lecturer::id),
            Some(&request.lecturer_id)
        );
    }
}
