//! Roster service: the sole mutator of the lecturer/student edge set.
//!
//! Each operation opens one identity store transaction, runs its reads and
//! writes through that handle, and finishes it in [`finish`]: commit when the
//! operation succeeded, roll back on every failure path.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    AssignStudentRequest, CreateLecturerRequest, RosterCommand, RosterQuery, RosterStore,
    RosterStoreError, RosterTransaction, TransactionMode,
};
use crate::domain::{
    Error, Lecturer, LecturerId, LecturerWithStudents, PersonName, RosterError, Student,
    StudentId, StudentWithLecturers,
};

/// Roster service implementing the roster driving ports.
///
/// Holds no mutable state of its own; the identity store is the only shared
/// resource, so any number of calls may run concurrently.
pub struct RosterService<S: ?Sized> {
    store: Arc<S>,
}

impl<S: ?Sized> Clone for RosterService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: ?Sized> RosterService<S> {
    /// Create a service over the given identity store.
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

/// End `tx` according to `outcome`.
///
/// A failed rollback is logged and the original failure returned, since the
/// caller needs to know why the operation failed rather than how cleanup went.
async fn finish<T>(
    mut tx: Box<dyn RosterTransaction>,
    outcome: Result<T, RosterError>,
) -> Result<T, RosterError> {
    match outcome {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_error) = tx.rollback().await {
                warn!(error = %rollback_error, "roster transaction rollback failed");
            }
            Err(err)
        }
    }
}

async fn create_lecturer_in(
    tx: &mut dyn RosterTransaction,
    lecturer: Lecturer,
) -> Result<Lecturer, RosterError> {
    if tx.lecturer_exists(lecturer.id()).await? {
        return Err(RosterError::LecturerAlreadyExists(lecturer.id().clone()));
    }
    tx.insert_lecturer(&lecturer).await.map_err(|err| match err {
        RosterStoreError::UniqueViolation { .. } => {
            RosterError::LecturerAlreadyExists(lecturer.id().clone())
        }
        other => RosterError::Store(other),
    })?;
    Ok(lecturer)
}

async fn assign_in(
    tx: &mut dyn RosterTransaction,
    request: AssignStudentRequest,
) -> Result<StudentWithLecturers, RosterError> {
    let AssignStudentRequest {
        lecturer_id,
        student_id,
        name,
        surname,
    } = request;

    // A missing lecturer outranks anything the student payload could trigger.
    if tx.find_lecturer(&lecturer_id).await?.is_none() {
        return Err(RosterError::LecturerNotFound(lecturer_id));
    }

    match tx.find_student(&student_id).await? {
        None => {
            let student = Student::new(student_id.clone(), name, surname);
            tx.insert_student(&student).await.map_err(|err| match err {
                RosterStoreError::UniqueViolation { .. } => {
                    RosterError::ConcurrentStudentCreation(student_id.clone())
                }
                other => RosterError::Store(other),
            })?;
        }
        Some(existing) => {
            if !existing.same_person(&name, &surname) {
                return Err(RosterError::StudentIdentityConflict(student_id));
            }
            if tx.association_exists(&lecturer_id, &student_id).await? {
                return Err(RosterError::StudentAlreadyAssigned(student_id));
            }
        }
    }

    tx.insert_association(&lecturer_id, &student_id)
        .await
        .map_err(|err| match err {
            RosterStoreError::UniqueViolation { .. } => {
                RosterError::StudentAlreadyAssigned(student_id.clone())
            }
            other => RosterError::Store(other),
        })?;

    tx.find_student_with_lecturers(&student_id)
        .await?
        .ok_or_else(|| {
            RosterError::Store(RosterStoreError::query(format!(
                "student {student_id} missing after assignment"
            )))
        })
}

impl<S> RosterService<S>
where
    S: RosterStore + ?Sized,
{
    /// Create a lecturer with an empty student set.
    ///
    /// # Errors
    /// [`RosterError::LecturerAlreadyExists`] when the id is taken, or
    /// [`RosterError::Store`] when the identity store fails.
    pub async fn create_lecturer(
        &self,
        name: PersonName,
        surname: PersonName,
        lecturer_id: LecturerId,
    ) -> Result<Lecturer, RosterError> {
        let mut tx = self.store.begin(TransactionMode::ReadWrite).await?;
        let outcome =
            create_lecturer_in(tx.as_mut(), Lecturer::new(lecturer_id, name, surname)).await;
        let lecturer = finish(tx, outcome).await?;
        info!(lecturer_id = %lecturer.id(), "lecturer created");
        Ok(lecturer)
    }

    /// Fetch a lecturer with the summaries of their students.
    ///
    /// # Errors
    /// [`RosterError::LecturerNotFound`] when no such lecturer exists.
    pub async fn get_lecturer_by_id(
        &self,
        lecturer_id: &LecturerId,
    ) -> Result<LecturerWithStudents, RosterError> {
        let mut tx = self.store.begin(TransactionMode::ReadOnly).await?;
        let outcome = tx
            .find_lecturer_with_students(lecturer_id)
            .await
            .map_err(RosterError::from)
            .and_then(|found| {
                found.ok_or_else(|| RosterError::LecturerNotFound(lecturer_id.clone()))
            });
        finish(tx, outcome).await
    }

    /// Fetch a student with the summaries of their lecturers.
    ///
    /// # Errors
    /// [`RosterError::StudentNotFound`] when no such student exists.
    pub async fn get_student_by_id(
        &self,
        student_id: &StudentId,
    ) -> Result<StudentWithLecturers, RosterError> {
        let mut tx = self.store.begin(TransactionMode::ReadOnly).await?;
        let outcome = tx
            .find_student_with_lecturers(student_id)
            .await
            .map_err(RosterError::from)
            .and_then(|found| found.ok_or_else(|| RosterError::StudentNotFound(student_id.clone())));
        finish(tx, outcome).await
    }

    /// Assign a student to a lecturer, creating the student on first use.
    ///
    /// Checks run in a fixed order: the lecturer must exist, then an existing
    /// student must carry the same name and surname, then the edge must be
    /// new. The first failing check decides the error and nothing is written.
    ///
    /// # Errors
    /// [`RosterError::LecturerNotFound`], [`RosterError::StudentIdentityConflict`],
    /// [`RosterError::StudentAlreadyAssigned`],
    /// [`RosterError::ConcurrentStudentCreation`], or [`RosterError::Store`].
    pub async fn assign_student_to_lecturer(
        &self,
        lecturer_id: LecturerId,
        name: PersonName,
        surname: PersonName,
        student_id: StudentId,
    ) -> Result<StudentWithLecturers, RosterError> {
        let mut tx = self.store.begin(TransactionMode::ReadWrite).await?;
        let request = AssignStudentRequest {
            lecturer_id: lecturer_id.clone(),
            student_id,
            name,
            surname,
        };
        let outcome = assign_in(tx.as_mut(), request).await;
        match finish(tx, outcome).await {
            Ok(view) => {
                info!(
                    lecturer_id = %lecturer_id,
                    student_id = %view.student.id(),
                    lecturers = view.lecturers.len(),
                    "student assigned to lecturer"
                );
                Ok(view)
            }
            Err(err) => {
                debug!(lecturer_id = %lecturer_id, error = %err, "student assignment rejected");
                Err(err)
            }
        }
    }
}

#[async_trait]
impl<S> RosterCommand for RosterService<S>
where
    S: RosterStore + ?Sized,
{
    async fn register_lecturer(&self, request: CreateLecturerRequest) -> Result<Lecturer, Error> {
        let CreateLecturerRequest {
            lecturer_id,
            name,
            surname,
        } = request;
        self.create_lecturer(name, surname, lecturer_id)
            .await
            .map_err(Error::from)
    }

    async fn assign_student(
        &self,
        request: AssignStudentRequest,
    ) -> Result<StudentWithLecturers, Error> {
        let AssignStudentRequest {
            lecturer_id,
            student_id,
            name,
            surname,
        } = request;
        self.assign_student_to_lecturer(lecturer_id, name, surname, student_id)
            .await
            .map_err(Error::from)
    }
}

#[async_trait]
impl<S> RosterQuery for RosterService<S>
where
    S: RosterStore + ?Sized,
{
    async fn lecturer_with_students(
        &self,
        id: &LecturerId,
    ) -> Result<LecturerWithStudents, Error> {
        self.get_lecturer_by_id(id).await.map_err(Error::from)
    }

    async fn student_with_lecturers(
        &self,
        id: &StudentId,
    ) -> Result<StudentWithLecturers, Error> {
        self.get_student_by_id(id).await.map_err(Error::from)
    }
}

#[cfg(test)]
#[path = "roster_service_tests.rs"]
mod tests;
