//! Driven port for the identity store holding lecturers, students, and the
//! association edges between them.
//!
//! Every roster operation runs inside one explicit transaction. The service
//! opens it with [`RosterStore::begin`], passes the handle to each store call,
//! and ends it with [`RosterTransaction::commit`] or
//! [`RosterTransaction::rollback`]. Adapters must roll back a handle that is
//! dropped without either call.

use async_trait::async_trait;

use crate::domain::{
    Lecturer, LecturerId, LecturerWithStudents, Student, StudentId, StudentWithLecturers,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised by identity store adapters.
    pub enum RosterStoreError {
        /// The store could not be reached or the connection dropped.
        Connection { message: String } =>
            "identity store connection failed: {message}",
        /// A query or mutation failed during execution.
        Query { message: String } =>
            "identity store query failed: {message}",
        /// An insert collided with a uniqueness constraint.
        UniqueViolation { constraint: String } =>
            "identity store uniqueness constraint violated: {constraint}",
    }
}

/// Access mode requested when opening a transaction.
///
/// Both modes run at read-committed isolation or stronger. Reads use
/// [`TransactionMode::ReadOnly`] so they never block writers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionMode {
    /// The transaction only reads.
    ReadOnly,
    /// The transaction may insert records and edges.
    ReadWrite,
}

/// Port for opening identity store transactions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RosterStore: Send + Sync {
    /// Open a transaction in the requested mode.
    async fn begin(
        &self,
        mode: TransactionMode,
    ) -> Result<Box<dyn RosterTransaction>, RosterStoreError>;
}

/// An open identity store transaction.
///
/// Reads observe the writes made earlier through the same handle. Nothing is
/// visible to other transactions until [`RosterTransaction::commit`] succeeds.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RosterTransaction: Send {
    /// Whether a lecturer with `id` exists.
    async fn lecturer_exists(&mut self, id: &LecturerId) -> Result<bool, RosterStoreError>;

    /// Load a lecturer record without its students.
    async fn find_lecturer(
        &mut self,
        id: &LecturerId,
    ) -> Result<Option<Lecturer>, RosterStoreError>;

    /// Load a lecturer joined with its students in assignment order.
    async fn find_lecturer_with_students(
        &mut self,
        id: &LecturerId,
    ) -> Result<Option<LecturerWithStudents>, RosterStoreError>;

    /// Insert a new lecturer.
    ///
    /// Fails with [`RosterStoreError::UniqueViolation`] when the id is taken.
    async fn insert_lecturer(&mut self, lecturer: &Lecturer) -> Result<(), RosterStoreError>;

    /// Load a student record without its lecturers.
    async fn find_student(&mut self, id: &StudentId) -> Result<Option<Student>, RosterStoreError>;

    /// Load a student joined with its lecturers in assignment order.
    async fn find_student_with_lecturers(
        &mut self,
        id: &StudentId,
    ) -> Result<Option<StudentWithLecturers>, RosterStoreError>;

    /// Insert a new student.
    ///
    /// Fails with [`RosterStoreError::UniqueViolation`] when the id is taken.
    async fn insert_student(&mut self, student: &Student) -> Result<(), RosterStoreError>;

    /// Whether the (lecturer, student) edge exists.
    async fn association_exists(
        &mut self,
        lecturer_id: &LecturerId,
        student_id: &StudentId,
    ) -> Result<bool, RosterStoreError>;

    /// Insert the (lecturer, student) edge. Both records must exist.
    ///
    /// Fails with [`RosterStoreError::UniqueViolation`] when the edge exists.
    async fn insert_association(
        &mut self,
        lecturer_id: &LecturerId,
        student_id: &StudentId,
    ) -> Result<(), RosterStoreError>;

    /// Make every write in this transaction durable and visible.
    async fn commit(&mut self) -> Result<(), RosterStoreError>;

    /// Discard every write made in this transaction.
    async fn rollback(&mut self) -> Result<(), RosterStoreError>;
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    #[rstest]
    fn unique_violation_formats_constraint() {
        let err = RosterStoreError::unique_violation("lecturers_lecturer_id_key");
        assert_eq!(
            err.to_string(),
            "identity store uniqueness constraint violated: lecturers_lecturer_id_key"
        );
    }

    #[rstest]
    fn connection_error_formats_message() {
        let err = RosterStoreError::connection("timed out");
        assert!(err.to_string().contains("timed out"));
    }

    #[rstest]
    #[tokio::test]
    async fn mocked_store_hands_out_boxed_transactions() {
        let mut store = MockRosterStore::new();
        store.expect_begin().times(1).returning(|_| {
            let mut tx = MockRosterTransaction::new();
            tx.expect_commit().times(1).returning(|| Ok(()));
            Ok(Box::new(tx))
        });

        let mut tx = store
            .begin(TransactionMode::ReadOnly)
            .await
            .expect("begin succeeds");
        tx.commit().await.expect("commit succeeds");
    }
}
