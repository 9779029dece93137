//! In-process identity store.
//!
//! Backs the roster when no database is configured and serves as the store for
//! service-level tests. The committed roster is an immutable snapshot behind
//! an `Arc`:
//!
//! - read-only transactions pin the current snapshot and release the lock at
//!   once, so they never wait for or delay a writer;
//! - read-write transactions are serialised by a writer lock held until they
//!   finish, and work on a private copy that `commit` publishes as the new
//!   snapshot. Dropping or rolling back discards the copy.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::debug;

use crate::domain::ports::{RosterStore, RosterStoreError, RosterTransaction, TransactionMode};
use crate::domain::{
    Lecturer, LecturerId, LecturerWithStudents, Student, StudentId, StudentWithLecturers,
};

const LECTURER_KEY: &str = "lecturers_pkey";
const STUDENT_KEY: &str = "students_pkey";
const ASSOCIATION_KEY: &str = "lecturer_students_pkey";

#[derive(Debug, Clone, Default)]
struct Snapshot {
    lecturers: HashMap<LecturerId, Lecturer>,
    students: HashMap<StudentId, Student>,
    // Insertion order is assignment order.
    edges: Vec<(LecturerId, StudentId)>,
}

impl Snapshot {
    fn students_of(&self, lecturer_id: &LecturerId) -> Vec<Student> {
        self.edges
            .iter()
            .filter(|(lecturer, _)| lecturer == lecturer_id)
            .filter_map(|(_, student)| self.students.get(student).cloned())
            .collect()
    }

    fn lecturers_of(&self, student_id: &StudentId) -> Vec<Lecturer> {
        self.edges
            .iter()
            .filter(|(_, student)| student == student_id)
            .filter_map(|(lecturer, _)| self.lecturers.get(lecturer).cloned())
            .collect()
    }

    fn has_edge(&self, lecturer_id: &LecturerId, student_id: &StudentId) -> bool {
        self.edges
            .iter()
            .any(|(lecturer, student)| lecturer == lecturer_id && student == student_id)
    }
}

type Committed = Arc<RwLock<Arc<Snapshot>>>;

/// Identity store held entirely in memory.
///
/// Clones share the same underlying roster.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRosterStore {
    committed: Committed,
    writer: Arc<Mutex<()>>,
}

impl InMemoryRosterStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn current(&self) -> Arc<Snapshot> {
        let snapshot = self
            .committed
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Arc::clone(&*snapshot)
    }
}

#[async_trait]
impl RosterStore for InMemoryRosterStore {
    async fn begin(
        &self,
        mode: TransactionMode,
    ) -> Result<Box<dyn RosterTransaction>, RosterStoreError> {
        let view = match mode {
            TransactionMode::ReadOnly => View::Read(self.current()),
            TransactionMode::ReadWrite => {
                let writer = Arc::clone(&self.writer).lock_owned().await;
                // Taken after the writer lock so the copy includes every
                // earlier commit.
                let working = Snapshot::clone(&self.current());
                View::Write { writer, working }
            }
        };
        Ok(Box::new(InMemoryTransaction {
            committed: Arc::clone(&self.committed),
            view: Some(view),
        }))
    }
}

enum View {
    Read(Arc<Snapshot>),
    Write {
        writer: OwnedMutexGuard<()>,
        working: Snapshot,
    },
}

struct InMemoryTransaction {
    committed: Committed,
    // `None` once committed or rolled back.
    view: Option<View>,
}

fn finished() -> RosterStoreError {
    RosterStoreError::query("transaction already finished")
}

impl InMemoryTransaction {
    fn snapshot(&self) -> Result<&Snapshot, RosterStoreError> {
        match self.view.as_ref().ok_or_else(finished)? {
            View::Read(snapshot) => Ok(snapshot),
            View::Write { working, .. } => Ok(working),
        }
    }

    fn working_mut(&mut self) -> Result<&mut Snapshot, RosterStoreError> {
        match self.view.as_mut().ok_or_else(finished)? {
            View::Read(_) => Err(RosterStoreError::query(
                "cannot write inside a read-only transaction",
            )),
            View::Write { working, .. } => Ok(working),
        }
    }
}

#[async_trait]
impl RosterTransaction for InMemoryTransaction {
    async fn lecturer_exists(&mut self, id: &LecturerId) -> Result<bool, RosterStoreError> {
        Ok(self.snapshot()?.lecturers.contains_key(id))
    }

    async fn find_lecturer(
        &mut self,
        id: &LecturerId,
    ) -> Result<Option<Lecturer>, RosterStoreError> {
        Ok(self.snapshot()?.lecturers.get(id).cloned())
    }

    async fn find_lecturer_with_students(
        &mut self,
        id: &LecturerId,
    ) -> Result<Option<LecturerWithStudents>, RosterStoreError> {
        let snapshot = self.snapshot()?;
        Ok(snapshot
            .lecturers
            .get(id)
            .cloned()
            .map(|lecturer| LecturerWithStudents {
                lecturer,
                students: snapshot.students_of(id),
            }))
    }

    async fn insert_lecturer(&mut self, lecturer: &Lecturer) -> Result<(), RosterStoreError> {
        let working = self.working_mut()?;
        if working.lecturers.contains_key(lecturer.id()) {
            return Err(RosterStoreError::unique_violation(LECTURER_KEY));
        }
        working
            .lecturers
            .insert(lecturer.id().clone(), lecturer.clone());
        Ok(())
    }

    async fn find_student(&mut self, id: &StudentId) -> Result<Option<Student>, RosterStoreError> {
        Ok(self.snapshot()?.students.get(id).cloned())
    }

    async fn find_student_with_lecturers(
        &mut self,
        id: &StudentId,
    ) -> Result<Option<StudentWithLecturers>, RosterStoreError> {
        let snapshot = self.snapshot()?;
        Ok(snapshot
            .students
            .get(id)
            .cloned()
            .map(|student| StudentWithLecturers {
                student,
                lecturers: snapshot.lecturers_of(id),
            }))
    }

    async fn insert_student(&mut self, student: &Student) -> Result<(), RosterStoreError> {
        let working = self.working_mut()?;
        if working.students.contains_key(student.id()) {
            return Err(RosterStoreError::unique_violation(STUDENT_KEY));
        }
        working
            .students
            .insert(student.id().clone(), student.clone());
        Ok(())
    }

    async fn association_exists(
        &mut self,
        lecturer_id: &LecturerId,
        student_id: &StudentId,
    ) -> Result<bool, RosterStoreError> {
        Ok(self.snapshot()?.has_edge(lecturer_id, student_id))
    }

    async fn insert_association(
        &mut self,
        lecturer_id: &LecturerId,
        student_id: &StudentId,
    ) -> Result<(), RosterStoreError> {
        let working = self.working_mut()?;
        if !working.lecturers.contains_key(lecturer_id)
            || !working.students.contains_key(student_id)
        {
            return Err(RosterStoreError::query(format!(
                "association ({lecturer_id}, {student_id}) references a missing record"
            )));
        }
        if working.has_edge(lecturer_id, student_id) {
            return Err(RosterStoreError::unique_violation(ASSOCIATION_KEY));
        }
        working
            .edges
            .push((lecturer_id.clone(), student_id.clone()));
        Ok(())
    }

    async fn commit(&mut self) -> Result<(), RosterStoreError> {
        match self.view.take().ok_or_else(finished)? {
            View::Read(_) => {}
            View::Write { writer, working } => {
                let mut committed = self
                    .committed
                    .write()
                    .unwrap_or_else(|poisoned| poisoned.into_inner());
                *committed = Arc::new(working);
                drop(committed);
                drop(writer);
            }
        }
        Ok(())
    }

    async fn rollback(&mut self) -> Result<(), RosterStoreError> {
        self.view.take().ok_or_else(finished)?;
        debug!("in-memory roster transaction rolled back");
        Ok(())
    }
}
