//! PostgreSQL-backed `RosterStore` implementation using Diesel ORM.
//!
//! Each transaction holds one pooled connection for its whole lifetime and
//! drives `BEGIN`/`COMMIT`/`ROLLBACK` through diesel-async's ANSI transaction
//! manager. A handle dropped without `commit` or `rollback` leaves the
//! connection mid-transaction; the pool treats such a connection as broken and
//! closes it, which makes the server roll the transaction back.

use async_trait::async_trait;
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel_async::pooled_connection::bb8::PooledConnection;
use diesel_async::{AnsiTransactionManager, AsyncPgConnection, RunQueryDsl, TransactionManager};
use tracing::debug;

use crate::domain::ports::{RosterStore, RosterStoreError, RosterTransaction, TransactionMode};
use crate::domain::{
    Lecturer, LecturerId, LecturerWithStudents, Student, StudentId, StudentWithLecturers,
};

use super::diesel_helpers::{collect_rows, map_diesel_error, map_pool_error};
use super::models::{
    LecturerRow, NewAssociationRow, NewLecturerRow, NewStudentRow, StudentRow,
};
use super::pool::DbPool;
use super::schema::{lecturer_students, lecturers, students};

/// Statement that opens a transaction in `mode`.
fn begin_sql(mode: TransactionMode) -> &'static str {
    match mode {
        TransactionMode::ReadOnly => "BEGIN TRANSACTION ISOLATION LEVEL READ COMMITTED READ ONLY",
        TransactionMode::ReadWrite => "BEGIN TRANSACTION ISOLATION LEVEL READ COMMITTED READ WRITE",
    }
}

fn corrupt_row(message: String) -> RosterStoreError {
    RosterStoreError::query(format!("corrupt roster row: {message}"))
}

/// Diesel-backed implementation of the `RosterStore` port.
#[derive(Clone)]
pub struct DieselRosterStore {
    pool: DbPool,
}

impl DieselRosterStore {
    /// Create a new store with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RosterStore for DieselRosterStore {
    async fn begin(
        &self,
        mode: TransactionMode,
    ) -> Result<Box<dyn RosterTransaction>, RosterStoreError> {
        let mut conn = self.pool.get_owned().await.map_err(map_pool_error)?;
        AnsiTransactionManager::begin_transaction_sql(&mut *conn, begin_sql(mode))
            .await
            .map_err(map_diesel_error)?;
        Ok(Box::new(DieselRosterTransaction { conn }))
    }
}

/// An open PostgreSQL transaction bound to one pooled connection.
struct DieselRosterTransaction {
    conn: PooledConnection<'static, AsyncPgConnection>,
}

impl DieselRosterTransaction {
    fn conn(&mut self) -> &mut AsyncPgConnection {
        &mut self.conn
    }

    async fn lecturer_pk(&mut self, id: &LecturerId) -> Result<Option<i64>, RosterStoreError> {
        lecturers::table
            .filter(lecturers::lecturer_id.eq(id.as_str()))
            .select(lecturers::id)
            .first::<i64>(self.conn())
            .await
            .optional()
            .map_err(map_diesel_error)
    }

    async fn student_pk(&mut self, id: &StudentId) -> Result<Option<i64>, RosterStoreError> {
        students::table
            .filter(students::student_id.eq(id.as_str()))
            .select(students::id)
            .first::<i64>(self.conn())
            .await
            .optional()
            .map_err(map_diesel_error)
    }

    async fn lecturer_row(
        &mut self,
        id: &LecturerId,
    ) -> Result<Option<LecturerRow>, RosterStoreError> {
        lecturers::table
            .filter(lecturers::lecturer_id.eq(id.as_str()))
            .select(LecturerRow::as_select())
            .first(self.conn())
            .await
            .optional()
            .map_err(map_diesel_error)
    }

    async fn student_row(&mut self, id: &StudentId) -> Result<Option<StudentRow>, RosterStoreError> {
        students::table
            .filter(students::student_id.eq(id.as_str()))
            .select(StudentRow::as_select())
            .first(self.conn())
            .await
            .optional()
            .map_err(map_diesel_error)
    }
}

#[async_trait]
impl RosterTransaction for DieselRosterTransaction {
    async fn lecturer_exists(&mut self, id: &LecturerId) -> Result<bool, RosterStoreError> {
        diesel::select(exists(
            lecturers::table.filter(lecturers::lecturer_id.eq(id.as_str())),
        ))
        .get_result::<bool>(self.conn())
        .await
        .map_err(map_diesel_error)
    }

    async fn find_lecturer(
        &mut self,
        id: &LecturerId,
    ) -> Result<Option<Lecturer>, RosterStoreError> {
        self.lecturer_row(id)
            .await?
            .map(|row| row.into_domain().map_err(corrupt_row))
            .transpose()
    }

    async fn find_lecturer_with_students(
        &mut self,
        id: &LecturerId,
    ) -> Result<Option<LecturerWithStudents>, RosterStoreError> {
        let Some(row) = self.lecturer_row(id).await? else {
            return Ok(None);
        };
        let student_rows: Vec<StudentRow> = lecturer_students::table
            .inner_join(students::table)
            .filter(lecturer_students::lecturer_pk.eq(row.id))
            .order_by(lecturer_students::id.asc())
            .select(StudentRow::as_select())
            .load(self.conn())
            .await
            .map_err(map_diesel_error)?;

        let lecturer = row.into_domain().map_err(corrupt_row)?;
        let students = collect_rows(
            student_rows.into_iter().map(StudentRow::into_domain),
            corrupt_row,
        )?;
        Ok(Some(LecturerWithStudents { lecturer, students }))
    }

    async fn insert_lecturer(&mut self, lecturer: &Lecturer) -> Result<(), RosterStoreError> {
        diesel::insert_into(lecturers::table)
            .values(NewLecturerRow::from(lecturer))
            .execute(self.conn())
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_student(&mut self, id: &StudentId) -> Result<Option<Student>, RosterStoreError> {
        self.student_row(id)
            .await?
            .map(|row| row.into_domain().map_err(corrupt_row))
            .transpose()
    }

    async fn find_student_with_lecturers(
        &mut self,
        id: &StudentId,
    ) -> Result<Option<StudentWithLecturers>, RosterStoreError> {
        let Some(row) = self.student_row(id).await? else {
            return Ok(None);
        };
        let lecturer_rows: Vec<LecturerRow> = lecturer_students::table
            .inner_join(lecturers::table)
            .filter(lecturer_students::student_pk.eq(row.id))
            .order_by(lecturer_students::id.asc())
            .select(LecturerRow::as_select())
            .load(self.conn())
            .await
            .map_err(map_diesel_error)?;

        let student = row.into_domain().map_err(corrupt_row)?;
        let lecturers = collect_rows(
            lecturer_rows.into_iter().map(LecturerRow::into_domain),
            corrupt_row,
        )?;
        Ok(Some(StudentWithLecturers { student, lecturers }))
    }

    async fn insert_student(&mut self, student: &Student) -> Result<(), RosterStoreError> {
        diesel::insert_into(students::table)
            .values(NewStudentRow::from(student))
            .execute(self.conn())
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn association_exists(
        &mut self,
        lecturer_id: &LecturerId,
        student_id: &StudentId,
    ) -> Result<bool, RosterStoreError> {
        diesel::select(exists(
            lecturer_students::table
                .inner_join(lecturers::table)
                .inner_join(students::table)
                .filter(lecturers::lecturer_id.eq(lecturer_id.as_str()))
                .filter(students::student_id.eq(student_id.as_str())),
        ))
        .get_result::<bool>(self.conn())
        .await
        .map_err(map_diesel_error)
    }

    async fn insert_association(
        &mut self,
        lecturer_id: &LecturerId,
        student_id: &StudentId,
    ) -> Result<(), RosterStoreError> {
        let lecturer_pk = self.lecturer_pk(lecturer_id).await?.ok_or_else(|| {
            RosterStoreError::query(format!("lecturer {lecturer_id} missing for association"))
        })?;
        let student_pk = self.student_pk(student_id).await?.ok_or_else(|| {
            RosterStoreError::query(format!("student {student_id} missing for association"))
        })?;

        diesel::insert_into(lecturer_students::table)
            .values(NewAssociationRow {
                lecturer_pk,
                student_pk,
            })
            .execute(self.conn())
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn commit(&mut self) -> Result<(), RosterStoreError> {
        <AnsiTransactionManager as TransactionManager<AsyncPgConnection>>::commit_transaction(
            self.conn(),
        )
        .await
        .map_err(map_diesel_error)
    }

    async fn rollback(&mut self) -> Result<(), RosterStoreError> {
        <AnsiTransactionManager as TransactionManager<AsyncPgConnection>>::rollback_transaction(
            self.conn(),
        )
        .await
        .map_err(map_diesel_error)?;
        debug!("roster transaction rolled back");
        Ok(())
    }
}
