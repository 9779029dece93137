//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use diesel::prelude::*;

use crate::domain::{Lecturer, LecturerId, PersonName, Student, StudentId};

use super::schema::{lecturer_students, lecturers, students};

/// Row struct for reading from the lecturers table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = lecturers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct LecturerRow {
    pub id: i64,
    pub lecturer_id: String,
    pub name: String,
    pub surname: String,
}

impl LecturerRow {
    /// Revalidate a stored row into the domain record.
    pub fn into_domain(self) -> Result<Lecturer, String> {
        let id = LecturerId::new(self.lecturer_id.as_str())
            .map_err(|err| format!("stored lecturer id {:?} {err}", self.lecturer_id))?;
        let name = PersonName::new(self.name).map_err(|err| format!("stored name {err}"))?;
        let surname =
            PersonName::new(self.surname).map_err(|err| format!("stored surname {err}"))?;
        Ok(Lecturer::new(id, name, surname))
    }
}

/// Insertable struct for creating lecturer records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = lecturers)]
pub(crate) struct NewLecturerRow<'a> {
    pub lecturer_id: &'a str,
    pub name: &'a str,
    pub surname: &'a str,
}

impl<'a> From<&'a Lecturer> for NewLecturerRow<'a> {
    fn from(lecturer: &'a Lecturer) -> Self {
        Self {
            lecturer_id: lecturer.id().as_str(),
            name: lecturer.name().as_str(),
            surname: lecturer.surname().as_str(),
        }
    }
}

/// Row struct for reading from the students table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = students)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct StudentRow {
    pub id: i64,
    pub student_id: String,
    pub name: String,
    pub surname: String,
}

impl StudentRow {
    /// Revalidate a stored row into the domain record.
    pub fn into_domain(self) -> Result<Student, String> {
        let id = StudentId::new(self.student_id.as_str())
            .map_err(|err| format!("stored student id {:?} {err}", self.student_id))?;
        let name = PersonName::new(self.name).map_err(|err| format!("stored name {err}"))?;
        let surname =
            PersonName::new(self.surname).map_err(|err| format!("stored surname {err}"))?;
        Ok(Student::new(id, name, surname))
    }
}

/// Insertable struct for creating student records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = students)]
pub(crate) struct NewStudentRow<'a> {
    pub student_id: &'a str,
    pub name: &'a str,
    pub surname: &'a str,
}

impl<'a> From<&'a Student> for NewStudentRow<'a> {
    fn from(student: &'a Student) -> Self {
        Self {
            student_id: student.id().as_str(),
            name: student.name().as_str(),
            surname: student.surname().as_str(),
        }
    }
}

/// Insertable struct for association edges. `id` and `assigned_at` default.
#[derive(Debug, Clone, Copy, Insertable)]
#[diesel(table_name = lecturer_students)]
pub(crate) struct NewAssociationRow {
    pub lecturer_pk: i64,
    pub student_pk: i64,
}
