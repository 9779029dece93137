//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are used
//! by Diesel for compile-time query validation and type-safe SQL generation.
//!
//! # Maintenance
//!
//! When migrations change the schema, this file should be regenerated or
//! manually updated to reflect those changes. The `diesel print-schema`
//! command can generate these definitions from a live database.

diesel::table! {
    /// Lecturer records.
    ///
    /// `id` is an internal surrogate key; `lecturer_id` is the business key
    /// supplied by callers and carries a unique constraint.
    lecturers (id) {
        /// Surrogate primary key.
        id -> Int8,
        /// Business identifier (unique).
        lecturer_id -> Varchar,
        /// Given name.
        name -> Varchar,
        /// Surname.
        surname -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Student records, keyed the same way as lecturers.
    students (id) {
        /// Surrogate primary key.
        id -> Int8,
        /// Business identifier (unique).
        student_id -> Varchar,
        /// Given name.
        name -> Varchar,
        /// Surname.
        surname -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Association edges between lecturers and students.
    ///
    /// `(lecturer_pk, student_pk)` is unique. `id` increases with insertion
    /// and orders the joined views.
    lecturer_students (id) {
        /// Surrogate primary key and assignment order.
        id -> Int8,
        /// FK to `lecturers.id`.
        lecturer_pk -> Int8,
        /// FK to `students.id`.
        student_pk -> Int8,
        /// When the edge was inserted.
        assigned_at -> Timestamptz,
    }
}

diesel::joinable!(lecturer_students -> lecturers (lecturer_pk));
diesel::joinable!(lecturer_students -> students (student_pk));

diesel::allow_tables_to_appear_in_same_query!(lecturers, students, lecturer_students);
