//! Lecturer and student records plus the joined views built from the
//! association edge set.
//!
//! Neither record holds a reference to the other side. Edges live in the
//! identity store and the `*With*` views are assembled on demand, listing the
//! other side in edge insertion order.

use super::identity::{LecturerId, PersonName, StudentId};

/// A lecturer record. Doubles as the lecturer summary shown on student views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lecturer {
    id: LecturerId,
    name: PersonName,
    surname: PersonName,
}

impl Lecturer {
    /// Assemble a lecturer from validated parts.
    #[must_use]
    pub const fn new(id: LecturerId, name: PersonName, surname: PersonName) -> Self {
        Self { id, name, surname }
    }

    /// Business identifier.
    #[must_use]
    pub const fn id(&self) -> &LecturerId {
        &self.id
    }

    /// Given name.
    #[must_use]
    pub const fn name(&self) -> &PersonName {
        &self.name
    }

    /// Surname.
    #[must_use]
    pub const fn surname(&self) -> &PersonName {
        &self.surname
    }
}

/// A student record. Doubles as the student summary shown on lecturer views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    id: StudentId,
    name: PersonName,
    surname: PersonName,
}

impl Student {
    /// Assemble a student from validated parts.
    #[must_use]
    pub const fn new(id: StudentId, name: PersonName, surname: PersonName) -> Self {
        Self { id, name, surname }
    }

    /// Business identifier.
    #[must_use]
    pub const fn id(&self) -> &StudentId {
        &self.id
    }

    /// Given name.
    #[must_use]
    pub const fn name(&self) -> &PersonName {
        &self.name
    }

    /// Surname.
    #[must_use]
    pub const fn surname(&self) -> &PersonName {
        &self.surname
    }

    /// Whether `name` and `surname` match this record exactly.
    ///
    /// A student id names one person; any mismatch means the caller is
    /// claiming the id for somebody else.
    #[must_use]
    pub fn same_person(&self, name: &PersonName, surname: &PersonName) -> bool {
        &self.name == name && &self.surname == surname
    }
}

/// A lecturer together with the summaries of every assigned student.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LecturerWithStudents {
    /// The lecturer record.
    pub lecturer: Lecturer,
    /// Assigned students in assignment order.
    pub students: Vec<Student>,
}

impl LecturerWithStudents {
    /// A freshly created lecturer has no students yet.
    #[must_use]
    pub const fn without_students(lecturer: Lecturer) -> Self {
        Self {
            lecturer,
            students: Vec::new(),
        }
    }
}

/// A student together with the summaries of every lecturer they are assigned to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentWithLecturers {
    /// The student record.
    pub student: Student,
    /// Lecturers in assignment order.
    pub lecturers: Vec<Lecturer>,
}
