//! Request and response payloads for the lecturer and student endpoints.
//!
//! Request fields are optional at the serde level so that missing values are
//! reported through the same field-error channel as invalid ones.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{AssignStudentRequest, CreateLecturerRequest};
use crate::domain::{
    Error, Lecturer, LecturerId, LecturerWithStudents, PersonName, Student, StudentId,
    StudentWithLecturers,
};
use crate::inbound::http::validation::{FieldErrors, LECTURER_ID, NAME, STUDENT_ID, SURNAME};

/// Request payload for creating a lecturer.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLecturerBody {
    #[schema(example = "Jane")]
    pub name: Option<String>,
    #[schema(example = "Smith")]
    pub surname: Option<String>,
    #[schema(example = "L1")]
    pub lecturer_id: Option<String>,
}

/// Request payload for assigning a student to a lecturer.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignStudentBody {
    #[schema(example = "Erika")]
    pub name: Option<String>,
    #[schema(example = "Musterfrau")]
    pub surname: Option<String>,
    #[schema(example = "S1")]
    pub student_id: Option<String>,
}

/// Reduced lecturer projection listed on student responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LecturerSummaryResponse {
    #[schema(example = "L1")]
    pub lecturer_id: String,
    pub name: String,
    pub surname: String,
}

impl From<Lecturer> for LecturerSummaryResponse {
    fn from(value: Lecturer) -> Self {
        Self {
            lecturer_id: value.id().to_string(),
            name: value.name().to_string(),
            surname: value.surname().to_string(),
        }
    }
}

/// Reduced student projection listed on lecturer responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentSummaryResponse {
    #[schema(example = "S1")]
    pub student_id: String,
    pub name: String,
    pub surname: String,
}

impl From<Student> for StudentSummaryResponse {
    fn from(value: Student) -> Self {
        Self {
            student_id: value.id().to_string(),
            name: value.name().to_string(),
            surname: value.surname().to_string(),
        }
    }
}

/// A lecturer with every assigned student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LecturerResponse {
    #[schema(example = "L1")]
    pub lecturer_id: String,
    pub name: String,
    pub surname: String,
    pub students: Vec<StudentSummaryResponse>,
}

impl From<LecturerWithStudents> for LecturerResponse {
    fn from(value: LecturerWithStudents) -> Self {
        let LecturerSummaryResponse {
            lecturer_id,
            name,
            surname,
        } = value.lecturer.into();
        Self {
            lecturer_id,
            name,
            surname,
            students: value.students.into_iter().map(Into::into).collect(),
        }
    }
}

/// A student with every lecturer they are assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentResponse {
    #[schema(example = "S1")]
    pub student_id: String,
    pub name: String,
    pub surname: String,
    pub lecturers: Vec<LecturerSummaryResponse>,
}

impl From<StudentWithLecturers> for StudentResponse {
    fn from(value: StudentWithLecturers) -> Self {
        let StudentSummaryResponse {
            student_id,
            name,
            surname,
        } = value.student.into();
        Self {
            student_id,
            name,
            surname,
            lecturers: value.lecturers.into_iter().map(Into::into).collect(),
        }
    }
}

/// Validate a create-lecturer body, reporting every invalid field.
pub(crate) fn parse_create_lecturer(body: CreateLecturerBody) -> Result<CreateLecturerRequest, Error> {
    let mut errors = FieldErrors::default();
    let name = errors.check(NAME, body.name, PersonName::new);
    let surname = errors.check(SURNAME, body.surname, PersonName::new);
    let lecturer_id = errors.check(LECTURER_ID, body.lecturer_id, LecturerId::new);

    errors.finish(name.zip(surname).zip(lecturer_id).map(
        |((name, surname), lecturer_id)| CreateLecturerRequest {
            lecturer_id,
            name,
            surname,
        },
    ))
}

/// Validated student fields of an assign-student body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StudentFields {
    student_id: StudentId,
    name: PersonName,
    surname: PersonName,
}

impl StudentFields {
    /// Target the lecturer named in the request path.
    pub(crate) fn for_lecturer(self, lecturer_id: LecturerId) -> AssignStudentRequest {
        AssignStudentRequest {
            lecturer_id,
            student_id: self.student_id,
            name: self.name,
            surname: self.surname,
        }
    }
}

/// Validate an assign-student body, reporting every invalid field.
pub(crate) fn parse_assign_student(body: AssignStudentBody) -> Result<StudentFields, Error> {
    let mut errors = FieldErrors::default();
    let name = errors.check(NAME, body.name, PersonName::new);
    let surname = errors.check(SURNAME, body.surname, PersonName::new);
    let student_id = errors.check(STUDENT_ID, body.student_id, StudentId::new);

    errors.finish(
        name.zip(surname)
            .zip(student_id)
            .map(|((name, surname), student_id)| StudentFields {
                student_id,
                name,
                surname,
            }),
    )
}
