//! Lecturer HTTP handlers.
//!
//! ```text
//! POST /lecturers
//! GET  /lecturers/{lecturerId}
//! POST /lecturers/{lecturerId}/add
//! ```

use actix_web::http::header;
use actix_web::{HttpResponse, get, post, web};

use crate::domain::LecturerWithStudents;
use crate::inbound::http::ApiResult;
use crate::inbound::http::roster_dto::{
    AssignStudentBody, CreateLecturerBody, LecturerResponse, StudentResponse,
    parse_assign_student, parse_create_lecturer,
};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::lecturer_id_from_path;

/// Create a lecturer with no students.
#[utoipa::path(
    post,
    path = "/lecturers",
    request_body = CreateLecturerBody,
    responses(
        (
            status = 201,
            description = "Lecturer created",
            headers(("Location" = String, description = "URI of the new lecturer")),
            body = LecturerResponse
        ),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Lecturer ID already taken", body = ErrorSchema),
        (status = 429, description = "Rate limit exceeded", body = ErrorSchema),
        (status = 503, description = "Identity store unavailable", body = ErrorSchema)
    ),
    tags = ["lecturers"],
    operation_id = "createLecturer"
)]
#[post("/lecturers")]
pub async fn create_lecturer(
    state: web::Data<HttpState>,
    payload: web::Json<CreateLecturerBody>,
) -> ApiResult<HttpResponse> {
    let request = parse_create_lecturer(payload.into_inner())?;
    let lecturer = state.roster_command.register_lecturer(request).await?;
    let location = format!("/lecturers/{}", lecturer.id());

    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, location))
        .json(LecturerResponse::from(
            LecturerWithStudents::without_students(lecturer),
        )))
}

/// Fetch a lecturer with their students.
#[utoipa::path(
    get,
    path = "/lecturers/{lecturerId}",
    params(("lecturerId" = String, Path, description = "Lecturer business identifier")),
    responses(
        (status = 200, description = "Lecturer with students", body = LecturerResponse),
        (status = 404, description = "Lecturer not found", body = ErrorSchema),
        (status = 429, description = "Rate limit exceeded", body = ErrorSchema),
        (status = 503, description = "Identity store unavailable", body = ErrorSchema)
    ),
    tags = ["lecturers"],
    operation_id = "getLecturer"
)]
#[get("/lecturers/{lecturerId}")]
pub async fn get_lecturer(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<LecturerResponse>> {
    let lecturer_id = lecturer_id_from_path(path.into_inner())?;
    let view = state.roster_query.lecturer_with_students(&lecturer_id).await?;
    Ok(web::Json(LecturerResponse::from(view)))
}

/// Assign a student to a lecturer, creating the student on first use.
#[utoipa::path(
    post,
    path = "/lecturers/{lecturerId}/add",
    params(("lecturerId" = String, Path, description = "Lecturer business identifier")),
    request_body = AssignStudentBody,
    responses(
        (
            status = 201,
            description = "Student assigned",
            headers(("Location" = String, description = "URI of the student")),
            body = StudentResponse
        ),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Lecturer not found", body = ErrorSchema),
        (
            status = 409,
            description = "Student identity conflict or already assigned",
            body = ErrorSchema
        ),
        (status = 429, description = "Rate limit exceeded", body = ErrorSchema),
        (status = 503, description = "Identity store unavailable", body = ErrorSchema)
    ),
    tags = ["lecturers"],
    operation_id = "assignStudentToLecturer"
)]
#[post("/lecturers/{lecturerId}/add")]
pub async fn assign_student(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<AssignStudentBody>,
) -> ApiResult<HttpResponse> {
    // Body problems are reported before an unusable path id.
    let fields = parse_assign_student(payload.into_inner())?;
    let lecturer_id = lecturer_id_from_path(path.into_inner())?;

    let view = state
        .roster_command
        .assign_student(fields.for_lecturer(lecturer_id))
        .await?;
    let location = format!("/students/{}", view.student.id());

    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, location))
        .json(StudentResponse::from(view)))
}

#[cfg(test)]
#[path = "lecturers_tests.rs"]
mod tests;
