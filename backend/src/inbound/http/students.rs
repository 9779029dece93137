//! Student HTTP handlers.
//!
//! ```text
//! GET /students/{studentId}
//! ```
//!
//! Students are created implicitly by `POST /lecturers/{lecturerId}/add`.

use actix_web::{get, web};

use crate::inbound::http::ApiResult;
use crate::inbound::http::roster_dto::StudentResponse;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::student_id_from_path;

/// Fetch a student with their lecturers.
#[utoipa::path(
    get,
    path = "/students/{studentId}",
    params(("studentId" = String, Path, description = "Student business identifier")),
    responses(
        (status = 200, description = "Student with lecturers", body = StudentResponse),
        (status = 404, description = "Student not found", body = ErrorSchema),
        (status = 429, description = "Rate limit exceeded", body = ErrorSchema),
        (status = 503, description = "Identity store unavailable", body = ErrorSchema)
    ),
    tags = ["students"],
    operation_id = "getStudent"
)]
#[get("/students/{studentId}")]
pub async fn get_student(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<StudentResponse>> {
    let student_id = student_id_from_path(path.into_inner())?;
    let view = state.roster_query.student_with_lecturers(&student_id).await?;
    Ok(web::Json(StudentResponse::from(view)))
}
