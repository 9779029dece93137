//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! document for the REST API. It registers:
//!
//! - **Paths**: the lecturer, student and health endpoints
//! - **Schemas**: request and response payloads plus the domain error
//!   wrappers ([`ErrorSchema`], [`ErrorCodeSchema`]), which describe domain
//!   types without coupling them to the utoipa framework
//!
//! The generated document is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::roster_dto::{
    AssignStudentBody, CreateLecturerBody, LecturerResponse, LecturerSummaryResponse,
    StudentResponse, StudentSummaryResponse,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "University roster API",
        description = "Lecturers, students, and the assignments between them."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::lecturers::create_lecturer,
        crate::inbound::http::lecturers::get_lecturer,
        crate::inbound::http::lecturers::assign_student,
        crate::inbound::http::students::get_student,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        CreateLecturerBody,
        AssignStudentBody,
        LecturerResponse,
        StudentResponse,
        LecturerSummaryResponse,
        StudentSummaryResponse,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "lecturers", description = "Lecturer records and student assignment"),
        (name = "students", description = "Student records"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
