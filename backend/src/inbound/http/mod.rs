//! HTTP inbound adapter exposing REST endpoints.

pub mod error;
pub mod health;
pub mod lecturers;
pub mod roster_dto;
pub mod schemas;
pub mod state;
pub mod students;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;

/// Register the lecturer and student endpoints along with the JSON extractor
/// configuration they rely on.
///
/// Health probes and documentation are registered separately so that
/// middleware applied around these routes does not reach them.
pub fn configure_roster(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(validation::json_error_handler))
        .service(lecturers::create_lecturer)
        .service(lecturers::get_lecturer)
        .service(lecturers::assign_student)
        .service(students::get_student);
}
