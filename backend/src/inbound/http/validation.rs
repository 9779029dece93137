//! Shared validation helpers for inbound HTTP adapters.
//!
//! Request bodies are checked field by field and every failure is collected,
//! so a client fixing a request sees all of its problems at once. Failures are
//! reported as `details.fieldErrors`, keyed by JSON field name.

use actix_web::HttpRequest;
use actix_web::error::JsonPayloadError;
use serde_json::{Map, Value, json};
use tracing::debug;

use crate::domain::{Error, IdentityValidationError, LecturerId, StudentId};

/// Top-level message of every validation failure.
pub(crate) const VALIDATION_FAILED: &str = "Input validation failed";

/// A request body field: its JSON name and the label used in messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName {
    json: &'static str,
    label: &'static str,
}

impl FieldName {
    pub(crate) const fn new(json: &'static str, label: &'static str) -> Self {
        Self { json, label }
    }

    fn message(self, error: IdentityValidationError) -> String {
        match error {
            IdentityValidationError::Blank => format!("{} cannot be blank", self.label),
            IdentityValidationError::NonAlphanumeric => {
                format!("{} must contain only alphanumeric characters", self.label)
            }
        }
    }
}

pub(crate) const NAME: FieldName = FieldName::new("name", "Name");
pub(crate) const SURNAME: FieldName = FieldName::new("surname", "Surname");
pub(crate) const LECTURER_ID: FieldName = FieldName::new("lecturerId", "Lecturer ID");
pub(crate) const STUDENT_ID: FieldName = FieldName::new("studentId", "Student ID");

/// Accumulates field failures for one request body.
#[derive(Debug, Default)]
pub(crate) struct FieldErrors {
    errors: Map<String, Value>,
}

impl FieldErrors {
    /// Validate `raw` with `parse`, recording a failure under `field`.
    ///
    /// A missing field is reported the same way as a blank one.
    pub(crate) fn check<T>(
        &mut self,
        field: FieldName,
        raw: Option<String>,
        parse: impl FnOnce(String) -> Result<T, IdentityValidationError>,
    ) -> Option<T> {
        let outcome = raw
            .ok_or(IdentityValidationError::Blank)
            .and_then(parse);
        match outcome {
            Ok(value) => Some(value),
            Err(error) => {
                self.errors
                    .insert(field.json.to_owned(), Value::String(field.message(error)));
                None
            }
        }
    }

    /// Whether no failure has been recorded.
    pub(crate) fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Yield the assembled value, or the collected failures.
    ///
    /// `value` is only `None` when some check failed, in which case the
    /// recorded failures are returned instead.
    pub(crate) fn finish<T>(self, value: Option<T>) -> Result<T, Error> {
        match value {
            Some(value) if self.is_empty() => Ok(value),
            _ => Err(self.into_error()),
        }
    }

    fn into_error(self) -> Error {
        debug!(fields = ?self.errors.keys().collect::<Vec<_>>(), "request body failed validation");
        Error::invalid_request(VALIDATION_FAILED).with_details(json!({
            "fieldErrors": Value::Object(self.errors),
        }))
    }
}

/// Map JSON extractor failures (malformed body, wrong content type) onto a
/// validation failure.
pub(crate) fn json_error_handler(error: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(%error, "request body could not be parsed");
    Error::invalid_request(VALIDATION_FAILED)
        .with_details(json!({ "body": "Request body must be a valid JSON object" }))
        .into()
}

/// Parse a lecturer id taken from the URL path.
///
/// An id that fails validation cannot name a stored lecturer, so it is
/// reported as not found.
pub(crate) fn lecturer_id_from_path(raw: String) -> Result<LecturerId, Error> {
    LecturerId::new(raw.as_str())
        .map_err(|_| Error::not_found(format!("Lecturer with ID '{raw}' not found")))
}

/// Parse a student id taken from the URL path; see [`lecturer_id_from_path`].
pub(crate) fn student_id_from_path(raw: String) -> Result<StudentId, Error> {
    StudentId::new(raw.as_str())
        .map_err(|_| Error::not_found(format!("Student with ID '{raw}' not found")))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for request validation helpers.

    use rstest::rstest;

    use super::*;
    use crate::domain::{ErrorCode, PersonName};

    #[rstest]
    fn valid_fields_produce_values() {
        let mut errors = FieldErrors::default();
        let name = errors.check(NAME, Some("Jane".to_owned()), PersonName::new);
        let result = errors.finish(name).expect("valid name");
        assert_eq!(result.as_str(), "Jane");
    }

    #[rstest]
    fn every_failing_field_is_reported() {
        let mut errors = FieldErrors::default();
        let name = errors.check(NAME, Some(String::new()), PersonName::new);
        let surname = errors.check(SURNAME, None, PersonName::new);
        let student = errors.check(STUDENT_ID, Some("S-1".to_owned()), StudentId::new);

        let err = errors
            .finish(name.zip(surname).zip(student))
            .expect_err("three failures");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.message(), VALIDATION_FAILED);
        assert_eq!(
            err.details(),
            Some(&json!({
                "fieldErrors": {
                    "name": "Name cannot be blank",
                    "surname": "Surname cannot be blank",
                    "studentId": "Student ID must contain only alphanumeric characters",
                }
            }))
        );
    }

    #[rstest]
    #[case(LECTURER_ID, IdentityValidationError::Blank, "Lecturer ID cannot be blank")]
    #[case(
        SURNAME,
        IdentityValidationError::NonAlphanumeric,
        "Surname must contain only alphanumeric characters"
    )]
    fn messages_use_the_field_label(
        #[case] field: FieldName,
        #[case] error: IdentityValidationError,
        #[case] expected: &str,
    ) {
        assert_eq!(field.message(error), expected);
    }

    #[rstest]
    fn invalid_path_ids_read_as_not_found() {
        let err = lecturer_id_from_path("L 1".to_owned()).expect_err("invalid id");
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err.message(), "Lecturer with ID 'L 1' not found");

        let student = student_id_from_path("S1".to_owned()).expect("valid id");
        assert_eq!(student.as_str(), "S1");
    }
}
