//! Business identifiers and person names.
//!
//! Lecturer and student identifiers are externally supplied keys. They, and
//! the names attached to them, share one shape: non-blank ASCII alphanumerics.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Reasons a raw string cannot become an identifier or name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IdentityValidationError {
    /// Empty or whitespace-only input.
    #[error("must not be blank")]
    Blank,
    /// Input containing anything other than ASCII letters and digits.
    #[error("must contain only alphanumeric characters")]
    NonAlphanumeric,
}

static ALPHANUMERIC_RE: OnceLock<Regex> = OnceLock::new();

fn alphanumeric_regex() -> &'static Regex {
    ALPHANUMERIC_RE.get_or_init(|| {
        Regex::new("^[a-zA-Z0-9]+$")
            .unwrap_or_else(|error| panic!("alphanumeric regex failed to compile: {error}"))
    })
}

fn validate(raw: &str) -> Result<(), IdentityValidationError> {
    if raw.trim().is_empty() {
        return Err(IdentityValidationError::Blank);
    }
    if !alphanumeric_regex().is_match(raw) {
        return Err(IdentityValidationError::NonAlphanumeric);
    }
    Ok(())
}

macro_rules! alphanumeric_newtype {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Validate and construct the value.
            pub fn new(raw: impl Into<String>) -> Result<Self, IdentityValidationError> {
                let raw = raw.into();
                validate(&raw)?;
                Ok(Self(raw))
            }

            /// Borrow the validated text.
            #[must_use]
            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdentityValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }
    };
}

alphanumeric_newtype! {
    /// Business key of a lecturer, unique across all lecturers.
    ///
    /// # Examples
    /// ```
    /// use roster::domain::LecturerId;
    ///
    /// assert!(LecturerId::new("L1").is_ok());
    /// assert!(LecturerId::new("L 1").is_err());
    /// ```
    LecturerId
}

alphanumeric_newtype! {
    /// Business key of a student, unique across all students.
    StudentId
}

alphanumeric_newtype! {
    /// A given name or surname.
    PersonName
}
