//! Report lookup failures, tagged with the HTTP status they map to

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::dataset::DataError;
use crate::profile::ProfileError;
use crate::states::LookupError;

/// Failure class; decides the HTTP status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// No provider, state or route for the identifier (404)
    NotFound,
    /// Malformed NPI, state code, filter or format kind (400)
    BadRequest,
    /// Fixtures could not be read (500)
    #[serde(rename = "INTERNAL_ERROR")]
    Internal,
}

impl ErrorCode {
    /// HTTP status for this class
    #[must_use]
    pub const fn status_code(self) -> u16 {
        match self {
            Self::NotFound => 404,
            Self::BadRequest => 400,
            Self::Internal => 500,
        }
    }

    /// Wire name used in the response envelope
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "NOT_FOUND",
            Self::BadRequest => "BAD_REQUEST",
            Self::Internal => "INTERNAL_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed report request
#[derive(Debug, Clone, Error, Serialize)]
#[error("{code}: {message}")]
pub struct ApiError {
    /// Failure class
    pub code: ErrorCode,
    /// Message shown to the user
    pub message: String,
}

impl ApiError {
    fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Nothing matches the identifier
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// The request itself is malformed
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::BadRequest, message)
    }

    /// `value` is not a valid `what`, e.g. `Invalid NPI: abc`
    #[must_use]
    pub fn invalid(what: &str, value: &str) -> Self {
        Self::bad_request(format!("Invalid {what}: {value}"))
    }

    /// Fixture trouble
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Internal, message)
    }

    /// HTTP status for this error
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        self.code.status_code()
    }

    /// Whether the identifier simply had no data
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.code == ErrorCode::NotFound
    }
}

impl From<DataError> for ApiError {
    fn from(err: DataError) -> Self {
        log::error!("Fixture error: {err}");
        Self::internal(err.to_string())
    }
}

impl From<ProfileError> for ApiError {
    fn from(err: ProfileError) -> Self {
        match err {
            ProfileError::NotFound(_) => Self::not_found(err.to_string()),
            ProfileError::Data(e) => e.into(),
        }
    }
}

impl From<LookupError> for ApiError {
    fn from(err: LookupError) -> Self {
        match err {
            LookupError::NotFound(_) => Self::not_found(err.to_string()),
            LookupError::Data(e) => e.into(),
        }
    }
}
