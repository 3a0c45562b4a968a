//! Domain-level error types.
//!
//! These errors are transport agnostic. Inbound adapters map each
//! [`ErrorCode`] to a status code and render the payload in their own
//! envelope.

use serde_json::Value;

use crate::domain::TraceId;

/// Message reported when a user identifier falls below the accepted range.
pub const INVALID_USER_ID_MESSAGE: &str = "Invalid user ID";
/// Message reported when no user matches an identifier.
pub const USER_NOT_FOUND_MESSAGE: &str = "User not found";
/// Message reported when an email address is already taken.
pub const EMAIL_TAKEN_MESSAGE: &str = "Email already registered";
/// Redacted message surfaced for unexpected failures.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorCode {
    /// A user identifier could not be parsed as an integer.
    MalformedIdentifier,
    /// A user identifier parsed but is below the accepted range.
    InvalidIdentifier,
    /// The requested user does not exist.
    NotFound,
    /// Pagination parameters are malformed or out of bounds.
    InvalidPageParams,
    /// A request body failed field validation.
    ValidationFailure,
    /// The request conflicts with existing state.
    Conflict,
    /// An unexpected failure inside the service or its stores.
    InternalError,
}

/// Domain error payload.
///
/// `details` carries structured, adapter-renderable context such as a list of
/// field violations. When absent, adapters fall back to `message`.
///
/// # Examples
/// ```
/// use user_directory::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("User not found");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// assert_eq!(err.message(), "User not found");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    code: ErrorCode,
    message: String,
    details: Option<Value>,
    trace_id: Option<String>,
}

impl Error {
    /// Create an error, capturing the trace identifier in scope if any.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
            trace_id: TraceId::current().map(|id| id.to_string()),
        }
    }

    /// Stable machine-readable error code.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message returned to adapters.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Supplementary error details for adapters.
    #[must_use]
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Correlation identifier captured when the error was raised.
    #[must_use]
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Attach structured details to the error.
    ///
    /// # Examples
    /// ```
    /// use serde_json::json;
    /// use user_directory::domain::{Error, ErrorCode};
    ///
    /// let err = Error::new(ErrorCode::ValidationFailure, "invalid body")
    ///     .with_details(json!([{ "loc": ["body", "email"] }]));
    /// assert!(err.details().is_some());
    /// ```
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Override the captured trace identifier.
    #[must_use]
    pub fn with_trace_id(mut self, id: impl Into<String>) -> Self {
        self.trace_id = Some(id.into());
        self
    }

    /// Convenience constructor for [`ErrorCode::InvalidIdentifier`] using the
    /// canonical message.
    #[must_use]
    pub fn invalid_identifier() -> Self {
        Self::new(ErrorCode::InvalidIdentifier, INVALID_USER_ID_MESSAGE)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// [`ErrorCode::NotFound`] with the canonical user message.
    #[must_use]
    pub fn user_not_found() -> Self {
        Self::not_found(USER_NOT_FOUND_MESSAGE)
    }

    /// Convenience constructor for [`ErrorCode::Conflict`].
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Conflict, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests;
