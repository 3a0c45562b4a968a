//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while rendering every
//! failure as `{"detail": ...}` with a status derived from its code.

use actix_web::error::{JsonPayloadError, QueryPayloadError};
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error};
use utoipa::ToSchema;

use crate::domain::error::INTERNAL_ERROR_MESSAGE;
use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};
use crate::inbound::http::validation::{json_invalid, query_invalid, violations_error};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Error response body.
///
/// `detail` is either a plain message or a list of field violations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// Message string or violation list.
    #[schema(value_type = Object, example = "User not found")]
    pub detail: Value,
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::MalformedIdentifier
        | ErrorCode::InvalidIdentifier
        | ErrorCode::InvalidPageParams
        | ErrorCode::ValidationFailure => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn body_for(error: &Error) -> ErrorBody {
    let detail = match (error.code(), error.details()) {
        (ErrorCode::InternalError, _) => Value::String(INTERNAL_ERROR_MESSAGE.to_owned()),
        (_, Some(details)) => details.clone(),
        (_, None) => Value::String(error.message().to_owned()),
    };
    ErrorBody { detail }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(body_for(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        // Extractor error handlers already produce domain errors.
        if let Some(domain) = err.as_error::<Self>() {
            return domain.clone();
        }
        // Do not leak implementation details to clients.
        error!(error = %err, "actix error promoted to domain error");
        Self::internal(INTERNAL_ERROR_MESSAGE)
    }
}

/// Render undecodable JSON bodies as a `json_invalid` violation.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejected request body");
    violations_error(ErrorCode::ValidationFailure, &[json_invalid(&err.to_string())]).into()
}

/// Render undecodable query strings as an invalid page parameter error.
pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejected query string");
    violations_error(ErrorCode::InvalidPageParams, &[query_invalid(&err.to_string())]).into()
}

#[cfg(test)]
mod tests;
