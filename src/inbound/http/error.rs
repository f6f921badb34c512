//! HTTP adapter mapping for domain errors.
//!
//! Keeps [`Error`] transport agnostic while letting Actix handlers turn
//! failures into consistent JSON responses and status codes.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::error;

use crate::domain::ports::LendingBackendError;
use crate::domain::{BackendRejection, Error, ErrorCode};
use crate::middleware::trace::TRACE_ID_HEADER;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn redact_if_internal(error: &Error) -> Error {
    if matches!(error.code, ErrorCode::InternalError) {
        let mut redacted = Error::internal("Internal server error");
        if let Some(id) = &error.trace_id {
            redacted = redacted.with_trace_id(id.clone());
        }
        redacted
    } else {
        error.clone()
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code)
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = &self.trace_id {
            builder.insert_header((TRACE_ID_HEADER, id.clone()));
        }

        builder.json(redact_if_internal(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        // Do not leak implementation details to clients.
        error!(error = %err, "actix error promoted to api error");
        Error::internal("Internal server error")
    }
}

/// Translate a lending-core failure into the shared API error payload.
///
/// Business rejections keep their staff-facing message; infrastructure
/// failures collapse to an availability or internal error with the detail
/// left in the logs.
pub fn map_backend_error(err: LendingBackendError) -> Error {
    match err {
        LendingBackendError::Rejected { rejection } => map_rejection(rejection),
        LendingBackendError::Transport { message } => {
            error!(%message, "lending core unreachable");
            Error::service_unavailable("the lending service cannot be reached right now")
        }
        LendingBackendError::Timeout { message } => {
            error!(%message, "lending core timed out");
            Error::service_unavailable("the lending service took too long to respond")
        }
        LendingBackendError::Unavailable { message } => {
            error!(%message, "lending core reported unavailability");
            Error::service_unavailable("the lending service is temporarily unavailable")
        }
        LendingBackendError::Decode { message } => {
            error!(%message, "lending core response could not be decoded");
            Error::internal("unexpected response from the lending service")
        }
    }
}

fn map_rejection(rejection: BackendRejection) -> Error {
    let message = rejection.to_string();
    match rejection {
        BackendRejection::IdentifierAlreadyExists => Error::conflict(message),
        BackendRejection::PersonNotFound | BackendRejection::LoanNotFound => {
            Error::not_found(message)
        }
        _ => Error::invalid_request(message),
    }
}
