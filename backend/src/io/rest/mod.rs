//! # REST API Interface Layer
//!
//! HTTP endpoints for the pocket-planner backend. This layer handles
//! request/response serialization, DTO ↔ domain mapping and the
//! translation of the domain error taxonomy into HTTP status codes.
//! No business logic lives here.

pub mod export_apis;
pub mod lookup_apis;
pub mod mappers;
pub mod preference_apis;
pub mod reminder_apis;
pub mod session_apis;
pub mod task_apis;

pub use export_apis::*;
pub use lookup_apis::*;
pub use preference_apis::*;
pub use reminder_apis::*;
pub use session_apis::*;
pub use task_apis::*;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use log::{error, warn};

use crate::domain::errors::ServiceError;

/// Map a domain error to its HTTP status and log it with the handler
/// context. Storage failures are the only 500s; everything else is the
/// caller's problem.
pub(crate) fn error_response(context: &str, err: ServiceError) -> Response {
    let status = match &err {
        ServiceError::NotAuthenticated => StatusCode::UNAUTHORIZED,
        ServiceError::NotFound { .. } => StatusCode::NOT_FOUND,
        ServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ServiceError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status == StatusCode::INTERNAL_SERVER_ERROR {
        error!("Failed to {}: {}", context, err);
    } else {
        warn!("Rejected {}: {}", context, err);
    }
    (status, err.to_string()).into_response()
}
