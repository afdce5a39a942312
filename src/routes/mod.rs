//! HTTP routes.

use actix_web::HttpResponse;
use serde_json::json;

use crate::services::ServiceError;

pub mod api;

/// Maps a service failure to a JSON error response.
pub fn error_response(err: &ServiceError) -> HttpResponse {
    match err {
        ServiceError::BadRequest(message) => {
            HttpResponse::BadRequest().json(json!({ "error": message }))
        }
        ServiceError::Internal(_) => {
            HttpResponse::InternalServerError().json(json!({ "error": "internal error" }))
        }
    }
}
