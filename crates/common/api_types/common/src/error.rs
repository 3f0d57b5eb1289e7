use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Api Endpoint Not Found: {0}")]
    NotFound(String),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Internal Server Error: {0}")]
    InternalError(String),

    #[error("Validator not found: {0}")]
    ValidatorNotFound(String),

    #[error("Beacon node is currently syncing and not serving requests on this endpoint")]
    UnderSyncing,
}

/// Body of every error response, `{"code": 400, "message": "..."}`.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorMessage {
    pub code: u16,
    pub message: String,
}

impl ResponseError for ApiError {
    fn error_response(&self) -> HttpResponse {
        let status_code = self.status_code();
        HttpResponse::build(status_code).json(ErrorMessage {
            code: status_code.as_u16(),
            message: self.to_string(),
        })
    }

    fn status_code(&self) -> StatusCode {
        match *self {
            ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::ValidatorNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::UnderSyncing => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}
