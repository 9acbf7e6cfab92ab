//! # HTTP error mapping
//!
//! Renders `AppError` as a status code plus the JSON shape clients key on.
//! The three kinds deliberately use different body fields.

use std::fmt;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use pb_core::error::{AppError, NOT_FOUND};
use serde_json::json;

/// Handler-facing wrapper so `ResponseError` can be implemented for core errors.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self.0 {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match &self.0 {
            AppError::Validation(message) => json!({ "errorMessage": message }),
            AppError::NotFound => json!({ "message": NOT_FOUND }),
            AppError::Store { message, source } => {
                log::error!("{message}: {source:#}");
                json!({ "error": message })
            }
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}
