use rocket::http::Status;
use rocket::serde::json::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::services::validation::FieldError;

/// Envelope shared by every endpoint: a status message plus the payload,
/// with field errors attached on validation failure.
#[derive(Serialize, Deserialize, Debug)]
pub struct ApiResponse<T> {
    pub message: String,
    pub result: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

impl<T> ApiResponse<T> {
    pub fn success(message: impl Into<String>, result: T) -> Self {
        ApiResponse {
            message: message.into(),
            result: Some(result),
            errors: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        ApiResponse {
            message: message.into(),
            result: None,
            errors: None,
        }
    }
}

/// Request-level failure taxonomy. Internal details are logged at the
/// handler boundary, never returned to the caller.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("validation failed")]
    Validation(Vec<FieldError>),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("internal error")]
    Internal,
}

impl ApiError {
    pub fn into_response<T>(self) -> (Status, Json<ApiResponse<T>>) {
        match self {
            ApiError::Validation(errors) => (
                Status::BadRequest,
                Json(ApiResponse {
                    message: "400: Validation error".to_string(),
                    result: None,
                    errors: Some(errors),
                }),
            ),
            ApiError::NotFound(what) => (
                Status::NotFound,
                Json(ApiResponse::failure(format!("404: {what} not found"))),
            ),
            ApiError::Internal => (
                Status::InternalServerError,
                Json(ApiResponse::failure("500: Internal Server Error")),
            ),
        }
    }
}
