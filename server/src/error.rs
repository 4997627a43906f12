//! Error type shared by handlers and the RPC router.
//!
//! [`ApiError`] implements actix's [`ResponseError`], so any handler can
//! return `Result<_, ApiError>` and the failure is rendered as the
//! `{"error":{"code":..,"message":..}}` envelope. Store faults are logged in
//! full but only a generic message reaches the client.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use log::error;
use thiserror::Error;
use todo_shared::{ErrorCode, RpcError, RpcResponse};
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Input failed its declared shape or constraints.
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    /// Known procedure, wrong HTTP method.
    #[error("{0}")]
    MethodNotSupported(String),

    #[error("store error: {0}")]
    Store(#[from] sqlx::Error),
}

impl ApiError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ApiError::Validation(_) => ErrorCode::BadRequest,
            ApiError::NotFound(_) => ErrorCode::NotFound,
            ApiError::MethodNotSupported(_) => ErrorCode::MethodNotSupported,
            ApiError::Store(_) => ErrorCode::InternalServerError,
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        let mut messages = Vec::new();
        for (field, field_errors) in errors.field_errors() {
            for err in field_errors {
                match &err.message {
                    Some(message) => messages.push(message.to_string()),
                    None => messages.push(format!("{field}: {}", err.code)),
                }
            }
        }
        messages.sort();
        ApiError::Validation(messages.join("; "))
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotSupported(_) => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            ApiError::Store(e) => {
                error!("request failed with store error: {e}");
                "internal server error".to_owned()
            }
            other => other.to_string(),
        };
        let body: RpcResponse<()> = RpcResponse::Error(RpcError {
            code: self.code(),
            message,
        });
        HttpResponse::build(self.status_code()).json(body)
    }
}
