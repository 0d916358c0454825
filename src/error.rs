/*
 * Responsibility
 * - 認証ゲートの拒否理由 (AuthError) と、それ以外のアプリ共通エラー (AppError)
 * - IntoResponse 実装 (HTTP status / {"message": ...} JSON body)
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Serialize)]
pub struct MessageBody {
    pub message: String,
}

fn message_response(status: StatusCode, message: String) -> Response {
    (status, Json(MessageBody { message })).into_response()
}

/// Why the gate refused a request.
///
/// Verification failures (bad signature, malformed, expired, ...) all collapse
/// into `InvalidCredential`; callers never learn which check failed.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    #[error("No token")]
    MissingCredential,
    #[error("Invalid token")]
    InvalidCredential,
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(_: jsonwebtoken::errors::Error) -> Self {
        Self::InvalidCredential
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        message_response(StatusCode::UNAUTHORIZED, self.to_string())
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found")]
    NotFound,
    #[error("Request timed out")]
    Timeout,
    #[error("Internal server error")]
    Internal,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Timeout => StatusCode::REQUEST_TIMEOUT,
            AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };

        message_response(status, self.to_string())
    }
}
