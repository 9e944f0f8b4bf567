//! Error handling for tally-http
//!
//! This module provides error handling for the HTTP API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::cmp::PartialEq;

/// Application error type
#[derive(Debug)]
pub enum AppError {
    /// Malformed or missing request fields
    Validation(String),

    /// Unknown expression id
    NotFound { expression_id: String },

    /// Result requested before the expression reached a terminal state
    NotFinished { expression_id: String },

    /// Internal error
    Internal(String),
}

impl PartialEq<StatusCode> for AppError {
    fn eq(&self, status_code: &StatusCode) -> bool {
        let (error_status, _) = self.status_and_message();
        &error_status == status_code
    }
}

impl AppError {
    /// Get the status code and error message for this error
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            Self::Validation(message) => (StatusCode::BAD_REQUEST, message.clone()),
            Self::NotFound { expression_id } => (
                StatusCode::NOT_FOUND,
                format!("Expression not found: {}", expression_id),
            ),
            Self::NotFinished { expression_id } => (
                StatusCode::BAD_REQUEST,
                format!("Expression is not finished yet: {}", expression_id),
            ),
            Self::Internal(message) => (StatusCode::INTERNAL_SERVER_ERROR, message.clone()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = self.status_and_message();

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
