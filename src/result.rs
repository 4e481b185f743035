use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::error::ApiError;

/// The single wire shape of every enveloped response.
///
/// Error fields are only present on failures; `data` is omitted when absent.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResultEnvelope<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl<T> ResultEnvelope<T> {
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            error_code: None,
            status_code: None,
            path: None,
        }
    }

    /// Success without a payload, e.g. after a deletion.
    pub fn success_message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
            error_code: None,
            status_code: None,
            path: None,
        }
    }

    pub fn failure(error: &ApiError, path: impl Into<String>) -> Self {
        Self {
            success: false,
            message: error.message().to_owned(),
            data: None,
            error_code: Some(error.error_code().to_owned()),
            status_code: Some(error.status_code()),
            path: Some(path.into()),
        }
    }

    /// Failure that keeps a partial payload, e.g. the field error list.
    pub fn failure_with(data: T, error: &ApiError, path: impl Into<String>) -> Self {
        Self {
            data: Some(data),
            ..Self::failure(error, path)
        }
    }
}

// Envelope plus the HTTP status it is sent with
pub struct ApiResponse<T> {
    pub status: StatusCode,
    pub envelope: ResultEnvelope<T>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T, message: &str) -> Self {
        Self {
            status: StatusCode::OK,
            envelope: ResultEnvelope::success(data, message),
        }
    }

    pub fn created(data: T, message: &str) -> Self {
        Self {
            status: StatusCode::CREATED,
            envelope: ResultEnvelope::success(data, message),
        }
    }

    pub fn message(message: &str) -> Self {
        Self {
            status: StatusCode::OK,
            envelope: ResultEnvelope::success_message(message),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self.envelope)).into_response()
    }
}
