use axum::http::StatusCode;
use std::fmt;

use crate::messages;
use crate::store::StoreError;

// failure categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Business,
    Validation,
    NotFound,
    Database, // constraint violation from the store
    InternalServerError,
}

impl ErrorKind {
    pub fn status(self) -> StatusCode {
        match self {
            Self::Business | Self::Database => StatusCode::CONFLICT,
            Self::Validation => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    // label for logs and metrics
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Business => "business",
            Self::Validation => "validation",
            Self::NotFound => "not_found",
            Self::Database => "database",
            Self::InternalServerError => "internal_server_error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    UserNotFound,
    UserExistEmail,
    RouteNotFound,
    Validation,
    Database,
    Server,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::UserExistEmail => "USER_EXIST_EMAIL",
            Self::RouteNotFound => "ROUTE_NOT_FOUND",
            Self::Validation => "VALIDATION",
            Self::Database => "DATABASE",
            Self::Server => "SERVER",
        }
    }
}

// one classified failure, only built through the constructors below
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    kind: ErrorKind,
    message: String,
    error_code: ErrorCode,
    http_status: StatusCode,
    status_code: u16,
}

impl ApiError {
    fn new(kind: ErrorKind, message: impl Into<String>, error_code: ErrorCode) -> Self {
        let http_status = kind.status();
        Self {
            kind,
            message: message.into(),
            error_code,
            http_status,
            status_code: http_status.as_u16(),
        }
    }

    pub fn business(message: impl Into<String>, error_code: ErrorCode) -> Self {
        Self::new(ErrorKind::Business, message, error_code)
    }

    pub fn not_found(message: impl Into<String>, error_code: ErrorCode) -> Self {
        Self::new(ErrorKind::NotFound, message, error_code)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message, ErrorCode::Validation)
    }

    pub fn database(diagnostic: &str) -> Self {
        Self::new(
            ErrorKind::Database,
            sanitize_database_message(diagnostic),
            ErrorCode::Database,
        )
    }

    pub fn internal() -> Self {
        Self::new(
            ErrorKind::InternalServerError,
            messages::INTERNAL_SERVER_ERROR,
            ErrorCode::Server,
        )
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn error_code(&self) -> &'static str {
        self.error_code.as_str()
    }

    pub fn http_status(&self) -> StatusCode {
        self.http_status
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }
}

// "Detail:" suffix, else text before the first backslash, else the generic message
pub fn sanitize_database_message(diagnostic: &str) -> String {
    if let Some(start) = diagnostic.find("Detail:") {
        return diagnostic[start..].to_owned();
    }
    if let Some(end) = diagnostic.find('\\') {
        return diagnostic[..end].to_owned();
    }
    messages::DATABASE_ERROR.to_owned()
}

#[derive(Debug, thiserror::Error)]
pub enum Failure {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("invalid input: {}", .0.join(", "))]
    Invalid(Vec<String>),

    #[error("unexpected failure: {0}")]
    Unexpected(Box<dyn std::error::Error + Send + Sync>),
}

#[derive(Debug)]
pub struct Classified {
    pub error: ApiError,
    pub details: Option<Vec<String>>, // field errors
    pub cause: Option<String>,        // logged, never serialized
}

impl Failure {
    pub fn unexpected(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unexpected(Box::new(err))
    }

    pub fn invalid_field(field: &str, message: impl fmt::Display) -> Self {
        Self::Invalid(vec![format!("{field}: {message}")])
    }

    pub fn classify(self) -> Classified {
        match self {
            Self::Api(error) => Classified {
                error,
                details: None,
                cause: None,
            },
            Self::Store(StoreError::UniqueViolation { diagnostic }) => Classified {
                error: ApiError::database(&diagnostic),
                details: None,
                cause: None,
            },
            Self::Invalid(errors) if !errors.is_empty() => Classified {
                error: ApiError::validation(messages::VALIDATION_ERROR),
                details: Some(errors),
                cause: None,
            },
            other => Classified {
                error: ApiError::internal(),
                details: None,
                cause: Some(other.to_string()),
            },
        }
    }
}
