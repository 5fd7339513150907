//! Custom error types and handling
//!
//! This module defines the application's error types and implements
//! conversion to HTTP responses for the Axum framework.
//!
//! Failures of the derivation engine are modelled separately as
//! [`DomainError`]: they stem from deterministic input data, are never
//! retried, and always name the offending entity so the caller can fix
//! the input and run the whole operation again.

use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use uuid::Uuid;

/// Which capacity limit of a competition format was violated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CapacityScope {
    Raceclass,
    Race,
}

impl fmt::Display for CapacityScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Raceclass => write!(f, "raceclass"),
            Self::Race => write!(f, "race"),
        }
    }
}

/// A contestant that could not be placed in any raceclass
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnplacedContestant {
    pub id: Uuid,
    pub name: String,
    pub ageclass: String,
}

/// Errors raised by the competition format registry and the derivation engine
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    #[error("Invalid competition format field '{field}': {message}")]
    InvalidFormat { field: String, message: String },

    #[error("Invalid contestant {contestant}: {message}")]
    InvalidContestant { contestant: String, message: String },

    #[error(
        "Raceclass '{raceclass}' (ageclasses: {}) has {count} contestants, exceeding the {scope} limit of {limit}",
        .ageclasses.join(", ")
    )]
    CapacityExceeded {
        scope: CapacityScope,
        raceclass: String,
        ageclasses: Vec<String>,
        limit: i32,
        count: usize,
    },

    #[error("Prerequisite missing: {0}")]
    PrerequisiteMissing(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("{} contestant(s) cannot be placed in a raceclass", .contestants.len())]
    UnassignedContestant { contestants: Vec<UnplacedContestant> },
}

impl DomainError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidFormat { .. } => "INVALID_FORMAT",
            Self::InvalidContestant { .. } => "INVALID_CONTESTANT",
            Self::CapacityExceeded { .. } => "CAPACITY_EXCEEDED",
            Self::PrerequisiteMissing(_) => "PREREQUISITE_MISSING",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::UnassignedContestant { .. } => "UNASSIGNED_CONTESTANT",
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidFormat { .. } | Self::InvalidContestant { .. } => StatusCode::BAD_REQUEST,
            Self::PrerequisiteMissing(_) => StatusCode::CONFLICT,
            Self::CapacityExceeded { .. }
            | Self::Configuration(_)
            | Self::UnassignedContestant { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    /// Structured description of the offending entity
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            Self::InvalidFormat { field, .. } => Some(json!({ "field": field })),
            Self::InvalidContestant { contestant, .. } => {
                Some(json!({ "contestant": contestant }))
            }
            Self::CapacityExceeded {
                scope,
                raceclass,
                ageclasses,
                limit,
                count,
            } => Some(json!({
                "scope": scope,
                "raceclass": raceclass,
                "ageclasses": ageclasses,
                "limit": limit,
                "count": count,
            })),
            Self::UnassignedContestant { contestants } => {
                Some(json!({ "contestants": contestants }))
            }
            Self::PrerequisiteMissing(_) | Self::Configuration(_) => None,
        }
    }
}

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Authentication errors
    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    // Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // Resource errors
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    // Derivation and registry errors
    #[error(transparent)]
    Domain(#[from] DomainError),

    // Store errors
    #[error("Database error: {0}")]
    Database(String),

    // Internal errors
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetails,
}

/// Error details in response
#[derive(Debug, Serialize)]
pub struct ErrorDetails {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl AppError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidToken => "INVALID_TOKEN",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::NotFound(_) => "NOT_FOUND",
            Self::AlreadyExists(_) => "ALREADY_EXISTS",
            Self::Conflict(_) => "CONFLICT",
            Self::Domain(e) => e.error_code(),
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidToken | Self::TokenExpired | Self::Unauthorized => {
                StatusCode::UNAUTHORIZED
            }
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Validation(_) | Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::AlreadyExists(_) | Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Domain(e) => e.status_code(),
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Log internal errors but don't expose details to clients
        let message = match &self {
            AppError::Internal(e) => {
                tracing::error!("Internal error: {:?}", e);
                "An internal error occurred".to_string()
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                "A database error occurred".to_string()
            }
            _ => self.to_string(),
        };

        let details = match &self {
            AppError::Domain(e) => e.details(),
            _ => None,
        };

        let body = ErrorResponse {
            error: ErrorDetails {
                code: self.error_code().to_string(),
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::NotFound("Resource not found".to_string()),
            sqlx::Error::Database(db_err) => {
                if db_err.is_unique_violation() {
                    AppError::AlreadyExists("Resource already exists".to_string())
                } else if db_err.is_foreign_key_violation() {
                    AppError::NotFound("Referenced resource not found".to_string())
                } else {
                    AppError::Database(db_err.to_string())
                }
            }
            _ => AppError::Database(err.to_string()),
        }
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::TokenExpired,
            _ => AppError::InvalidToken,
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;
