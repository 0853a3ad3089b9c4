use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::{DbErr, SqlErr};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use utoipa::ToSchema;

use crate::response::{ApiResponse, Meta};

/// Why a field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ValidationReason {
    Required,
    InvalidFormat,
    NotPositive,
    Negative,
    OutOfRange,
    AlreadyInUse,
    StoreNotApproved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Store,
    Order,
    Route,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation failed: {field} {reason:?}")]
    Validation {
        field: &'static str,
        reason: ValidationReason,
    },

    #[error("Not Found: {entity:?}")]
    NotFound { entity: EntityKind },

    #[error("Invalid transition from {from} to {to}")]
    InvalidTransition { from: &'static str, to: &'static str },

    #[error("Forbidden")]
    Forbidden,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("ORM error")]
    OrmError(#[from] DbErr),

    #[error("Internal Server Error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn validation(field: &'static str, reason: ValidationReason) -> Self {
        AppError::Validation { field, reason }
    }

    pub fn not_found(entity: EntityKind) -> Self {
        AppError::NotFound { entity }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "validation_error",
            AppError::NotFound { .. } => "not_found",
            AppError::InvalidTransition { .. } => "invalid_transition",
            AppError::Forbidden => "forbidden",
            AppError::Unauthorized => "unauthorized",
            AppError::OrmError(_) | AppError::Internal(_) => "internal_error",
        }
    }

    /// Maps a unique index violation to a field-level validation error.
    pub fn unique_violation(err: DbErr, field: &'static str) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                AppError::validation(field, ValidationReason::AlreadyInUse)
            }
            _ => AppError::OrmError(err),
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct ErrorData {
    pub error: String,
    #[schema(value_type = Object)]
    pub details: serde_json::Value,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, details) = match &self {
            AppError::Validation { field, reason } => (
                StatusCode::BAD_REQUEST,
                json!({ "field": field, "reason": reason }),
            ),
            AppError::NotFound { entity } => (StatusCode::NOT_FOUND, json!({ "entity": entity })),
            AppError::InvalidTransition { from, to } => (
                StatusCode::CONFLICT,
                json!({ "current": from, "attempted": to }),
            ),
            AppError::Forbidden => (StatusCode::FORBIDDEN, json!({})),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, json!({})),
            AppError::OrmError(err) => {
                tracing::error!(error = %err, "database error");
                (StatusCode::INTERNAL_SERVER_ERROR, json!({}))
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, json!({}))
            }
        };

        let body = ApiResponse {
            message: self.code().to_string(),
            data: Some(ErrorData {
                error: self.code().to_string(),
                details,
            }),
            meta: Some(Meta::empty()),
        };

        (status, axum::Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
