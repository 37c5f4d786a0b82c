//! Response envelope, error mapping and pagination helpers for the API.
//!
//! Provides structured responses and conversion between service-layer errors
//! and HTTP responses. Includes:
//! - Standard response format for success and failure
//! - ServiceError to HTTP status code mapping
//! - Fixed-size pagination shared by every listing endpoint
//!
//! # Response Format
//! All errors return consistent JSON responses containing:
//! - `message`: Human-readable message
//! - `error.error_type`: Machine-readable error category
//! - `error.details`: Every violated rule, for validation failures
//!
//! # Error Handling Flow
//! 1. Service layer returns domain-specific `ServiceError`
//! 2. `service_error_to_http` converts to appropriate HTTP response
//! 3. Validation errors carry their accumulated messages

use crate::errors::ServiceError;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Number of records returned per page by every listing endpoint.
pub const PAGE_SIZE: u32 = 10;

/// Standard API response wrapper for all endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Indicates if the request was successful
    pub success: bool,
    /// Response data (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Human-readable message
    pub message: String,
    /// Error details (present on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetails>,
    /// Request timestamp
    pub timestamp: String,
}

/// Error details for failed requests
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Machine-readable error type identifier
    pub error_type: String,
    /// Every validation message when applicable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

/// Pagination parameters for requests.
///
/// Without a page every record is returned; with one, `PAGE_SIZE` records are
/// taken after skipping the preceding pages.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct PaginationFilter {
    /// Page number (1-indexed)
    #[validate(range(min = 1, message = "Page must be 1 or greater"))]
    pub page: Option<u32>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: message.into(),
            error: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Create a successful response with default message
    pub fn ok(data: T) -> Self {
        Self::success(data, "Request successful")
    }

    /// Create an error response
    pub fn error(
        message: impl Into<String>,
        error_type: impl Into<String>,
        details: Option<Vec<String>>,
    ) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            message: message.into(),
            error: Some(ErrorDetails {
                error_type: error_type.into(),
                details,
            }),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

impl PaginationFilter {
    pub fn page(page: u32) -> Self {
        Self { page: Some(page) }
    }

    /// Every record, no paging.
    pub fn all() -> Self {
        Self { page: None }
    }

    /// Number of records to skip, when paging.
    pub fn offset(&self) -> Option<u64> {
        self.page
            .map(|page| page.saturating_sub(1) as u64 * PAGE_SIZE as u64)
    }

    /// Maximum number of records to return, when paging.
    pub fn limit(&self) -> Option<u64> {
        self.page.map(|_| PAGE_SIZE as u64)
    }
}

/// Converts ServiceError to appropriate HTTP response with standard format
pub fn service_error_to_http(error: ServiceError) -> (StatusCode, String) {
    let (status, error_type, message, details) = match error {
        ServiceError::Validation { messages } => (
            StatusCode::BAD_REQUEST,
            "validation_error",
            "Validation failed".to_string(),
            Some(messages),
        ),
        ServiceError::NotFound { entity, identifier } => (
            StatusCode::NOT_FOUND,
            "not_found",
            format!("{} '{}' not found", entity, identifier),
            None,
        ),
        ServiceError::Unauthenticated { message } => {
            (StatusCode::UNAUTHORIZED, "unauthenticated", message, None)
        }
        ServiceError::Forbidden { message } => (StatusCode::FORBIDDEN, "forbidden", message, None),
        ServiceError::Database { source } => {
            tracing::error!("Database error: {:#}", source);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "database_error",
                "Internal server error".to_string(),
                None,
            )
        }
        ServiceError::InternalError { message } => {
            tracing::error!("Internal error: {}", message);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "Internal server error".to_string(),
                None,
            )
        }
    };

    let error_response = ApiResponse::<()>::error(message, error_type, details);
    let body = serde_json::to_string(&error_response)
        .unwrap_or_else(|_| format!(r#"{{"success":false,"message":"{}"}}"#, error_type));
    (status, body)
}

/// Converts a rejected JSON body (malformed, wrong field types, wrong content
/// type) into the 400 validation response
pub fn json_rejection_to_http(rejection: JsonRejection) -> (StatusCode, String) {
    tracing::debug!("Rejected request body: {}", rejection);
    service_error_to_http(ServiceError::validation(rejection.body_text()))
}

/// Apply pagination to a collection already in insertion order
pub fn apply_pagination<T>(items: Vec<T>, pagination: &PaginationFilter) -> Vec<T> {
    match (pagination.offset(), pagination.limit()) {
        (Some(offset), Some(limit)) => items
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect(),
        _ => items,
    }
}
