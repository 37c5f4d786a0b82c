//! Global application error types.
//!
//! This module defines the error taxonomy shared by the services, the
//! authentication layer and the HTTP handlers, so that every failure maps to
//! exactly one response status.

use thiserror::Error;

/// Generic service error that can be used across all entities
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Payload rejected by the validation rules. Carries every violated rule.
    #[error("Validation error: {}", messages.join(", "))]
    Validation { messages: Vec<String> },

    #[error("{entity} not found: {identifier}")]
    NotFound { entity: String, identifier: String },

    /// Missing, malformed, tampered or expired token, or bad credentials.
    #[error("Unauthenticated: {message}")]
    Unauthenticated { message: String },

    /// Valid token whose role is not allowed on the route.
    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    #[error("Database error: {source}")]
    Database {
        #[from]
        source: anyhow::Error,
    },

    #[error("Internal error: {message}")]
    InternalError { message: String },
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    // Helper constructors for common patterns

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            messages: vec![message.into()],
        }
    }

    pub fn validation_messages(messages: Vec<String>) -> Self {
        Self::Validation { messages }
    }

    pub fn not_found(entity: impl Into<String>, identifier: impl ToString) -> Self {
        Self::NotFound {
            entity: entity.into(),
            identifier: identifier.to_string(),
        }
    }

    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::Unauthenticated {
            message: message.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
        }
    }
}
