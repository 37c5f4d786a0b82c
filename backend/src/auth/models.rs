//! Data structures for the login flow.
//!
//! The login request is deliberately unconstrained: any pair that does not
//! match a stored account is rejected as unauthenticated, not as invalid.

use crate::database::models::Role;
use serde::{Deserialize, Serialize};

/// Login request payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub secret: String,
}

/// Login response containing the signed token and the account identity
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub email: String,
    pub role: Role,
    pub token: String,
}
