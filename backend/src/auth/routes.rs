//! Defines the HTTP routes specifically for authentication.
//!
//! Login is the only anonymous account route; it is merged into the account
//! router under `/accounts`.

use crate::auth::handlers::*;
use axum::{Router, routing::post};

/// Creates the authentication router with all auth-related routes
pub fn auth_router() -> Router {
    Router::new().route("/login", post(login))
}
