//! Defines the HTTP routes for account management.
//!
//! Every route here is reserved to administrators.

use super::handlers::{create_account, get_account, list_accounts};
use crate::auth::middleware::{ADMIN_ONLY, jwt_auth, require_roles};
use axum::{
    Router, middleware,
    routing::{get, post},
};

pub fn account_router() -> Router {
    Router::new()
        .route(
            "/",
            post(create_account)
                .get(list_accounts)
                .route_layer(middleware::from_fn_with_state(ADMIN_ONLY, require_roles))
                .route_layer(middleware::from_fn(jwt_auth)),
        )
        .route(
            "/{id}",
            get(get_account)
                .route_layer(middleware::from_fn_with_state(ADMIN_ONLY, require_roles))
                .route_layer(middleware::from_fn(jwt_auth)),
        )
}
