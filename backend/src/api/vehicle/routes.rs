//! Defines the HTTP routes for vehicle management.
//!
//! Reads and creation are open to admins and editors; update and delete are
//! reserved to admins. Anonymous reads are not allowed. Checks are attached
//! with `route_layer`, so a method a path does not serve still gets 405.

use super::handlers::{create_vehicle, delete_vehicle, get_vehicle, list_vehicles, update_vehicle};
use crate::auth::middleware::{ADMIN_ONLY, ADMIN_OR_EDITOR, jwt_auth, require_roles};
use axum::{
    Router, middleware,
    routing::{get, put},
};

pub fn vehicle_router() -> Router {
    Router::new()
        .route(
            "/",
            get(list_vehicles)
                .post(create_vehicle)
                .route_layer(middleware::from_fn_with_state(ADMIN_OR_EDITOR, require_roles))
                .route_layer(middleware::from_fn(jwt_auth)),
        )
        .route(
            "/{id}",
            get(get_vehicle)
                .route_layer(middleware::from_fn_with_state(ADMIN_OR_EDITOR, require_roles))
                .route_layer(middleware::from_fn(jwt_auth)),
        )
        // Same path, admin-only methods
        .route(
            "/{id}",
            put(update_vehicle)
                .delete(delete_vehicle)
                .route_layer(middleware::from_fn_with_state(ADMIN_ONLY, require_roles))
                .route_layer(middleware::from_fn(jwt_auth)),
        )
}
