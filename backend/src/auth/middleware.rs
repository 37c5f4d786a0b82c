//! Middleware for protecting authenticated routes and handling authorization.
//!
//! `jwt_auth` validates the bearer token and stores its claims in the request
//! extensions; `require_roles` then checks the role claim against the set of
//! roles declared for the route. Missing or invalid tokens are answered with
//! 401, a role outside the set with 403.

use crate::api::common::service_error_to_http;
use crate::database::models::Role;
use crate::errors::ServiceError;
use crate::services::AppState;
use crate::utils::jwt::Claims;
use axum::{
    extract::{Extension, Request, State},
    http::{StatusCode, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};

/// Routes reserved to administrators.
pub const ADMIN_ONLY: &[Role] = &[Role::Admin];

/// Routes open to every known role.
pub const ADMIN_OR_EDITOR: &[Role] = &[Role::Admin, Role::Editor];

/// JWT authentication middleware
pub async fn jwt_auth(
    Extension(state): Extension<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, (StatusCode, String)> {
    let authorization = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|header| header.to_str().ok());

    let claims = state
        .jwt
        .authenticate(authorization)
        .map_err(service_error_to_http)?;

    // Add claims to request extensions for use in handlers
    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

/// Role authorization middleware, layered inside `jwt_auth`
pub async fn require_roles(
    State(roles): State<&'static [Role]>,
    request: Request,
    next: Next,
) -> Result<Response, (StatusCode, String)> {
    // Get claims from request extensions (should be set by jwt_auth middleware)
    let claims = request.extensions().get::<Claims>().ok_or_else(|| {
        service_error_to_http(ServiceError::unauthenticated("Missing token claims"))
    })?;

    claims.authorize(roles).map_err(service_error_to_http)?;

    Ok(next.run(request).await)
}
