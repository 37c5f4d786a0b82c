//! Handler functions for authentication-related API endpoints.
//!
//! These functions process incoming login requests and hand them to
//! `auth::service` for the credential check and token issuance.

use crate::api::common::{ApiResponse, json_rejection_to_http, service_error_to_http};
use crate::auth::models::*;
use crate::auth::service::AuthService;
use crate::services::AppState;
use axum::{
    extract::{Extension, Json, rejection::JsonRejection},
    http::StatusCode,
    response::Json as ResponseJson,
};

/// Handle account login request
#[axum::debug_handler]
pub async fn login(
    Extension(state): Extension<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<ResponseJson<ApiResponse<LoginResponse>>, (StatusCode, String)> {
    let Json(payload) = payload.map_err(json_rejection_to_http)?;
    let auth_service = AuthService::new(&state);

    match auth_service.login(payload).await {
        Ok(response) => Ok(ResponseJson(ApiResponse::success(
            response,
            "Login successful",
        ))),
        Err(error) => Err(service_error_to_http(error)),
    }
}
