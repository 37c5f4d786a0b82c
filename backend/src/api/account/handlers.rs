//! Handler functions for account management API endpoints.
//!
//! Every handler here runs behind `jwt_auth` and the admin role check, and
//! only ever returns the `AccountView` projection of an account.

use crate::api::common::{
    ApiResponse, PaginationFilter, json_rejection_to_http, service_error_to_http,
};
use crate::database::models::{AccountDto, AccountView};
use crate::errors::ServiceError;
use crate::services::AppState;
use crate::services::account_service::AccountService;
use crate::services::validation::validation_messages;
use crate::utils::jwt::Claims;
use axum::{
    extract::{Extension, Json, Path, Query, rejection::JsonRejection},
    http::{StatusCode, header::LOCATION},
    response::Json as ResponseJson,
};
use validator::Validate;

#[axum::debug_handler]
pub async fn create_account(
    Extension(state): Extension<AppState>,
    Extension(claims): Extension<Claims>,
    payload: Result<Json<AccountDto>, JsonRejection>,
) -> Result<
    (
        StatusCode,
        [(axum::http::HeaderName, String); 1],
        ResponseJson<ApiResponse<AccountView>>,
    ),
    (StatusCode, String),
> {
    let Json(payload) = payload.map_err(json_rejection_to_http)?;
    tracing::info!("Creating account on behalf of {}", claims.email());

    let service = AccountService::new(state.accounts.as_ref());
    let account = service
        .create(payload)
        .await
        .map_err(service_error_to_http)?;

    let location = format!("/accounts/{}", account.id);
    Ok((
        StatusCode::CREATED,
        [(LOCATION, location)],
        ResponseJson(ApiResponse::success(
            AccountView::from(account),
            "Account created successfully",
        )),
    ))
}

#[axum::debug_handler]
pub async fn list_accounts(
    Extension(state): Extension<AppState>,
    Query(pagination): Query<PaginationFilter>,
) -> Result<ResponseJson<ApiResponse<Vec<AccountView>>>, (StatusCode, String)> {
    if let Err(errors) = pagination.validate() {
        return Err(service_error_to_http(ServiceError::validation_messages(
            validation_messages(&errors),
        )));
    }

    let service = AccountService::new(state.accounts.as_ref());
    let accounts = service
        .list_page(&pagination)
        .await
        .map_err(service_error_to_http)?;

    let views = accounts.into_iter().map(AccountView::from).collect();
    Ok(ResponseJson(ApiResponse::ok(views)))
}

#[axum::debug_handler]
pub async fn get_account(
    Extension(state): Extension<AppState>,
    Path(id): Path<i64>,
) -> Result<ResponseJson<ApiResponse<AccountView>>, (StatusCode, String)> {
    let service = AccountService::new(state.accounts.as_ref());

    match service.get_required(id).await {
        Ok(account) => Ok(ResponseJson(ApiResponse::success(
            AccountView::from(account),
            "Account retrieved successfully",
        ))),
        Err(error) => Err(service_error_to_http(error)),
    }
}
