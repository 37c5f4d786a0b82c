//! Handler functions for vehicle API endpoints.
//!
//! These functions process requests for vehicle data, hand them to the
//! vehicle service, and return vehicle records.

use super::models::VehicleQuery;
use crate::api::common::{ApiResponse, json_rejection_to_http, service_error_to_http};
use crate::database::models::{Vehicle, VehicleDto};
use crate::errors::ServiceError;
use crate::services::AppState;
use crate::services::validation::validation_messages;
use crate::services::vehicle_service::VehicleService;
use crate::utils::jwt::Claims;
use axum::{
    extract::{Extension, Json, Path, Query, rejection::JsonRejection},
    http::{HeaderName, StatusCode, header::LOCATION},
    response::Json as ResponseJson,
};
use validator::Validate;

/// Handle vehicle creation request
#[axum::debug_handler]
pub async fn create_vehicle(
    Extension(state): Extension<AppState>,
    Extension(claims): Extension<Claims>,
    payload: Result<Json<VehicleDto>, JsonRejection>,
) -> Result<
    (
        StatusCode,
        [(HeaderName, String); 1],
        ResponseJson<ApiResponse<Vehicle>>,
    ),
    (StatusCode, String),
> {
    let Json(payload) = payload.map_err(json_rejection_to_http)?;
    tracing::info!("Creating vehicle for {} ({})", claims.email(), claims.role());

    let service = VehicleService::new(state.vehicles.as_ref());
    let vehicle = service
        .create(payload)
        .await
        .map_err(service_error_to_http)?;

    let location = format!("/vehicles/{}", vehicle.id);
    Ok((
        StatusCode::CREATED,
        [(LOCATION, location)],
        ResponseJson(ApiResponse::success(
            vehicle,
            "Vehicle created successfully",
        )),
    ))
}

/// Lists vehicles, optionally filtered by name and brand and paginated
#[axum::debug_handler]
pub async fn list_vehicles(
    Extension(state): Extension<AppState>,
    Query(query): Query<VehicleQuery>,
) -> Result<ResponseJson<ApiResponse<Vec<Vehicle>>>, (StatusCode, String)> {
    if let Err(errors) = query.validate() {
        return Err(service_error_to_http(ServiceError::validation_messages(
            validation_messages(&errors),
        )));
    }

    let (filter, pagination) = query.into_parts();
    let service = VehicleService::new(state.vehicles.as_ref());

    match service.list_page(&filter, &pagination).await {
        Ok(vehicles) => Ok(ResponseJson(ApiResponse::ok(vehicles))),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Retrieves a vehicle by its ID
#[axum::debug_handler]
pub async fn get_vehicle(
    Extension(state): Extension<AppState>,
    Path(id): Path<i64>,
) -> Result<ResponseJson<ApiResponse<Vehicle>>, (StatusCode, String)> {
    let service = VehicleService::new(state.vehicles.as_ref());

    match service.get_required(id).await {
        Ok(vehicle) => Ok(ResponseJson(ApiResponse::success(
            vehicle,
            "Vehicle retrieved successfully",
        ))),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Overwrites a vehicle's name, brand and year
#[axum::debug_handler]
pub async fn update_vehicle(
    Extension(state): Extension<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<VehicleDto>, JsonRejection>,
) -> Result<StatusCode, (StatusCode, String)> {
    let Json(payload) = payload.map_err(json_rejection_to_http)?;
    let service = VehicleService::new(state.vehicles.as_ref());

    match service.update(id, payload).await {
        Ok(_) => Ok(StatusCode::NO_CONTENT),
        Err(error) => Err(service_error_to_http(error)),
    }
}

#[axum::debug_handler]
pub async fn delete_vehicle(
    Extension(state): Extension<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, (StatusCode, String)> {
    let service = VehicleService::new(state.vehicles.as_ref());

    match service.delete(id).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(error) => Err(service_error_to_http(error)),
    }
}
