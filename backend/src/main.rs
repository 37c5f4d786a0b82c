//! Main entry point for the fleet backend.
//!
//! This file initializes the Axum web server, sets up the database connection
//! and stores, and registers all API routes and middleware.

mod api;
mod auth;
mod config;
mod database;
mod errors;
mod repositories;
mod services;
mod utils;

use crate::api::common::ApiResponse;
use crate::repositories::{AccountRepository, MemoryStore, VehicleRepository};
use crate::services::AppState;
use crate::utils::jwt::JwtUtils;
use axum::{Extension, Router, response::Json, routing::get};
use config::{Config, StoreBackend};
use database::Database;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::fmt::init;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init();

    let config = Config::from_env()?;
    let jwt = JwtUtils::from_config(&config);

    let (state, db) = match config.store_backend {
        StoreBackend::Sqlite => {
            let db = Database::new(&config).await?;
            let state = AppState::new(
                Arc::new(AccountRepository::new(db.pool().clone())),
                Arc::new(VehicleRepository::new(db.pool().clone())),
                jwt,
            );
            (state, Some(db))
        }
        StoreBackend::Memory => {
            info!("Using in-memory storage; records are lost on shutdown");
            let store = Arc::new(MemoryStore::seeded());
            (AppState::new(store.clone(), store, jwt), None)
        }
    };

    let app = app_router(state);

    let bind_address = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;

    info!("Starting fleet server on port {}", config.server_port);
    axum::serve(listener, app).await?;

    if let Some(db) = db {
        db.close().await;
    }
    Ok(())
}

/// Assembles every route with the shared state attached.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .nest(
            "/accounts",
            auth::routes::auth_router().merge(api::account::routes::account_router()),
        )
        .nest("/vehicles", api::vehicle::routes::vehicle_router())
        .layer(Extension(state))
}

async fn root_handler() -> Json<ApiResponse<serde_json::Value>> {
    Json(ApiResponse::success(
        serde_json::json!({
            "service": "Fleet Backend",
            "version": env!("CARGO_PKG_VERSION")
        }),
        "Welcome to the fleet API",
    ))
}
