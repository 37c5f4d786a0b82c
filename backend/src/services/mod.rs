//! Module for core business logic services.
//!
//! Services are built per request on top of the shared `AppState` and
//! orchestrate validation and storage for each record type.

use crate::repositories::{AccountStore, VehicleStore};
use crate::utils::jwt::JwtUtils;
use std::sync::Arc;

pub mod account_service;
pub mod validation;
pub mod vehicle_service;

/// Process-wide state handed to every handler through an `Extension` layer.
#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<dyn AccountStore>,
    pub vehicles: Arc<dyn VehicleStore>,
    pub jwt: Arc<JwtUtils>,
}

impl AppState {
    pub fn new(
        accounts: Arc<dyn AccountStore>,
        vehicles: Arc<dyn VehicleStore>,
        jwt: JwtUtils,
    ) -> Self {
        Self {
            accounts,
            vehicles,
            jwt: Arc::new(jwt),
        }
    }
}
