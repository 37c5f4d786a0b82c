//! Module for vehicle API endpoints.
//!
//! Handles creation, filtered listing, lookup, update and deletion of vehicles.

pub mod handlers;
pub mod models;
pub mod routes;
