//! Module for account management API endpoints.
//!
//! This module handles creating, listing and retrieving accounts.

pub mod handlers;
pub mod routes;
