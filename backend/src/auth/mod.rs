//! Authentication module for login, token validation and access control.
//!
//! This module provides the login flow and the middleware that authenticates
//! bearer tokens and enforces the per-route role sets.

pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod service;
