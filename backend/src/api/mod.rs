//! Central module for organizing the application's API endpoints.
//!
//! This module acts as a top-level container for the account and vehicle
//! domains; the login route lives in `auth` and is merged under `/accounts`.

pub mod account;
pub mod common;
pub mod vehicle;

#[cfg(test)]
mod tests;
