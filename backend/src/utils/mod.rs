//! Collection of general utility functions.
//!
//! Currently holds the token signing and verification helpers shared by the
//! login flow and the authentication middleware.

pub mod jwt;
