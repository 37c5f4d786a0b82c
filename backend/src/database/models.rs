//! Rust structs that represent database table mappings.
//!
//! These models define the structure of data as it is stored in and retrieved
//! from the database, plus the request DTOs whose declarative constraints form
//! the transport-schema boundary. Note that these may differ from the
//! API-specific views.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use validator::{Validate, ValidationError};

/// Permission tier of an account. Persisted and carried in tokens by name.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "TEXT")] // Store as TEXT in SQLite
pub enum Role {
    Admin,
    Editor,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Editor => "Editor",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim() {
            "Admin" => Ok(Role::Admin),
            "Editor" => Ok(Role::Editor),
            _ => Err(format!("Invalid role: {}", input)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Account {
    pub id: i64,
    pub email: String,
    /// Stored and compared as given; no hashing contract exists for it.
    pub secret: String,
    pub role: Role,
}

/// Account data ready to be persisted; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub email: String,
    pub secret: String,
    pub role: Role,
}

/// Account creation payload.
///
/// Missing fields deserialize to empty values so that the validation layer,
/// rather than the JSON extractor, reports them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct AccountDto {
    #[serde(default)]
    #[validate(
        email(message = "Must be a valid email"),
        length(max = 255, message = "Email too long")
    )]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 8, max = 50, message = "Secret must be between 8-50 characters"))]
    pub secret: String,

    #[serde(default)]
    #[validate(custom(function = "validate_role"))]
    pub role: String,
}

fn validate_role(role: &str) -> Result<(), ValidationError> {
    role.parse::<Role>().map(|_| ()).map_err(|_| {
        let mut error = ValidationError::new("role");
        error.message = Some("Role must be either 'Admin' or 'Editor'".into());
        error
    })
}

/// Projection of an account that is safe to return to clients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccountView {
    pub id: i64,
    pub email: String,
    pub role: Role,
}

impl From<Account> for AccountView {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            email: account.email,
            role: account.role,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    pub id: i64,
    pub name: String,
    pub brand: String,
    pub year: i32,
}

/// Vehicle creation and update payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct VehicleDto {
    #[serde(default)]
    #[validate(length(min = 1, max = 150, message = "Name must be between 1-150 characters"))]
    pub name: String,

    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "Brand must be between 1-100 characters"))]
    pub brand: String,

    #[serde(default)]
    pub year: i32,
}

/// Case-insensitive substring filters applied before pagination.
#[derive(Debug, Clone, Default)]
pub struct VehicleFilter {
    pub name: Option<String>,
    pub brand: Option<String>,
}

impl VehicleFilter {
    pub fn new(name: Option<String>, brand: Option<String>) -> Self {
        // Empty strings mean "no filter"
        Self {
            name: name.filter(|value| !value.is_empty()),
            brand: brand.filter(|value| !value.is_empty()),
        }
    }

    /// Whether a vehicle passes every filter that is set.
    pub fn matches(&self, vehicle: &Vehicle) -> bool {
        fn contains(haystack: &str, needle: &Option<String>) -> bool {
            needle
                .as_ref()
                .is_none_or(|needle| haystack.to_lowercase().contains(&needle.to_lowercase()))
        }

        contains(&vehicle.name, &self.name) && contains(&vehicle.brand, &self.brand)
    }
}
