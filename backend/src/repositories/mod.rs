//! Persistence capabilities for accounts and vehicles.
//!
//! Services talk to storage only through the `AccountStore` and
//! `VehicleStore` traits, so authentication and authorization logic stays
//! independent of where records live. Two implementations exist: the SQLite
//! repositories and the seeded `MemoryStore`, selected with `STORE_BACKEND`.

use crate::api::common::PaginationFilter;
use crate::database::models::{Account, NewAccount, Vehicle, VehicleDto, VehicleFilter};
use anyhow::Result;
use async_trait::async_trait;

pub mod account_repository;
pub mod memory;
pub mod vehicle_repository;

pub use account_repository::AccountRepository;
pub use memory::MemoryStore;
pub use vehicle_repository::VehicleRepository;

/// Storage for account records, ordered by insertion.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Persists an account and returns it with its assigned id.
    async fn insert(&self, account: NewAccount) -> Result<Account>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Account>>;
    /// Exact match on both email and secret.
    async fn find_by_credentials(&self, email: &str, secret: &str) -> Result<Option<Account>>;
    async fn list_page(&self, pagination: &PaginationFilter) -> Result<Vec<Account>>;
}

/// Storage for vehicle records, ordered by insertion.
#[async_trait]
pub trait VehicleStore: Send + Sync {
    /// Persists a vehicle and returns it with its assigned id.
    async fn insert(&self, vehicle: VehicleDto) -> Result<Vehicle>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Vehicle>>;
    /// Filters first, then paginates the matching records.
    async fn list_page(
        &self,
        filter: &VehicleFilter,
        pagination: &PaginationFilter,
    ) -> Result<Vec<Vehicle>>;
    /// Overwrites name, brand and year. Returns `false` when no record has the id.
    async fn update(&self, vehicle: &Vehicle) -> Result<bool>;
    /// Returns `false` when no record has the id.
    async fn remove(&self, id: i64) -> Result<bool>;
}
