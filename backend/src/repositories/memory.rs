//! In-memory implementation of the store capabilities.
//!
//! Records live in insertion-ordered vectors behind a `tokio::sync::RwLock`;
//! ids come from per-table counters and are never reused, matching the
//! AUTOINCREMENT behaviour of the SQLite tables.

use crate::api::common::{PaginationFilter, apply_pagination};
use crate::database::models::{Account, NewAccount, Role, Vehicle, VehicleDto, VehicleFilter};
use crate::repositories::{AccountStore, VehicleStore};
use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;

struct Table<T> {
    rows: Vec<T>,
    last_id: i64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            last_id: 0,
        }
    }
}

impl<T> Table<T> {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }
}

#[derive(Default)]
pub struct MemoryStore {
    accounts: RwLock<Table<Account>>,
    vehicles: RwLock<Table<Vehicle>>,
}

impl MemoryStore {
    /// Store holding the same default accounts as the SQLite migration.
    pub fn seeded() -> Self {
        let mut accounts = Table::default();
        for (email, role) in [("adm@test.com", Role::Admin), ("editor@test.com", Role::Editor)] {
            let id = accounts.next_id();
            accounts.rows.push(Account {
                id,
                email: email.to_string(),
                secret: "123456".to_string(),
                role,
            });
        }

        Self {
            accounts: RwLock::new(accounts),
            vehicles: RwLock::default(),
        }
    }
}

#[async_trait]
impl AccountStore for MemoryStore {
    async fn insert(&self, account: NewAccount) -> Result<Account> {
        let mut table = self.accounts.write().await;
        let account = Account {
            id: table.next_id(),
            email: account.email,
            secret: account.secret,
            role: account.role,
        };
        table.rows.push(account.clone());
        Ok(account)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Account>> {
        let table = self.accounts.read().await;
        Ok(table.rows.iter().find(|account| account.id == id).cloned())
    }

    async fn find_by_credentials(&self, email: &str, secret: &str) -> Result<Option<Account>> {
        let table = self.accounts.read().await;
        Ok(table
            .rows
            .iter()
            .find(|account| account.email == email && account.secret == secret)
            .cloned())
    }

    async fn list_page(&self, pagination: &PaginationFilter) -> Result<Vec<Account>> {
        let table = self.accounts.read().await;
        Ok(apply_pagination(table.rows.clone(), pagination))
    }
}

#[async_trait]
impl VehicleStore for MemoryStore {
    async fn insert(&self, vehicle: VehicleDto) -> Result<Vehicle> {
        let mut table = self.vehicles.write().await;
        let vehicle = Vehicle {
            id: table.next_id(),
            name: vehicle.name,
            brand: vehicle.brand,
            year: vehicle.year,
        };
        table.rows.push(vehicle.clone());
        Ok(vehicle)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Vehicle>> {
        let table = self.vehicles.read().await;
        Ok(table.rows.iter().find(|vehicle| vehicle.id == id).cloned())
    }

    async fn list_page(
        &self,
        filter: &VehicleFilter,
        pagination: &PaginationFilter,
    ) -> Result<Vec<Vehicle>> {
        let table = self.vehicles.read().await;
        let matching: Vec<Vehicle> = table
            .rows
            .iter()
            .filter(|vehicle| filter.matches(vehicle))
            .cloned()
            .collect();
        Ok(apply_pagination(matching, pagination))
    }

    async fn update(&self, vehicle: &Vehicle) -> Result<bool> {
        let mut table = self.vehicles.write().await;
        match table.rows.iter_mut().find(|stored| stored.id == vehicle.id) {
            Some(stored) => {
                stored.name = vehicle.name.clone();
                stored.brand = vehicle.brand.clone();
                stored.year = vehicle.year;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn remove(&self, id: i64) -> Result<bool> {
        let mut table = self.vehicles.write().await;
        let before = table.rows.len();
        table.rows.retain(|vehicle| vehicle.id != id);
        Ok(table.rows.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(name: &str, brand: &str) -> VehicleDto {
        VehicleDto {
            name: name.to_string(),
            brand: brand.to_string(),
            year: 2015,
        }
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_removal() {
        let store = MemoryStore::default();
        let first = VehicleStore::insert(&store, dto("Gol", "Volkswagen")).await.unwrap();
        assert!(store.remove(first.id).await.unwrap());

        let second = VehicleStore::insert(&store, dto("Uno", "Fiat")).await.unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn test_seeded_store_matches_migration() {
        let store = MemoryStore::seeded();

        let accounts = AccountStore::list_page(&store, &PaginationFilter::all())
            .await
            .unwrap();
        assert_eq!(accounts.len(), 2);
        assert_eq!(accounts[0].role, Role::Admin);

        let created = AccountStore::insert(
            &store,
            NewAccount {
                email: "third@test.com".to_string(),
                secret: "12345678".to_string(),
                role: Role::Editor,
            },
        )
        .await
        .unwrap();
        assert_eq!(created.id, 3);
    }

    #[tokio::test]
    async fn test_filters_fold_non_ascii_case() {
        let store = MemoryStore::default();
        VehicleStore::insert(&store, dto("ÉLAN", "Citroën")).await.unwrap();
        VehicleStore::insert(&store, dto("Elan", "Lotus")).await.unwrap();

        let filter = VehicleFilter::new(Some("élan".to_string()), None);
        let found = VehicleStore::list_page(&store, &filter, &PaginationFilter::all())
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "ÉLAN");
    }

    #[tokio::test]
    async fn test_filtered_listing_paginates_matches_only() {
        let store = MemoryStore::default();
        for i in 0..11 {
            VehicleStore::insert(&store, dto(&format!("Onix {}", i), "Chevrolet"))
                .await
                .unwrap();
            VehicleStore::insert(&store, dto(&format!("Ka {}", i), "Ford"))
                .await
                .unwrap();
        }

        let filter = VehicleFilter::new(None, Some("chev".to_string()));
        let first = VehicleStore::list_page(&store, &filter, &PaginationFilter::page(1))
            .await
            .unwrap();
        let second = VehicleStore::list_page(&store, &filter, &PaginationFilter::page(2))
            .await
            .unwrap();

        assert_eq!(first.len(), 10);
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].name, "Onix 10");
        assert!(first.iter().all(|vehicle| vehicle.brand == "Chevrolet"));
    }
}
