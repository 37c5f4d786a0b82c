//! Database repository for vehicle operations.
//!
//! SQLite-backed `VehicleStore`. Unfiltered listings page in SQL; filtered
//! listings are matched with `VehicleFilter::matches` and paged afterwards.

use crate::api::common::{PaginationFilter, apply_pagination};
use crate::database::models::{Vehicle, VehicleDto, VehicleFilter};
use crate::repositories::VehicleStore;
use anyhow::Result;
use async_trait::async_trait;
use sqlx::SqlitePool;

/// Repository for vehicle database operations.
#[derive(Clone)]
pub struct VehicleRepository {
    /// Shared SQLite connection pool
    pool: SqlitePool,
}

impl VehicleRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VehicleStore for VehicleRepository {
    async fn insert(&self, vehicle: VehicleDto) -> Result<Vehicle> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (name, brand, year)
            VALUES (?, ?, ?)
            RETURNING id, name, brand, year
            "#,
        )
        .bind(vehicle.name)
        .bind(vehicle.brand)
        .bind(vehicle.year)
        .fetch_one(&self.pool)
        .await?;

        Ok(vehicle)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Vehicle>> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            "SELECT id, name, brand, year FROM vehicles WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(vehicle)
    }

    async fn list_page(
        &self,
        filter: &VehicleFilter,
        pagination: &PaginationFilter,
    ) -> Result<Vec<Vehicle>> {
        if filter.name.is_none() && filter.brand.is_none() {
            let vehicles = match (pagination.limit(), pagination.offset()) {
                (Some(limit), Some(offset)) => {
                    sqlx::query_as::<_, Vehicle>(
                        "SELECT id, name, brand, year FROM vehicles ORDER BY id LIMIT ? OFFSET ?",
                    )
                    .bind(limit as i64)
                    .bind(offset as i64)
                    .fetch_all(&self.pool)
                    .await?
                }
                _ => {
                    sqlx::query_as::<_, Vehicle>(
                        "SELECT id, name, brand, year FROM vehicles ORDER BY id",
                    )
                    .fetch_all(&self.pool)
                    .await?
                }
            };
            return Ok(vehicles);
        }

        // SQLite's LOWER() only folds ASCII, so matching happens here
        let vehicles = sqlx::query_as::<_, Vehicle>(
            "SELECT id, name, brand, year FROM vehicles ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        let matching = vehicles
            .into_iter()
            .filter(|vehicle| filter.matches(vehicle))
            .collect();
        Ok(apply_pagination(matching, pagination))
    }

    async fn update(&self, vehicle: &Vehicle) -> Result<bool> {
        let rows_affected = sqlx::query(
            r#"
            UPDATE vehicles
            SET name = ?, brand = ?, year = ?
            WHERE id = ?
            "#,
        )
        .bind(&vehicle.name)
        .bind(&vehicle.brand)
        .bind(vehicle.year)
        .bind(vehicle.id)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(rows_affected > 0)
    }

    async fn remove(&self, id: i64) -> Result<bool> {
        let rows_affected = sqlx::query("DELETE FROM vehicles WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows_affected > 0)
    }
}
