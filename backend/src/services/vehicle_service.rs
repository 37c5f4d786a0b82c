//! Vehicle business logic service.
//!
//! Owns vehicle records through the `VehicleStore` capability. Writes are
//! validated first; updates and deletes on an unknown id yield `NotFound`.

use crate::api::common::PaginationFilter;
use crate::database::models::{Vehicle, VehicleDto, VehicleFilter};
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::VehicleStore;
use crate::services::validation;

/// Service layer for vehicle operations.
pub struct VehicleService<'a> {
    store: &'a dyn VehicleStore,
}

impl<'a> VehicleService<'a> {
    pub fn new(store: &'a dyn VehicleStore) -> Self {
        Self { store }
    }

    pub async fn create(&self, dto: VehicleDto) -> ServiceResult<Vehicle> {
        validation::check(&dto)?;

        let vehicle = self.store.insert(dto).await?;
        tracing::info!("Vehicle {} created", vehicle.id);
        Ok(vehicle)
    }

    pub async fn find_by_id(&self, id: i64) -> ServiceResult<Option<Vehicle>> {
        Ok(self.store.find_by_id(id).await?)
    }

    /// Retrieves a vehicle by ID, returning error if not found.
    pub async fn get_required(&self, id: i64) -> ServiceResult<Vehicle> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Vehicle", id))
    }

    /// Overwrites name, brand and year of an existing vehicle.
    pub async fn update(&self, id: i64, dto: VehicleDto) -> ServiceResult<Vehicle> {
        validation::check(&dto)?;

        let mut vehicle = self.get_required(id).await?;
        vehicle.name = dto.name;
        vehicle.brand = dto.brand;
        vehicle.year = dto.year;

        // Removed between the lookup and the write
        if !self.store.update(&vehicle).await? {
            return Err(ServiceError::not_found("Vehicle", id));
        }

        tracing::info!("Vehicle {} updated", id);
        Ok(vehicle)
    }

    pub async fn delete(&self, id: i64) -> ServiceResult<()> {
        if !self.store.remove(id).await? {
            return Err(ServiceError::not_found("Vehicle", id));
        }

        tracing::info!("Vehicle {} deleted", id);
        Ok(())
    }

    /// Lists vehicles matching `filter` in insertion order, ten per page when
    /// a page is given.
    pub async fn list_page(
        &self,
        filter: &VehicleFilter,
        pagination: &PaginationFilter,
    ) -> ServiceResult<Vec<Vehicle>> {
        Ok(self.store.list_page(filter, pagination).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MemoryStore;

    fn dto(name: &str, brand: &str, year: i32) -> VehicleDto {
        VehicleDto {
            name: name.to_string(),
            brand: brand.to_string(),
            year,
        }
    }

    #[tokio::test]
    async fn test_list_without_arguments_returns_everything_in_order() {
        let store = MemoryStore::default();
        let service = VehicleService::new(&store);

        for name in ["Gol", "Uno", "Palio"] {
            service.create(dto(name, "Brand", 2010)).await.unwrap();
        }

        let vehicles = service
            .list_page(&VehicleFilter::default(), &PaginationFilter::all())
            .await
            .unwrap();
        let names: Vec<_> = vehicles.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["Gol", "Uno", "Palio"]);
    }

    #[tokio::test]
    async fn test_delete_then_lookup_and_delete_again() {
        let store = MemoryStore::default();
        let service = VehicleService::new(&store);

        let vehicle = service.create(dto("Gol", "Volkswagen", 2006)).await.unwrap();
        service.delete(vehicle.id).await.unwrap();

        assert!(service.find_by_id(vehicle.id).await.unwrap().is_none());
        assert!(matches!(
            service.delete(vehicle.id).await,
            Err(ServiceError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_update_keeps_id() {
        let store = MemoryStore::default();
        let service = VehicleService::new(&store);

        let vehicle = service.create(dto("Gol", "Volkswagen", 2006)).await.unwrap();
        service
            .update(vehicle.id, dto("Civic", "Honda", 2020))
            .await
            .unwrap();

        let fetched = service.get_required(vehicle.id).await.unwrap();
        assert_eq!(
            fetched,
            Vehicle {
                id: vehicle.id,
                name: "Civic".to_string(),
                brand: "Honda".to_string(),
                year: 2020,
            }
        );
    }

    #[tokio::test]
    async fn test_update_validates_before_lookup() {
        let store = MemoryStore::default();
        let service = VehicleService::new(&store);

        assert!(matches!(
            service.update(99, dto("Civic", "Honda", 2020)).await,
            Err(ServiceError::NotFound { .. })
        ));
        assert!(matches!(
            service.update(99, dto("Civic", "Honda", 1900)).await,
            Err(ServiceError::Validation { .. })
        ));
    }

    #[tokio::test]
    async fn test_invalid_vehicle_is_not_stored() {
        let store = MemoryStore::default();
        let service = VehicleService::new(&store);

        match service.create(dto("", "", 1949)).await {
            Err(ServiceError::Validation { messages }) => assert_eq!(messages.len(), 3),
            other => panic!("expected validation error, got {:?}", other),
        }

        let vehicles = service
            .list_page(&VehicleFilter::default(), &PaginationFilter::all())
            .await
            .unwrap();
        assert!(vehicles.is_empty());
    }

    #[tokio::test]
    async fn test_filtered_listing() {
        let store = MemoryStore::default();
        let service = VehicleService::new(&store);

        service.create(dto("Corolla", "Toyota", 2018)).await.unwrap();
        service.create(dto("Civic", "Honda", 2019)).await.unwrap();
        service.create(dto("City", "Honda", 2021)).await.unwrap();

        let filter = VehicleFilter::new(Some("CI".to_string()), Some("hon".to_string()));
        let vehicles = service
            .list_page(&filter, &PaginationFilter::page(1))
            .await
            .unwrap();
        assert_eq!(vehicles.len(), 2);
        assert_eq!(vehicles[0].name, "Civic");
        assert_eq!(vehicles[1].name, "City");
    }
}
