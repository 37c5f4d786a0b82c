use crate::api::common::PaginationFilter;
use crate::database::models::VehicleFilter;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Query string accepted by the vehicle listing endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct VehicleQuery {
    /// Page number (1-indexed)
    #[validate(range(min = 1, message = "Page must be 1 or greater"))]
    pub page: Option<u32>,
    /// Case-insensitive substring of the vehicle name
    pub name: Option<String>,
    /// Case-insensitive substring of the vehicle brand
    pub brand: Option<String>,
}

impl VehicleQuery {
    pub fn into_parts(self) -> (VehicleFilter, PaginationFilter) {
        (
            VehicleFilter::new(self.name, self.brand),
            PaginationFilter { page: self.page },
        )
    }
}
