use serde::Serialize;

use crate::domain::filter::{FilterCriteria, SortOrder};
use crate::domain::types::VehicleId;
use crate::domain::vehicle::Vehicle;
use crate::repository::errors::RepositoryResult;

pub mod cached;
pub mod errors;
#[cfg(feature = "client")]
pub mod http;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;

pub use cached::{CacheStats, CachedVehicleReader};
#[cfg(feature = "client")]
pub use http::{HttpVehicleRepository, RequestContext};

/// Parameters of the `vehicles/filter` endpoint.
///
/// Absent values are left out of the request and the backend applies its own
/// defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleFilterQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_daily_price: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortOrder>,
}

impl VehicleFilterQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn manufacturer(mut self, manufacturer: impl Into<String>) -> Self {
        self.manufacturer = Some(manufacturer.into());
        self
    }

    pub fn max_daily_price(mut self, price: u32) -> Self {
        self.max_daily_price = Some(price);
        self
    }

    pub fn sort(mut self, sort: SortOrder) -> Self {
        self.sort = Some(sort);
        self
    }
}

impl From<&FilterCriteria> for VehicleFilterQuery {
    /// Empty manufacturer and the "$1000+" price ceiling are omitted; the
    /// sort order is always sent.
    fn from(criteria: &FilterCriteria) -> Self {
        let mut query = VehicleFilterQuery::new().sort(criteria.sort);

        if let Some(manufacturer) = criteria.manufacturer_filter() {
            query = query.manufacturer(manufacturer);
        }

        if !criteria.max_daily_price.is_ceiling() {
            query = query.max_daily_price(criteria.max_daily_price.get());
        }

        query
    }
}

/// Decodes a JSON array of vehicles record by record.
///
/// A record that does not decode (missing id, null or non-positive rate, ...)
/// is skipped with a warning so the rest of the list still shows. A body that
/// is not an array at all is an [`errors::RepositoryError::DecodeError`].
pub fn decode_vehicle_list(body: &str) -> RepositoryResult<Vec<Vehicle>> {
    let records: Vec<serde_json::Value> = serde_json::from_str(body)?;
    let total = records.len();

    let vehicles: Vec<Vehicle> = records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match serde_json::from_value(record) {
            Ok(vehicle) => Some(vehicle),
            Err(err) => {
                log::warn!("Skipping malformed vehicle record #{index}: {err}");
                None
            }
        })
        .collect();

    if vehicles.len() < total {
        log::warn!("Decoded {} of {} vehicle records", vehicles.len(), total);
    }

    Ok(vehicles)
}

/// Read access to the backend's vehicle catalog.
pub trait VehicleReader {
    /// Full, unfiltered catalog (`GET vehicles`).
    fn list_vehicles(&self) -> RepositoryResult<Vec<Vehicle>>;
    /// Server-filtered and sorted subset (`GET vehicles/filter`).
    fn filter_vehicles(&self, query: &VehicleFilterQuery) -> RepositoryResult<Vec<Vehicle>>;
    fn get_vehicle_by_id(&self, id: VehicleId) -> RepositoryResult<Option<Vehicle>>;
}
