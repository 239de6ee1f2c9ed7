//! Mock vehicle source for isolating services in tests.

use mockall::mock;

use crate::domain::types::VehicleId;
use crate::domain::vehicle::Vehicle;
use crate::repository::errors::RepositoryResult;
use crate::repository::{VehicleFilterQuery, VehicleReader};

mock! {
    pub VehicleRepository {}

    impl VehicleReader for VehicleRepository {
        fn list_vehicles(&self) -> RepositoryResult<Vec<Vehicle>>;
        fn filter_vehicles(&self, query: &VehicleFilterQuery) -> RepositoryResult<Vec<Vehicle>>;
        fn get_vehicle_by_id(&self, id: VehicleId) -> RepositoryResult<Option<Vehicle>>;
    }
}
