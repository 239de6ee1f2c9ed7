use crate::domain::types::VehicleId;
use crate::dto::vehicle::VehicleDetailData;
use crate::repository::VehicleReader;
use crate::services::{ServiceError, ServiceResult};

/// Loads the detail view of a single vehicle linked from a listing card.
pub fn load_vehicle_detail<R>(repo: &R, vehicle_id: i32) -> ServiceResult<VehicleDetailData>
where
    R: VehicleReader + ?Sized,
{
    let vehicle_id = VehicleId::new(vehicle_id)?;

    let vehicle = repo
        .get_vehicle_by_id(vehicle_id)
        .map_err(|err| {
            log::error!("Failed to load vehicle {vehicle_id}: {err}");
            err
        })?
        .ok_or(ServiceError::NotFound)?;

    Ok(VehicleDetailData::from(&vehicle))
}
