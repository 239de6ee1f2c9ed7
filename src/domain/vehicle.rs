use serde::{Deserialize, Serialize};

use crate::domain::types::{DailyRate, VehicleId, VehicleSpecId};

/// Make/model description shared by every vehicle of the same kind.
///
/// Every field is optional on the wire; a missing field never matches a
/// search and is rendered as "N/A".
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VehicleSpec {
    pub vehicle_spec_id: Option<VehicleSpecId>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub seating_capacity: Option<u32>,
    pub fuel_type: Option<String>,
    pub transmission: Option<String>,
}

impl VehicleSpec {
    #[must_use]
    pub fn new(manufacturer: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            manufacturer: Some(manufacturer.into()),
            model: Some(model.into()),
            ..Self::default()
        }
    }
}

/// Read-only snapshot of a rentable vehicle as returned by the backend.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub vehicle_id: VehicleId,
    pub vehicle_spec: Option<VehicleSpec>,
    pub rental_rate: DailyRate,
    #[serde(default)]
    pub availability: bool,
    pub color: Option<String>,
    pub image_url: Option<String>,
    pub description: Option<String>,
}

impl Vehicle {
    #[must_use]
    pub fn new(vehicle_id: VehicleId, vehicle_spec: VehicleSpec, rental_rate: DailyRate) -> Self {
        Self {
            vehicle_id,
            vehicle_spec: Some(vehicle_spec),
            rental_rate,
            availability: true,
            color: None,
            image_url: None,
            description: None,
        }
    }

    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    #[must_use]
    pub fn with_availability(mut self, availability: bool) -> Self {
        self.availability = availability;
        self
    }

    fn spec_field(&self, field: impl Fn(&VehicleSpec) -> Option<&String>) -> Option<&str> {
        self.vehicle_spec
            .as_ref()
            .and_then(field)
            .map(String::as_str)
    }

    pub fn manufacturer(&self) -> Option<&str> {
        self.spec_field(|spec| spec.manufacturer.as_ref())
    }

    pub fn model(&self) -> Option<&str> {
        self.spec_field(|spec| spec.model.as_ref())
    }

    pub fn fuel_type(&self) -> Option<&str> {
        self.spec_field(|spec| spec.fuel_type.as_ref())
    }

    pub fn transmission(&self) -> Option<&str> {
        self.spec_field(|spec| spec.transmission.as_ref())
    }

    pub fn year(&self) -> Option<i32> {
        self.vehicle_spec.as_ref().and_then(|spec| spec.year)
    }

    pub fn seating_capacity(&self) -> Option<u32> {
        self.vehicle_spec
            .as_ref()
            .and_then(|spec| spec.seating_capacity)
    }

    /// Checks whether `needle` occurs in any searchable text field.
    ///
    /// `needle` must already be lower-cased; the vehicle's fields are
    /// lower-cased here. Absent fields are skipped.
    pub fn matches_search(&self, needle: &str) -> bool {
        [
            self.manufacturer(),
            self.model(),
            self.fuel_type(),
            self.transmission(),
            self.color.as_deref(),
        ]
        .into_iter()
        .flatten()
        .any(|value| value.to_lowercase().contains(needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corolla() -> Vehicle {
        let spec = VehicleSpec {
            fuel_type: Some("Petrol".to_string()),
            transmission: Some("Automatic".to_string()),
            ..VehicleSpec::new("Toyota", "Corolla")
        };
        Vehicle::new(
            VehicleId::new(1).expect("valid id"),
            spec,
            DailyRate::new(40.0).expect("valid rate"),
        )
        .with_color("Midnight Blue")
    }

    #[test]
    fn matches_any_searchable_field_case_insensitively() {
        let vehicle = corolla();

        assert!(vehicle.matches_search("toyota"));
        assert!(vehicle.matches_search("roll"));
        assert!(vehicle.matches_search("petrol"));
        assert!(vehicle.matches_search("auto"));
        assert!(vehicle.matches_search("blue"));
        assert!(!vehicle.matches_search("diesel"));
    }

    #[test]
    fn missing_spec_never_matches_and_never_panics() {
        let mut vehicle = corolla();
        vehicle.vehicle_spec = None;
        vehicle.color = None;

        assert!(!vehicle.matches_search("toyota"));
        assert_eq!(vehicle.manufacturer(), None);
        assert_eq!(vehicle.year(), None);
    }

    #[test]
    fn deserializes_backend_payload_with_partial_fields() {
        let payload = r#"{
            "vehicleId": 3,
            "vehicleSpec": {"vehicleSpecId": 9, "manufacturer": "Honda", "year": 2021},
            "rentalRate": "55.00",
            "availability": true,
            "imageUrl": "https://cdn.example.com/civic.jpg"
        }"#;

        let vehicle: Vehicle = serde_json::from_str(payload).expect("valid payload");

        assert_eq!(vehicle.vehicle_id.get(), 3);
        assert_eq!(vehicle.manufacturer(), Some("Honda"));
        assert_eq!(vehicle.model(), None);
        assert_eq!(vehicle.year(), Some(2021));
        assert_eq!(vehicle.rental_rate.get(), 55.0);
        assert_eq!(vehicle.color, None);
    }

    #[test]
    fn missing_availability_defaults_to_unavailable() {
        let payload = r#"{"vehicleId": 4, "vehicleSpec": null, "rentalRate": 10}"#;

        let vehicle: Vehicle = serde_json::from_str(payload).expect("valid payload");

        assert!(!vehicle.availability);
        assert!(vehicle.vehicle_spec.is_none());
    }
}
