//! Display-ready projections of a vehicle.

use serde::Serialize;

use crate::domain::types::VehicleId;
use crate::domain::vehicle::Vehicle;

/// Placeholder shown for any missing vehicle attribute.
pub const NOT_AVAILABLE: &str = "N/A";
/// Image used when a vehicle has none.
pub const DEFAULT_IMAGE_URL: &str = "/default-car.jpg";

fn or_not_available(value: Option<&str>) -> String {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(NOT_AVAILABLE)
        .to_string()
}

/// Route of the detail/booking view of a vehicle.
pub fn detail_path(vehicle_id: VehicleId) -> String {
    format!("/vehicles/{vehicle_id}")
}

/// One card of the listing grid.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct VehicleCard {
    pub vehicle_id: VehicleId,
    pub title: String,
    pub year: String,
    pub seats: String,
    pub fuel_type: String,
    pub transmission: String,
    pub color: String,
    pub price_label: String,
    pub available: bool,
    pub availability_label: &'static str,
    pub image_url: String,
    pub detail_path: String,
}

impl From<&Vehicle> for VehicleCard {
    fn from(vehicle: &Vehicle) -> Self {
        let title = match (vehicle.manufacturer(), vehicle.model()) {
            (None, None) => NOT_AVAILABLE.to_string(),
            (manufacturer, model) => [manufacturer, model]
                .into_iter()
                .flatten()
                .collect::<Vec<_>>()
                .join(" "),
        };

        Self {
            vehicle_id: vehicle.vehicle_id,
            title,
            year: vehicle
                .year()
                .map_or_else(|| NOT_AVAILABLE.to_string(), |year| year.to_string()),
            seats: vehicle.seating_capacity().map_or_else(
                || NOT_AVAILABLE.to_string(),
                |seats| format!("{seats} Seats"),
            ),
            fuel_type: or_not_available(vehicle.fuel_type()),
            transmission: or_not_available(vehicle.transmission()),
            color: or_not_available(vehicle.color.as_deref()),
            price_label: format!("${}/day", vehicle.rental_rate),
            available: vehicle.availability,
            availability_label: if vehicle.availability {
                "Available"
            } else {
                "Booked"
            },
            image_url: vehicle
                .image_url
                .as_deref()
                .map(str::trim)
                .filter(|url| !url.is_empty())
                .unwrap_or(DEFAULT_IMAGE_URL)
                .to_string(),
            detail_path: detail_path(vehicle.vehicle_id),
        }
    }
}

/// Data required to render a single vehicle's detail view.
#[derive(Debug, Clone, Serialize)]
pub struct VehicleDetailData {
    pub card: VehicleCard,
    /// Description with any markup sanitized.
    pub description: Option<String>,
}

impl From<&Vehicle> for VehicleDetailData {
    fn from(vehicle: &Vehicle) -> Self {
        let description = vehicle
            .description
            .as_deref()
            .map(|text| ammonia::clean(text.trim()))
            .filter(|text| !text.is_empty());

        Self {
            card: VehicleCard::from(vehicle),
            description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::DailyRate;
    use crate::domain::vehicle::VehicleSpec;

    fn civic() -> Vehicle {
        let spec = VehicleSpec {
            year: Some(2022),
            seating_capacity: Some(5),
            fuel_type: Some("Hybrid".to_string()),
            transmission: Some("CVT".to_string()),
            ..VehicleSpec::new("Honda", "Civic")
        };
        Vehicle::new(
            VehicleId::new(11).expect("valid id"),
            spec,
            DailyRate::new(62.5).expect("valid rate"),
        )
    }

    #[test]
    fn card_renders_every_attribute() {
        let card = VehicleCard::from(&civic().with_color("Red"));

        assert_eq!(card.title, "Honda Civic");
        assert_eq!(card.year, "2022");
        assert_eq!(card.seats, "5 Seats");
        assert_eq!(card.fuel_type, "Hybrid");
        assert_eq!(card.transmission, "CVT");
        assert_eq!(card.color, "Red");
        assert_eq!(card.price_label, "$62.50/day");
        assert_eq!(card.availability_label, "Available");
        assert_eq!(card.image_url, DEFAULT_IMAGE_URL);
        assert_eq!(card.detail_path, "/vehicles/11");
    }

    #[test]
    fn missing_fields_render_as_not_available() {
        let mut vehicle = civic().with_availability(false);
        vehicle.vehicle_spec = None;

        let card = VehicleCard::from(&vehicle);

        assert_eq!(card.title, NOT_AVAILABLE);
        assert_eq!(card.year, NOT_AVAILABLE);
        assert_eq!(card.seats, NOT_AVAILABLE);
        assert_eq!(card.color, NOT_AVAILABLE);
        assert_eq!(card.availability_label, "Booked");
    }

    #[test]
    fn detail_description_is_sanitized() {
        let mut vehicle = civic();
        vehicle.description = Some("Roomy <script>alert(1)</script><b>boot</b>".to_string());

        let detail = VehicleDetailData::from(&vehicle);

        assert_eq!(detail.description.as_deref(), Some("Roomy <b>boot</b>"));
    }
}
