//! Pure derivations behind the vehicle listing.
//!
//! Nothing here performs I/O or keeps state: the displayed result set and the
//! manufacturer options are recomputed from their inputs every time the view
//! renders.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::domain::filter::FilterCriteria;
use crate::domain::vehicle::Vehicle;

/// Which candidate source produced a [`ResultSet`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultSource {
    /// In-memory substring match over the full catalog.
    Search,
    /// Last successful response of the filter endpoint.
    ServerFilter,
    /// The unfiltered catalog.
    Catalog,
}

/// Vehicles eligible for display before pagination.
#[derive(Clone, Debug)]
pub struct ResultSet<'a> {
    pub source: ResultSource,
    pub vehicles: Vec<&'a Vehicle>,
}

impl ResultSet<'_> {
    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }
}

/// Returns every catalog vehicle whose searchable fields contain `needle`.
///
/// `needle` must already be normalized, see [`FilterCriteria::search_term`].
pub fn search_catalog<'a>(catalog: &'a [Vehicle], needle: &str) -> Vec<&'a Vehicle> {
    catalog
        .iter()
        .filter(|vehicle| vehicle.matches_search(needle))
        .collect()
}

/// Picks the vehicles to paginate by fixed precedence:
/// search, then the server-filtered result, then the full catalog.
///
/// A catalog that has not arrived yet is treated as empty.
pub fn select_result_set<'a>(
    catalog: Option<&'a [Vehicle]>,
    server_filtered: Option<&'a [Vehicle]>,
    criteria: &FilterCriteria,
) -> ResultSet<'a> {
    let catalog = catalog.unwrap_or_default();

    if let Some(needle) = criteria.search_term() {
        return ResultSet {
            source: ResultSource::Search,
            vehicles: search_catalog(catalog, &needle),
        };
    }

    match server_filtered {
        Some(filtered) => ResultSet {
            source: ResultSource::ServerFilter,
            vehicles: filtered.iter().collect(),
        },
        None => ResultSet {
            source: ResultSource::Catalog,
            vehicles: catalog.iter().collect(),
        },
    }
}

/// Distinct manufacturer names of the catalog in ascending order.
///
/// Names are kept verbatim so a selected option matches the backend's
/// exact-match filter.
pub fn manufacturer_options(catalog: &[Vehicle]) -> Vec<String> {
    catalog
        .iter()
        .filter_map(Vehicle::manufacturer)
        .filter(|name| !name.trim().is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{DailyRate, VehicleId};
    use crate::domain::vehicle::VehicleSpec;

    fn vehicle(id: i32, manufacturer: &str, model: &str) -> Vehicle {
        Vehicle::new(
            VehicleId::new(id).expect("valid id"),
            VehicleSpec::new(manufacturer, model),
            DailyRate::new(50.0).expect("valid rate"),
        )
    }

    fn searching(query: &str) -> FilterCriteria {
        FilterCriteria {
            search_query: query.to_string(),
            ..FilterCriteria::default()
        }
    }

    fn ids(set: &ResultSet<'_>) -> Vec<i32> {
        set.vehicles.iter().map(|v| v.vehicle_id.get()).collect()
    }

    #[test]
    fn search_takes_precedence_over_server_filter() {
        let catalog = vec![vehicle(1, "Toyota", "Yaris"), vehicle(2, "BMW", "X5")];
        let filtered = vec![vehicle(2, "BMW", "X5")];

        let set = select_result_set(
            Some(catalog.as_slice()),
            Some(filtered.as_slice()),
            &searching("YARIS "),
        );

        assert_eq!(set.source, ResultSource::Search);
        assert_eq!(ids(&set), vec![1]);
    }

    #[test]
    fn server_filter_is_returned_verbatim_without_search() {
        let catalog = vec![vehicle(1, "Toyota", "Yaris"), vehicle(2, "BMW", "X5")];
        let filtered = vec![vehicle(2, "BMW", "X5"), vehicle(1, "Toyota", "Yaris")];

        let set = select_result_set(
            Some(catalog.as_slice()),
            Some(filtered.as_slice()),
            &FilterCriteria::default(),
        );

        assert_eq!(set.source, ResultSource::ServerFilter);
        assert_eq!(ids(&set), vec![2, 1]);
    }

    #[test]
    fn falls_back_to_catalog_in_order() {
        let catalog = vec![vehicle(3, "Kia", "Rio"), vehicle(1, "Audi", "A3")];

        let set = select_result_set(Some(catalog.as_slice()), None, &searching("  "));

        assert_eq!(set.source, ResultSource::Catalog);
        assert_eq!(ids(&set), vec![3, 1]);
    }

    #[test]
    fn empty_server_result_is_not_replaced_by_catalog() {
        let catalog = vec![vehicle(1, "Toyota", "Yaris")];
        let filtered: Vec<Vehicle> = Vec::new();

        let set = select_result_set(
            Some(catalog.as_slice()),
            Some(filtered.as_slice()),
            &FilterCriteria::default(),
        );

        assert_eq!(set.source, ResultSource::ServerFilter);
        assert!(set.is_empty());
    }

    #[test]
    fn absent_catalog_degrades_to_empty_set() {
        let set = select_result_set(None, None, &searching("toyota"));
        assert!(set.is_empty());

        let set = select_result_set(None, None, &FilterCriteria::default());
        assert!(set.is_empty());
    }

    #[test]
    fn manufacturer_options_are_deduplicated_and_sorted() {
        let mut headless = vehicle(5, "ignored", "ignored");
        headless.vehicle_spec = None;
        let catalog = vec![
            vehicle(1, "Toyota", "Yaris"),
            vehicle(2, "Honda", "Civic"),
            vehicle(3, "Toyota", "Camry"),
            vehicle(4, "BMW", "X5"),
            headless,
        ];

        assert_eq!(manufacturer_options(&catalog), vec!["BMW", "Honda", "Toyota"]);
        assert!(manufacturer_options(&[]).is_empty());
    }

    #[test]
    fn manufacturer_options_keep_raw_names() {
        let catalog = vec![
            vehicle(1, "Toyota ", "Yaris"),
            vehicle(2, "Toyota", "Camry"),
            vehicle(3, " ", "Unknown"),
        ];

        assert_eq!(manufacturer_options(&catalog), vec!["Toyota", "Toyota "]);
    }
}
