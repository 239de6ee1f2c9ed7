//! Listing, search, filtering and pagination engine of the vehicle rental
//! platform's discovery view.
//!
//! The `data` feature provides the engine itself; the `client` feature adds
//! an HTTP-backed vehicle source and the command-line front end.

pub mod domain;
pub mod dto;
pub mod error_conversions;
pub mod forms;
#[cfg(feature = "client")]
pub mod models;
pub mod pagination;
pub mod repository;
pub mod services;

#[cfg(feature = "client")]
pub use client::{build_repository, run_detail, run_listing};

#[cfg(feature = "client")]
mod client {
    use crate::domain::filter::FilterCriteria;
    use crate::dto::listing::ListingPageData;
    use crate::dto::vehicle::VehicleDetailData;
    use crate::forms::filters::FilterForm;
    use crate::models::config::ClientConfig;
    use crate::repository::{CachedVehicleReader, HttpVehicleRepository, RequestContext};
    use crate::services::discovery::{DiscoveryView, mount, submit_search};
    use crate::services::vehicle::load_vehicle_detail;
    use crate::services::{ServiceError, ServiceResult};

    /// Builds the cached HTTP vehicle source described by `config`.
    pub fn build_repository(
        config: &ClientConfig,
    ) -> ServiceResult<CachedVehicleReader<HttpVehicleRepository>> {
        let repo = HttpVehicleRepository::new(RequestContext::from(config)).map_err(|e| {
            ServiceError::Config(format!("Failed to build http client: {e}"))
        })?;
        Ok(CachedVehicleReader::new(repo, config.cache_capacity))
    }

    /// Mounts the discovery view, applies the submitted controls and renders
    /// the requested page.
    pub fn run_listing(config: &ClientConfig, form: &FilterForm) -> ServiceResult<ListingPageData> {
        let criteria = form.to_criteria().map_err(|err| {
            log::error!("Failed to validate filter form: {err}");
            err
        })?;

        let repo = build_repository(config)?;
        let mut view = DiscoveryView::new();
        mount(&repo, &mut view);

        if criteria != FilterCriteria::default() {
            view.set_criteria(criteria);
            submit_search(&repo, &mut view);
        }

        if let Some(page) = form.page {
            view.go_to_page(page);
        }

        Ok(view.render())
    }

    /// Loads a single vehicle for the detail view.
    pub fn run_detail(config: &ClientConfig, vehicle_id: i32) -> ServiceResult<VehicleDetailData> {
        let repo = build_repository(config)?;
        load_vehicle_detail(&repo, vehicle_id)
    }
}
