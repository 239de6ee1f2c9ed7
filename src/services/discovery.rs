//! State of the vehicle discovery view and the drivers that feed it.
//!
//! [`DiscoveryView`] never performs I/O. Fetches are described by the
//! requests it hands out and their outcomes are delivered back through
//! [`DiscoveryView::catalog_loaded`] and [`DiscoveryView::filter_loaded`].
//! The free functions at the bottom of this module run those fetches against
//! a [`VehicleReader`].

use std::thread;

use crate::domain::filter::{FilterCriteria, SortOrder};
use crate::domain::listing::{ResultSet, manufacturer_options, select_result_set};
use crate::domain::types::MaxDailyPrice;
use crate::domain::vehicle::Vehicle;
use crate::dto::listing::{
    HINT_ADJUST_FILTERS, HINT_EMPTY_CATALOG, ListingPageData, Notice, SortOption, ViewState,
};
use crate::dto::vehicle::VehicleCard;
use crate::pagination::{PAGE_SIZE, Pager, Paginated, total_pages, visible_page};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{VehicleFilterQuery, VehicleReader};

pub const CLIENT_SIDE_SEARCH_NOTICE: &str = "Using client-side search";

/// Identifies one issued filter request; only the latest one is honoured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterTicket(u64);

/// A filter fetch the caller should run and report back.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterRequest {
    pub ticket: FilterTicket,
    pub query: VehicleFilterQuery,
}

#[derive(Debug)]
enum CatalogState {
    Loading,
    Loaded(Vec<Vehicle>),
    Failed(String),
}

#[derive(Debug)]
pub struct DiscoveryView {
    catalog: CatalogState,
    server_filtered: Option<Vec<Vehicle>>,
    pending_filter: Option<FilterTicket>,
    issued_filters: u64,
    criteria: FilterCriteria,
    pager: Pager,
    notices: Vec<Notice>,
}

impl Default for DiscoveryView {
    fn default() -> Self {
        Self::new()
    }
}

impl DiscoveryView {
    pub fn new() -> Self {
        Self {
            catalog: CatalogState::Loading,
            server_filtered: None,
            pending_filter: None,
            issued_filters: 0,
            criteria: FilterCriteria::default(),
            pager: Pager::default(),
            notices: Vec::new(),
        }
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn page(&self) -> usize {
        self.pager.page()
    }

    pub fn is_updating(&self) -> bool {
        self.pending_filter.is_some()
    }

    pub fn catalog(&self) -> Option<&[Vehicle]> {
        match &self.catalog {
            CatalogState::Loaded(vehicles) => Some(vehicles),
            CatalogState::Loading | CatalogState::Failed(_) => None,
        }
    }

    pub fn server_filtered(&self) -> Option<&[Vehicle]> {
        self.server_filtered.as_deref()
    }

    pub fn set_manufacturer(&mut self, manufacturer: impl Into<String>) {
        self.criteria.manufacturer = manufacturer.into();
        self.pager.reset();
    }

    pub fn set_max_daily_price(&mut self, price: MaxDailyPrice) {
        self.criteria.max_daily_price = price;
        self.pager.reset();
    }

    pub fn set_sort(&mut self, sort: SortOrder) {
        self.criteria.sort = sort;
        self.pager.reset();
    }

    /// Updates the search box. A non-empty query takes effect immediately
    /// since it is matched in memory.
    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.criteria.search_query = query.into();
        self.pager.reset();
    }

    /// Replaces every control value at once, e.g. from a submitted form.
    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
        self.pager.reset();
    }

    /// The "Apply Filters" action.
    ///
    /// Returns the request to run, or `None` while a search is active because
    /// its result would be shadowed anyway. The page resets either way.
    pub fn request_filters(&mut self) -> Option<FilterRequest> {
        self.pager.reset();

        if self.criteria.is_search_active() {
            log::debug!("Search is active, skipping server-side filtering");
            return None;
        }

        self.issued_filters += 1;
        let ticket = FilterTicket(self.issued_filters);
        self.pending_filter = Some(ticket);

        Some(FilterRequest {
            ticket,
            query: VehicleFilterQuery::from(&self.criteria),
        })
    }

    /// Submission of the search box.
    ///
    /// With a query this only announces the client-side search; with an
    /// empty box it falls through to [`Self::request_filters`].
    pub fn submit_search(&mut self) -> Option<FilterRequest> {
        if self.criteria.is_search_active() {
            self.pager.reset();
            self.notices.push(Notice::info(CLIENT_SIDE_SEARCH_NOTICE));
            return None;
        }
        self.request_filters()
    }

    /// Restores the default controls and falls back to the full catalog.
    ///
    /// Any filter request still in flight is abandoned.
    pub fn reset_filters(&mut self) {
        self.criteria = FilterCriteria::default();
        self.server_filtered = None;
        self.pending_filter = None;
        self.pager.reset();
    }

    pub fn catalog_loaded(&mut self, result: RepositoryResult<Vec<Vehicle>>) {
        match result {
            Ok(vehicles) => {
                log::info!("Loaded vehicle catalog with {} vehicles", vehicles.len());
                self.catalog = CatalogState::Loaded(vehicles);
            }
            Err(err) => {
                log::error!("Failed to load vehicle catalog: {err}");
                self.catalog = CatalogState::Failed(err.to_string());
            }
        }
        self.pager.clamp(self.total_pages());
    }

    /// Delivers the outcome of a filter request.
    ///
    /// Outcomes of superseded or abandoned requests are dropped. A failure
    /// clears the server-filtered result so the catalog shows instead.
    pub fn filter_loaded(&mut self, ticket: FilterTicket, result: RepositoryResult<Vec<Vehicle>>) {
        if self.pending_filter != Some(ticket) {
            log::debug!("Discarding superseded filter response {ticket:?}");
            return;
        }
        self.pending_filter = None;

        match result {
            Ok(vehicles) => {
                log::info!("Filter returned {} vehicles", vehicles.len());
                self.server_filtered = Some(vehicles);
            }
            Err(err) => {
                log::warn!("Failed to apply vehicle filters: {err}");
                self.server_filtered = None;
                self.notices
                    .push(Notice::error(format!("Failed to apply filters: {err}")));
            }
        }
        self.pager.reset();
    }

    pub fn result_set(&self) -> ResultSet<'_> {
        select_result_set(
            self.catalog(),
            self.server_filtered(),
            &self.criteria,
        )
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.result_set().len(), PAGE_SIZE)
    }

    pub fn visible_page(&self) -> Vec<&Vehicle> {
        let result_set = self.result_set();
        let page = self.pager.page().min(total_pages(result_set.len(), PAGE_SIZE));
        visible_page(&result_set.vehicles, page, PAGE_SIZE).to_vec()
    }

    pub fn next_page(&mut self) {
        let total = self.total_pages();
        self.pager.next(total);
    }

    pub fn prev_page(&mut self) {
        let total = self.total_pages();
        self.pager.prev(total);
    }

    pub fn go_to_page(&mut self, page: usize) {
        let total = self.total_pages();
        self.pager.go_to(page, total);
    }

    pub fn manufacturer_options(&self) -> Vec<String> {
        manufacturer_options(self.catalog().unwrap_or_default())
    }

    /// Notices queued since the last call.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Builds the presentation contract and drains pending notices.
    pub fn render(&mut self) -> ListingPageData {
        let notices = self.take_notices();
        let result_set = self.result_set();
        let total = total_pages(result_set.len(), PAGE_SIZE);
        let page = self.pager.page().min(total);

        let state = match &self.catalog {
            CatalogState::Loading => ViewState::Loading,
            CatalogState::Failed(message) => ViewState::Error {
                message: message.clone(),
            },
            CatalogState::Loaded(_) if result_set.is_empty() => ViewState::Empty {
                hint: self.empty_hint().to_string(),
            },
            CatalogState::Loaded(_) => ViewState::Results,
        };

        let cards = match state {
            ViewState::Results => visible_page(&result_set.vehicles, page, PAGE_SIZE)
                .iter()
                .map(|vehicle| VehicleCard::from(*vehicle))
                .collect(),
            _ => Vec::new(),
        };

        ListingPageData {
            state,
            source: result_set.source,
            vehicles: Paginated::new(cards, page, total),
            total_results: result_set.len(),
            manufacturers: self.manufacturer_options(),
            sort_options: SortOption::all(self.criteria.sort),
            criteria: self.criteria.clone(),
            updating: self.is_updating(),
            notices,
        }
    }

    fn empty_hint(&self) -> &'static str {
        if self.criteria.has_narrowing_filters() {
            HINT_ADJUST_FILTERS
        } else {
            HINT_EMPTY_CATALOG
        }
    }
}

fn run_filter<R>(repo: &R, view: &mut DiscoveryView, request: FilterRequest)
where
    R: VehicleReader + ?Sized,
{
    log::info!("Applying vehicle filters: {:?}", request.query);
    let result = repo.filter_vehicles(&request.query);
    view.filter_loaded(request.ticket, result);
}

/// Initial load: fetches the catalog and the default filter concurrently.
pub fn mount<R>(repo: &R, view: &mut DiscoveryView)
where
    R: VehicleReader + Sync + ?Sized,
{
    let request = view.request_filters();

    let (catalog, filtered) = thread::scope(|scope| {
        let filter = request
            .as_ref()
            .map(|request| scope.spawn(move || repo.filter_vehicles(&request.query)));

        let catalog = repo.list_vehicles();

        let filtered = filter.map(|handle| {
            handle.join().unwrap_or_else(|_| {
                Err(RepositoryError::Unexpected(
                    "filter request panicked".to_string(),
                ))
            })
        });

        (catalog, filtered)
    });

    view.catalog_loaded(catalog);
    if let (Some(request), Some(result)) = (request, filtered) {
        view.filter_loaded(request.ticket, result);
    }
}

/// The "Apply Filters" action followed by its fetch, if any.
pub fn apply_filters<R>(repo: &R, view: &mut DiscoveryView)
where
    R: VehicleReader + ?Sized,
{
    if let Some(request) = view.request_filters() {
        run_filter(repo, view, request);
    }
}

/// Search box submission followed by its fetch, if any.
pub fn submit_search<R>(repo: &R, view: &mut DiscoveryView)
where
    R: VehicleReader + ?Sized,
{
    if let Some(request) = view.submit_search() {
        run_filter(repo, view, request);
    }
}

/// Resets the controls; with `refresh` the default server filter is fetched
/// again to re-establish the baseline.
pub fn reset_filters<R>(repo: &R, view: &mut DiscoveryView, refresh: bool)
where
    R: VehicleReader + ?Sized,
{
    view.reset_filters();
    if refresh {
        apply_filters(repo, view);
    }
}
