//! Contract handed to the presentation layer of the discovery view.

use serde::Serialize;

use crate::domain::filter::{FilterCriteria, SortOrder};
use crate::domain::listing::ResultSource;
use crate::dto::vehicle::VehicleCard;
use crate::pagination::Paginated;

pub const HINT_ADJUST_FILTERS: &str = "Try adjusting your filters to see more results.";
pub const HINT_EMPTY_CATALOG: &str = "We currently don't have any vehicles available.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Error,
}

/// Transient notification shown once and then discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Entry of the sort selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SortOption {
    pub value: SortOrder,
    pub label: &'static str,
    pub selected: bool,
}

impl SortOption {
    /// Every sort order in selector order, marking `selected`.
    pub fn all(selected: SortOrder) -> Vec<SortOption> {
        SortOrder::ALL
            .into_iter()
            .map(|value| SortOption {
                value,
                label: value.label(),
                selected: value == selected,
            })
            .collect()
    }
}

/// Which of the mutually exclusive screens to show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViewState {
    /// The catalog has not arrived yet.
    Loading,
    /// The catalog could not be loaded; nothing else is rendered.
    Error { message: String },
    /// Zero vehicles to show, with a reset-filters action.
    Empty { hint: String },
    Results,
}

/// Data required to render the vehicle discovery view.
#[derive(Debug, Clone, Serialize)]
pub struct ListingPageData {
    pub state: ViewState,
    pub source: ResultSource,
    /// Cards of the current page plus the page indicator.
    pub vehicles: Paginated<VehicleCard>,
    /// Size of the whole result set ("Showing X of Y vehicles").
    pub total_results: usize,
    pub manufacturers: Vec<String>,
    pub sort_options: Vec<SortOption>,
    pub criteria: FilterCriteria,
    /// A filter request is in flight.
    pub updating: bool,
    pub notices: Vec<Notice>,
}

impl ListingPageData {
    /// Number of cards on the current page.
    pub fn showing(&self) -> usize {
        self.vehicles.items.len()
    }

    pub fn summary(&self) -> String {
        format!(
            "Showing {} of {} vehicles",
            self.showing(),
            self.total_results
        )
    }
}
