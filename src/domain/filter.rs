use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::types::{MaxDailyPrice, TypeConstraintError};

/// Server-side ordering of the filtered vehicle list.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SortOrder {
    #[default]
    #[serde(rename = "dailyRateAsc")]
    DailyRateAsc,
    #[serde(rename = "dailyRateDesc")]
    DailyRateDesc,
    #[serde(rename = "yearDesc")]
    YearDesc,
    #[serde(rename = "yearAsc")]
    YearAsc,
}

impl SortOrder {
    pub const ALL: [SortOrder; 4] = [
        SortOrder::DailyRateAsc,
        SortOrder::DailyRateDesc,
        SortOrder::YearDesc,
        SortOrder::YearAsc,
    ];

    /// Value understood by the `vehicles/filter` endpoint.
    pub const fn as_str(self) -> &'static str {
        match self {
            SortOrder::DailyRateAsc => "dailyRateAsc",
            SortOrder::DailyRateDesc => "dailyRateDesc",
            SortOrder::YearDesc => "yearDesc",
            SortOrder::YearAsc => "yearAsc",
        }
    }

    /// Human readable label for selection controls.
    pub const fn label(self) -> &'static str {
        match self {
            SortOrder::DailyRateAsc => "Price: Low to High",
            SortOrder::DailyRateDesc => "Price: High to Low",
            SortOrder::YearDesc => "Newest First",
            SortOrder::YearAsc => "Oldest First",
        }
    }
}

impl Display for SortOrder {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = TypeConstraintError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        SortOrder::ALL
            .into_iter()
            .find(|sort| sort.as_str() == value.trim())
            .ok_or_else(|| TypeConstraintError::InvalidValue(format!("unknown sort order `{value}`")))
    }
}

/// Client-local state of the filter controls.
///
/// Editing these values never reaches the backend by itself; only an explicit
/// apply does. A non-empty search query shadows every server-side parameter.
#[derive(Clone, Debug, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    /// Exact manufacturer name, empty for no constraint.
    pub manufacturer: String,
    pub max_daily_price: MaxDailyPrice,
    pub sort: SortOrder,
    /// Free-text query matched against the full catalog in memory.
    pub search_query: String,
}

impl FilterCriteria {
    /// Normalized search needle, `None` when search is inactive.
    pub fn search_term(&self) -> Option<String> {
        let trimmed = self.search_query.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_lowercase())
        }
    }

    pub fn is_search_active(&self) -> bool {
        self.search_term().is_some()
    }

    /// Manufacturer constraint, `None` when left blank.
    ///
    /// The value is passed on verbatim since the backend matches it exactly.
    pub fn manufacturer_filter(&self) -> Option<&str> {
        (!self.manufacturer.trim().is_empty()).then_some(self.manufacturer.as_str())
    }

    /// Whether any structured filter narrows the catalog.
    pub fn has_narrowing_filters(&self) -> bool {
        self.manufacturer_filter().is_some() || !self.max_daily_price.is_ceiling()
    }
}
