//! Filter controls of the vehicle listing.
//!
//! The same form doubles as the listing's URL query string so that a filtered
//! view can be bookmarked or shared.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::filter::{FilterCriteria, SortOrder};
use crate::domain::types::MaxDailyPrice;
use crate::forms::FormError;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize, Validate)]
#[serde(default, rename_all = "camelCase")]
/// Raw values of the filter controls.
pub struct FilterForm {
    /// Selected manufacturer, empty for "All Manufacturers".
    #[validate(length(max = 100))]
    #[serde(skip_serializing_if = "String::is_empty")]
    pub manufacturer: String,
    /// Value of the price slider, bounded by [`MaxDailyPrice::CEILING`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_daily_price: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortOrder>,
    /// Text of the search box.
    #[validate(length(max = 200))]
    #[serde(skip_serializing_if = "String::is_empty")]
    pub search_query: String,
    /// Requested listing page.
    #[validate(range(min = 1))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<usize>,
}

impl FilterForm {
    /// Parses and validates a URL query string such as
    /// `manufacturer=Toyota&maxDailyPrice=300&sort=yearDesc`.
    pub fn parse(query: &str) -> Result<Self, FormError> {
        let form: FilterForm = serde_html_form::from_str(query.trim_start_matches('?'))
            .map_err(|err| FormError::Malformed(err.to_string()))?;
        form.to_criteria()?;
        Ok(form)
    }

    /// Encodes the form back into a query string, omitting default values.
    pub fn to_query_string(&self) -> Result<String, FormError> {
        serde_html_form::to_string(self).map_err(|err| FormError::Malformed(err.to_string()))
    }

    /// Validates the form and converts it into filter criteria.
    pub fn to_criteria(&self) -> Result<FilterCriteria, FormError> {
        self.validate()?;

        let max_daily_price = match self.max_daily_price {
            Some(price) => MaxDailyPrice::new(price).map_err(|_| FormError::InvalidPrice)?,
            None => MaxDailyPrice::ceiling(),
        };

        Ok(FilterCriteria {
            manufacturer: self.manufacturer.clone(),
            max_daily_price,
            sort: self.sort.unwrap_or_default(),
            search_query: self.search_query.clone(),
        })
    }
}

impl From<&FilterCriteria> for FilterForm {
    fn from(criteria: &FilterCriteria) -> Self {
        Self {
            manufacturer: criteria.manufacturer.clone(),
            max_daily_price: (!criteria.max_daily_price.is_ceiling())
                .then(|| criteria.max_daily_price.get()),
            sort: (criteria.sort != SortOrder::default()).then_some(criteria.sort),
            search_query: criteria.search_query.clone(),
            page: None,
        }
    }
}
