//! List query surface: paging, sorting, search term, and the criteria
//! list passed through to the service untouched.

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

pub const DEFAULT_PAGE_NUMBER: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 50;

/// Raw query parameters of a list request, as bound from the URL.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// JSON-encoded array of [`FilterCriteria`].
    #[serde(default)]
    pub filters: Option<String>,
    #[serde(default)]
    pub search_term: Option<String>,
    #[serde(default)]
    pub page_number: Option<i64>,
    #[serde(default)]
    pub page_size: Option<i64>,
    #[serde(default)]
    pub sort_field: Option<String>,
    #[serde(default)]
    pub sort_order: Option<SortOrder>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// One filter criterion. The operator and value are not interpreted by
/// this layer; the backing service decides what it supports.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    pub field: String,
    #[serde(default = "default_operator")]
    pub operator: String,
    pub value: serde_json::Value,
}

fn default_operator() -> String {
    "eq".into()
}

/// Validated one-based page request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    pub number: i64,
    pub size: i64,
}

/// Validated list query handed to the service.
#[derive(Clone, Debug)]
pub struct ListQuery {
    pub criteria: Vec<FilterCriteria>,
    pub search_term: Option<String>,
    pub page: PageRequest,
    pub sort_field: Option<String>,
    pub sort_order: SortOrder,
}

impl ListParams {
    /// Validate paging bounds and deserialize the criteria list.
    pub fn into_query(self) -> Result<ListQuery, AppError> {
        let number = self.page_number.unwrap_or(DEFAULT_PAGE_NUMBER);
        if number < 1 {
            return Err(AppError::BadRequest("pageNumber must be at least 1".into()));
        }
        let size = self.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
        if size < 1 {
            return Err(AppError::BadRequest("pageSize must be at least 1".into()));
        }
        let criteria = match self.filters.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            None => Vec::new(),
            Some(raw) => serde_json::from_str::<Vec<FilterCriteria>>(raw)
                .map_err(|_| AppError::BadRequest("filters must be a JSON criteria list".into()))?,
        };
        Ok(ListQuery {
            criteria,
            search_term: self.search_term.filter(|s| !s.is_empty()),
            page: PageRequest { number, size },
            sort_field: self.sort_field.filter(|s| !s.is_empty()),
            sort_order: self.sort_order.unwrap_or_default(),
        })
    }
}

impl PageRequest {
    /// Zero-based offset of the first record on this page.
    pub fn offset(&self) -> usize {
        ((self.number - 1) * self.size) as usize
    }
}
