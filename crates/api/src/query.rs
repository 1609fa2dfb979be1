//! Shared query parameter types for API handlers.

use capkb_core::store::PracticeFilter;
use serde::Deserialize;

/// Query parameters for `GET /practices` (`?search=&category=&added_by=`).
#[derive(Debug, Default, Deserialize)]
pub struct PracticeListParams {
    pub search: Option<String>,
    pub category: Option<String>,
    pub added_by: Option<String>,
}

impl From<PracticeListParams> for PracticeFilter {
    fn from(params: PracticeListParams) -> Self {
        PracticeFilter {
            search: params.search,
            category: params.category,
            added_by: params.added_by,
        }
    }
}
