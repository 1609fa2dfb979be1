//! Handler for the category list.

use axum::Json;
use capkb_core::category::VALID_CATEGORIES;

use crate::response::DataResponse;

/// GET /api/v1/categories
pub async fn list() -> Json<DataResponse<&'static [&'static str]>> {
    Json(DataResponse {
        data: VALID_CATEGORIES,
    })
}
