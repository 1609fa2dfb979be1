//! Handlers for the `/practices` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use capkb_core::category::validate_category;
use capkb_core::error::CoreError;
use capkb_core::practice::{validate_new_practice, NewPractice, Practice};
use capkb_core::store::{PracticeFilter, PracticeStore, RecordStore};
use capkb_core::types::DbId;

use crate::error::{AppError, AppResult};
use crate::middleware::identity::{Requester, Student};
use crate::query::PracticeListParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/practices
pub async fn create(
    student: Student,
    State(state): State<AppState>,
    Json(input): Json<NewPractice>,
) -> AppResult<(StatusCode, Json<DataResponse<Practice>>)> {
    let content = validate_new_practice(&input)?;
    let practice = state.store.create(&content, &student.name).await?;

    tracing::info!(
        practice_id = practice.id,
        student = %student.name,
        email = student.email.as_deref(),
        class_section = student.class_section.as_deref(),
        category = %practice.content.category,
        "Practice added"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: practice })))
}

/// GET /api/v1/practices
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<PracticeListParams>,
) -> AppResult<Json<DataResponse<Vec<Practice>>>> {
    let filter = PracticeFilter::from(params);
    if let Some(category) = filter.category() {
        validate_category(category)?;
    }
    let practices = state.store.list(&filter).await?;
    Ok(Json(DataResponse { data: practices }))
}

/// GET /api/v1/practices/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Practice>>> {
    let practice = state
        .store
        .get(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Practice",
            id,
        }))?;
    Ok(Json(DataResponse { data: practice }))
}

/// DELETE /api/v1/practices/{id}
///
/// Only the student who added the practice, or an admin, may delete it.
pub async fn delete(
    requester: Requester,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let practice = state.store.get(id).await?.ok_or(AppError::Core(CoreError::NotFound {
        entity: "Practice",
        id,
    }))?;

    if !requester.may_manage(&practice.added_by) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the author or an admin can delete this practice".into(),
        )));
    }

    if !state.store.delete(id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Practice",
            id,
        }));
    }

    tracing::info!(
        practice_id = id,
        student = requester.student.as_ref().map(|s| s.name.as_str()),
        admin = requester.is_admin,
        "Practice deleted"
    );
    Ok(StatusCode::NO_CONTENT)
}
