//! Feature route handlers.

use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    Json,
};
use spatial_core::feature::{self, model::Feature, model::FeatureInput};
use spatial_core::{Envelope, SpatialResult};

use crate::state::AppState;

type ApiResponse<T> = (StatusCode, Json<Envelope<T>>);

/// Pick the status for a service result and wrap it in the envelope.
fn respond<T>(result: SpatialResult<T>, success: StatusCode, message: &str) -> ApiResponse<T> {
    let status = match &result {
        Ok(_) => success,
        Err(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
        Err(e) if e.is_not_found() => StatusCode::NOT_FOUND,
        Err(e) => {
            tracing::error!(error = %e, "request failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, Json(Envelope::from_result(result, message)))
}

/// Ids that don't parse get the envelope too, not axum's plain-text body.
fn bad_path<T>(rejection: PathRejection) -> ApiResponse<T> {
    tracing::debug!(error = %rejection, "rejected path");
    (
        StatusCode::BAD_REQUEST,
        Json(Envelope::fail(rejection.body_text())),
    )
}

/// POST /Spatial
pub async fn add(
    State(state): State<AppState>,
    Json(req): Json<FeatureInput>,
) -> ApiResponse<Feature> {
    let result = feature::add_feature(&state.db, &req.name, &req.wkt).await;
    respond(result, StatusCode::CREATED, "Feature added")
}

/// POST /Spatial/range
pub async fn add_range(
    State(state): State<AppState>,
    Json(items): Json<Vec<FeatureInput>>,
) -> ApiResponse<Vec<Feature>> {
    let result = feature::add_range(&state.db, &items).await;
    respond(result, StatusCode::CREATED, "All features added")
}

/// GET /Spatial/{id}
pub async fn get(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResponse<Feature> {
    let Path(id) = match id {
        Ok(id) => id,
        Err(e) => return bad_path(e),
    };
    let result = feature::get_feature(&state.db, id).await;
    respond(result, StatusCode::OK, "Feature found")
}

/// GET /Spatial
pub async fn list(State(state): State<AppState>) -> ApiResponse<Vec<Feature>> {
    let result = feature::list_features(&state.db).await;
    respond(result, StatusCode::OK, "Features returned")
}

/// PUT /Spatial/{id}
pub async fn update(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    Json(req): Json<FeatureInput>,
) -> ApiResponse<Feature> {
    let Path(id) = match id {
        Ok(id) => id,
        Err(e) => return bad_path(e),
    };
    let result = feature::update_feature(&state.db, id, &req.name, &req.wkt).await;
    respond(result, StatusCode::OK, "Feature updated")
}

/// DELETE /Spatial/{id}
pub async fn delete(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResponse<Feature> {
    let Path(id) = match id {
        Ok(id) => id,
        Err(e) => return bad_path(e),
    };
    let result = feature::delete_feature(&state.db, id).await;
    respond(result, StatusCode::OK, "Feature deleted")
}

/// GET /Spatial/{start_id}/{end_id}
pub async fn between(
    State(state): State<AppState>,
    ids: Result<Path<(i64, i64)>, PathRejection>,
) -> ApiResponse<Vec<Feature>> {
    let Path((start, end)) = match ids {
        Ok(ids) => ids,
        Err(e) => return bad_path(e),
    };
    let result = feature::list_between(&state.db, start, end).await;
    respond(result, StatusCode::OK, "Features returned")
}
