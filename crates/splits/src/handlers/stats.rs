//! Health check and reference data handlers.

use std::sync::Arc;

use axum::{Extension, http::StatusCode, response::Json};

use crate::{calibration::Calibration, pacing::SegmentKey, types::CheckpointsResponse};

/// Health check endpoint.
#[utoipa::path(
    get,
    path = "/health",
    tag = "stats",
    responses(
        (status = 200, description = "Health check passed")
    )
)]
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// List the course checkpoints and the segment keys accepted by `/predict`.
#[utoipa::path(
    get,
    path = "/checkpoints",
    tag = "reference",
    responses(
        (status = 200, description = "Checkpoints in course order", body = CheckpointsResponse)
    )
)]
pub async fn list_checkpoints(
    Extension(calibration): Extension<Arc<Calibration>>,
) -> Json<CheckpointsResponse> {
    Json(CheckpointsResponse {
        checkpoints: calibration.data().checkpoints.clone(),
        segment_keys: SegmentKey::ALL.to_vec(),
    })
}
