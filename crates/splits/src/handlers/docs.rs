//! OpenAPI document.

use axum::response::Json;
use utoipa::OpenApi;

use crate::{
    models::{Badge, BadgeKind, CheckpointLabel, Section, Sex, TargetCategory},
    pacing::SegmentKey,
    targets::DeltaKind,
    types::{
        BiasSummary, CheckpointsResponse, HandicapResponse, PredictRequest, PredictedSplit,
        PredictionResponse, SplitCell, TargetCard, TargetsRequest, TargetsResponse,
    },
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::stats::health_check,
        crate::handlers::stats::list_checkpoints,
        crate::handlers::handicap::get_handicap,
        crate::handlers::targets::calculate_targets,
        crate::handlers::predict::predict_placement,
    ),
    components(schemas(
        Sex,
        Section,
        SegmentKey,
        DeltaKind,
        TargetCategory,
        Badge,
        BadgeKind,
        CheckpointLabel,
        HandicapResponse,
        BiasSummary,
        SplitCell,
        TargetCard,
        TargetsRequest,
        TargetsResponse,
        PredictRequest,
        PredictedSplit,
        PredictionResponse,
        CheckpointsResponse,
    )),
    tags(
        (name = "handicap", description = "Handicap and start time lookup"),
        (name = "targets", description = "Split targets for placements"),
        (name = "predict", description = "Placement prediction from a split"),
        (name = "reference", description = "Course reference data"),
        (name = "stats", description = "Service health"),
    )
)]
pub struct ApiDoc;

/// Serve the OpenAPI document as JSON.
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
