//! Split target handlers.

use std::sync::Arc;

use axum::{Extension, response::Json};
use validator::Validate;

use crate::{
    calibration::Calibration,
    errors::AppError,
    targets::compute_section_targets,
    types::{BiasSummary, HandicapResponse, TargetCard, TargetsRequest, TargetsResponse},
};

/// Compute the splits needed to hit each placement target of a section.
#[utoipa::path(
    post,
    path = "/targets",
    tag = "targets",
    request_body = TargetsRequest,
    responses(
        (status = 200, description = "Split tables per target", body = TargetsResponse),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "No handicap for this age and sex")
    )
)]
pub async fn calculate_targets(
    Extension(calibration): Extension<Arc<Calibration>>,
    Json(req): Json<TargetsRequest>,
) -> Result<Json<TargetsResponse>, AppError> {
    req.validate()?;

    let info = calibration
        .handicap(req.sex, req.age)
        .ok_or(AppError::MissingHandicap)?;
    let handicap_minutes = info.handicap_minutes;

    let targets = compute_section_targets(&calibration, handicap_minutes, req.section, req.bias)?
        .into_iter()
        .map(|(target, outcome)| TargetCard::new(&calibration, target, &outcome))
        .collect::<Vec<_>>();

    tracing::debug!(
        section = req.section.code(),
        handicap_minutes,
        targets = targets.len(),
        "Computed split targets"
    );

    Ok(Json(TargetsResponse {
        handicap: HandicapResponse::new(&calibration, req.sex, req.age, req.section, info),
        bias: BiasSummary::new(req.bias),
        targets,
    }))
}
