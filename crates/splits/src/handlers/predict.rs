//! Placement prediction handlers.

use std::sync::Arc;

use axum::{Extension, response::Json};
use validator::Validate;

use crate::{
    calibration::Calibration,
    errors::AppError,
    format::split_seconds,
    pacing::SegmentKey,
    prediction::predict,
    types::{HandicapResponse, PredictRequest, PredictionResponse},
};

/// Predict finishing place and splits from one observed segment split.
#[utoipa::path(
    post,
    path = "/predict",
    tag = "predict",
    request_body = PredictRequest,
    responses(
        (status = 200, description = "Predicted placement", body = PredictionResponse),
        (status = 400, description = "Invalid split, checkpoint, or bias"),
        (status = 404, description = "No handicap for this age and sex")
    )
)]
pub async fn predict_placement(
    Extension(calibration): Extension<Arc<Calibration>>,
    Json(req): Json<PredictRequest>,
) -> Result<Json<PredictionResponse>, AppError> {
    req.validate()?;

    let info = calibration
        .handicap(req.sex, req.age)
        .ok_or(AppError::MissingHandicap)?;
    let key: SegmentKey = req.checkpoint.parse()?;
    let split = split_seconds(req.hours, req.minutes, req.seconds);

    let prediction = predict(
        &calibration,
        split,
        key,
        info.handicap_minutes,
        req.section,
        req.bias,
    )?;

    tracing::debug!(
        checkpoint = %key,
        split,
        place = prediction.place,
        "Predicted placement"
    );

    let handicap = HandicapResponse::new(&calibration, req.sex, req.age, req.section, info);
    Ok(Json(PredictionResponse::new(
        &calibration,
        handicap,
        req.bias,
        key,
        split,
        prediction,
    )))
}
