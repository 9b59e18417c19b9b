//! Handicap lookup handlers.

use std::sync::Arc;

use axum::{Extension, extract::Query, response::Json};

use crate::{
    calibration::Calibration,
    errors::AppError,
    models::Section,
    types::{HandicapQuery, HandicapResponse},
};

/// Look up a runner's handicap, group, and start time.
#[utoipa::path(
    get,
    path = "/handicap",
    tag = "handicap",
    params(HandicapQuery),
    responses(
        (status = 200, description = "Handicap details", body = HandicapResponse),
        (status = 404, description = "No handicap for this age and sex")
    )
)]
pub async fn get_handicap(
    Extension(calibration): Extension<Arc<Calibration>>,
    Query(query): Query<HandicapQuery>,
) -> Result<Json<HandicapResponse>, AppError> {
    let section = query.section.unwrap_or(Section::Invitational);
    let info = calibration
        .handicap(query.sex, query.age)
        .ok_or(AppError::MissingHandicap)?;

    Ok(Json(HandicapResponse::new(
        &calibration,
        query.sex,
        query.age,
        section,
        info,
    )))
}
