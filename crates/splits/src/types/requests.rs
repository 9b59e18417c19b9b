//! Request body types for API endpoints.

use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    models::{Section, Sex},
    pacing::{MAX_BIAS, MIN_BIAS},
};

/// Split target request.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct TargetsRequest {
    pub sex: Sex,
    pub age: u32,
    pub section: Section,
    /// Pacing bias; negative favours the climb, positive the descent.
    #[serde(default)]
    #[validate(range(min = MIN_BIAS, max = MAX_BIAS))]
    pub bias: f64,
}

/// Placement prediction request.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct PredictRequest {
    pub sex: Sex,
    pub age: u32,
    pub section: Section,
    #[serde(default)]
    #[validate(range(min = MIN_BIAS, max = MAX_BIAS))]
    pub bias: f64,
    /// Segment the split was timed over, e.g. `s_wg` or `seg_m_c`.
    pub checkpoint: String,
    #[serde(default)]
    #[validate(range(max = 9))]
    pub hours: u32,
    #[serde(default)]
    #[validate(range(max = 59))]
    pub minutes: u32,
    #[serde(default)]
    #[validate(range(max = 59))]
    pub seconds: u32,
}
