//! Query parameter types for API endpoints.

use serde::Deserialize;
use utoipa::IntoParams;

use crate::models::{Section, Sex};

/// Handicap lookup query parameters.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct HandicapQuery {
    pub sex: Sex,
    pub age: u32,
    /// Section used for the start time; Invitational when omitted.
    pub section: Option<Section>,
}
