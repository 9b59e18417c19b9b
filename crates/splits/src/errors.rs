use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::warn;

use crate::interpolate::CurveError;

/// Errors raised by the race model for inputs it cannot evaluate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Unknown checkpoint segment: {0}")]
    InvalidSegmentKey(String),

    #[error("Split time must be positive, got {0} seconds")]
    InvalidSplit(f64),

    #[error("Pacing bias {0} is outside the modelled range")]
    InvalidBias(f64),

    #[error("Unknown target: {0}")]
    UnknownTarget(String),
}

/// Errors raised while loading or validating a calibration dataset.
#[derive(Error, Debug)]
pub enum CalibrationError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed calibration JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid {name} curve: {source}")]
    Curve {
        name: &'static str,
        #[source]
        source: CurveError,
    },

    #[error("Invalid calibration: {0}")]
    Invalid(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("No handicap is defined for this age and sex")]
    MissingHandicap,

    #[error(transparent)]
    Model(#[from] ModelError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::MissingHandicap => StatusCode::NOT_FOUND,
            AppError::Model(ModelError::UnknownTarget(_)) => StatusCode::NOT_FOUND,
            AppError::Model(_) => StatusCode::BAD_REQUEST,
        };

        warn!(status = %status.as_u16(), "{self}");

        let body = Json(json!({
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(error: AppError) -> StatusCode {
        error.into_response().status()
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status(AppError::Validation(validator::ValidationErrors::new())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(status(AppError::MissingHandicap), StatusCode::NOT_FOUND);
        assert_eq!(
            status(ModelError::UnknownTarget("42".to_string()).into()),
            StatusCode::NOT_FOUND
        );
        for error in [
            ModelError::InvalidSegmentKey("summit".to_string()),
            ModelError::InvalidSplit(0.0),
            ModelError::InvalidBias(9.0),
        ] {
            assert_eq!(status(error.into()), StatusCode::BAD_REQUEST);
        }
    }
}
