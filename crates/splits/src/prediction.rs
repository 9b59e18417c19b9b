//! Placement prediction from a single observed split.
//!
//! The solver alternates between "which pacing profile fits this place" and
//! "which place fits this finish time" for a fixed number of passes,
//! starting from a mid-field guess. There is no convergence tolerance: the
//! pass count is part of the model and changing it changes the output.

use tracing::debug;

use crate::{
    calibration::Calibration,
    errors::ModelError,
    models::{Badge, ProportionVector, Section},
    pacing::{SegmentKey, checked_apply_bias, elapsed_times, segment_fraction},
};

/// Place the solver starts from.
pub const SEED_PLACE: u32 = 500;

/// Refinement passes before the final evaluation.
pub const REFINEMENT_PASSES: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub place: u32,
    pub field_size: u32,
    /// Predicted finish duration, seconds.
    pub actual: f64,
    /// Predicted clock time, seconds.
    pub clock: f64,
    pub badge: Badge,
    pub proportions: ProportionVector,
    /// Predicted cumulative elapsed seconds at each checkpoint.
    pub elapsed: [f64; 8],
}

/// One solver evaluation at an assumed place.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Evaluation {
    proportions: ProportionVector,
    actual: f64,
    clock: f64,
    place: u32,
}

#[derive(Debug, Clone, Copy)]
struct Observation {
    split_seconds: f64,
    key: SegmentKey,
    handicap_minutes: u32,
    section: Section,
    bias: f64,
}

fn evaluate(
    calibration: &Calibration,
    observation: &Observation,
    place: u32,
) -> Result<Evaluation, ModelError> {
    let base = calibration.proportions_for_place(f64::from(place));
    let proportions = checked_apply_bias(&base, observation.bias, calibration.bias_deviation())?;
    let fraction = segment_fraction(&proportions, observation.key, calibration.sub_ratios());
    if fraction <= 0.0 {
        return Err(ModelError::InvalidBias(observation.bias));
    }

    let actual = observation.split_seconds / fraction;
    let clock =
        calibration.clock_from_actual(actual, observation.handicap_minutes, observation.section);
    Ok(Evaluation {
        proportions,
        actual,
        clock,
        place: calibration.clock_to_place(clock),
    })
}

/// Predicts placement and a full split table from one segment split.
pub fn predict(
    calibration: &Calibration,
    split_seconds: f64,
    key: SegmentKey,
    handicap_minutes: u32,
    section: Section,
    bias: f64,
) -> Result<Prediction, ModelError> {
    if !split_seconds.is_finite() || split_seconds <= 0.0 {
        return Err(ModelError::InvalidSplit(split_seconds));
    }

    let observation = Observation {
        split_seconds,
        key,
        handicap_minutes,
        section,
        bias,
    };

    let mut place = SEED_PLACE;
    for pass in 0..REFINEMENT_PASSES {
        let estimate = evaluate(calibration, &observation, place)?;
        debug!(
            pass,
            from_place = place,
            to_place = estimate.place,
            actual = estimate.actual,
            "Refined placement estimate"
        );
        place = estimate.place;
    }

    let last = evaluate(calibration, &observation, place)?;

    Ok(Prediction {
        place: last.place,
        field_size: calibration.field_size(),
        actual: last.actual,
        clock: last.clock,
        badge: calibration.badge(section, last.place),
        proportions: last.proportions,
        elapsed: elapsed_times(last.actual, &last.proportions, calibration.sub_ratios()),
    })
}
