//! Response types for API endpoints.

use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    calibration::Calibration,
    format::{describe_bias, format_delta, format_duration, start_time},
    models::{Badge, CheckpointLabel, HandicapInfo, Section, Sex, Target, TargetCategory},
    pacing::{Checkpoint, SegmentKey},
    prediction::Prediction,
    targets::{DeltaKind, TargetOutcome},
};

/// Text shown for a target that cannot be reached from the runner's group.
pub const UNACHIEVABLE_TEXT: &str = "Not achievable from this group";

/// Runner handicap and start details.
#[derive(Debug, Serialize, ToSchema)]
pub struct HandicapResponse {
    pub sex: Sex,
    pub age: u32,
    pub handicap_minutes: u32,
    pub group: String,
    pub section: Section,
    pub section_label: String,
    /// Wall-clock start, e.g. `8:15`.
    pub start_time: String,
}

impl HandicapResponse {
    pub fn new(
        calibration: &Calibration,
        sex: Sex,
        age: u32,
        section: Section,
        info: HandicapInfo,
    ) -> Self {
        Self {
            sex,
            age,
            start_time: start_time(calibration.start_schedule(), info.handicap_minutes, section),
            handicap_minutes: info.handicap_minutes,
            group: info.group,
            section,
            section_label: section.label().to_string(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BiasSummary {
    pub value: f64,
    pub label: String,
    pub detail: Option<String>,
}

impl BiasSummary {
    pub fn new(bias: f64) -> Self {
        let description = describe_bias(bias);
        Self {
            value: bias,
            label: description.label,
            detail: description.detail,
        }
    }
}

/// Times at one checkpoint of a target card.
#[derive(Debug, Serialize, ToSchema)]
pub struct SplitCell {
    pub short: String,
    pub name: String,
    pub elapsed_seconds: f64,
    pub elapsed: String,
    pub segment_seconds: f64,
    pub segment: String,
    pub delta_seconds: f64,
    pub delta: String,
    pub delta_kind: DeltaKind,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TargetCard {
    pub key: String,
    pub label: String,
    pub category: TargetCategory,
    pub achievable: bool,
    pub actual_seconds: Option<f64>,
    pub actual: String,
    pub splits: Vec<SplitCell>,
}

impl TargetCard {
    pub fn new(calibration: &Calibration, target: &Target, outcome: &TargetOutcome) -> Self {
        let (actual_seconds, actual, splits) = match outcome {
            TargetOutcome::Unachievable => (None, UNACHIEVABLE_TEXT.to_string(), Vec::new()),
            TargetOutcome::Achievable(result) => {
                let cells = result
                    .splits
                    .iter()
                    .map(|split| {
                        let label = calibration.checkpoint_label(split.checkpoint);
                        SplitCell {
                            short: label.short.clone(),
                            name: label.name.clone(),
                            elapsed_seconds: split.elapsed,
                            elapsed: format_duration(Some(split.elapsed)),
                            segment_seconds: split.segment,
                            segment: format_duration(Some(split.segment)),
                            delta_seconds: split.delta,
                            delta: format_delta(split.delta),
                            delta_kind: split.delta_kind,
                        }
                    })
                    .collect();
                (
                    Some(result.actual),
                    format_duration(Some(result.actual)),
                    cells,
                )
            }
        };

        Self {
            key: target.key.clone(),
            label: target.label.clone(),
            category: target.category,
            achievable: actual_seconds.is_some(),
            actual_seconds,
            actual,
            splits,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TargetsResponse {
    pub handicap: HandicapResponse,
    pub bias: BiasSummary,
    pub targets: Vec<TargetCard>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PredictedSplit {
    pub short: String,
    pub name: String,
    pub elapsed_seconds: f64,
    pub elapsed: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PredictionResponse {
    pub handicap: HandicapResponse,
    pub bias: BiasSummary,
    pub checkpoint: SegmentKey,
    pub split_seconds: f64,
    /// Approximate overall place.
    pub place: u32,
    pub field_size: u32,
    pub badge: Badge,
    pub actual_seconds: f64,
    pub actual: String,
    pub clock_seconds: f64,
    pub clock: String,
    pub splits: Vec<PredictedSplit>,
}

impl PredictionResponse {
    pub fn new(
        calibration: &Calibration,
        handicap: HandicapResponse,
        bias: f64,
        checkpoint: SegmentKey,
        split_seconds: f64,
        prediction: Prediction,
    ) -> Self {
        let splits = Checkpoint::ALL
            .iter()
            .zip(prediction.elapsed)
            .map(|(checkpoint, elapsed)| {
                let label = calibration.checkpoint_label(*checkpoint);
                PredictedSplit {
                    short: label.short.clone(),
                    name: label.name.clone(),
                    elapsed_seconds: elapsed,
                    elapsed: format_duration(Some(elapsed)),
                }
            })
            .collect();

        Self {
            handicap,
            bias: BiasSummary::new(bias),
            checkpoint,
            split_seconds,
            place: prediction.place,
            field_size: prediction.field_size,
            badge: prediction.badge,
            actual_seconds: prediction.actual,
            actual: format_duration(Some(prediction.actual)),
            clock_seconds: prediction.clock,
            clock: format_duration(Some(prediction.clock)),
            splits,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CheckpointsResponse {
    pub checkpoints: Vec<CheckpointLabel>,
    pub segment_keys: Vec<SegmentKey>,
}
