//! Target split computation: the checkpoint times a runner needs to finish
//! at a given placement.

use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    calibration::Calibration,
    errors::ModelError,
    models::{ProportionVector, Section, Target},
    pacing::{Checkpoint, checked_apply_bias, elapsed_times, segment_durations},
};

/// Deltas smaller than this many seconds are reported as neutral.
pub const DELTA_DEADBAND_SECONDS: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DeltaKind {
    Faster,
    Slower,
    Neutral,
}

impl DeltaKind {
    pub fn classify(delta: f64) -> DeltaKind {
        if delta.abs() < DELTA_DEADBAND_SECONDS {
            DeltaKind::Neutral
        } else if delta < 0.0 {
            DeltaKind::Faster
        } else {
            DeltaKind::Slower
        }
    }
}

/// Times at one checkpoint, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CheckpointSplit {
    pub checkpoint: Checkpoint,
    pub elapsed: f64,
    pub segment: f64,
    /// Biased segment minus the neutral-pacing segment.
    pub delta: f64,
    pub delta_kind: DeltaKind,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TargetSplits {
    pub actual: f64,
    pub proportions: ProportionVector,
    pub splits: [CheckpointSplit; 8],
}

#[derive(Debug, Clone, PartialEq)]
pub enum TargetOutcome {
    Achievable(TargetSplits),
    /// The finish time needed is zero or negative: the placement cannot be
    /// reached from this handicap group.
    Unachievable,
}

impl TargetOutcome {
    pub fn splits(&self) -> Option<&TargetSplits> {
        match self {
            TargetOutcome::Achievable(splits) => Some(splits),
            TargetOutcome::Unachievable => None,
        }
    }
}

/// Splits needed to hit `target` with the given handicap, section and bias.
pub fn compute_target(
    calibration: &Calibration,
    target: &Target,
    handicap_minutes: u32,
    section: Section,
    bias: f64,
) -> Result<TargetOutcome, ModelError> {
    let actual = calibration.actual_from_clock(target.reference_clock, handicap_minutes, section);
    if actual <= 0.0 {
        return Ok(TargetOutcome::Unachievable);
    }

    let sub = calibration.sub_ratios();
    let neutral = target.proportions;
    let biased = checked_apply_bias(&neutral, bias, calibration.bias_deviation())?;

    let elapsed_biased = elapsed_times(actual, &biased, sub);
    let segments_biased = segment_durations(&elapsed_biased);
    let segments_neutral = segment_durations(&elapsed_times(actual, &neutral, sub));

    let splits = Checkpoint::ALL.map(|checkpoint| {
        let i = checkpoint.index();
        let delta = segments_biased[i] - segments_neutral[i];
        CheckpointSplit {
            checkpoint,
            elapsed: elapsed_biased[i],
            segment: segments_biased[i],
            delta,
            delta_kind: DeltaKind::classify(delta),
        }
    });

    Ok(TargetOutcome::Achievable(TargetSplits {
        actual,
        proportions: biased,
        splits,
    }))
}

pub fn compute_target_by_key(
    calibration: &Calibration,
    key: &str,
    handicap_minutes: u32,
    section: Section,
    bias: f64,
) -> Result<TargetOutcome, ModelError> {
    let target = calibration
        .target(key)
        .ok_or_else(|| ModelError::UnknownTarget(key.to_string()))?;
    compute_target(calibration, target, handicap_minutes, section, bias)
}

/// Every target of `section`, in dataset order.
pub fn compute_section_targets<'a>(
    calibration: &'a Calibration,
    handicap_minutes: u32,
    section: Section,
    bias: f64,
) -> Result<Vec<(&'a Target, TargetOutcome)>, ModelError> {
    calibration
        .targets_for(section)
        .map(|target| {
            compute_target(calibration, target, handicap_minutes, section, bias)
                .map(|outcome| (target, outcome))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{calibration::CalibrationData, models::TargetCategory};

    fn calibration() -> Calibration {
        Calibration::embedded().unwrap()
    }

    fn achievable(outcome: TargetOutcome) -> TargetSplits {
        match outcome {
            TargetOutcome::Achievable(splits) => splits,
            TargetOutcome::Unachievable => panic!("expected an achievable target"),
        }
    }

    #[test]
    fn test_actual_adds_handicap_for_invitational() {
        let calibration = calibration();
        let target = calibration.target("1").unwrap();
        let splits = achievable(
            compute_target(&calibration, target, 10, Section::Invitational, 0.0).unwrap(),
        );
        assert_eq!(splits.actual, target.reference_clock + 600.0);
        assert!((splits.splits[7].elapsed - splits.actual).abs() < 1e-6);
    }

    #[test]
    fn test_runner_section_subtracts_offset() {
        let calibration = calibration();
        let splits = achievable(
            compute_target_by_key(&calibration, "750", 5, Section::Runner, 0.0).unwrap(),
        );
        assert_eq!(splits.actual, 4750.0 + 300.0 - 1620.0);
    }

    #[test]
    fn test_negative_actual_is_unachievable() {
        let mut data = CalibrationData::embedded().unwrap();
        data.targets[0].reference_clock = -500.0;
        let calibration = Calibration::try_from(data).unwrap();
        let outcome =
            compute_target_by_key(&calibration, "1", 0, Section::Invitational, 0.0).unwrap();
        assert_eq!(outcome, TargetOutcome::Unachievable);
        assert!(outcome.splits().is_none());
    }

    #[test]
    fn test_zero_actual_is_unachievable() {
        let mut data = CalibrationData::embedded().unwrap();
        data.targets[0].reference_clock = -600.0;
        let calibration = Calibration::try_from(data).unwrap();
        let outcome =
            compute_target_by_key(&calibration, "1", 10, Section::Invitational, 0.0).unwrap();
        assert_eq!(outcome, TargetOutcome::Unachievable);
    }

    #[test]
    fn test_neutral_bias_has_no_deltas() {
        let calibration = calibration();
        for (_, outcome) in
            compute_section_targets(&calibration, 7, Section::Invitational, 0.0).unwrap()
        {
            let splits = achievable(outcome);
            assert!(
                splits
                    .splits
                    .iter()
                    .all(|s| s.delta_kind == DeltaKind::Neutral && s.delta.abs() < 1e-9)
            );
        }
    }

    #[test]
    fn test_uphill_bias_is_faster_on_climb() {
        let calibration = calibration();
        let splits = achievable(
            compute_target_by_key(&calibration, "450", 0, Section::Invitational, -2.0).unwrap(),
        );
        // Muir Woods to Dynamite is on the climb, Cardiac to Steep Ravine on the descent.
        assert_eq!(splits.splits[2].delta_kind, DeltaKind::Faster);
        assert_eq!(splits.splits[5].delta_kind, DeltaKind::Slower);
        assert_eq!(splits.splits[0].delta_kind, DeltaKind::Neutral);
        assert_eq!(splits.splits[7].delta_kind, DeltaKind::Neutral);
    }

    #[test]
    fn test_elapsed_monotonic_and_segments_consistent() {
        let calibration = calibration();
        for bias in [-3.0, -1.0, 0.0, 1.5, 3.0] {
            for (_, outcome) in
                compute_section_targets(&calibration, 12, Section::Runner, bias).unwrap()
            {
                let splits = achievable(outcome);
                let elapsed: Vec<f64> = splits.splits.iter().map(|s| s.elapsed).collect();
                assert!(elapsed.windows(2).all(|w| w[0] <= w[1]));
                let total: f64 = splits.splits.iter().map(|s| s.segment).sum();
                assert!((total - elapsed[7]).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn test_section_targets_in_dataset_order() {
        let calibration = calibration();
        let results =
            compute_section_targets(&calibration, 0, Section::Invitational, 0.0).unwrap();
        let keys: Vec<&str> = results.iter().map(|(t, _)| t.key.as_str()).collect();
        assert_eq!(keys, ["1", "35", "100", "450"]);
        assert_eq!(results[1].0.category, TargetCategory::BlackShirt);
    }

    #[test]
    fn test_unknown_target() {
        let calibration = calibration();
        assert_eq!(
            compute_target_by_key(&calibration, "2", 0, Section::Invitational, 0.0),
            Err(ModelError::UnknownTarget("2".to_string()))
        );
    }

    #[test]
    fn test_extreme_bias_rejected() {
        let calibration = calibration();
        assert_eq!(
            compute_target_by_key(&calibration, "1", 0, Section::Invitational, 80.0),
            Err(ModelError::InvalidBias(80.0))
        );
    }

    #[test]
    fn test_delta_classification() {
        assert_eq!(DeltaKind::classify(2.9), DeltaKind::Neutral);
        assert_eq!(DeltaKind::classify(-2.9), DeltaKind::Neutral);
        assert_eq!(DeltaKind::classify(3.0), DeltaKind::Slower);
        assert_eq!(DeltaKind::classify(-3.0), DeltaKind::Faster);
    }
}
