//! Pacing model: bias adjustment of leg proportions and decomposition of
//! the four legs into checkpoint segments.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    errors::ModelError,
    models::{BiasDeviation, ProportionVector, SubSegmentRatios},
};

/// Bias range offered by the pacing slider.
pub const MIN_BIAS: f64 = -3.0;
pub const MAX_BIAS: f64 = 3.0;

/// Shifts time between the climb (p2) and the descent (p3).
///
/// Negative bias moves time out of the climb and into the descent
/// (an uphill runner); positive bias does the reverse.
pub fn apply_bias(base: &ProportionVector, bias: f64, sd: &BiasDeviation) -> ProportionVector {
    ProportionVector {
        p1: base.p1,
        p2: base.p2 + bias * sd.p2,
        p3: base.p3 - bias * sd.p3,
        p4: base.p4,
    }
}

/// [`apply_bias`], rejecting a bias that is non-finite or drives any leg
/// below zero.
pub fn checked_apply_bias(
    base: &ProportionVector,
    bias: f64,
    sd: &BiasDeviation,
) -> Result<ProportionVector, ModelError> {
    if !bias.is_finite() {
        return Err(ModelError::InvalidBias(bias));
    }
    let biased = apply_bias(base, bias, sd);
    if biased.components().iter().any(|p| *p < 0.0) {
        return Err(ModelError::InvalidBias(bias));
    }
    Ok(biased)
}

/// Keys for the splits a runner can report: the eight checkpoint-to-checkpoint
/// segments plus the four whole legs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum SegmentKey {
    #[serde(rename = "s_wg")]
    StartToWindyGap,
    #[serde(rename = "wg_mw")]
    WindyGapToMuirWoods,
    #[serde(rename = "mw_dy")]
    MuirWoodsToDynamite,
    #[serde(rename = "dy_bc")]
    DynamiteToBaseOfCardiac,
    #[serde(rename = "bc_ca")]
    BaseOfCardiacToCardiac,
    #[serde(rename = "ca_sr")]
    CardiacToSteepRavine,
    #[serde(rename = "sr_st")]
    SteepRavineToStile,
    #[serde(rename = "st_fi")]
    StileToFinish,
    #[serde(rename = "seg_s_m")]
    StartToMuirWoods,
    #[serde(rename = "seg_m_c")]
    MuirWoodsToCardiac,
    #[serde(rename = "seg_c_s")]
    CardiacToStile,
    #[serde(rename = "seg_s_f")]
    StileToFinishLeg,
}

impl SegmentKey {
    pub const ALL: [SegmentKey; 12] = [
        SegmentKey::StartToWindyGap,
        SegmentKey::WindyGapToMuirWoods,
        SegmentKey::MuirWoodsToDynamite,
        SegmentKey::DynamiteToBaseOfCardiac,
        SegmentKey::BaseOfCardiacToCardiac,
        SegmentKey::CardiacToSteepRavine,
        SegmentKey::SteepRavineToStile,
        SegmentKey::StileToFinish,
        SegmentKey::StartToMuirWoods,
        SegmentKey::MuirWoodsToCardiac,
        SegmentKey::CardiacToStile,
        SegmentKey::StileToFinishLeg,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SegmentKey::StartToWindyGap => "s_wg",
            SegmentKey::WindyGapToMuirWoods => "wg_mw",
            SegmentKey::MuirWoodsToDynamite => "mw_dy",
            SegmentKey::DynamiteToBaseOfCardiac => "dy_bc",
            SegmentKey::BaseOfCardiacToCardiac => "bc_ca",
            SegmentKey::CardiacToSteepRavine => "ca_sr",
            SegmentKey::SteepRavineToStile => "sr_st",
            SegmentKey::StileToFinish => "st_fi",
            SegmentKey::StartToMuirWoods => "seg_s_m",
            SegmentKey::MuirWoodsToCardiac => "seg_m_c",
            SegmentKey::CardiacToStile => "seg_c_s",
            SegmentKey::StileToFinishLeg => "seg_s_f",
        }
    }
}

impl fmt::Display for SegmentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SegmentKey {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SegmentKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| ModelError::InvalidSegmentKey(s.to_string()))
    }
}

/// Fraction of total race time spent in one segment.
pub fn segment_fraction(props: &ProportionVector, key: SegmentKey, sub: &SubSegmentRatios) -> f64 {
    match key {
        SegmentKey::StartToWindyGap => props.p1 * sub.windy_gap_in_p1,
        SegmentKey::WindyGapToMuirWoods => props.p1 * (1.0 - sub.windy_gap_in_p1),
        SegmentKey::MuirWoodsToDynamite => props.p2 * sub.dynamite_in_p2,
        SegmentKey::DynamiteToBaseOfCardiac => {
            props.p2 * (sub.bottom_cardiac_in_p2 - sub.dynamite_in_p2)
        }
        SegmentKey::BaseOfCardiacToCardiac => props.p2 * (1.0 - sub.bottom_cardiac_in_p2),
        SegmentKey::CardiacToSteepRavine => props.p3 * sub.steep_ravine_in_p3,
        SegmentKey::SteepRavineToStile => props.p3 * (1.0 - sub.steep_ravine_in_p3),
        SegmentKey::StileToFinish => props.p4,
        SegmentKey::StartToMuirWoods => props.p1,
        SegmentKey::MuirWoodsToCardiac => props.p2,
        SegmentKey::CardiacToStile => props.p3,
        SegmentKey::StileToFinishLeg => props.p4,
    }
}

/// The eight course landmarks, start to finish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Checkpoint {
    WindyGap,
    MuirWoods,
    Dynamite,
    BaseOfCardiac,
    Cardiac,
    SteepRavine,
    Stile,
    Finish,
}

impl Checkpoint {
    pub const ALL: [Checkpoint; 8] = [
        Checkpoint::WindyGap,
        Checkpoint::MuirWoods,
        Checkpoint::Dynamite,
        Checkpoint::BaseOfCardiac,
        Checkpoint::Cardiac,
        Checkpoint::SteepRavine,
        Checkpoint::Stile,
        Checkpoint::Finish,
    ];

    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Fraction of total race time elapsed on reaching this checkpoint.
    pub fn cumulative_fraction(&self, props: &ProportionVector, sub: &SubSegmentRatios) -> f64 {
        let ProportionVector { p1, p2, p3, p4 } = *props;
        match self {
            Checkpoint::WindyGap => p1 * sub.windy_gap_in_p1,
            Checkpoint::MuirWoods => p1,
            Checkpoint::Dynamite => p1 + p2 * sub.dynamite_in_p2,
            Checkpoint::BaseOfCardiac => p1 + p2 * sub.bottom_cardiac_in_p2,
            Checkpoint::Cardiac => p1 + p2,
            Checkpoint::SteepRavine => p1 + p2 + p3 * sub.steep_ravine_in_p3,
            Checkpoint::Stile => p1 + p2 + p3,
            Checkpoint::Finish => p1 + p2 + p3 + p4,
        }
    }
}

/// Cumulative elapsed seconds at every checkpoint for a finish duration.
pub fn elapsed_times(actual: f64, props: &ProportionVector, sub: &SubSegmentRatios) -> [f64; 8] {
    Checkpoint::ALL.map(|cp| actual * cp.cumulative_fraction(props, sub))
}

/// Per-checkpoint segment durations from cumulative elapsed times.
pub fn segment_durations(elapsed: &[f64; 8]) -> [f64; 8] {
    let mut segments = *elapsed;
    for i in 1..elapsed.len() {
        segments[i] = elapsed[i] - elapsed[i - 1];
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUB: SubSegmentRatios = SubSegmentRatios {
        windy_gap_in_p1: 0.55,
        dynamite_in_p2: 0.35,
        bottom_cardiac_in_p2: 0.7,
        steep_ravine_in_p3: 0.45,
    };
    const SD: BiasDeviation = BiasDeviation { p2: 0.008, p3: 0.008 };
    const BASE: ProportionVector = ProportionVector::new(0.215, 0.385, 0.255, 0.145);

    #[test]
    fn test_neutral_bias_is_identity() {
        assert_eq!(apply_bias(&BASE, 0.0, &SD), BASE);
        assert_eq!(checked_apply_bias(&BASE, 0.0, &SD).unwrap(), BASE);
    }

    #[test]
    fn test_bias_shifts_climb_and_descent() {
        let uphill = apply_bias(&BASE, -2.0, &SD);
        assert!(uphill.p2 < BASE.p2);
        assert!(uphill.p3 > BASE.p3);
        assert_eq!(uphill.p1, BASE.p1);
        assert_eq!(uphill.p4, BASE.p4);
        assert!((uphill.sum() - BASE.sum()).abs() < 1e-12);
    }

    #[test]
    fn test_checked_bias_rejects_negative_legs() {
        assert_eq!(
            checked_apply_bias(&BASE, 100.0, &SD),
            Err(ModelError::InvalidBias(100.0))
        );
        assert!(checked_apply_bias(&BASE, f64::INFINITY, &SD).is_err());
        assert!(checked_apply_bias(&BASE, 3.0, &SD).is_ok());
    }

    #[test]
    fn test_segment_keys_parse() {
        for key in SegmentKey::ALL {
            assert_eq!(key.as_str().parse::<SegmentKey>().unwrap(), key);
        }
    }

    #[test]
    fn test_unknown_segment_key_fails() {
        assert_eq!(
            "nowhere".parse::<SegmentKey>(),
            Err(ModelError::InvalidSegmentKey("nowhere".to_string()))
        );
    }

    #[test]
    fn test_fine_segments_sum_to_whole() {
        let total: f64 = SegmentKey::ALL[..8]
            .iter()
            .map(|key| segment_fraction(&BASE, *key, &SUB))
            .sum();
        assert!((total - BASE.sum()).abs() < 1e-12);

        let legs: f64 = SegmentKey::ALL[8..]
            .iter()
            .map(|key| segment_fraction(&BASE, *key, &SUB))
            .sum();
        assert!((legs - BASE.sum()).abs() < 1e-12);
    }

    #[test]
    fn test_segment_fraction_matches_checkpoint_differences() {
        let elapsed = elapsed_times(1.0, &BASE, &SUB);
        let segments = segment_durations(&elapsed);
        for (segment, key) in segments.iter().zip(&SegmentKey::ALL[..8]) {
            assert!((segment - segment_fraction(&BASE, *key, &SUB)).abs() < 1e-12);
        }
    }

    #[test]
    fn test_elapsed_times_non_decreasing() {
        let elapsed = elapsed_times(3600.0, &apply_bias(&BASE, 2.5, &SD), &SUB);
        assert!(elapsed.windows(2).all(|w| w[0] <= w[1]));
        assert!((elapsed[7] - 3600.0).abs() < 1e-9);
    }
}
