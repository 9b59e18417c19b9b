//! Read-only calibration dataset: handicap tables, the clock to place
//! reference curve, pacing tiers, checkpoint sub-ratios and targets.
//!
//! The dataset is loaded once at startup, validated, and then shared
//! immutably by every computation.

use std::{collections::HashSet, fs, path::Path};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    errors::CalibrationError,
    interpolate::{Position, ReferenceCurve, locate, validate_breakpoints},
    models::{
        Badge, BadgeKind, BadgeTier, BiasDeviation, CheckpointLabel, HandicapInfo,
        ProportionVector, Section, Sex, StartSchedule, SubSegmentRatios, Target, TierEntry,
    },
    pacing::Checkpoint,
};

const EMBEDDED_DATASET: &str = include_str!("../data/calibration.json");

/// Youngest age with a published handicap.
pub const MIN_AGE: u32 = 6;
/// Oldest age with a published handicap.
pub const MAX_AGE: u32 = 100;

/// Inclusive age band sharing one handicap and group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandicapBand {
    pub min_age: u32,
    pub max_age: u32,
    pub minutes: u32,
    pub group: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandicapTables {
    pub male: Vec<HandicapBand>,
    pub female: Vec<HandicapBand>,
}

impl HandicapTables {
    fn for_sex(&self, sex: Sex) -> &[HandicapBand] {
        match sex {
            Sex::Male => &self.male,
            Sex::Female => &self.female,
        }
    }
}

/// Parallel arrays mapping clock seconds to overall finishing place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClockCurveData {
    pub clocks: Vec<f64>,
    pub places: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionBadges {
    /// Tiers in ascending `max_place` order; the first one that holds wins.
    pub tiers: Vec<BadgeTier>,
    /// Label used when no tier holds.
    pub miss: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeTables {
    pub invitational: SectionBadges,
    pub runner: SectionBadges,
}

/// The raw dataset as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationData {
    pub field_size: u32,
    /// Seconds between the scratch starts of the two sections.
    pub section_offset_seconds: f64,
    pub start_schedule: StartSchedule,
    pub bias_deviation: BiasDeviation,
    pub sub_ratios: SubSegmentRatios,
    pub clock_curve: ClockCurveData,
    pub tiers: Vec<TierEntry>,
    pub checkpoints: Vec<CheckpointLabel>,
    pub targets: Vec<Target>,
    pub badges: BadgeTables,
    pub handicaps: HandicapTables,
}

impl CalibrationData {
    /// The dataset compiled into the binary.
    pub fn embedded() -> Result<Self, CalibrationError> {
        Ok(serde_json::from_str(EMBEDDED_DATASET)?)
    }

    pub fn from_json_str(json: &str) -> Result<Self, CalibrationError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// A validated calibration dataset.
#[derive(Debug, Clone)]
pub struct Calibration {
    data: CalibrationData,
    clock_curve: ReferenceCurve,
    place_curve: ReferenceCurve,
    tier_places: Vec<f64>,
}

impl Calibration {
    pub fn embedded() -> Result<Self, CalibrationError> {
        Calibration::try_from(CalibrationData::embedded()?)
    }

    pub fn from_path(path: &Path) -> Result<Self, CalibrationError> {
        let json = fs::read_to_string(path)?;
        let calibration = Calibration::try_from(CalibrationData::from_json_str(&json)?)?;
        info!("Loaded calibration dataset from {}", path.display());
        Ok(calibration)
    }

    /// Loads `path` when given, otherwise the embedded dataset.
    pub fn load(path: Option<&Path>) -> Result<Self, CalibrationError> {
        match path {
            Some(path) => Calibration::from_path(path),
            None => {
                info!("Using embedded calibration dataset");
                Calibration::embedded()
            }
        }
    }

    pub fn data(&self) -> &CalibrationData {
        &self.data
    }

    pub fn field_size(&self) -> u32 {
        self.data.field_size
    }

    pub fn section_offset(&self) -> f64 {
        self.data.section_offset_seconds
    }

    pub fn sub_ratios(&self) -> &SubSegmentRatios {
        &self.data.sub_ratios
    }

    pub fn bias_deviation(&self) -> &BiasDeviation {
        &self.data.bias_deviation
    }

    pub fn start_schedule(&self) -> &StartSchedule {
        &self.data.start_schedule
    }

    pub fn checkpoint_label(&self, checkpoint: Checkpoint) -> &CheckpointLabel {
        &self.data.checkpoints[checkpoint.index()]
    }

    /// Handicap minutes and group for a runner, or `None` when the age is
    /// outside the published range or has no band for that sex.
    pub fn handicap(&self, sex: Sex, age: u32) -> Option<HandicapInfo> {
        if !(MIN_AGE..=MAX_AGE).contains(&age) {
            return None;
        }
        self.data
            .handicaps
            .for_sex(sex)
            .iter()
            .find(|band| (band.min_age..=band.max_age).contains(&age))
            .map(|band| HandicapInfo {
                handicap_minutes: band.minutes,
                group: band.group.clone(),
            })
    }

    /// Finish duration implied by a clock time for this handicap and section.
    pub fn actual_from_clock(&self, clock: f64, handicap_minutes: u32, section: Section) -> f64 {
        let actual = clock + f64::from(handicap_minutes) * 60.0;
        match section {
            Section::Invitational => actual,
            Section::Runner => actual - self.section_offset(),
        }
    }

    /// Clock time implied by a finish duration; inverse of [`Self::actual_from_clock`].
    pub fn clock_from_actual(&self, actual: f64, handicap_minutes: u32, section: Section) -> f64 {
        let clock = actual - f64::from(handicap_minutes) * 60.0;
        match section {
            Section::Invitational => clock,
            Section::Runner => clock + self.section_offset(),
        }
    }

    /// Approximate overall place for a clock time, rounded to the nearest integer.
    pub fn clock_to_place(&self, clock: f64) -> u32 {
        self.clock_curve.eval(clock).round().max(0.0) as u32
    }

    /// Reference clock time for a place; the inverse lookup of [`Self::clock_to_place`].
    pub fn place_to_clock(&self, place: f64) -> f64 {
        self.place_curve.eval(place)
    }

    /// Baseline pacing proportions for a place, interpolating each
    /// component between the surrounding tiers.
    pub fn proportions_for_place(&self, place: f64) -> ProportionVector {
        let tiers = &self.data.tiers;
        match locate(&self.tier_places, place) {
            Position::At(i) => tiers[i].proportions,
            Position::Between { lower, frac } => tiers[lower]
                .proportions
                .lerp(&tiers[lower + 1].proportions, frac),
        }
    }

    pub fn targets(&self) -> &[Target] {
        &self.data.targets
    }

    pub fn targets_for(&self, section: Section) -> impl Iterator<Item = &Target> {
        self.data
            .targets
            .iter()
            .filter(move |target| target.section == section)
    }

    pub fn target(&self, key: &str) -> Option<&Target> {
        self.data.targets.iter().find(|target| target.key == key)
    }

    /// Qualification badge for a predicted place in a section.
    pub fn badge(&self, section: Section, place: u32) -> Badge {
        let badges = match section {
            Section::Invitational => &self.data.badges.invitational,
            Section::Runner => &self.data.badges.runner,
        };
        badges
            .tiers
            .iter()
            .find(|tier| place <= tier.max_place)
            .map(|tier| Badge {
                label: tier.label.clone(),
                kind: tier.kind,
            })
            .unwrap_or_else(|| Badge {
                label: badges.miss.clone(),
                kind: BadgeKind::Miss,
            })
    }
}

impl TryFrom<CalibrationData> for Calibration {
    type Error = CalibrationError;

    fn try_from(data: CalibrationData) -> Result<Self, Self::Error> {
        let clock_curve =
            ReferenceCurve::new(data.clock_curve.clocks.clone(), data.clock_curve.places.clone())
                .map_err(|source| CalibrationError::Curve {
                    name: "clock",
                    source,
                })?;
        let place_curve = clock_curve
            .inverted()
            .map_err(|source| CalibrationError::Curve {
                name: "place",
                source,
            })?;

        let tier_places: Vec<f64> = data.tiers.iter().map(|t| f64::from(t.place)).collect();
        validate_breakpoints(&tier_places).map_err(|source| CalibrationError::Curve {
            name: "tier",
            source,
        })?;

        if data.checkpoints.len() != Checkpoint::ALL.len() {
            return Err(CalibrationError::Invalid(format!(
                "expected {} checkpoints, got {}",
                Checkpoint::ALL.len(),
                data.checkpoints.len()
            )));
        }

        validate_sub_ratios(&data.sub_ratios)?;
        validate_targets(&data.targets)?;

        if data.field_size == 0 {
            return Err(CalibrationError::Invalid("field size must be positive".into()));
        }
        if !data.section_offset_seconds.is_finite() {
            return Err(CalibrationError::Invalid(
                "section offset must be finite".into(),
            ));
        }
        for section in [&data.badges.invitational, &data.badges.runner] {
            if section.tiers.windows(2).any(|w| w[1].max_place < w[0].max_place) {
                return Err(CalibrationError::Invalid(
                    "badge tiers must be in ascending place order".into(),
                ));
            }
        }
        for band in data.handicaps.male.iter().chain(&data.handicaps.female) {
            if band.min_age > band.max_age {
                return Err(CalibrationError::Invalid(format!(
                    "handicap band {} has min age above max age",
                    band.group
                )));
            }
        }

        Ok(Self {
            data,
            clock_curve,
            place_curve,
            tier_places,
        })
    }
}

fn validate_sub_ratios(sub: &SubSegmentRatios) -> Result<(), CalibrationError> {
    let ratios = [
        sub.windy_gap_in_p1,
        sub.dynamite_in_p2,
        sub.bottom_cardiac_in_p2,
        sub.steep_ravine_in_p3,
    ];
    if ratios.iter().any(|r| !(0.0..=1.0).contains(r)) {
        return Err(CalibrationError::Invalid(
            "sub-segment ratios must lie in [0, 1]".into(),
        ));
    }
    if sub.dynamite_in_p2 > sub.bottom_cardiac_in_p2 {
        return Err(CalibrationError::Invalid(
            "Dynamite must come before the base of Cardiac".into(),
        ));
    }
    Ok(())
}

fn validate_targets(targets: &[Target]) -> Result<(), CalibrationError> {
    let mut keys = HashSet::new();
    for target in targets {
        if !keys.insert(target.key.as_str()) {
            return Err(CalibrationError::Invalid(format!(
                "duplicate target key {}",
                target.key
            )));
        }
        if !target.reference_clock.is_finite() {
            return Err(CalibrationError::Invalid(format!(
                "target {} has a non-finite clock",
                target.key
            )));
        }
    }
    Ok(())
}
