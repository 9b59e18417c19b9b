use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Sex {
    #[serde(rename = "M", alias = "m")]
    Male,
    #[serde(rename = "F", alias = "f")]
    Female,
}

/// The two race sections. Runners in the Dipsea Runner section start after
/// the whole Invitational field, which shifts their clock times by a fixed
/// offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Section {
    #[serde(rename = "INV")]
    Invitational,
    #[serde(rename = "DR")]
    Runner,
}

impl Section {
    pub fn code(&self) -> &'static str {
        match self {
            Section::Invitational => "INV",
            Section::Runner => "DR",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Section::Invitational => "Invitational",
            Section::Runner => "Dipsea Runner",
        }
    }
}

/// Fraction of total race time spent in each of the four major legs:
/// start to Muir Woods, Muir Woods to Cardiac, Cardiac to the Stile, and
/// the Stile to the finish.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProportionVector {
    pub p1: f64,
    pub p2: f64,
    pub p3: f64,
    pub p4: f64,
}

impl ProportionVector {
    pub const fn new(p1: f64, p2: f64, p3: f64, p4: f64) -> Self {
        Self { p1, p2, p3, p4 }
    }

    pub fn sum(&self) -> f64 {
        self.p1 + self.p2 + self.p3 + self.p4
    }

    /// Componentwise linear blend toward `other`; `frac` of 0 returns `self`.
    pub fn lerp(&self, other: &ProportionVector, frac: f64) -> ProportionVector {
        ProportionVector {
            p1: self.p1 + frac * (other.p1 - self.p1),
            p2: self.p2 + frac * (other.p2 - self.p2),
            p3: self.p3 + frac * (other.p3 - self.p3),
            p4: self.p4 + frac * (other.p4 - self.p4),
        }
    }

    pub fn components(&self) -> [f64; 4] {
        [self.p1, self.p2, self.p3, self.p4]
    }
}

/// One row of the place to pacing-proportion reference table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierEntry {
    pub place: u32,
    #[serde(flatten)]
    pub proportions: ProportionVector,
}

/// Fixed ratios that split the four legs into the finer checkpoint segments.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubSegmentRatios {
    pub windy_gap_in_p1: f64,
    pub dynamite_in_p2: f64,
    pub bottom_cardiac_in_p2: f64,
    pub steep_ravine_in_p3: f64,
}

/// Per-unit-of-bias shift applied to the climbing (p2) and descending (p3) legs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BiasDeviation {
    pub p2: f64,
    pub p3: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HandicapInfo {
    pub handicap_minutes: u32,
    pub group: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TargetCategory {
    Winner,
    BlackShirt,
    Qualify,
    Standard,
}

/// A named placement the targets mode computes splits for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub key: String,
    pub label: String,
    pub category: TargetCategory,
    pub section: Section,
    /// Clock time in seconds that historically earned this placement.
    pub reference_clock: f64,
    /// Baseline pacing proportions at this placement.
    pub proportions: ProportionVector,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum BadgeKind {
    Win,
    Black,
    Qual,
    Miss,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Badge {
    pub label: String,
    pub kind: BadgeKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeTier {
    pub max_place: u32,
    pub label: String,
    pub kind: BadgeKind,
}

/// Start-line schedule: the hour every wave starts in, and the minute
/// a scratch (zero handicap) runner of each section leaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartSchedule {
    pub hour: u32,
    pub invitational_scratch_minute: u32,
    pub runner_scratch_minute: u32,
}

impl StartSchedule {
    pub fn scratch_minute(&self, section: Section) -> u32 {
        match section {
            Section::Invitational => self.invitational_scratch_minute,
            Section::Runner => self.runner_scratch_minute,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CheckpointLabel {
    pub short: String,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_endpoints() {
        let a = ProportionVector::new(0.2, 0.4, 0.3, 0.1);
        let b = ProportionVector::new(0.3, 0.3, 0.2, 0.2);
        assert_eq!(a.lerp(&b, 0.0), a);
        let mid = a.lerp(&b, 0.5);
        assert!((mid.p1 - 0.25).abs() < 1e-12);
        assert!((mid.p4 - 0.15).abs() < 1e-12);
    }

    #[test]
    fn test_section_serde_codes() {
        let inv: Section = serde_json::from_str("\"INV\"").unwrap();
        let dr: Section = serde_json::from_str("\"DR\"").unwrap();
        assert_eq!(inv, Section::Invitational);
        assert_eq!(dr, Section::Runner);
        assert_eq!(dr.code(), "DR");
    }

    #[test]
    fn test_tier_entry_flattens_proportions() {
        let tier: TierEntry =
            serde_json::from_str(r#"{"place": 100, "p1": 0.2, "p2": 0.4, "p3": 0.25, "p4": 0.15}"#)
                .unwrap();
        assert_eq!(tier.place, 100);
        assert!((tier.proportions.sum() - 1.0).abs() < 1e-12);
    }
}
