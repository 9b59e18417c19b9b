//! Configuration types for synthetic field generation.

use serde::{Deserialize, Serialize};

use crate::profiles::PacingMix;

/// Distribution of finishing ability across the field.
///
/// Samples a percentile in `[0, 1]` where 0 is the front of the field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SkillDistribution {
    /// Every place equally likely.
    Uniform,
    /// Normal around `mean` percentile, clamped to the field.
    Normal { mean: f64, std_dev: f64 },
    /// Power-law distribution - few at the front, most in the back half.
    PowerLaw { alpha: f64 },
}

impl Default for SkillDistribution {
    fn default() -> Self {
        Self::Uniform
    }
}

impl SkillDistribution {
    /// Creates a power-law distribution with default parameters.
    pub fn power_law() -> Self {
        Self::PowerLaw { alpha: 2.0 }
    }
}

/// Configuration for a generated field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldConfig {
    /// Number of runners to generate.
    pub runner_count: usize,

    /// Probability a runner is female.
    pub female_fraction: f64,

    /// Mean and standard deviation of runner age in years.
    pub age_mean: f64,
    pub age_std_dev: f64,

    /// Probability a runner is in the Dipsea Runner section rather than the Invitational.
    pub runner_section_fraction: f64,

    /// How finishing places are spread.
    pub skill_distribution: SkillDistribution,

    /// Share of climbers, even pacers and descenders.
    pub pacing_mix: PacingMix,

    /// Coefficient of variation applied to each leg's share of the race.
    /// Zero yields runners that pace exactly like the model.
    pub leg_noise: f64,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            runner_count: 1502,
            female_fraction: 0.4,
            age_mean: 42.0,
            age_std_dev: 14.0,
            runner_section_fraction: 0.5,
            skill_distribution: SkillDistribution::Uniform,
            pacing_mix: PacingMix::default(),
            leg_noise: 0.03,
        }
    }
}

impl FieldConfig {
    /// A field whose runners follow the model exactly.
    pub fn noiseless(runner_count: usize) -> Self {
        Self {
            runner_count,
            leg_noise: 0.0,
            ..Default::default()
        }
    }
}
