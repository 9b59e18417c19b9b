//! Pacing profiles.
//!
//! A profile describes where a runner tends to gain or lose time relative
//! to the field: on the climb to Cardiac or on the descent to the Stile.
//! Each profile samples the signed bias the splits model takes as input.

use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

/// Largest bias magnitude a profile will produce.
pub const MAX_SAMPLED_BIAS: f64 = splits::pacing::MAX_BIAS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PacingProfile {
    /// Strong on the climb, cautious on the descent.
    Climber,
    /// Paces like the reference field.
    Even,
    /// Gives time back on the climb and takes it on the descent.
    Descender,
}

impl PacingProfile {
    /// Centre of the bias distribution for this profile.
    pub fn mean_bias(&self) -> f64 {
        match self {
            PacingProfile::Climber => -1.5,
            PacingProfile::Even => 0.0,
            PacingProfile::Descender => 1.5,
        }
    }

    pub fn sample_bias(&self, rng: &mut impl Rng) -> f64 {
        match Normal::new(self.mean_bias(), 0.5) {
            Ok(normal) => normal
                .sample(rng)
                .clamp(-MAX_SAMPLED_BIAS, MAX_SAMPLED_BIAS),
            Err(_) => self.mean_bias(),
        }
    }
}

/// Relative share of each profile in a field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PacingMix {
    pub climber: f64,
    pub even: f64,
    pub descender: f64,
}

impl Default for PacingMix {
    fn default() -> Self {
        Self {
            climber: 0.25,
            even: 0.5,
            descender: 0.25,
        }
    }
}

impl PacingMix {
    pub fn sample(&self, rng: &mut impl Rng) -> PacingProfile {
        let total = self.climber + self.even + self.descender;
        if total <= 0.0 {
            return PacingProfile::Even;
        }
        let roll = rng.gen_range(0.0..total);
        if roll < self.climber {
            PacingProfile::Climber
        } else if roll < self.climber + self.even {
            PacingProfile::Even
        } else {
            PacingProfile::Descender
        }
    }
}
