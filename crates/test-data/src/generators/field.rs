//! Runner generation with handicaps, sections and pacing styles.

use rand::Rng;
use rand_distr::{Distribution, LogNormal, Normal};
use splits::{
    calibration::{Calibration, MAX_AGE, MIN_AGE},
    models::{ProportionVector, Section, Sex},
    pacing::{SegmentKey, checked_apply_bias, segment_fraction},
};

use crate::config::{FieldConfig, SkillDistribution};
use crate::profiles::PacingProfile;

/// A synthetic runner and the race they ran.
#[derive(Debug, Clone)]
pub struct GeneratedRunner {
    pub bib: usize,
    pub sex: Sex,
    pub age: u32,
    pub section: Section,
    pub handicap_minutes: u32,
    pub group: String,
    pub profile: PacingProfile,
    pub bias: f64,
    /// Place the runner finished in.
    pub place: u32,
    pub clock_seconds: f64,
    pub actual_seconds: f64,
    /// The runner's own leg proportions, bias and noise included.
    pub proportions: ProportionVector,
}

impl GeneratedRunner {
    /// Seconds this runner spent on one segment.
    pub fn split(&self, calibration: &Calibration, key: SegmentKey) -> f64 {
        self.actual_seconds * segment_fraction(&self.proportions, key, calibration.sub_ratios())
    }
}

/// Generates runners whose splits follow the calibration dataset.
pub struct FieldGenerator {
    config: FieldConfig,
}

impl Default for FieldGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldGenerator {
    /// Creates a new field generator with default configuration.
    pub fn new() -> Self {
        Self {
            config: FieldConfig::default(),
        }
    }

    /// Creates a generator with custom configuration.
    pub fn with_config(config: FieldConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Generates the configured number of runners. Runners whose finish
    /// time would be non-positive are skipped.
    pub fn generate(&self, calibration: &Calibration, rng: &mut impl Rng) -> Vec<GeneratedRunner> {
        let runners: Vec<GeneratedRunner> = (1..=self.config.runner_count)
            .filter_map(|bib| self.generate_single(calibration, bib, rng))
            .collect();
        tracing::debug!(
            requested = self.config.runner_count,
            generated = runners.len(),
            "Generated field"
        );
        runners
    }

    /// Generates one runner, or `None` when the sampled runner has no
    /// handicap or could not finish in positive time.
    pub fn generate_single(
        &self,
        calibration: &Calibration,
        bib: usize,
        rng: &mut impl Rng,
    ) -> Option<GeneratedRunner> {
        let sex = if rng.gen_bool(self.config.female_fraction.clamp(0.0, 1.0)) {
            Sex::Female
        } else {
            Sex::Male
        };
        let age = self.sample_age(rng);
        let handicap = calibration.handicap(sex, age)?;
        let section = if rng.gen_bool(self.config.runner_section_fraction.clamp(0.0, 1.0)) {
            Section::Runner
        } else {
            Section::Invitational
        };

        let field = f64::from(calibration.field_size().max(1));
        let percentile = self.sample_percentile(rng);
        let clock = calibration.place_to_clock(1.0 + percentile * (field - 1.0));
        let place = calibration.clock_to_place(clock);
        let actual = calibration.actual_from_clock(clock, handicap.handicap_minutes, section);
        if actual <= 0.0 {
            return None;
        }

        let profile = self.config.pacing_mix.sample(rng);
        let bias = profile.sample_bias(rng);
        let base = calibration.proportions_for_place(f64::from(place));
        let biased = checked_apply_bias(&base, bias, calibration.bias_deviation()).ok()?;
        let proportions = self.perturb_legs(&biased, rng);

        Some(GeneratedRunner {
            bib,
            sex,
            age,
            section,
            handicap_minutes: handicap.handicap_minutes,
            group: handicap.group,
            profile,
            bias,
            place,
            clock_seconds: clock,
            actual_seconds: actual,
            proportions,
        })
    }

    fn sample_age(&self, rng: &mut impl Rng) -> u32 {
        let age = match Normal::new(self.config.age_mean, self.config.age_std_dev) {
            Ok(normal) => normal.sample(rng),
            Err(_) => self.config.age_mean,
        };
        (age.round() as i64).clamp(i64::from(MIN_AGE), i64::from(MAX_AGE)) as u32
    }

    fn sample_percentile(&self, rng: &mut impl Rng) -> f64 {
        match self.config.skill_distribution {
            SkillDistribution::Uniform => rng.gen_range(0.0..=1.0),
            SkillDistribution::Normal { mean, std_dev } => match Normal::new(mean, std_dev) {
                Ok(normal) => normal.sample(rng).clamp(0.0, 1.0),
                Err(_) => mean.clamp(0.0, 1.0),
            },
            SkillDistribution::PowerLaw { alpha } => {
                let u: f64 = rng.gen_range(0.0..=1.0);
                u.powf(1.0 / alpha.max(f64::EPSILON))
            }
        }
    }

    /// Scales each leg by a log-normal factor, then renormalises so the legs
    /// still account for the whole race.
    fn perturb_legs(&self, props: &ProportionVector, rng: &mut impl Rng) -> ProportionVector {
        if self.config.leg_noise <= 0.0 {
            return *props;
        }
        let Ok(noise) = LogNormal::new(0.0, self.config.leg_noise) else {
            return *props;
        };
        let scaled = ProportionVector::new(
            props.p1 * noise.sample(rng),
            props.p2 * noise.sample(rng),
            props.p3 * noise.sample(rng),
            props.p4 * noise.sample(rng),
        );
        let scale = props.sum() / scaled.sum();
        ProportionVector::new(
            scaled.p1 * scale,
            scaled.p2 * scale,
            scaled.p3 * scale,
            scaled.p4 * scale,
        )
    }
}
