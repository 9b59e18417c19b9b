//! Synthetic race fields for the splits model.
//!
//! Generates runners with realistic ages, sections, finishing places and
//! pacing styles, derives the splits they would post at each checkpoint,
//! and measures how well the placement solver recovers their places.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use test_data::prelude::*;
//!
//! let calibration = Calibration::embedded()?;
//! let mut rng = StdRng::seed_from_u64(12345);
//! let runners = FieldGenerator::new().generate(&calibration, &mut rng);
//! let summary = run_simulation(&calibration, &runners, &SegmentKey::ALL)?;
//! ```

pub mod config;
pub mod generators;
pub mod profiles;
pub mod simulation;

pub use splits::{
    calibration::Calibration,
    models::{Section, Sex},
    pacing::SegmentKey,
};

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::config::{FieldConfig, SkillDistribution};
    pub use crate::generators::{FieldGenerator, GeneratedRunner};
    pub use crate::profiles::{PacingMix, PacingProfile};
    pub use crate::simulation::{PredictionSample, SimulationSummary, run_simulation};
    pub use crate::{Calibration, Section, SegmentKey, Sex};
    pub use rand::{SeedableRng, rngs::StdRng};
}
