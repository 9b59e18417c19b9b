//! Field simulation - generates a seeded field and scores the placement solver
//!
//! Run with:
//! ```
//! cargo run -p test-data --bin simulate
//! ```
//!
//! `SIM_SEED`, `SIM_RUNNERS` and `CALIBRATION_PATH` override the defaults.

use std::path::PathBuf;

use rand::{SeedableRng, rngs::StdRng};
use test_data::prelude::*;
use tracing_subscriber::EnvFilter;

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(default)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let calibration_path = std::env::var("CALIBRATION_PATH").ok().map(PathBuf::from);
    let calibration = Calibration::load(calibration_path.as_deref())?;

    let seed: u64 = env_or("SIM_SEED", 12345);
    let config = FieldConfig {
        runner_count: env_or("SIM_RUNNERS", 1502),
        ..Default::default()
    };

    let mut rng = StdRng::seed_from_u64(seed);
    let runners = FieldGenerator::with_config(config).generate(&calibration, &mut rng);
    tracing::info!(seed, runners = runners.len(), "Generated field");

    for key in SegmentKey::ALL {
        let summary = run_simulation(&calibration, &runners, &[key])?;
        tracing::info!(
            checkpoint = %key,
            mean_error = %format!("{:.1}", summary.mean_abs_place_error),
            max_error = summary.max_abs_place_error,
            within_25 = %format!("{:.1}%", summary.within_25_places * 100.0),
            "Solver accuracy"
        );
    }

    let overall = run_simulation(&calibration, &runners, &SegmentKey::ALL)?;
    println!("{}", serde_json::to_string_pretty(&overall)?);

    Ok(())
}
