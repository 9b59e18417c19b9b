//! Runs the placement solver over a generated field and scores it.

use serde::Serialize;
use splits::{
    calibration::Calibration, errors::ModelError, pacing::SegmentKey, prediction::predict,
};

use crate::generators::GeneratedRunner;

/// One solver run against a known finisher.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionSample {
    pub bib: usize,
    pub key: SegmentKey,
    pub split_seconds: f64,
    pub true_place: u32,
    pub predicted_place: u32,
}

impl PredictionSample {
    pub fn place_error(&self) -> u32 {
        self.true_place.abs_diff(self.predicted_place)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SimulationSummary {
    pub runners: usize,
    pub predictions: usize,
    pub mean_abs_place_error: f64,
    pub max_abs_place_error: u32,
    /// Share of predictions within 25 places of the true finish.
    pub within_25_places: f64,
}

impl SimulationSummary {
    pub fn from_samples(runners: usize, samples: &[PredictionSample]) -> Self {
        let errors: Vec<u32> = samples.iter().map(PredictionSample::place_error).collect();
        let count = errors.len().max(1) as f64;
        Self {
            runners,
            predictions: samples.len(),
            mean_abs_place_error: errors.iter().map(|e| f64::from(*e)).sum::<f64>() / count,
            max_abs_place_error: errors.iter().copied().max().unwrap_or(0),
            within_25_places: errors.iter().filter(|e| **e <= 25).count() as f64 / count,
        }
    }
}

/// Predicts every runner's place from each of `keys` and summarises the error.
pub fn run_simulation(
    calibration: &Calibration,
    runners: &[GeneratedRunner],
    keys: &[SegmentKey],
) -> Result<SimulationSummary, ModelError> {
    let samples = predict_field(calibration, runners, keys)?;
    Ok(SimulationSummary::from_samples(runners.len(), &samples))
}

pub fn predict_field(
    calibration: &Calibration,
    runners: &[GeneratedRunner],
    keys: &[SegmentKey],
) -> Result<Vec<PredictionSample>, ModelError> {
    let mut samples = Vec::with_capacity(runners.len() * keys.len());
    for runner in runners {
        for key in keys {
            let split_seconds = runner.split(calibration, *key);
            let prediction = predict(
                calibration,
                split_seconds,
                *key,
                runner.handicap_minutes,
                runner.section,
                runner.bias,
            )?;
            samples.push(PredictionSample {
                bib: runner.bib,
                key: *key,
                split_seconds,
                true_place: runner.place,
                predicted_place: prediction.place,
            });
        }
    }
    Ok(samples)
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::{config::FieldConfig, generators::FieldGenerator};

    #[test]
    fn test_noiseless_field_is_recovered() {
        let calibration = Calibration::embedded().unwrap();
        let generator = FieldGenerator::with_config(FieldConfig::noiseless(200));
        let runners = generator.generate(&calibration, &mut StdRng::seed_from_u64(12345));

        let summary = run_simulation(&calibration, &runners, &SegmentKey::ALL).unwrap();
        assert_eq!(summary.predictions, runners.len() * SegmentKey::ALL.len());
        assert!(summary.mean_abs_place_error < 3.0, "{summary:?}");
        assert!(summary.within_25_places > 0.99, "{summary:?}");
    }

    #[test]
    fn test_noisy_field_still_tracks_place() {
        let calibration = Calibration::embedded().unwrap();
        let generator = FieldGenerator::with_config(FieldConfig {
            runner_count: 200,
            ..Default::default()
        });
        let runners = generator.generate(&calibration, &mut StdRng::seed_from_u64(99));

        let summary = run_simulation(
            &calibration,
            &runners,
            &[SegmentKey::StartToMuirWoods, SegmentKey::MuirWoodsToCardiac],
        )
        .unwrap();
        // Leg noise of a few percent moves a mid-pack runner by tens of places.
        assert!(summary.mean_abs_place_error < 150.0, "{summary:?}");
    }

    #[test]
    fn test_summary_of_no_samples() {
        let summary = SimulationSummary::from_samples(0, &[]);
        assert_eq!(summary.predictions, 0);
        assert_eq!(summary.max_abs_place_error, 0);
        assert_eq!(summary.mean_abs_place_error, 0.0);
    }
}
