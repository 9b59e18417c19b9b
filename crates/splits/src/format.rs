//! Display helpers for durations, deltas, start times and pacing bias.

use crate::{
    models::{Section, StartSchedule},
    targets::{DELTA_DEADBAND_SECONDS, DeltaKind},
};

/// Shown in place of a duration that is missing or not positive.
pub const PLACEHOLDER: &str = "---";

/// Shown in place of a delta inside the deadband.
pub const NEUTRAL_DELTA: &str = "\u{2014}";

/// `H:MM:SS` at an hour or more, `M:SS` below.
pub fn format_duration(seconds: Option<f64>) -> String {
    let seconds = match seconds {
        Some(s) if s > 0.0 => s.round() as u64,
        _ => return PLACEHOLDER.to_string(),
    };
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes}:{secs:02}")
    }
}

/// Signed `M:SS` delta, or the neutral marker inside the deadband.
pub fn format_delta(delta: f64) -> String {
    // Halves round toward positive infinity before the sign is dropped.
    let magnitude = (delta + 0.5).floor().abs() as u64;
    let body = format!("{}:{:02}", magnitude / 60, magnitude % 60);
    match DeltaKind::classify(delta) {
        DeltaKind::Neutral => NEUTRAL_DELTA.to_string(),
        DeltaKind::Faster => format!("-{body}"),
        DeltaKind::Slower => format!("+{body}"),
    }
}

/// Wall-clock start for a runner, e.g. `8:15` for a ten-minute head start
/// in the Invitational.
pub fn start_time(schedule: &StartSchedule, handicap_minutes: u32, section: Section) -> String {
    let minute = i64::from(schedule.scratch_minute(section)) - i64::from(handicap_minutes);
    let total = i64::from(schedule.hour) * 60 + minute;
    format!("{}:{:02}", total.div_euclid(60), total.rem_euclid(60))
}

/// Total seconds from hour, minute and second fields.
pub fn split_seconds(hours: u32, minutes: u32, seconds: u32) -> f64 {
    f64::from(hours) * 3600.0 + f64::from(minutes) * 60.0 + f64::from(seconds)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BiasDescription {
    /// "Neutral", or strength and direction such as "Strong uphill".
    pub label: String,
    /// Which legs run faster and slower; absent at neutral.
    pub detail: Option<String>,
}

pub fn describe_bias(bias: f64) -> BiasDescription {
    if bias == 0.0 {
        return BiasDescription {
            label: "Neutral".to_string(),
            detail: None,
        };
    }

    let magnitude = bias.abs();
    let strength = if magnitude >= 2.0 {
        "Strong"
    } else if magnitude >= 1.0 {
        "Moderate"
    } else {
        "Slight"
    };
    let (direction, climb, descent) = if bias < 0.0 {
        ("uphill", "Faster", "Slower")
    } else {
        ("downhill", "Slower", "Faster")
    };

    BiasDescription {
        label: format!("{strength} {direction}"),
        detail: Some(format!(
            "{climb} Muir\u{2192}Cardiac, {descent} Cardiac\u{2192}Stile"
        )),
    }
}
