//! Travel-time text parsing and walking-time estimation.
//!
//! Routing services report durations as display text ("1 hour 5 mins").
//! Everything downstream compares whole minutes, with one sentinel value
//! standing in for "unreachable or unparseable" so that such entries sort
//! last without special cases.

use std::sync::LazyLock;

use regex::Regex;

/// Minutes value for durations that are unknown, unparseable or too long
/// to be worth considering.
pub const UNREACHABLE_MINUTES: u32 = 999_999;

/// Average walking speed (about 5 km/h).
pub const WALKING_SPEED_KM_PER_MIN: f64 = 0.083;

/// Multiplier applied to straight-line walking time for street routing.
pub const WALKING_OVERHEAD: f64 = 1.2;

/// Hour values above this make a single leg unreachable.
const MAX_HOURS: u32 = 2;

static DAYS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+)\s*d").expect("valid regex"));
static HOURS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*(?:h|hour|hours)").expect("valid regex"));
static MINUTES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*min").expect("valid regex"));

/// Parse a duration string such as `"1 hour 30 mins"` into minutes.
///
/// Returns [`UNREACHABLE_MINUTES`] for `"N/A"`, `"Calculating..."`, any
/// value with a day unit, hour values above 2, and text with no usable
/// number.
///
/// ```
/// use amenities_server::geo::{parse_duration_minutes, UNREACHABLE_MINUTES};
///
/// assert_eq!(parse_duration_minutes("1 hour 30 mins"), 90);
/// assert_eq!(parse_duration_minutes("3 hours"), UNREACHABLE_MINUTES);
/// ```
pub fn parse_duration_minutes(text: &str) -> u32 {
    if text == "N/A" || text == "Calculating..." {
        return UNREACHABLE_MINUTES;
    }

    let text = text.to_lowercase();

    if DAYS.is_match(&text) {
        return UNREACHABLE_MINUTES;
    }

    let mut total: u32 = 0;

    if let Some(caps) = HOURS.captures(&text) {
        let Ok(hours) = caps[1].parse::<u32>() else {
            return UNREACHABLE_MINUTES;
        };
        if hours > MAX_HOURS {
            return UNREACHABLE_MINUTES;
        }
        total += hours * 60;
    }

    if let Some(caps) = MINUTES.captures(&text) {
        let Ok(minutes) = caps[1].parse::<u32>() else {
            return UNREACHABLE_MINUTES;
        };
        total = total.saturating_add(minutes);
    }

    if total == 0 { UNREACHABLE_MINUTES } else { total }
}

/// Estimated walking minutes for a straight-line distance.
pub fn estimate_walking_minutes(distance_km: f64) -> u32 {
    let minutes = (distance_km / WALKING_SPEED_KM_PER_MIN * WALKING_OVERHEAD).round();
    if minutes <= 0.0 {
        0
    } else if minutes >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        minutes as u32
    }
}

/// Format minutes the way routing services do.
///
/// Values below one minute are shown as `"1 min"`.
pub fn format_minutes(minutes: u32) -> String {
    if minutes < 1 {
        return "1 min".to_string();
    }
    if minutes < 60 {
        return format!("{minutes} mins");
    }

    let hours = minutes / 60;
    let mins = minutes % 60;
    let unit = if hours > 1 { "hours" } else { "hour" };

    if mins == 0 {
        format!("{hours} {unit}")
    } else {
        format!("{hours} {unit} {mins} mins")
    }
}

/// Estimated walking time for a straight-line distance, as display text.
pub fn estimate_walking_time(distance_km: f64) -> String {
    format_minutes(estimate_walking_minutes(distance_km))
}
