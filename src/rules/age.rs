use std::time::{Duration, SystemTime};

use crate::error::{ReapError, Result};

const MINUTE: u64 = 60;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;

/// Unit spellings and their length in seconds. Months and years are fixed
/// 30 and 365 day spans.
const UNITS: &[(&[&str], u64)] = &[
    (&["sec", "second", "seconds"], 1),
    (&["min", "minute", "minutes"], MINUTE),
    (&["hour", "hours"], HOUR),
    (&["day", "days"], DAY),
    (&["week", "weeks"], 7 * DAY),
    (&["month", "months"], 30 * DAY),
    (&["year", "years"], 365 * DAY),
];

/// Parse an age such as "2weeks" or "24 hours" into a cutoff relative to now.
///
/// See [`parse_age_at`].
pub fn parse_age(s: &str) -> Result<Option<SystemTime>> {
    parse_age_at(s, SystemTime::now())
}

/// Parse an age into the cutoff `now - age`.
///
/// Input without leading digits, including the empty string, yields
/// `Ok(None)`: no age constraint. Digits followed by an unknown unit fail
/// with [`ReapError::InvalidAge`].
pub fn parse_age_at(s: &str, now: SystemTime) -> Result<Option<SystemTime>> {
    let Some(age) = parse_duration(s)? else {
        return Ok(None);
    };

    Ok(Some(now.checked_sub(age).unwrap_or(SystemTime::UNIX_EPOCH)))
}

/// Parse an age into a duration, `None` when the input has no leading digits.
pub fn parse_duration(s: &str) -> Result<Option<Duration>> {
    let normalized = s.trim().to_lowercase();

    let unit_index = normalized
        .find(|ch: char| !ch.is_ascii_digit())
        .unwrap_or(normalized.len());
    if unit_index == 0 {
        return Ok(None);
    }

    let (digits, rest) = normalized.split_at(unit_index);
    let unit = rest.trim();

    let unknown_unit = || ReapError::InvalidAge {
        input: s.to_string(),
        unit: unit.to_string(),
    };

    let seconds_per_unit = UNITS
        .iter()
        .find(|(names, _)| names.contains(&unit))
        .map(|(_, secs)| *secs)
        .ok_or_else(unknown_unit)?;

    // A run of digits too long for u64 saturates rather than failing
    let count: u64 = digits.parse().unwrap_or(u64::MAX);

    Ok(Some(Duration::from_secs(
        count.saturating_mul(seconds_per_unit),
    )))
}
