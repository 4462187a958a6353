use crate::error::{ReapError, Result};

/// Parse a size string like "500b", "10kb", "100mb" or "2gb" into bytes.
///
/// Input is trimmed and case-insensitive; whitespace between the number and
/// the unit is allowed. A unit is required.
pub fn parse_size(s: &str) -> Result<u64> {
    let normalized = s.trim().to_lowercase();

    let (num_part, suffix) = split_number_suffix(&normalized);
    if num_part.is_empty() {
        return Err(invalid(s, "No number found"));
    }

    let multiplier: u64 = match suffix.trim_start() {
        "b" => 1,
        "k" | "kb" => 1024,
        "m" | "mb" => 1024 * 1024,
        "g" | "gb" => 1024 * 1024 * 1024,
        "" => return Err(invalid(s, "Missing size unit")),
        other => return Err(invalid(s, &format!("Unknown size unit: {other}"))),
    };

    if let Ok(whole) = num_part.parse::<u64>() {
        return whole
            .checked_mul(multiplier)
            .ok_or_else(|| invalid(s, "Size is too large"));
    }

    let base: f64 = num_part
        .parse()
        .map_err(|_| invalid(s, "Invalid number format"))?;

    let bytes = base * multiplier as f64;
    // `as u64` would saturate silently
    if !bytes.is_finite() || bytes >= u64::MAX as f64 {
        return Err(invalid(s, "Size is too large"));
    }

    Ok(bytes as u64)
}

/// Split at the end of the leading run of digits and dots
fn split_number_suffix(s: &str) -> (&str, &str) {
    let split_pos = s
        .char_indices()
        .find(|(_, ch)| !ch.is_ascii_digit() && *ch != '.')
        .map_or(s.len(), |(i, _)| i);

    s.split_at(split_pos)
}

fn invalid(input: &str, reason: &str) -> ReapError {
    ReapError::InvalidSize {
        input: input.to_string(),
        reason: reason.to_string(),
    }
}

/// Format size in human-readable format, e.g. "8.04 KB" (base 1024)
pub fn format_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut size = bytes as f64;
    let mut unit_idx = 0;

    while size >= 1024.0 && unit_idx < UNITS.len() - 1 {
        size /= 1024.0;
        unit_idx += 1;
    }

    if unit_idx == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.2} {}", size, UNITS[unit_idx])
    }
}
