use super::FormatError;

/// Share of the target collected, in percent, capped at 100. Overfunded
/// projects report 100.
pub fn progress_percent(current: i64, target: i64) -> Result<f64, FormatError> {
    if target <= 0 {
        return Err(FormatError::InvalidTarget(target));
    }
    if current < 0 {
        return Err(FormatError::InvalidAmount(current));
    }
    let percent = current as f64 / target as f64 * 100.0;
    Ok(percent.min(100.0))
}

// Half rounds away from zero, so 12.25 shows as 12.3.
fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Formats a fraction (`0.58`) as `"58.0%"`.
pub fn format_percent(fraction: f64) -> String {
    format_progress(fraction * 100.0)
}

/// Formats a value that is already a percentage (`58.0`) as `"58.0%"`.
pub fn format_progress(percent: f64) -> String {
    format!("{:.1}%", round_one_decimal(percent))
}
