//! Clock labels for the time display

/// Format seconds as `m:ss`
///
/// Minutes are unpadded, seconds are floored and padded to two digits.
/// Unknown (NaN/infinite), zero and negative values render as `0:00`.
pub fn format_clock(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return "0:00".to_string();
    }

    let whole = seconds.floor() as u64;
    format!("{}:{:02}", whole / 60, whole % 60)
}
