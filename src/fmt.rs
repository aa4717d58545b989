//! Shared formatting helpers for the render model.
//!
//! All pure formatting functions (no ratatui styles, no screen geometry)
//! live here.

/// Format byte count with a binary-magnitude suffix and one decimal.
///
/// `512` → `"512"`, `1536` → `"1.5K"`, `1073741824` → `"1.0G"`.
pub fn format_bytes(bytes: u64) -> String {
    let f = bytes as f64;
    if bytes >= 1024 * 1024 * 1024 {
        format!("{:.1}G", f / (1024.0 * 1024.0 * 1024.0))
    } else if bytes >= 1024 * 1024 {
        format!("{:.1}M", f / (1024.0 * 1024.0))
    } else if bytes >= 1024 {
        format!("{:.1}K", f / 1024.0)
    } else {
        format!("{}", bytes)
    }
}

/// Format a per-second rate with one decimal; non-finite values show `0.0`.
pub fn format_rate(rate: f64) -> String {
    if rate.is_finite() {
        format!("{:.1}", rate)
    } else {
        "0.0".to_string()
    }
}

/// Format a hit ratio with two decimals, `"n/a"` when undefined.
pub fn format_ratio(ratio: Option<f64>) -> String {
    match ratio {
        Some(r) if r.is_finite() => format!("{:.2}", r),
        _ => "n/a".to_string(),
    }
}

/// Format a raw counter or a rate depending on the display mode.
pub fn format_counter(value: u64, rate: f64, show_rates: bool) -> String {
    if show_rates {
        format_rate(rate)
    } else {
        value.to_string()
    }
}
