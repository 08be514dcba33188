// File: crates/chart-core/src/format.rs
// Summary: Number and label formatting for ticks, tooltips, and treemap cells.

use num_format::{Locale, ToFormattedString};

// Beyond this u64 scaling overflows; f64 has no more precision anyway.
const MAX_DECIMALS: usize = 15;

/// Shortest round-trip decimal form (`10`, `12.5`, `NaN`).
pub fn plain(value: f64) -> String {
    format!("{value}")
}

/// Round half away from zero at `decimals` places (`4.25, 1` -> `4.3`).
pub fn round_half_up(value: f64, decimals: usize) -> f64 {
    let scale = 10f64.powi(decimals.min(MAX_DECIMALS) as i32);
    (value * scale).round() / scale
}

/// Fixed `decimals` with comma thousands grouping (`1234.5, 1` -> `1,234.5`).
pub fn grouped(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return plain(value);
    }
    let decimals = decimals.min(MAX_DECIMALS);
    let scale = 10u64.pow(decimals as u32);
    let units = (value.abs() * scale as f64).round() as u64;
    let (whole, frac) = (units / scale, units % scale);

    let mut out = String::new();
    if value < 0.0 && units > 0 {
        out.push('-');
    }
    out.push_str(&whole.to_formatted_string(&Locale::en));
    if decimals > 0 {
        out.push_str(&format!(".{frac:0decimals$}"));
    }
    out
}

/// Grouped with at most three fraction digits, trailing zeros dropped.
pub fn locale(value: f64) -> String {
    let s = grouped(value, 3);
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}

/// `$` plus the value rounded to whole units (`$100`).
pub fn currency_whole(value: f64) -> String {
    format!("${:.0}", round_half_up(value, 0))
}

/// `$` plus the locale-grouped value (`$12,500`).
pub fn currency_locale(value: f64) -> String {
    format!("${}", locale(value))
}

pub fn one_decimal(value: f64) -> String {
    format!("{:.1}", round_half_up(value, 1))
}

/// Tick label with just enough decimals to distinguish ticks `step` apart.
pub fn tick(value: f64, step: f64) -> String {
    let decimals = if step > 0.0 && step.is_finite() {
        (-step.log10().floor()).max(0.0) as usize
    } else {
        0
    };
    grouped(value, decimals)
}

/// Shorten `name` to three characters plus an ellipsis when `width` is
/// below `threshold`.
pub fn truncate_label(name: &str, width: f64, threshold: f64) -> String {
    if width < threshold {
        let head: String = name.chars().take(3).collect();
        format!("{head}...")
    } else {
        name.to_string()
    }
}
