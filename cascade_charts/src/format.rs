// Copyright 2026 the Cascade Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Label and tick formatting.

/// Formats a value as a currency label in thousands: `17000.0` becomes
/// `"$17k"`, `17500.0` becomes `"$17.5k"`.
///
/// If the scaled number starts with a minus sign, the sign is relocated
/// before the `$` (`"-$14k"`, never `"$-14k"`). The division is printed
/// minimally, with no explicit rounding.
pub fn currency_label(value: f64) -> String {
    let label = format!("{}k", value / 1000.0);
    match label.strip_prefix('-') {
        Some(rest) => format!("-${rest}"),
        None => format!("${label}"),
    }
}

/// Formats an axis tick value using the tick step for consistent decimals.
///
/// With a positive finite `step`, the number of decimal places is derived
/// from the step's magnitude so that adjacent ticks print distinctly but
/// without noise (`step = 0.5` gives one decimal, `step = 1000` gives none).
/// Otherwise the value is printed minimally.
pub fn format_tick_with_step(v: f64, step: f64) -> String {
    if !step.is_finite() || step <= 0.0 {
        return format!("{v}");
    }
    let decimals = (-step.log10().floor()).clamp(0.0, 12.0);
    #[allow(
        clippy::cast_possible_truncation,
        reason = "clamped to a small non-negative range"
    )]
    let decimals = decimals as usize;
    format!("{v:.decimals$}")
}
