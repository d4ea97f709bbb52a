//! Textual formatting of gate parameters.
//!
//! Angles that are small rational multiples of π print symbolically
//! (`pi/2`, `-3*pi/4`), everything else prints as the shortest decimal
//! that round-trips (`1.23`). Remote gate names such as
//! `acecr_mp_rx(pi/2)` or `zzswap(1.23)` depend on this exact text.

use std::f64::consts::PI;

/// Absolute tolerance used when matching a multiple of π.
const PI_EPSILON: f64 = 1e-9;

/// Largest denominator tried when matching `n*pi/d`.
const MAX_DENOMINATOR: u32 = 16;

/// Format a single angle.
pub fn format_angle(value: f64) -> String {
    if value == 0.0 {
        return "0".into();
    }
    if !value.is_finite() {
        return format!("{value}");
    }

    let ratio = value / PI;
    for denom in 1..=MAX_DENOMINATOR {
        let numer = ratio * f64::from(denom);
        let rounded = numer.round();
        if rounded != 0.0 && (numer - rounded).abs() < PI_EPSILON {
            #[allow(clippy::cast_possible_truncation)]
            return pi_fraction(rounded as i64, denom);
        }
    }

    format!("{value}")
}

fn pi_fraction(numer: i64, denom: u32) -> String {
    let sign = if numer < 0 { "-" } else { "" };
    let n = numer.unsigned_abs();
    match (n, denom) {
        (1, 1) => format!("{sign}pi"),
        (_, 1) => format!("{sign}{n}*pi"),
        (1, _) => format!("{sign}pi/{denom}"),
        _ => format!("{sign}{n}*pi/{denom}"),
    }
}

/// Format a parameter list as `p1,p2,...`.
pub fn format_params(params: &[f64]) -> String {
    params
        .iter()
        .map(|&p| format_angle(p))
        .collect::<Vec<_>>()
        .join(",")
}

/// Format `name` or `name(p1,p2,...)`.
pub fn qasm_name(name: &str, params: &[f64]) -> String {
    if params.is_empty() {
        name.to_string()
    } else {
        format!("{name}({})", format_params(params))
    }
}
