//! Shared numeric and text helpers.
//!
//! Yield figures are reported with 2 decimal places. Rounding goes through
//! `Decimal` so serialized figures never carry binary noise such as
//! `3.1500000000000004`.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

/// Round an f64 to 2 decimal places (half away from zero).
///
/// Returns 0.0 for non-finite inputs (NaN, ±Inf).
pub(crate) fn round_2dp(v: f64) -> f64 {
    if !v.is_finite() {
        tracing::warn!("round_2dp received non-finite value {}, defaulting to 0", v);
        return 0.0;
    }
    Decimal::from_f64(v)
        .map(|d| d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|d| d.to_f64())
        .unwrap_or(0.0)
}

/// `n` evenly spaced values from `start` to `stop`, both endpoints included.
///
/// The last value is exactly `stop`.
pub(crate) fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => vec![],
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { stop } else { start + step * i as f64 })
                .collect()
        }
    }
}

/// Title-case a label: the first letter of every alphabetic run is upper-cased,
/// the rest lower-cased ("new DELHI" → "New Delhi", "o'neil" → "O'Neil").
pub(crate) fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_2dp_normal() {
        assert_eq!(round_2dp(3.14159), 3.14);
        assert_eq!(round_2dp(2.0), 2.0);
    }

    #[test]
    fn test_round_2dp_negative() {
        assert_eq!(round_2dp(-2.346), -2.35);
    }

    #[test]
    fn test_round_2dp_non_finite() {
        assert_eq!(round_2dp(f64::NAN), 0.0);
        assert_eq!(round_2dp(f64::INFINITY), 0.0);
        assert_eq!(round_2dp(f64::NEG_INFINITY), 0.0);
    }

    #[test]
    fn test_linspace_endpoints() {
        let v = linspace(2.0, 4.0, 5);
        assert_eq!(v, vec![2.0, 2.5, 3.0, 3.5, 4.0]);
    }

    #[test]
    fn test_linspace_descending() {
        let v = linspace(4.0, 0.0, 3);
        assert_eq!(v, vec![4.0, 2.0, 0.0]);
    }

    #[test]
    fn test_linspace_degenerate() {
        assert!(linspace(1.0, 2.0, 0).is_empty());
        assert_eq!(linspace(1.0, 2.0, 1), vec![1.0]);
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("new DELHI"), "New Delhi");
        assert_eq!(title_case("pune-camp"), "Pune-Camp");
        assert_eq!(title_case("o'neil farm 2"), "O'Neil Farm 2");
    }
}
