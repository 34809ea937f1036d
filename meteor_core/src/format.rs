// Copyright 2026 the Meteor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fixed-decimal display of dynamic values.
//!
//! Simulation results arrive as loosely typed JSON: a quantity may be a
//! number, a numeric string, `null`, or missing entirely. [`format_number`]
//! renders any of these as a fixed-decimal string, or [`NOT_AVAILABLE`] when
//! the value has no finite numeric reading.

use serde_json::Value;

/// Marker shown in place of a non-finite or non-numeric value.
pub const NOT_AVAILABLE: &str = "N/A";

/// Decimal places used by [`format_default`].
pub const DEFAULT_DECIMALS: usize = 2;

/// A value that can be read as an `f64` for display.
///
/// Returning `None` means the value is not coercible; the formatter treats
/// that the same as a non-finite result.
pub trait Numeric {
    /// Returns the numeric reading of this value, if any.
    fn to_number(&self) -> Option<f64>;
}

impl Numeric for f64 {
    fn to_number(&self) -> Option<f64> {
        Some(*self)
    }
}

impl Numeric for f32 {
    fn to_number(&self) -> Option<f64> {
        Some(f64::from(*self))
    }
}

macro_rules! impl_numeric_lossless {
    ($($ty:ty),*) => {
        $(
            impl Numeric for $ty {
                fn to_number(&self) -> Option<f64> {
                    Some(f64::from(*self))
                }
            }
        )*
    };
}

impl_numeric_lossless!(i8, i16, i32, u8, u16, u32);

impl Numeric for i64 {
    fn to_number(&self) -> Option<f64> {
        Some(*self as f64)
    }
}

impl Numeric for u64 {
    fn to_number(&self) -> Option<f64> {
        Some(*self as f64)
    }
}

impl Numeric for str {
    fn to_number(&self) -> Option<f64> {
        let trimmed = self.trim();
        if trimmed.is_empty() {
            return None;
        }
        trimmed.parse().ok()
    }
}

impl Numeric for String {
    fn to_number(&self) -> Option<f64> {
        self.as_str().to_number()
    }
}

impl Numeric for Value {
    fn to_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => n.as_f64(),
            Self::String(s) => s.to_number(),
            Self::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Self::Null | Self::Array(_) | Self::Object(_) => None,
        }
    }
}

impl<T: Numeric> Numeric for Option<T> {
    fn to_number(&self) -> Option<f64> {
        self.as_ref().and_then(Numeric::to_number)
    }
}

impl<T: Numeric + ?Sized> Numeric for &T {
    fn to_number(&self) -> Option<f64> {
        (**self).to_number()
    }
}

/// Formats `value` with exactly `decimals` fractional digits.
///
/// Returns [`NOT_AVAILABLE`] when the value cannot be coerced or coerces to a
/// non-finite number. Exact halfway cases round away from zero, so
/// `format_number(2.5, 0)` is `"3"`.
#[must_use]
pub fn format_number(value: impl Numeric, decimals: usize) -> String {
    match value.to_number() {
        Some(n) if n.is_finite() => format!("{:.*}", decimals, round_half_away(n, decimals)),
        _ => NOT_AVAILABLE.to_owned(),
    }
}

/// Formats `value` with [`DEFAULT_DECIMALS`] fractional digits.
#[must_use]
pub fn format_default(value: impl Numeric) -> String {
    format_number(value, DEFAULT_DECIMALS)
}

/// Extra digits printed when checking for an exact tie. A non-tie `f64`
/// differs from the nearest tie within about 17 significant digits.
const TIE_DIGITS: usize = 30;

/// Nudges exact ties so `{:.N}` (which rounds ties to even) rounds them away
/// from zero instead.
///
/// A tie is judged on the exact decimal expansion of `n`, not on `n * 10^N`,
/// which may itself round onto a tie.
fn round_half_away(n: f64, decimals: usize) -> f64 {
    if !is_exact_tie(n, decimals) {
        return n;
    }
    let Ok(exp) = i32::try_from(decimals) else {
        return n;
    };
    let scale = 10_f64.powi(exp);
    (n * scale).round() / scale
}

/// Whether the digits of `n` past `decimals` are exactly `5` then zeros.
fn is_exact_tie(n: f64, decimals: usize) -> bool {
    let expansion = format!("{:.*}", decimals + TIE_DIGITS, n.abs());
    let Some(dot) = expansion.find('.') else {
        return false;
    };
    expansion[dot + 1 + decimals..]
        .strip_prefix('5')
        .is_some_and(|rest| rest.bytes().all(|b| b == b'0'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn formats_with_requested_precision() {
        assert_eq!(format_number(3.14159, 2), "3.14");
        assert_eq!(format_number("7", 0), "7");
        assert_eq!(format_number(1_500_000_u32, 1), "1500000.0");
        assert_eq!(format_default(-0.5), "-0.50");
    }

    #[test]
    fn non_finite_and_non_coercible_are_not_available() {
        for decimals in [0, 2, 6] {
            assert_eq!(format_number(f64::NAN, decimals), NOT_AVAILABLE);
            assert_eq!(format_number(f64::INFINITY, decimals), NOT_AVAILABLE);
            assert_eq!(format_number(f64::NEG_INFINITY, decimals), NOT_AVAILABLE);
            assert_eq!(format_number("abc", decimals), NOT_AVAILABLE);
            assert_eq!(format_number("", decimals), NOT_AVAILABLE);
            assert_eq!(format_number("Infinity", decimals), NOT_AVAILABLE);
            assert_eq!(format_number(&Value::Null, decimals), NOT_AVAILABLE);
            assert_eq!(format_number(&json!([1, 2]), decimals), NOT_AVAILABLE);
            assert_eq!(format_number(None::<f64>, decimals), NOT_AVAILABLE);
        }
    }

    #[test]
    fn json_values_coerce_like_the_wire_format() {
        assert_eq!(format_number(&json!(12.345), 1), "12.3");
        assert_eq!(format_number(&json!(" 42 "), 0), "42");
        assert_eq!(format_number(&json!(true), 0), "1");
        assert_eq!(format_number(&json!({"a": 1}), 2), NOT_AVAILABLE);
    }

    #[test]
    fn ties_round_away_from_zero() {
        assert_eq!(format_number(2.5, 0), "3");
        assert_eq!(format_number(-2.5, 0), "-3");
        assert_eq!(format_number(0.125, 2), "0.13");
        // Not exact ties in binary; ordinary rounding applies.
        assert_eq!(format_number(1.005, 2), "1.00");
        assert_eq!(format_number(1.115, 2), "1.11");
        assert_eq!(format_number(-1.115, 2), "-1.11");
    }

    #[test]
    fn option_values_delegate() {
        assert_eq!(format_number(Some(1.0), 3), "1.000");
        assert_eq!(format_number(Some("2.25".to_owned()), 1), "2.3");
    }
}
