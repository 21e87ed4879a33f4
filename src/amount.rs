//! Exact decimal amounts and the numeric coercion rules for untyped input.
//!
//! Inputs arrive as arbitrary JSON values. `coerce` is the single gate that
//! turns them into an `Amount`; booleans, nulls, empty strings and
//! non-scalar values are refused instead of silently becoming `1` or `0`.

use crate::error::CoercionError;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::str::FromStr;

/// Largest number of fractional digits a `Decimal` can hold.
const MAX_SCALE: u32 = 28;

/// A monetary amount backed by `rust_decimal`.
///
/// Values are kept normalized (no trailing zeros, no negative zero), so
/// `Display` prints `1150` rather than `1150.0000`.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use ledger_processor::Amount;
///
/// let amount = Amount::from_str(" 10.50 ").unwrap();
/// assert_eq!(amount.to_string(), "10.5");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(Decimal);

impl Amount {
    /// Zero value.
    pub const ZERO: Self = Amount(Decimal::ZERO);

    /// Creates a new `Amount`, normalizing the decimal representation.
    pub fn new(value: Decimal) -> Self {
        if value.is_zero() {
            Amount::ZERO
        } else {
            Amount(value.normalize())
        }
    }

    /// Returns `true` if this value is strictly greater than zero.
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Returns `true` if this value is strictly less than zero.
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Adds two amounts, returning `None` if the sum leaves the decimal range.
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Amount::new)
    }
}

/// Interprets an arbitrary value as a finite number.
///
/// Accepted: JSON numbers within the decimal range, and strings holding a
/// plain (`"-12.5"`) or scientific (`"1e3"`) decimal, surrounding whitespace
/// ignored. Values that cannot be held exactly (more than 28 fractional
/// digits, or beyond `Decimal::MAX`) are refused rather than rounded.
/// Everything else is a `CoercionError`.
pub fn coerce(value: &Value) -> Result<Amount, CoercionError> {
    match value {
        Value::Null => Err(CoercionError::Null),
        Value::Bool(_) => Err(CoercionError::Boolean),
        Value::Number(number) => Amount::from_str(&number.to_string()),
        Value::String(text) => Amount::from_str(text),
        Value::Array(_) | Value::Object(_) => Err(CoercionError::NotScalar),
    }
}

impl FromStr for Amount {
    type Err = CoercionError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(CoercionError::EmptyString);
        }

        // rust_decimal tolerates digit separators; plain numeric text does not.
        let numeric_chars = trimmed
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'));
        if !numeric_chars {
            return Err(CoercionError::Unparseable(trimmed.to_string()));
        }

        parse_exact(trimmed)
            .map(Amount::new)
            .ok_or_else(|| CoercionError::Unparseable(trimmed.to_string()))
    }
}

/// Parses plain or scientific decimal text without rounding.
///
/// The exponent is folded into the mantissa/scale pair directly, so every
/// notation of the same value is either accepted exactly or refused.
fn parse_exact(text: &str) -> Option<Decimal> {
    let (mantissa, exponent) = match text.split_once(|c: char| c == 'e' || c == 'E') {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i32>().ok()?),
        None => (text, 0),
    };

    let base = Decimal::from_str_exact(mantissa).ok()?;
    if base.is_zero() {
        return Some(Decimal::ZERO);
    }

    let mut digits = base.mantissa();
    let mut scale = i64::from(base.scale()) - i64::from(exponent);

    while scale < 0 {
        digits = digits.checked_mul(10)?;
        scale += 1;
    }
    while scale > i64::from(MAX_SCALE) && digits % 10 == 0 {
        digits /= 10;
        scale -= 1;
    }

    let scale = u32::try_from(scale).ok()?;
    Decimal::try_from_i128_with_scale(digits, scale).ok()
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add for Amount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Amount::new(self.0 + rhs.0)
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Amount {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Amount::new(self.0 - rhs.0)
    }
}

impl SubAssign for Amount {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        coerce(&value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn amt(s: &str) -> Amount {
        Amount::from_str(s).unwrap()
    }

    #[test]
    fn test_from_str_normalizes() {
        assert_eq!(amt("1000").to_string(), "1000");
        assert_eq!(amt("1.500").to_string(), "1.5");
        assert_eq!(amt("  2.5  ").to_string(), "2.5");
        assert_eq!(amt("-0").to_string(), "0");
    }

    #[test]
    fn test_from_str_accepts_scientific_notation() {
        assert_eq!(amt("1e3"), amt("1000"));
        assert_eq!(amt("2.5e-2"), amt("0.025"));
    }

    #[test]
    fn test_exponent_folds_into_scale() {
        assert_eq!(amt("1.5e1"), amt("15"));
        assert_eq!(amt("-1e3"), amt("-1000"));
        assert_eq!(amt("0e999999"), Amount::ZERO);
        assert_eq!(amt("100e-29"), amt("0.000000000000000000000000001"));
    }

    #[test]
    fn test_precision_loss_is_refused_in_every_notation() {
        let tiny = "0.00000000000000000000000000001";
        assert_eq!(tiny.len() - 2, 29);

        for value in [json!(tiny), json!("1e-29"), json!("5e-29"), json!(1e-29)] {
            assert!(
                matches!(coerce(&value), Err(CoercionError::Unparseable(_))),
                "{} should be refused",
                value
            );
        }
        assert!(amt("1e-28").is_positive());
        assert!(amt("0.0000000000000000000000000001").is_positive());
    }

    #[test]
    fn test_out_of_range_text_is_refused() {
        assert!(Amount::from_str("79228162514264337593543950336").is_err());
        assert!(Amount::from_str("8e28").is_err());
        assert!(Amount::from_str("1e").is_err());
        assert!(Amount::from_str("e5").is_err());
        assert!(Amount::from_str("1e3e4").is_err());
    }

    #[test]
    fn test_from_str_rejects_non_numeric_text() {
        for text in ["xyz", "12abc", "Infinity", "NaN", "0x10", "1_000", "1,5"] {
            assert!(
                matches!(Amount::from_str(text), Err(CoercionError::Unparseable(_))),
                "{} should not parse",
                text
            );
        }
    }

    #[test]
    fn test_coerce_strings_and_numbers() {
        assert_eq!(coerce(&json!("200")), Ok(amt("200")));
        assert_eq!(coerce(&json!(" -5 ")), Ok(amt("-5")));
        assert_eq!(coerce(&json!(50)), Ok(amt("50")));
        assert_eq!(coerce(&json!(0.1)), Ok(amt("0.1")));
    }

    #[test]
    fn test_coerce_refuses_implicit_conversions() {
        assert_eq!(coerce(&json!(true)), Err(CoercionError::Boolean));
        assert_eq!(coerce(&json!(false)), Err(CoercionError::Boolean));
        assert_eq!(coerce(&Value::Null), Err(CoercionError::Null));
        assert_eq!(coerce(&json!("")), Err(CoercionError::EmptyString));
        assert_eq!(coerce(&json!("   ")), Err(CoercionError::EmptyString));
        assert_eq!(coerce(&json!([5])), Err(CoercionError::NotScalar));
        assert_eq!(coerce(&json!({"value": 5})), Err(CoercionError::NotScalar));
    }

    #[test]
    fn test_coerce_rejects_out_of_range_numbers() {
        assert!(matches!(
            coerce(&json!(1e300)),
            Err(CoercionError::Unparseable(_))
        ));
    }

    #[test]
    fn test_arithmetic_and_ordering() {
        let a = amt("1.5");
        let b = amt("2.5");

        assert_eq!((a + b).to_string(), "4");
        assert_eq!((b - a).to_string(), "1");
        assert_eq!((a - b).to_string(), "-1");
        assert!(b > a);
        assert!((a - b).is_negative());
        assert!(a.is_positive());
        assert!(!Amount::ZERO.is_positive());
        assert!(!Amount::ZERO.is_negative());
    }

    #[test]
    fn test_checked_add_detects_overflow() {
        let max = Amount::new(Decimal::MAX);
        assert_eq!(max.checked_add(amt("1")), None);
        assert_eq!(amt("1").checked_add(amt("2")), Some(amt("3")));
    }

    #[test]
    fn test_serializes_as_string() {
        assert_eq!(serde_json::to_string(&amt("10.50")).unwrap(), "\"10.5\"");
        let parsed: Amount = serde_json::from_str("\"7\"").unwrap();
        assert_eq!(parsed, amt("7"));
        assert!(serde_json::from_str::<Amount>("true").is_err());
    }
}
