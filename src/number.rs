//! Exact decimal numbers for numeric int-or-string values.
//!
//! A [`Number`] keeps the significant digits and a base-10 exponent, so it can
//! tell whether a value is an exact integer regardless of magnitude. Floating
//! point types cannot answer that question for large integers.

use crate::{Error, Result};
use serde::de::value::MapAccessDeserializer;
use serde::de::{self, MapAccess, Visitor};
use serde::{ser, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Maximum number of decimal digits in an `i64`.
const I64_DIGITS: i64 = 19;

/// An arbitrary-precision decimal number in canonical form.
///
/// The value is `(-1)^negative * digits * 10^exponent`. `digits` never has
/// leading or trailing zeros, so two numbers with the same value always have
/// the same representation and derived equality is value equality. Zero is
/// represented with no digits and is never negative.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Number {
    negative: bool,
    digits: String,
    exponent: i64,
}

impl Number {
    fn from_integer(negative: bool, magnitude: u64) -> Self {
        if magnitude == 0 {
            return Self::default();
        }
        let text = magnitude.to_string();
        let digits = text.trim_end_matches('0');
        Self {
            negative,
            digits: digits.to_string(),
            exponent: (text.len() - digits.len()) as i64,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.digits.is_empty()
    }

    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// Returns true if the number has no fractional part.
    pub fn is_integer(&self) -> bool {
        self.is_zero() || self.exponent >= 0
    }

    /// Converts to an `i64` when the conversion is exact.
    ///
    /// Returns `None` for numbers with a fractional part and for integers
    /// outside the `i64` range.
    pub fn to_i64(&self) -> Option<i64> {
        if self.is_zero() {
            return Some(0);
        }
        if self.exponent < 0 || (self.digits.len() as i64).saturating_add(self.exponent) > I64_DIGITS
        {
            return None;
        }

        let mut text = String::with_capacity(I64_DIGITS as usize + 1);
        if self.negative {
            text.push('-');
        }
        text.push_str(&self.digits);
        text.push_str(&"0".repeat(self.exponent as usize));
        text.parse().ok()
    }
}

impl FromStr for Number {
    type Err = Error;

    /// Parses `[+-]digits[.digits][(e|E)[+-]digits]`.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidNumber(s.to_string());

        let (negative, rest) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            _ => (false, s),
        };

        let (mantissa, exponent) = match rest.find(|c: char| c == 'e' || c == 'E') {
            Some(i) => {
                let exponent: i64 = rest[i + 1..].parse().map_err(|_| invalid())?;
                (&rest[..i], exponent)
            }
            None => (rest, 0),
        };

        let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(invalid());
        }
        if !int_part
            .bytes()
            .chain(frac_part.bytes())
            .all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        let exponent = exponent
            .checked_sub(frac_part.len() as i64)
            .ok_or_else(invalid)?;

        let all = format!("{int_part}{frac_part}");
        let significant = all.trim_start_matches('0');
        let digits = significant.trim_end_matches('0');
        if digits.is_empty() {
            return Ok(Self::default());
        }

        let exponent = exponent
            .checked_add((significant.len() - digits.len()) as i64)
            .ok_or_else(invalid)?;

        Ok(Self {
            negative,
            digits: digits.to_string(),
            exponent,
        })
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return f.write_str("0");
        }
        if self.negative {
            f.write_str("-")?;
        }

        // Count of digits in front of the decimal point.
        let point = (self.digits.len() as i64).saturating_add(self.exponent);

        if self.exponent >= 0 && point <= 21 {
            write!(f, "{}{}", self.digits, "0".repeat(self.exponent as usize))
        } else if self.exponent < 0 && point > 0 {
            let (int_part, frac_part) = self.digits.split_at(point as usize);
            write!(f, "{int_part}.{frac_part}")
        } else if self.exponent < 0 && point > -6 {
            write!(f, "0.{}{}", "0".repeat(point.unsigned_abs() as usize), self.digits)
        } else {
            let (lead, rest) = self.digits.split_at(1);
            if rest.is_empty() {
                write!(f, "{}e{}", lead, point - 1)
            } else {
                write!(f, "{}.{}e{}", lead, rest, point - 1)
            }
        }
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Self::from_integer(value < 0, value.unsigned_abs())
    }
}

impl From<i32> for Number {
    fn from(value: i32) -> Self {
        Self::from(i64::from(value))
    }
}

impl From<u64> for Number {
    fn from(value: u64) -> Self {
        Self::from_integer(false, value)
    }
}

impl TryFrom<f64> for Number {
    type Error = Error;

    fn try_from(value: f64) -> Result<Self> {
        if !value.is_finite() {
            return Err(Error::InvalidNumber(value.to_string()));
        }
        // Display for f64 is the shortest text that round-trips and never
        // uses an exponent.
        value.to_string().parse()
    }
}

impl TryFrom<&serde_json::Number> for Number {
    type Error = Error;

    /// Reads the number from its source text, so digits beyond `f64`
    /// precision are kept.
    fn try_from(value: &serde_json::Number) -> Result<Self> {
        value.to_string().parse()
    }
}

impl Serialize for Number {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if let Some(i) = self.to_i64() {
            return serializer.serialize_i64(i);
        }
        let text = self.to_string();
        if self.is_integer() && !self.negative {
            if let Ok(u) = text.parse::<u64>() {
                return serializer.serialize_u64(u);
            }
        }
        match text.parse::<f64>() {
            Ok(f) => serializer.serialize_f64(f),
            Err(e) => Err(<S::Error as ser::Error>::custom(e)),
        }
    }
}

impl<'de> Deserialize<'de> for Number {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(NumberVisitor)
    }
}

struct NumberVisitor;

impl<'de> Visitor<'de> for NumberVisitor {
    type Value = Number;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a number or a numeric string")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Number, E> {
        Ok(Number::from(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Number, E> {
        Ok(Number::from(v))
    }

    fn visit_i128<E: de::Error>(self, v: i128) -> std::result::Result<Number, E> {
        v.to_string().parse().map_err(E::custom)
    }

    fn visit_u128<E: de::Error>(self, v: u128) -> std::result::Result<Number, E> {
        v.to_string().parse().map_err(E::custom)
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<Number, E> {
        Number::try_from(v).map_err(E::custom)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Number, E> {
        v.parse().map_err(E::custom)
    }

    /// serde_json hands over numbers it cannot represent exactly as a
    /// single-entry map holding the source text.
    fn visit_map<A>(self, map: A) -> std::result::Result<Number, A::Error>
    where
        A: MapAccess<'de>,
    {
        let exact = serde_json::Number::deserialize(MapAccessDeserializer::new(map))?;
        Number::try_from(&exact).map_err(de::Error::custom)
    }
}
