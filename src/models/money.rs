//! Money type for representing currency amounts
//!
//! Internally stores amounts in cents (i64) so aggregate sums are exact and
//! independent of summation order. Floating-point values only appear at the
//! ingestion edge, where conversion is checked.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub};

/// A monetary amount stored as cents (hundredths of the currency unit)
///
/// Serializes as the raw cent count. Arithmetic is plain i64 arithmetic, so
/// summing a snapshot in any order produces the same total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from cents
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a Money amount from whole dollars
    pub const fn from_dollars(dollars: i64) -> Self {
        Self(dollars * 100)
    }

    /// Convert a floating-point dollar value to cents, rounding to the
    /// nearest cent
    ///
    /// Returns `None` for NaN, infinities, and values outside the i64 cent
    /// range. This is the checked edge for amounts arriving in JSON payloads.
    ///
    /// # Examples
    /// ```
    /// use fintrack_core::models::Money;
    /// assert_eq!(Money::from_dollars_f64(-120.5), Some(Money::from_cents(-12050)));
    /// assert_eq!(Money::from_dollars_f64(f64::NAN), None);
    /// ```
    pub fn from_dollars_f64(dollars: f64) -> Option<Self> {
        if !dollars.is_finite() {
            return None;
        }
        let cents = (dollars * 100.0).round();
        if cents < i64::MIN as f64 || cents > i64::MAX as f64 {
            return None;
        }
        Some(Self(cents as i64))
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// The amount as a floating-point dollar value, for percentage math
    pub fn as_dollars_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Check if the amount is zero
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Check if the amount is positive
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Check if the amount is negative
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Get the absolute value
    pub const fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Parse a money amount from a string
    ///
    /// Accepts decimal dollars with an optional leading sign and `$` symbol:
    /// "10.50", "-120.50", "-$3.05", "10.5". The sign comes before the
    /// symbol; past both, only bare ASCII digits are accepted. Fractions
    /// beyond two digits are truncated.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let trimmed = s.trim();
        let (negative, rest) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };
        let rest = rest.strip_prefix('$').unwrap_or(rest);
        if rest.is_empty() {
            return Err(MoneyParseError::InvalidFormat(s.to_string()));
        }

        let (dollars_str, frac_str) = match rest.split_once('.') {
            Some((d, f)) => (d, f),
            None => (rest, ""),
        };

        let dollars: i64 = parse_digits(dollars_str)
            .ok_or_else(|| MoneyParseError::InvalidFormat(s.to_string()))?;
        let frac: i64 = match frac_str.len() {
            0 => 0,
            1 => parse_digits(frac_str)
                .ok_or_else(|| MoneyParseError::InvalidFormat(s.to_string()))?
                * 10,
            _ => frac_str
                .get(..2)
                .and_then(parse_digits)
                .ok_or_else(|| MoneyParseError::InvalidFormat(s.to_string()))?,
        };

        let cents = dollars
            .checked_mul(100)
            .and_then(|c| c.checked_add(frac))
            .ok_or_else(|| MoneyParseError::OutOfRange(s.to_string()))?;
        Ok(Self(if negative { -cents } else { cents }))
    }

    /// Plain decimal form without a currency symbol: "1050" cents -> "10.50"
    ///
    /// This is the CSV column representation.
    pub fn to_decimal_string(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.abs();
        format!("{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

fn parse_digits(s: &str) -> Option<i64> {
    if s.chars().all(|c| c.is_ascii_digit()) {
        s.parse().ok()
    } else {
        None
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.abs();
        write!(f, "{}${}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
    OutOfRange(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
            MoneyParseError::OutOfRange(s) => write!(f, "Amount out of range: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}
