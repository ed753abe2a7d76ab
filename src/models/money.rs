//! Money type for representing currency amounts
//!
//! Internally stores amounts in thousandths (i64) so that summing a week of
//! payables never drifts, including for currencies with three minor digits
//! (KWD, BHD, OMR, ...). Provides exact arithmetic, parsing and the
//! locale-aware formatting used by the summary and the export.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Stored fractional digits
const SCALE_DIGITS: u32 = 3;
const SCALE: i64 = 1000;

/// Represents a monetary amount stored as thousandths of the currency unit
///
/// Serialized as a decimal string (`"3200.00"`, or `"1.005"` when the third
/// digit is set); deserializes from either a JSON number or a decimal string,
/// so seed files can write `"valor": 3200`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use bordero::models::Money;
    /// let amount = Money::from_cents(1050); // 10.50
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents * 10)
    }

    /// Create a Money amount from thousandths of the unit
    pub const fn from_mills(mills: i64) -> Self {
        Self(mills)
    }

    /// Create a Money amount from whole units
    ///
    /// # Examples
    /// ```
    /// use bordero::models::Money;
    /// assert_eq!(Money::from_units(3200).cents(), 320000);
    /// ```
    pub const fn from_units(units: i64) -> Self {
        Self(units * SCALE)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in cents (truncated toward zero)
    pub const fn cents(&self) -> i64 {
        self.0 / 10
    }

    /// Get the amount in thousandths
    pub const fn mills(&self) -> i64 {
        self.0
    }

    /// Get the whole units portion (truncated toward zero)
    pub const fn units(&self) -> i64 {
        self.0 / SCALE
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

    /// Whether the amount is representable with `minor_digits` fractional digits
    pub fn fits_minor_units(&self, minor_digits: u32) -> bool {
        if minor_digits >= SCALE_DIGITS {
            return true;
        }
        self.0 % 10_i64.pow(SCALE_DIGITS - minor_digits) == 0
    }

    /// Parse a money amount from a string
    ///
    /// Accepts formats: "10.50", "-10.50", "R$10.50", "$10.50", "10", "1.005".
    /// A comma is accepted as the decimal separator when no dot is present.
    /// More than three significant fractional digits is an error.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let s = s.trim();

        let (negative, s) = if let Some(stripped) = s.strip_prefix('-') {
            (true, stripped)
        } else {
            (false, s)
        };

        let s = s
            .strip_prefix("R$")
            .or_else(|| s.strip_prefix('$'))
            .unwrap_or(s)
            .trim();

        let normalized;
        let s = if !s.contains('.') && s.contains(',') {
            normalized = s.replace(',', ".");
            normalized.as_str()
        } else {
            s
        };

        let invalid = || MoneyParseError::InvalidFormat(s.to_string());

        let mills = if let Some((whole, frac)) = s.split_once('.') {
            if frac.contains('.') || !frac.chars().all(|c| c.is_ascii_digit()) {
                return Err(invalid());
            }

            let units: i64 = if whole.is_empty() {
                0
            } else {
                whole.parse().map_err(|_| invalid())?
            };

            let frac = frac.trim_end_matches('0');
            if frac.len() > SCALE_DIGITS as usize {
                return Err(MoneyParseError::ExcessPrecision(s.to_string()));
            }
            let frac_mills: i64 = if frac.is_empty() {
                0
            } else {
                let padded = format!("{:0<width$}", frac, width = SCALE_DIGITS as usize);
                padded.parse().map_err(|_| invalid())?
            };

            units
                .checked_mul(SCALE)
                .and_then(|m| m.checked_add(frac_mills))
                .ok_or_else(invalid)?
        } else {
            s.parse::<i64>()
                .ok()
                .and_then(|units| units.checked_mul(SCALE))
                .ok_or_else(invalid)?
        };

        Ok(Self(if negative { -mills } else { mills }))
    }

    /// Format as a plain decimal using the currency's minor-unit count
    ///
    /// Digits below `minor_digits` are rounded half away from zero; 0 gives
    /// whole units and 3 or more shows every stored digit.
    pub fn format_decimal(&self, minor_digits: u32, decimal_separator: char) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        let digits = minor_digits.min(SCALE_DIGITS);
        let step = 10_u64.pow(SCALE_DIGITS - digits);
        let scaled = (self.0.unsigned_abs() + step / 2) / step;

        if digits == 0 {
            return format!("{}{}", sign, scaled);
        }

        let base = 10_u64.pow(digits);
        format!(
            "{}{}{}{:0width$}",
            sign,
            scaled / base,
            decimal_separator,
            scaled % base,
            width = digits as usize
        )
    }

    /// Format for display in the given currency, pt-BR style
    ///
    /// `R$ 3.200,00` for BRL; unknown codes are used as their own symbol.
    pub fn format_currency(&self, currency: &str) -> String {
        let digits = currency_minor_units(currency);
        let plain = self.abs().format_decimal(digits, ',');
        let (whole, frac) = match plain.split_once(',') {
            Some((w, f)) => (w.to_string(), Some(f.to_string())),
            None => (plain, None),
        };

        let grouped = group_thousands(&whole, '.');
        let sign = if self.is_negative() { "-" } else { "" };
        match frac {
            Some(f) => format!("{}{} {},{}", sign, currency_symbol(currency), grouped, f),
            None => format!("{}{} {}", sign, currency_symbol(currency), grouped),
        }
    }
}

fn group_thousands(digits: &str, separator: char) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(c);
    }
    out
}

/// Number of minor-unit digits for an ISO-4217 currency code
pub fn currency_minor_units(currency: &str) -> u32 {
    match currency.to_ascii_uppercase().as_str() {
        "JPY" | "KRW" | "CLP" | "PYG" | "VND" | "ISK" => 0,
        "BHD" | "KWD" | "JOD" | "OMR" | "TND" | "IQD" | "LYD" => 3,
        _ => 2,
    }
}

/// Display symbol for a currency code
pub fn currency_symbol(currency: &str) -> &str {
    match currency.to_ascii_uppercase().as_str() {
        "BRL" => "R$",
        "USD" => "US$",
        "EUR" => "€",
        "GBP" => "£",
        "JPY" => "¥",
        _ => currency,
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    /// Two decimals, or three when the last stored digit is set
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = if self.fits_minor_units(2) { 2 } else { SCALE_DIGITS };
        f.write_str(&self.format_decimal(digits, '.'))
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

struct MoneyVisitor;

impl<'de> Visitor<'de> for MoneyVisitor {
    type Value = Money;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a decimal amount as a number or string")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Money, E> {
        v.checked_mul(SCALE)
            .map(Money)
            .ok_or_else(|| E::custom(format!("amount out of range: {}", v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Money, E> {
        i64::try_from(v)
            .ok()
            .and_then(|v| v.checked_mul(SCALE))
            .map(Money)
            .ok_or_else(|| E::custom(format!("amount out of range: {}", v)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Money, E> {
        if !v.is_finite() {
            return Err(E::custom("amount must be finite"));
        }
        // Shortest round-trip representation, then exact decimal parsing
        Money::parse(&v.to_string()).map_err(E::custom)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Money, E> {
        Money::parse(v).map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MoneyVisitor)
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

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
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

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
    /// More fractional digits than any currency uses
    ExcessPrecision(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
            MoneyParseError::ExcessPrecision(s) => {
                write!(f, "Too many decimal places (at most 3): {}", s)
            }
        }
    }
}

impl std::error::Error for MoneyParseError {}
