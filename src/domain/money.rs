//! Monetary values stored as integer minor units (centavos).
//!
//! One canonical unit is used end to end: the wire carries minor-unit
//! integers, display formatting renders pt-BR currency strings, and the
//! keystroke mask parses back to the same representation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Maximum digits accepted from free-form input before parsing.
///
/// Anything longer cannot fit an `i64` and no realistic amount comes close.
const INPUT_DIGIT_LIMIT: usize = 15;

/// Parse failures for amounts entered as display strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    NoDigits,
    TooLarge,
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoDigits => write!(f, "amount must contain at least one digit"),
            Self::TooLarge => write!(f, "amount is too large"),
        }
    }
}

impl std::error::Error for MoneyParseError {}

/// Monetary amount in integer minor units.
///
/// ## Invariants
/// - The inner value counts centavos; `Money::from_minor_units(123456)`
///   renders as `R$ 1.234,56`.
///
/// # Examples
/// ```
/// use lending_desk::domain::Money;
///
/// let amount = Money::from_minor_units(123_456);
/// assert_eq!(amount.to_string(), "R$ 1.234,56");
/// assert_eq!(Money::parse_display("R$ 1.234,56"), Ok(amount));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Wrap a minor-unit integer.
    pub const fn from_minor_units(minor_units: i64) -> Self {
        Self(minor_units)
    }

    /// The raw minor-unit integer.
    pub const fn minor_units(self) -> i64 {
        self.0
    }

    /// Whether the amount is strictly positive.
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Parse a display string back into minor units.
    ///
    /// All non-digit characters (currency symbol, thousands dots, decimal
    /// comma) are discarded; the remaining digits are the minor-unit value,
    /// so parsing round-trips with [`Money::format_brl`].
    pub fn parse_display(input: &str) -> Result<Self, MoneyParseError> {
        let digits: String = input.chars().filter(char::is_ascii_digit).collect();
        if digits.is_empty() {
            return Err(MoneyParseError::NoDigits);
        }
        if digits.len() > INPUT_DIGIT_LIMIT {
            return Err(MoneyParseError::TooLarge);
        }
        let minor_units = digits.parse::<i64>().map_err(|_| MoneyParseError::TooLarge)?;
        Ok(Self(minor_units))
    }

    /// Format as a pt-BR currency string (`R$ 1.234,56`).
    pub fn format_brl(self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let minor_units = self.0.unsigned_abs();
        let cents = minor_units % 100;
        let integer_part = group_thousands(minor_units / 100);
        format!("R$ {sign}{integer_part},{cents:02}")
    }

    /// Progressive mask applied while an amount is being typed.
    ///
    /// Non-digits are discarded and the trailing two digits are treated as
    /// centavos, so the mask is a valid display string at every length.
    /// Input with no digits renders the zero amount.
    pub fn mask_input(raw: &str) -> String {
        let digits: String = raw
            .chars()
            .filter(char::is_ascii_digit)
            .take(INPUT_DIGIT_LIMIT)
            .collect();
        let minor_units = digits.parse::<i64>().unwrap_or(0);
        Self(minor_units).format_brl()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_brl())
    }
}

impl From<i64> for Money {
    fn from(minor_units: i64) -> Self {
        Self(minor_units)
    }
}

impl From<Money> for i64 {
    fn from(value: Money) -> Self {
        value.0
    }
}

fn group_thousands(value: u64) -> String {
    let raw = value.to_string();
    let mut grouped = String::with_capacity(raw.len() + raw.len() / 3);
    let offset = raw.len() % 3;
    for (index, digit) in raw.chars().enumerate() {
        if index > 0 && index % 3 == offset % 3 {
            grouped.push('.');
        }
        grouped.push(digit);
    }
    grouped
}

#[cfg(test)]
mod tests;
