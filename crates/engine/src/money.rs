use std::{
    fmt,
    ops::{Add, AddAssign},
    str::FromStr,
};

use rust_decimal::{Decimal, prelude::ToPrimitive};

use crate::EngineError;

/// Money amount represented as **integer kopecks**.
///
/// Use this type for **all** monetary values in the engine (unit prices,
/// line subtotals, order totals) to avoid floating-point drift. The backend
/// exposes prices as JSON decimal numbers; convert at the boundary with
/// [`Money::from_decimal`] / [`Money::to_decimal`].
///
/// # Examples
///
/// ```rust
/// use engine::Money;
///
/// let price = Money::new(1200_00);
/// assert_eq!(price.kopecks(), 120000);
/// assert_eq!(price.to_string(), "1200.00 ₽");
/// ```
///
/// Parsing from user input (accepts `.` or `,` as decimal separator; rejects
/// more than 2 decimals):
///
/// ```rust
/// use engine::Money;
///
/// assert_eq!("10".parse::<Money>().unwrap().kopecks(), 1000);
/// assert_eq!("10,5".parse::<Money>().unwrap().kopecks(), 1050);
/// assert!("12.345".parse::<Money>().is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Creates a new amount from integer kopecks.
    #[must_use]
    pub const fn new(kopecks: i64) -> Self {
        Self(kopecks)
    }

    /// Returns the raw value in kopecks.
    #[must_use]
    pub const fn kopecks(self) -> i64 {
        self.0
    }

    /// Returns `true` if the amount is 0.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if the amount is positive.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Returns `true` if the amount is negative.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Checked addition (returns `None` on overflow).
    #[must_use]
    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }

    /// Checked multiplication by a quantity (returns `None` on overflow).
    #[must_use]
    pub fn checked_mul(self, quantity: u32) -> Option<Money> {
        self.0.checked_mul(i64::from(quantity)).map(Money)
    }

    /// Converts a backend decimal amount into kopecks.
    ///
    /// Rejects more than 2 fractional digits and values outside the `i64`
    /// kopeck range.
    pub fn from_decimal(value: Decimal) -> Result<Self, EngineError> {
        let scaled = value
            .checked_mul(Decimal::ONE_HUNDRED)
            .ok_or_else(|| EngineError::InvalidAmount("amount too large".to_string()))?;
        if !scaled.fract().is_zero() {
            return Err(EngineError::InvalidAmount("too many decimals".to_string()));
        }
        scaled
            .to_i64()
            .map(Money)
            .ok_or_else(|| EngineError::InvalidAmount("amount too large".to_string()))
    }

    /// Returns the amount as a decimal with 2-digit scale.
    #[must_use]
    pub fn to_decimal(self) -> Decimal {
        Decimal::new(self.0, 2)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let rubles = abs / 100;
        let kopecks = abs % 100;
        write!(f, "{sign}{rubles}.{kopecks:02} ₽")
    }
}

impl From<i64> for Money {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<Money> for i64 {
    fn from(value: Money) -> Self {
        value.0
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Self::Output {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl FromStr for Money {
    type Err = EngineError;

    /// Parses a decimal string into kopecks.
    ///
    /// Accepts `.` or `,` as decimal separator and an optional leading
    /// `+`/`-`.
    ///
    /// Validation rules:
    /// - max 2 fractional digits (rejects `12.345`)
    /// - rejects empty/invalid strings
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let empty = || EngineError::InvalidAmount("empty amount".to_string());
        let invalid = || EngineError::InvalidAmount("invalid amount".to_string());
        let overflow = || EngineError::InvalidAmount("amount too large".to_string());

        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(empty());
        }

        let (sign, rest) = if let Some(stripped) = trimmed.strip_prefix('-') {
            (-1i64, stripped)
        } else if let Some(stripped) = trimmed.strip_prefix('+') {
            (1i64, stripped)
        } else {
            (1i64, trimmed)
        };

        let rest = rest.trim();
        if rest.is_empty() {
            return Err(empty());
        }

        let rest = rest.replace(',', ".");
        let mut parts = rest.split('.');
        let rubles_str = parts.next().ok_or_else(invalid)?;
        let kopecks_str = parts.next();

        if parts.next().is_some() {
            return Err(invalid());
        }

        if rubles_str.is_empty() || !rubles_str.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        let rubles: i64 = rubles_str.parse().map_err(|_| invalid())?;

        let kopecks: i64 = match kopecks_str {
            None => 0,
            Some("") => 0,
            Some(frac) => {
                if !frac.chars().all(|c| c.is_ascii_digit()) {
                    return Err(invalid());
                }
                match frac.len() {
                    1 => frac.parse::<i64>().map_err(|_| invalid())? * 10,
                    2 => frac.parse::<i64>().map_err(|_| invalid())?,
                    _ => return Err(EngineError::InvalidAmount("too many decimals".to_string())),
                }
            }
        };

        let total = rubles
            .checked_mul(100)
            .and_then(|v| v.checked_add(kopecks))
            .ok_or_else(overflow)?;

        let signed = if sign < 0 {
            total.checked_neg().ok_or_else(overflow)?
        } else {
            total
        };

        Ok(Money(signed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_rubles() {
        assert_eq!(Money::new(0).to_string(), "0.00 ₽");
        assert_eq!(Money::new(1).to_string(), "0.01 ₽");
        assert_eq!(Money::new(10).to_string(), "0.10 ₽");
        assert_eq!(Money::new(1050).to_string(), "10.50 ₽");
        assert_eq!(Money::new(-1050).to_string(), "-10.50 ₽");
    }

    #[test]
    fn parse_accepts_dot_or_comma() {
        assert_eq!("10".parse::<Money>().unwrap().kopecks(), 1000);
        assert_eq!("10.5".parse::<Money>().unwrap().kopecks(), 1050);
        assert_eq!("10,50".parse::<Money>().unwrap().kopecks(), 1050);
        assert_eq!("+1.00".parse::<Money>().unwrap().kopecks(), 100);
        assert_eq!("  2.30 ".parse::<Money>().unwrap().kopecks(), 230);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("".parse::<Money>().is_err());
        assert!("12.345".parse::<Money>().is_err());
        assert!("1.2.3".parse::<Money>().is_err());
        assert!("abc".parse::<Money>().is_err());
        assert!("12.x".parse::<Money>().is_err());
    }

    #[test]
    fn decimal_round_trip() {
        let price = Money::from_decimal(Decimal::new(120000, 2)).unwrap();
        assert_eq!(price.kopecks(), 120000);
        assert_eq!(price.to_decimal(), Decimal::new(120000, 2));

        assert_eq!(
            Money::from_decimal(Decimal::new(1200, 0)).unwrap().kopecks(),
            120000
        );
    }

    #[test]
    fn decimal_rejects_sub_kopeck_precision() {
        assert!(Money::from_decimal(Decimal::new(12345, 3)).is_err());
    }

    #[test]
    fn checked_mul_by_quantity() {
        assert_eq!(Money::new(120000).checked_mul(3), Some(Money::new(360000)));
        assert_eq!(Money::new(i64::MAX).checked_mul(2), None);
    }
}
