use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use std::str::FromStr;

/// Money type with cent precision, used for credit limits
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// create from decimal
    pub fn from_decimal(d: Decimal) -> Self {
        Money(d.round_dp(2))
    }

    /// create from string with exact parsing
    pub fn from_str_exact(s: &str) -> Result<Self, rust_decimal::Error> {
        Ok(Money(Decimal::from_str(s.trim())?.round_dp(2)))
    }

    /// create from integer amount (dollars, pesos, etc)
    pub fn from_major(amount: i64) -> Self {
        Money(Decimal::from(amount))
    }

    /// strictly greater than zero
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// render with thousands separators, e.g. `1,250,000.00`
    pub fn to_grouped_string(&self) -> String {
        let fixed = format!("{:.2}", self.0.abs());
        let (whole, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (i, ch) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        let sign = if self.is_negative() { "-" } else { "" };
        format!("{}{}.{}", sign, grouped, frac)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Money::from_str_exact(s)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money((self.0 + other.0).round_dp(2))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, |acc, m| acc + *m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_money_precision() {
        let m = Money::from_str_exact("100.456").unwrap();
        assert_eq!(m.to_string(), "100.46"); // rounded to cents
    }

    #[test]
    fn test_sign_checks() {
        assert!(Money::from_major(1).is_positive());
        assert!(!Money::ZERO.is_positive());
        assert!(Money::from_decimal(dec!(-0.01)).is_negative());
    }

    #[test]
    fn test_sum_of_limits() {
        let limits = vec![
            Money::from_major(15_000),
            Money::from_decimal(dec!(2500.50)),
            Money::from_major(40_000),
        ];

        let total: Money = limits.iter().sum();
        assert_eq!(total, Money::from_decimal(dec!(57500.50)));
    }

    #[test]
    fn test_grouped_display() {
        assert_eq!(Money::from_major(1_250_000).to_grouped_string(), "1,250,000.00");
        assert_eq!(Money::from_major(999).to_grouped_string(), "999.00");
        assert_eq!(Money::from_decimal(dec!(1000.5)).to_grouped_string(), "1,000.50");
        assert_eq!(Money::from_major(-12_345).to_grouped_string(), "-12,345.00");
        assert_eq!(Money::ZERO.to_grouped_string(), "0.00");
    }
}
