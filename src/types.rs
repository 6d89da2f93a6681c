use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::decimal::Money;
use crate::errors::{CardError, Result};

/// unique identifier for a card, assigned by the repository
pub type CardId = Uuid;

/// lowest valid day-of-month anchor
pub const FIRST_DAY: u32 = 1;
/// highest valid day-of-month anchor, regardless of month length
pub const LAST_DAY: u32 = 31;

/// reject a day-of-month anchor outside [1, 31]
pub fn check_anchor(field: &'static str, value: u32) -> Result<u32> {
    if (FIRST_DAY..=LAST_DAY).contains(&value) {
        Ok(value)
    } else {
        Err(CardError::InvalidCycleAnchor { field, value })
    }
}

/// stored credit card snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRecord {
    pub id: CardId,
    pub name: String,
    pub credit_limit: Money,
    /// day of month the statement closes
    pub closing_day: u32,
    /// day of month the payment is due
    pub payment_day: u32,
}

impl CardRecord {
    pub fn closing_anchor(&self) -> Result<u32> {
        check_anchor("closing_day", self.closing_day)
    }

    pub fn payment_anchor(&self) -> Result<u32> {
        check_anchor("payment_day", self.payment_day)
    }
}

/// card fields as entered by the user, before an id is assigned
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCard {
    pub name: String,
    pub credit_limit: Money,
    pub closing_day: u32,
    pub payment_day: u32,
}

impl NewCard {
    pub fn new(name: impl Into<String>, credit_limit: Money, closing_day: u32, payment_day: u32) -> Self {
        Self {
            name: name.into(),
            credit_limit,
            closing_day,
            payment_day,
        }
    }

    /// validate an edit and normalize the name; a zero limit is allowed
    pub fn validate(mut self) -> Result<Self> {
        let trimmed = self.name.trim();
        if trimmed.is_empty() {
            return Err(CardError::InvalidCardName);
        }
        self.name = trimmed.to_string();

        if self.credit_limit.is_negative() {
            return Err(CardError::InvalidCreditLimit {
                limit: self.credit_limit,
            });
        }

        check_anchor("closing_day", self.closing_day)?;
        check_anchor("payment_day", self.payment_day)?;

        Ok(self)
    }

    /// validate a registration, which additionally needs a limit above zero
    pub fn validate_new(self) -> Result<Self> {
        let card = self.validate()?;
        if !card.credit_limit.is_positive() {
            return Err(CardError::InvalidCreditLimit {
                limit: card.credit_limit,
            });
        }
        Ok(card)
    }

    /// attach a repository-assigned id
    pub fn into_record(self, id: CardId) -> CardRecord {
        CardRecord {
            id,
            name: self.name,
            credit_limit: self.credit_limit,
            closing_day: self.closing_day,
            payment_day: self.payment_day,
        }
    }
}

impl From<&CardRecord> for NewCard {
    fn from(card: &CardRecord) -> Self {
        NewCard {
            name: card.name.clone(),
            credit_limit: card.credit_limit,
            closing_day: card.closing_day,
            payment_day: card.payment_day,
        }
    }
}

/// which ranked view the presentation layer should render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DashboardView {
    /// cards with a payment due soon
    UpcomingPayments,
    /// cards inside their post-closing window
    Available,
}

impl fmt::Display for DashboardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DashboardView::UpcomingPayments => write!(f, "upcoming"),
            DashboardView::Available => write!(f, "available"),
        }
    }
}

impl FromStr for DashboardView {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "upcoming" | "upcoming-payments" => Ok(DashboardView::UpcomingPayments),
            "available" => Ok(DashboardView::Available),
            other => Err(CardError::InvalidConfiguration {
                message: format!("unknown view '{}'", other),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_bounds() {
        assert_eq!(check_anchor("closing_day", 1).unwrap(), 1);
        assert_eq!(check_anchor("closing_day", 31).unwrap(), 31);
        assert!(matches!(
            check_anchor("payment_day", 0),
            Err(CardError::InvalidCycleAnchor { field: "payment_day", value: 0 })
        ));
        assert!(check_anchor("payment_day", 32).is_err());
    }

    #[test]
    fn test_new_card_validation() {
        let card = NewCard::new("  Banorte Oro ", Money::from_major(20_000), 12, 2)
            .validate()
            .unwrap();
        assert_eq!(card.name, "Banorte Oro");

        let blank = NewCard::new("   ", Money::from_major(1_000), 10, 20).validate();
        assert!(matches!(blank, Err(CardError::InvalidCardName)));

        let zero_limit = NewCard::new("Nu", Money::ZERO, 10, 20);
        assert!(zero_limit.clone().validate().is_ok());
        assert!(matches!(zero_limit.validate_new(), Err(CardError::InvalidCreditLimit { .. })));

        let negative = NewCard::new("Nu", Money::from_major(-1), 10, 20);
        assert!(matches!(negative.clone().validate(), Err(CardError::InvalidCreditLimit { .. })));
        assert!(negative.validate_new().is_err());

        let bad_closing = NewCard::new("Nu", Money::from_major(5_000), 0, 20).validate();
        assert!(matches!(
            bad_closing,
            Err(CardError::InvalidCycleAnchor { field: "closing_day", .. })
        ));
    }

    #[test]
    fn test_view_parsing() {
        assert_eq!("upcoming".parse::<DashboardView>().unwrap(), DashboardView::UpcomingPayments);
        assert_eq!("Available".parse::<DashboardView>().unwrap(), DashboardView::Available);
        assert!("history".parse::<DashboardView>().is_err());
    }
}
