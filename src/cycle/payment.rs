use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calendar::CalendarContext;
use crate::cycle::CycleCalculator;
use crate::errors::Result;
use crate::types::{CardId, CardRecord};

/// next payment occurrence for one card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentCycle {
    pub card_id: CardId,
    pub payment_day: u32,
    pub days_until_payment: u32,
}

impl PaymentCycle {
    pub fn is_due_today(&self) -> bool {
        self.days_until_payment == 0
    }
}

/// counts days until the next payment day, wrapping on the reference month's length
#[derive(Debug, Clone, Copy, Default)]
pub struct PaymentCycleCalculator;

impl PaymentCycleCalculator {
    pub fn new() -> Self {
        Self
    }

    pub fn days_until_payment(&self, card: &CardRecord, ctx: &CalendarContext) -> Result<u32> {
        let payment_day = card.payment_anchor()?;
        let today = ctx.reference_day();

        let days = if payment_day >= today {
            payment_day - today
        } else {
            // already passed this month, next occurrence is in the following month
            (ctx.days_in_month() - today) + payment_day
        };

        Ok(days)
    }
}

impl CycleCalculator for PaymentCycleCalculator {
    type Output = PaymentCycle;

    fn evaluate(&self, card: &CardRecord, ctx: &CalendarContext) -> Result<PaymentCycle> {
        let days_until_payment = self.days_until_payment(card, ctx)?;

        debug!(
            card = %card.name,
            payment_day = card.payment_day,
            reference_day = ctx.reference_day(),
            days_until_payment,
            "payment cycle evaluated"
        );

        Ok(PaymentCycle {
            card_id: card.id,
            payment_day: card.payment_day,
            days_until_payment,
        })
    }
}
