/// ranked dashboard views built from per-card cycle results
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::calendar::CalendarContext;
use crate::config::CycleConfig;
use crate::cycle::{AvailabilityWindowCalculator, CycleCalculator, PaymentCycleCalculator};
use crate::errors::CardError;
use crate::types::{CardId, CardRecord};

/// one row of the upcoming-payments view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpcomingPayment {
    pub card_id: CardId,
    pub name: String,
    pub payment_day: u32,
    pub days_remaining: u32,
    /// payment falls on the reference date; highlighted by the presentation layer
    pub due_today: bool,
}

/// one row of the available-now view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableCard {
    pub card_id: CardId,
    pub name: String,
    pub closing_day: u32,
    pub window_end_day: u32,
    pub days_remaining: u32,
}

/// card left out of a view because its cycle could not be computed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedCard {
    pub card_id: CardId,
    pub name: String,
    pub reason: String,
}

/// ordered view entries plus any cards that failed evaluation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedView<T> {
    pub entries: Vec<T>,
    pub rejected: Vec<RejectedCard>,
}

impl<T> RankedView<T> {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.entries.iter()
    }
}

impl<T> Default for RankedView<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            rejected: Vec::new(),
        }
    }
}

/// builds the upcoming-payments and available-now views
#[derive(Debug, Clone, Copy)]
pub struct RankedViewBuilder {
    payment: PaymentCycleCalculator,
    availability: AvailabilityWindowCalculator,
    horizon_days: u32,
}

impl Default for RankedViewBuilder {
    fn default() -> Self {
        Self::from_config(&CycleConfig::default())
    }
}

impl RankedViewBuilder {
    pub fn from_config(config: &CycleConfig) -> Self {
        Self {
            payment: PaymentCycleCalculator::new(),
            availability: AvailabilityWindowCalculator::new(config.availability_window_days),
            horizon_days: config.upcoming_horizon_days,
        }
    }

    /// cards due within the horizon, soonest first
    ///
    /// The sort is stable, so cards with the same day count keep the order of
    /// `cards` (name order when the snapshot comes from a repository).
    pub fn upcoming_payments(
        &self,
        cards: &[CardRecord],
        ctx: &CalendarContext,
    ) -> RankedView<UpcomingPayment> {
        let mut view = RankedView::default();

        for card in cards {
            match self.payment.evaluate(card, ctx) {
                Ok(cycle) if cycle.days_until_payment <= self.horizon_days => {
                    view.entries.push(UpcomingPayment {
                        card_id: card.id,
                        name: card.name.clone(),
                        payment_day: cycle.payment_day,
                        days_remaining: cycle.days_until_payment,
                        due_today: cycle.is_due_today(),
                    });
                }
                Ok(_) => {}
                Err(e) => view.rejected.push(reject(card, e)),
            }
        }

        view.entries.sort_by_key(|entry| entry.days_remaining);

        info!(
            reference_day = ctx.reference_day(),
            shown = view.entries.len(),
            rejected = view.rejected.len(),
            "upcoming payments view built"
        );

        view
    }

    /// cards inside their post-closing window, fewest days left first
    pub fn available_cards(
        &self,
        cards: &[CardRecord],
        ctx: &CalendarContext,
    ) -> RankedView<AvailableCard> {
        let mut view = RankedView::default();

        for card in cards {
            match self.availability.evaluate(card, ctx) {
                Ok(window) => {
                    if let Some(days_remaining) = window.days_remaining {
                        view.entries.push(AvailableCard {
                            card_id: card.id,
                            name: card.name.clone(),
                            closing_day: window.closing_day,
                            window_end_day: window.window_end_day,
                            days_remaining,
                        });
                    }
                }
                Err(e) => view.rejected.push(reject(card, e)),
            }
        }

        view.entries.sort_by_key(|entry| entry.days_remaining);

        info!(
            reference_day = ctx.reference_day(),
            shown = view.entries.len(),
            rejected = view.rejected.len(),
            "available cards view built"
        );

        view
    }
}

fn reject(card: &CardRecord, error: CardError) -> RejectedCard {
    warn!(card = %card.name, id = %card.id, error = %error, "card skipped");
    RejectedCard {
        card_id: card.id,
        name: card.name.clone(),
        reason: error.to_string(),
    }
}

/// upcoming payments for a reference date with default settings
pub fn get_upcoming_payments(
    cards: &[CardRecord],
    reference_date: NaiveDate,
) -> RankedView<UpcomingPayment> {
    RankedViewBuilder::default().upcoming_payments(cards, &CalendarContext::from_date(reference_date))
}

/// available cards for a reference date with default settings
pub fn get_available_cards(
    cards: &[CardRecord],
    reference_date: NaiveDate,
) -> RankedView<AvailableCard> {
    RankedViewBuilder::default().available_cards(cards, &CalendarContext::from_date(reference_date))
}
