use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calendar::CalendarContext;
use crate::cycle::CycleCalculator;
use crate::errors::{CardError, Result};
use crate::types::{CardId, CardRecord};

/// length of the post-closing window, counted from the closing day
pub const DEFAULT_WINDOW_DAYS: u32 = 10;

/// where the reference date sits relative to a card's post-closing window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityWindow {
    pub card_id: CardId,
    pub closing_day: u32,
    /// last day of the window, already wrapped into the next month if it overflows
    pub window_end_day: u32,
    /// true when the window runs past the end of the reference month
    pub crosses_month: bool,
    /// days left in the window; `None` when the card is not available
    pub days_remaining: Option<u32>,
}

impl AvailabilityWindow {
    pub fn is_available(&self) -> bool {
        self.days_remaining.is_some()
    }
}

/// decides whether the reference date falls inside `[closing_day, closing_day + window_days]`
#[derive(Debug, Clone, Copy)]
pub struct AvailabilityWindowCalculator {
    pub window_days: u32,
}

impl Default for AvailabilityWindowCalculator {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_DAYS)
    }
}

impl AvailabilityWindowCalculator {
    pub fn new(window_days: u32) -> Self {
        Self { window_days }
    }

    pub fn evaluate_availability(
        &self,
        card: &CardRecord,
        ctx: &CalendarContext,
    ) -> Result<AvailabilityWindow> {
        if self.window_days == 0 {
            return Err(CardError::InvalidConfiguration {
                message: "availability window must span at least one day".to_string(),
            });
        }

        let closing_day = card.closing_anchor()?;
        let today = ctx.reference_day() as i64;
        let month_len = ctx.days_in_month() as i64;
        let start = closing_day as i64;
        let end = start + self.window_days as i64;

        let (window_end_day, crosses_month, remaining) = if end <= month_len {
            // whole window inside the reference month
            let remaining = if start <= today && today <= end {
                Some(end - today)
            } else {
                None
            };
            (end, false, remaining)
        } else {
            let wrapped_end = end - month_len;
            let remaining = if today >= start {
                // tail of the current month; counts through the month boundary
                end - today
            } else {
                // already in the wrapped part at the start of the new month
                wrapped_end - today
            };
            (wrapped_end, true, Some(remaining).filter(|r| *r >= 0))
        };

        Ok(AvailabilityWindow {
            card_id: card.id,
            closing_day,
            window_end_day: window_end_day as u32,
            crosses_month,
            days_remaining: remaining.map(|r| r as u32),
        })
    }
}

impl CycleCalculator for AvailabilityWindowCalculator {
    type Output = AvailabilityWindow;

    fn evaluate(&self, card: &CardRecord, ctx: &CalendarContext) -> Result<AvailabilityWindow> {
        let window = self.evaluate_availability(card, ctx)?;

        debug!(
            card = %card.name,
            closing_day = window.closing_day,
            window_end_day = window.window_end_day,
            reference_day = ctx.reference_day(),
            available = window.is_available(),
            "availability window evaluated"
        );

        Ok(window)
    }
}
