pub mod availability;
pub mod payment;

use crate::calendar::CalendarContext;
use crate::errors::Result;
use crate::types::CardRecord;

pub use availability::{AvailabilityWindow, AvailabilityWindowCalculator, DEFAULT_WINDOW_DAYS};
pub use payment::{PaymentCycle, PaymentCycleCalculator};

/// trait for per-card cycle calculations
///
/// Implementations are pure: the same card and context always give the same
/// output, and the card is never modified.
pub trait CycleCalculator {
    type Output;

    fn evaluate(&self, card: &CardRecord, ctx: &CalendarContext) -> Result<Self::Output>;
}
