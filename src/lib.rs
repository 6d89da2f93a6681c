pub mod calendar;
pub mod config;
pub mod cycle;
pub mod dashboard;
pub mod decimal;
pub mod errors;
pub mod logging;
pub mod repository;
pub mod types;
pub mod views;

// re-export key types
pub use calendar::CalendarContext;
pub use config::{CycleConfig, DashboardConfig, StorageConfig};
pub use cycle::{
    AvailabilityWindow, AvailabilityWindowCalculator, CycleCalculator, PaymentCycle,
    PaymentCycleCalculator,
};
pub use dashboard::{Dashboard, PortfolioSummary, ViewRows};
pub use decimal::Money;
pub use errors::{CardError, Result};
pub use repository::{CardRepository, InMemoryCardRepository, JsonFileCardRepository};
pub use types::{CardId, CardRecord, DashboardView, NewCard};
pub use views::{
    get_available_cards, get_upcoming_payments, AvailableCard, RankedView, RankedViewBuilder,
    RejectedCard, UpcomingPayment,
};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
