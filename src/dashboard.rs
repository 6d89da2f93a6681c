use chrono::NaiveDate;
use hourglass_rs::SafeTimeProvider;
use serde::{Deserialize, Serialize};

use crate::calendar::CalendarContext;
use crate::config::CycleConfig;
use crate::decimal::Money;
use crate::errors::Result;
use crate::repository::CardRepository;
use crate::types::DashboardView;
use crate::views::{AvailableCard, RankedView, RankedViewBuilder, UpcomingPayment};

/// portfolio totals shown next to the views
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub total_cards: usize,
    pub total_credit_limit: Money,
}

/// rows of whichever view was selected
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewRows {
    UpcomingPayments(RankedView<UpcomingPayment>),
    Available(RankedView<AvailableCard>),
}

impl ViewRows {
    pub fn is_empty(&self) -> bool {
        match self {
            ViewRows::UpcomingPayments(view) => view.is_empty(),
            ViewRows::Available(view) => view.is_empty(),
        }
    }
}

/// read-only queries over a card repository
///
/// Every query takes one snapshot of the repository and computes from it; the
/// dashboard never writes cards.
pub struct Dashboard<R: CardRepository> {
    repository: R,
    views: RankedViewBuilder,
}

impl<R: CardRepository> Dashboard<R> {
    pub fn new(repository: R, config: CycleConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            repository,
            views: RankedViewBuilder::from_config(&config),
        })
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// card management goes straight to the repository
    pub fn repository_mut(&mut self) -> &mut R {
        &mut self.repository
    }

    pub fn upcoming_payments(&self, reference_date: NaiveDate) -> Result<RankedView<UpcomingPayment>> {
        let cards = self.repository.list_cards()?;
        Ok(self
            .views
            .upcoming_payments(&cards, &CalendarContext::from_date(reference_date)))
    }

    /// upcoming payments as of the provider's current date
    pub fn upcoming_payments_with_time(
        &self,
        time_provider: &SafeTimeProvider,
    ) -> Result<RankedView<UpcomingPayment>> {
        self.upcoming_payments(time_provider.now().date_naive())
    }

    pub fn available_cards(&self, reference_date: NaiveDate) -> Result<RankedView<AvailableCard>> {
        let cards = self.repository.list_cards()?;
        Ok(self
            .views
            .available_cards(&cards, &CalendarContext::from_date(reference_date)))
    }

    /// available cards as of the provider's current date
    pub fn available_cards_with_time(
        &self,
        time_provider: &SafeTimeProvider,
    ) -> Result<RankedView<AvailableCard>> {
        self.available_cards(time_provider.now().date_naive())
    }

    /// build the selected view
    pub fn view(&self, kind: DashboardView, reference_date: NaiveDate) -> Result<ViewRows> {
        match kind {
            DashboardView::UpcomingPayments => {
                self.upcoming_payments(reference_date).map(ViewRows::UpcomingPayments)
            }
            DashboardView::Available => self.available_cards(reference_date).map(ViewRows::Available),
        }
    }

    pub fn summary(&self) -> Result<PortfolioSummary> {
        let cards = self.repository.list_cards()?;
        Ok(PortfolioSummary {
            total_cards: cards.len(),
            total_credit_limit: cards.iter().map(|card| card.credit_limit).sum(),
        })
    }
}
