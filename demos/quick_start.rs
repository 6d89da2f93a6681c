/// quick start - register cards and query both dashboard views
use card_cycle_rs::{
    CardRepository, CycleConfig, Dashboard, InMemoryCardRepository, Money, NewCard,
    SafeTimeProvider, TimeSource,
};
use chrono::{Duration, TimeZone, Utc};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== quick start ===\n");

    let mut repo = InMemoryCardRepository::new();
    repo.create_card(NewCard::new("Gold", Money::from_major(40_000), 25, 15))?;
    repo.create_card(NewCard::new("Classic", Money::from_major(12_000), 3, 28))?;
    repo.create_card(NewCard::new("Store", Money::from_major(8_000), 18, 8))?;

    let dashboard = Dashboard::new(repo, CycleConfig::default())?;

    let summary = dashboard.summary()?;
    println!("cards: {}", summary.total_cards);
    println!("credit line: ${}", summary.total_credit_limit.to_grouped_string());

    // controlled clock so the output is reproducible
    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2025, 9, 24, 0, 0, 0).unwrap()
    ));
    let controller = time.test_control().unwrap();

    for _ in 0..3 {
        println!("\n{}", time.now().format("%Y-%m-%d"));

        for entry in dashboard.upcoming_payments_with_time(&time)?.iter() {
            println!(
                "  pay {} on day {} ({} days left{})",
                entry.name,
                entry.payment_day,
                entry.days_remaining,
                if entry.due_today { ", today" } else { "" }
            );
        }

        for entry in dashboard.available_cards_with_time(&time)?.iter() {
            println!(
                "  use {} until day {} ({} days left)",
                entry.name, entry.window_end_day, entry.days_remaining
            );
        }

        controller.advance(Duration::days(2));
    }

    Ok(())
}
