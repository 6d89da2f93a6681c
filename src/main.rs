use std::path::PathBuf;

use anyhow::Context;
use card_cycle_rs::chrono::NaiveDate;
use card_cycle_rs::logging::init_cli_logger;
use card_cycle_rs::{
    CardId, CardRepository, Dashboard, DashboardConfig, DashboardView, JsonFileCardRepository,
    Money, NewCard, RankedView, RejectedCard, SafeTimeProvider, TimeSource, ViewRows,
};
use clap::{Parser, Subcommand};
use tracing::debug;

/// Credit card cycle tracker: statement closing and payment due days
#[derive(Parser)]
#[command(name = "cardcycle", version, about)]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// JSON card store (overrides storage.path from the config)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a new card
    Add {
        /// Card name (e.g. "Gold Rewards")
        #[arg(long)]
        name: String,
        /// Credit limit
        #[arg(long)]
        limit: Money,
        /// Day of month the statement closes (1-31)
        #[arg(long)]
        closing_day: u32,
        /// Day of month the payment is due (1-31)
        #[arg(long)]
        payment_day: u32,
    },

    /// List all registered cards
    List,

    /// Change fields of an existing card
    Edit {
        /// Card ID
        id: CardId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        limit: Option<Money>,
        #[arg(long)]
        closing_day: Option<u32>,
        #[arg(long)]
        payment_day: Option<u32>,
    },

    /// Delete a card
    Remove {
        /// Card ID
        id: CardId,
    },

    /// Cards with a payment due soon
    Upcoming {
        /// Reference date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Cards inside their post-closing window
    Available {
        /// Reference date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Card count and total credit line
    Summary,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_cli_logger(cli.verbose);

    let mut config = match &cli.config {
        Some(path) => DashboardConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => DashboardConfig::default(),
    };
    if let Some(store) = cli.store {
        config = config.with_store_path(store);
    }
    debug!(store = %config.storage.path.display(), "using card store");

    let repository = JsonFileCardRepository::open(&config.storage.path)
        .with_context(|| format!("failed to open card store {}", config.storage.path.display()))?;
    let mut dashboard = Dashboard::new(repository, config.cycle)?;

    match cli.command {
        Commands::Add {
            name,
            limit,
            closing_day,
            payment_day,
        } => {
            let card = dashboard
                .repository_mut()
                .create_card(NewCard::new(name, limit, closing_day, payment_day))?;
            println!("card created: {} ({})", card.name, card.id);
        }

        Commands::List => {
            let cards = dashboard.repository().list_cards()?;
            if cards.is_empty() {
                println!("no cards registered");
                return Ok(());
            }
            println!(
                "{:<36}  {:<24} {:>16} {:>8} {:>8}",
                "id", "name", "limit", "closing", "payment"
            );
            for card in cards {
                println!(
                    "{:<36}  {:<24} {:>16} {:>8} {:>8}",
                    card.id,
                    card.name,
                    format!("${}", card.credit_limit.to_grouped_string()),
                    card.closing_day,
                    card.payment_day
                );
            }
        }

        Commands::Edit {
            id,
            name,
            limit,
            closing_day,
            payment_day,
        } => {
            let current = dashboard.repository().get_card(id)?;
            let mut changes = NewCard::from(&current);
            if let Some(name) = name {
                changes.name = name;
            }
            if let Some(limit) = limit {
                changes.credit_limit = limit;
            }
            if let Some(day) = closing_day {
                changes.closing_day = day;
            }
            if let Some(day) = payment_day {
                changes.payment_day = day;
            }

            let card = dashboard.repository_mut().update_card(id, changes)?;
            println!("card updated: {} ({})", card.name, card.id);
        }

        Commands::Remove { id } => {
            let card = dashboard.repository_mut().delete_card(id)?;
            println!("card deleted: {} ({})", card.name, card.id);
        }

        Commands::Upcoming { date } => {
            let rows = dashboard.view(DashboardView::UpcomingPayments, reference_date(date))?;
            print_rows(&rows);
        }

        Commands::Available { date } => {
            let rows = dashboard.view(DashboardView::Available, reference_date(date))?;
            print_rows(&rows);
        }

        Commands::Summary => {
            let summary = dashboard.summary()?;
            println!("total cards registered: {}", summary.total_cards);
            println!(
                "total credit line: ${}",
                summary.total_credit_limit.to_grouped_string()
            );
        }
    }

    Ok(())
}

fn reference_date(date: Option<NaiveDate>) -> NaiveDate {
    date.unwrap_or_else(|| {
        SafeTimeProvider::new(TimeSource::System)
            .now()
            .date_naive()
    })
}

fn print_rows(rows: &ViewRows) {
    match rows {
        ViewRows::UpcomingPayments(view) => {
            if view.is_empty() {
                println!("no cards with a payment due soon");
            } else {
                println!("{:<24} {:>8} {:>10}", "card", "payment", "days left");
                for entry in view.iter() {
                    let marker = if entry.due_today { "  DUE TODAY" } else { "" };
                    println!(
                        "{:<24} {:>8} {:>10}{}",
                        entry.name, entry.payment_day, entry.days_remaining, marker
                    );
                }
            }
            print_rejected(view);
        }
        ViewRows::Available(view) => {
            if view.is_empty() {
                println!("no cards available for this date");
            } else {
                println!(
                    "{:<24} {:>8} {:>10} {:>10}",
                    "card", "closing", "available", "days left"
                );
                for entry in view.iter() {
                    println!(
                        "{:<24} {:>8} {:>10} {:>10}",
                        entry.name, entry.closing_day, entry.window_end_day, entry.days_remaining
                    );
                }
            }
            print_rejected(view);
        }
    }
}

fn print_rejected<T>(view: &RankedView<T>) {
    let rejected: &[RejectedCard] = &view.rejected;
    for card in rejected {
        eprintln!("skipped {} ({}): {}", card.name, card.card_id, card.reason);
    }
}
