use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// default filter directive for the given verbosity
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "card_cycle_rs=debug,cardcycle=debug,info"
    } else {
        "card_cycle_rs=info,cardcycle=info,warn"
    }
}

/// install the compact stderr logger; `RUST_LOG` takes precedence
pub fn init_cli_logger(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}
