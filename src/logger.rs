use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Environment variable holding the log filter; `RUST_LOG` is used when unset.
pub const LOG_ENV: &str = "STREST_RW_LOG";

fn resolve_filter(verbose: bool) -> EnvFilter {
    let fallback = if verbose { "debug" } else { "info" };
    std::env::var(LOG_ENV)
        .or_else(|_| std::env::var("RUST_LOG"))
        .map_or_else(
            |_| EnvFilter::new(fallback),
            |value| EnvFilter::try_new(value).unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
}

/// Installs the global subscriber, writing to stderr so stdout stays free
/// for piped data. Returns `false` when a subscriber was already installed.
#[must_use]
pub fn init_logging(verbose: bool, no_color: bool) -> bool {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(resolve_filter(verbose))
        .with_ansi(!no_color)
        .with_writer(std::io::stderr)
        .finish();

    match tracing::subscriber::set_global_default(subscriber) {
        Ok(()) => true,
        Err(err) => {
            eprintln!("Failed to set global default subscriber: {}", err);
            false
        }
    }
}
