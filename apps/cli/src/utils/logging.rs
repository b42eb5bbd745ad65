use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable read when neither `--log-level` nor `-v` is given.
pub const LOG_ENV: &str = "NEXST_LOG";

const DEFAULT_FILTER: &str = "warn";

/// Installs the global subscriber. Logs go to stderr so they never mix with
/// the summary printed on stdout.
pub fn init(level: Option<&str>, verbose: bool) {
    let filter = resolve_filter(level, verbose);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init();
}

fn resolve_filter(level: Option<&str>, verbose: bool) -> EnvFilter {
    let filter = match (level, verbose) {
        (Some(level), _) => EnvFilter::try_new(level).ok(),
        (None, true) => EnvFilter::try_new("debug").ok(),
        (None, false) => EnvFilter::try_from_env(LOG_ENV).ok(),
    };
    filter.unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}
