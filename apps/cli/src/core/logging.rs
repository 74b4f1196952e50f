use tracing_subscriber::{fmt, EnvFilter};

pub const LOG_ENV: &str = "ONBOARD_LOG";

/// `ONBOARD_LOG` wins, then `--verbose`, then the config file's level.
/// Logs go to stderr so they stay out of piped output.
pub fn init(config_level: &str, verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new(config_level)
        }
    });

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
