//! Logging setup

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Default filter directive for a verbosity level (`-v` count)
pub fn default_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info,kvsheet=info",
        2 => "info,kvsheet=debug",
        _ => "trace",
    }
}

/// Install a stderr subscriber; `RUST_LOG` overrides the verbosity default
///
/// Returns false if a global subscriber was already installed.
pub fn init_logging(verbosity: u8) -> bool {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbosity)));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init()
        .is_ok()
}
