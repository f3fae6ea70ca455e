//! Log configuration shared by the binaries.
//!
//! Logs go to stderr so they never mix with reports on stdout. `RUST_LOG` always wins over the
//! default level passed in here.

use tracing::metadata::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Installs the global subscriber at `INFO`.
pub fn configure() {
    configure_with(LevelFilter::INFO);
}

/// Installs the global subscriber with `default_level` for anything `RUST_LOG` doesn't mention.
pub fn configure_with(default_level: LevelFilter) {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_ansi(false))
        .with(
            EnvFilter::builder()
                .with_default_directive(default_level.into())
                .from_env_lossy(),
        )
        .init();
}

/// Maps a `-v` count onto a level: none is `INFO`, one is `DEBUG`, more is `TRACE`.
pub fn level_for_verbosity(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}
