//! Structured logging setup for the command-line tool

use std::sync::Once;
use tracing_subscriber::EnvFilter;

/// Log level selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Normal progress messages
    Info,
    /// Per-run solver details
    Debug,
    /// Per-iteration solver details
    Trace,
}

impl LogLevel {
    /// Level for a `-v` count, with `quiet` forcing errors only
    pub const fn from_verbosity(verbosity: u8, quiet: bool) -> Self {
        if quiet {
            return Self::Error;
        }
        match verbosity {
            0 => Self::Warn,
            1 => Self::Info,
            2 => Self::Debug,
            _ => Self::Trace,
        }
    }

    /// Filter directive understood by `EnvFilter`
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

static TRACING_INIT: Once = Once::new();

/// Install the global subscriber; later calls are ignored
///
/// `RUST_LOG` takes precedence over `level` when set.
pub fn init_tracing(level: LogLevel) {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(level.as_str()));

        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .compact();

        // A subscriber may already be installed by a test harness
        let _ = subscriber.try_init();
    });
}
