//! Input/output: errors, configuration, scene files, export and the CLI

/// Command-line interface and scene runner
pub mod cli;
/// Solver constants and defaults
pub mod configuration;
/// Error types and context helpers
pub mod error;
/// JSON placement export
pub mod export;
/// Tracing subscriber setup
pub mod logging;
/// Progress bar for solves
pub mod progress;
/// TOML scene files
pub mod scene;
