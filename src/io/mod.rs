//! Input/output glue around the pattern and analysis core

/// Command-line interface and run orchestration
pub mod cli;
/// Constants and runtime defaults
pub mod configuration;
/// Input deck parsing
pub mod deck;
/// Error types
pub mod error;
/// PNG export of layers and plots
pub mod image;
/// Tracing subscriber setup
pub mod logging;
/// Correlation progress display
pub mod progress;
/// Plain-text tables and run records
pub mod report;
