//! Command implementations for the CLI.

/// The batch conversion run: config, store binding, discovery, processing.
pub mod convert;
