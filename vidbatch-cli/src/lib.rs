// vidbatch-cli/src/lib.rs
//
// Library portion of the vidbatch CLI application.
// Contains argument definitions and command logic.

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod progress;
pub mod terminal;

// Re-export items needed by the binary or integration tests
pub use cli::Cli;
pub use commands::convert::{RunPaths, prepare_directories, run_convert};
pub use error::{CliErrorContext, CliResult};
