// ============================================================================
// vidbatch-cli/src/logging.rs
// ============================================================================
//
// LOGGING SETUP: env_logger Initialization
//
// The application logs through the standard `log` macros with `env_logger`
// as the backend. The level comes from the `[logging] level` entry of the
// configuration file; a RUST_LOG environment variable, when set, takes
// precedence:
// - RUST_LOG=debug: Detailed debugging information (ffmpeg command lines)
// - RUST_LOG=vidbatch_core=trace: Very verbose output from the core only
//
// AI-ASSISTANT-INFO: Logging initialization for the CLI

use console::style;
use env_logger::{Builder, Env};
use log::LevelFilter;

use std::io::Write;

/// Initializes the global logger at `level`, writing to stderr.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging(level: LevelFilter) {
    let result = Builder::new()
        .filter_level(level)
        .parse_env(Env::default())
        .format(|buf, record| {
            let level_str = match record.level() {
                log::Level::Error => style("ERROR").red().bold(),
                log::Level::Warn => style("WARN ").yellow(),
                log::Level::Info => style("INFO ").green(),
                log::Level::Debug => style("DEBUG").blue(),
                log::Level::Trace => style("TRACE").magenta(),
            };
            writeln!(buf, "{} {} {}", buf.timestamp(), level_str, record.args())
        })
        .try_init();

    if result.is_ok() {
        log::debug!("Logger initialized with level: {level}");
    }
}
