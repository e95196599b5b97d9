// vidbatch-cli/src/cli.rs
//
// Defines the command-line argument structure using clap.

use clap::Parser;
use std::path::PathBuf;

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "vidbatch: incremental batch video converter",
    long_about = "Converts every video under INPUT_DIR into OUTPUT_DIR with ffmpeg, \
                  remembering what was converted with which settings so repeated \
                  runs only redo new, failed, or re-configured files."
)]
pub struct Cli {
    /// Directory containing the source videos (searched recursively)
    #[arg(required = true, value_name = "INPUT_DIR")]
    pub input_dir: PathBuf,

    /// Directory where converted files are written (created if missing)
    #[arg(required = true, value_name = "OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Path to the TOML configuration file [default: config.toml]
    #[arg(short, long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// ffmpeg binary to run, either a name on PATH or a path.
    /// Can also be set via the VIDBATCH_FFMPEG environment variable.
    #[arg(long, value_name = "FFMPEG", env = "VIDBATCH_FFMPEG", default_value = "ffmpeg")]
    pub ffmpeg: PathBuf,
}
