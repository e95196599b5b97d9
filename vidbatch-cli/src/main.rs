// ============================================================================
// vidbatch-cli/src/main.rs
// ============================================================================
//
// VIDBATCH CLI: Main Entry Point
//
// Parses the command line, runs one batch conversion and maps the outcome to
// the process exit code:
// - 0: the batch ran to completion, even if some files failed to convert
// - 1: a startup condition failed (config, transcoder, directories,
//      metadata bound to another input directory)
//
// AI-ASSISTANT-INFO: Main entry point for the vidbatch CLI application

// ---- Internal crate imports ----
use vidbatch_cli::progress::CliProgress;
use vidbatch_cli::terminal::{print_error, print_summary};
use vidbatch_cli::{Cli, run_convert};

// ---- External crate imports ----
use clap::Parser;

// ---- Standard library imports ----
use std::process;

fn main() {
    let cli = Cli::parse();
    let progress = CliProgress::new();

    match run_convert(&cli, &progress) {
        Ok((summary, paths)) => {
            print_summary(&summary, &paths.output_dir);
        }
        Err(e) => {
            print_error(&e.to_string());
            process::exit(1);
        }
    }
}
