//! SwipeDeck command line entry point.
//!
//! # Responsibility
//! - Provide a linkage probe for `swipedeck_core` (`probe`).
//! - Replay scripted deck sessions without a UI (`replay`).

mod replay;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "swipedeck")]
#[command(about = "Swipe deck classifier and session replay")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Absolute directory for rolling log files; logging stays off when unset.
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// Log level (trace|debug|info|warn|error); defaults by build mode.
    #[arg(long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Print ping and version lines
    Probe,
    /// Replay a JSON session script and print each transition and the tally
    Replay { script: PathBuf },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(dir) = &cli.log_dir {
        let level = cli
            .log_level
            .as_deref()
            .unwrap_or(swipedeck_core::default_log_level());
        if let Err(err) = swipedeck_core::init_logging(level, &dir.to_string_lossy()) {
            eprintln!("logging disabled: {err}");
        }
    }

    match cli.command.unwrap_or(Command::Probe) {
        Command::Probe => {
            println!("swipedeck_core ping={}", swipedeck_core::ping());
            println!("swipedeck_core version={}", swipedeck_core::core_version());
            ExitCode::SUCCESS
        }
        Command::Replay { script } => match replay::run_file(&script) {
            Ok(report) => {
                for line in &report.lines {
                    println!("{line}");
                }
                println!("tally={}", report.tally_json);
                ExitCode::SUCCESS
            }
            Err(err) => {
                eprintln!("replay failed: {err}");
                ExitCode::FAILURE
            }
        },
    }
}
