mod commands;
mod config;

use clap::{ArgAction, Parser, Subcommand};
use colored::Colorize;
use commands::{diff, encode, replay, DiffArgs, EncodeArgs, ReplayArgs};
use tracing_subscriber::EnvFilter;

/// imebridge CLI - replay and inspect hidden-surface input reconciliation
#[derive(Parser, Debug)]
#[command(name = "imebridge")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug); RUST_LOG wins if set
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Drive the engine from a JSON event script and print outbound frames
    Replay(ReplayArgs),

    /// Show the edit script between two snapshots
    Diff(DiffArgs),

    /// Show the frames sent for an inserted text
    Encode(EncodeArgs),
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let cwd = std::env::current_dir()
        .expect("Cannot get current directory")
        .display()
        .to_string();

    let result = match cli.command {
        Command::Replay(args) => replay(args, &cwd),
        Command::Diff(args) => diff(args),
        Command::Encode(args) => encode(args, &cwd),
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
