use anyhow::Result;
use clap::Args;
use colored::Colorize;
use imebridge_input::Snapshot;

use super::unescape;

#[derive(Debug, Args)]
pub struct DiffArgs {
    /// Previously accepted content
    pub previous: String,

    /// New content
    pub current: String,

    /// Print the edit script as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn diff(args: DiffArgs) -> Result<()> {
    let previous = Snapshot::from(unescape(&args.previous).as_str());
    let current = Snapshot::from(unescape(&args.current).as_str());

    let script = imebridge_input::diff(previous.chars(), current.chars());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&script)?);
        return Ok(());
    }

    if script.is_empty() {
        println!("{}", "No change".dimmed());
        return Ok(());
    }

    println!(
        "  {} {}",
        "remove".red(),
        script.remove_count.to_string().bold()
    );
    println!("  {} {:?}", "insert".green(), script.inserted_text);
    Ok(())
}
