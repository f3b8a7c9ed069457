use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use imebridge_input::{EncodedStep, Platform, ProtocolEncoder};

use super::{parse_platform, unescape};

#[derive(Debug, Args)]
pub struct EncodeArgs {
    /// Inserted text; `\n` and `\r` are line breaks
    pub text: String,

    /// Host platform (generic, gecko); overrides config
    #[arg(short, long, value_parser = parse_platform)]
    pub platform: Option<Platform>,

    /// Target surface id; overrides config
    #[arg(short, long)]
    pub target: Option<u32>,
}

pub fn encode(args: EncodeArgs, cwd: &str) -> Result<()> {
    let text = unescape(&args.text);
    if text.is_empty() {
        return Err(anyhow!("Nothing to encode: text is empty"));
    }

    let config = Config::load(cwd)?.with_overrides(args.platform, args.target);
    let options = config.engine_options();
    let encoder = ProtocolEncoder::new(options.target, options.quirks);

    let steps = encoder.encode_insertion(&text);
    if steps.is_empty() {
        println!("{}", "Nothing sent (platform delivers its own key event)".dimmed());
    }

    for step in steps {
        match step {
            EncodedStep::Send(message) => println!("  {} {}", "→".cyan(), message.to_frame().trim_end()),
            EncodedStep::ResetSurface => println!("  {}", "(reset surface)".dimmed()),
        }
    }
    Ok(())
}
