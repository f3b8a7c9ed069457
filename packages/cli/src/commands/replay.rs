use crate::config::Config;
use anyhow::{anyhow, Context, Result};
use clap::Args;
use colored::Colorize;
use imebridge_input::{
    dispatch, EventDisposition, HostEvent, InputEngine, MemoryClipboard, MemorySurface, Outbound,
    Platform, RecordingChannel,
};
use serde_json::json;
use std::fs;
use std::path::PathBuf;
use tracing::info;

use super::parse_platform;

#[derive(Debug, Args)]
pub struct ReplayArgs {
    /// JSON file holding an array of host events
    pub script: PathBuf,

    /// Print one JSON object per outbound item instead of frames
    #[arg(long)]
    pub json: bool,

    /// Host platform (generic, gecko); overrides config
    #[arg(short, long, value_parser = parse_platform)]
    pub platform: Option<Platform>,

    /// Target surface id; overrides config
    #[arg(short, long)]
    pub target: Option<u32>,

    /// Simulate a surface that echoes program writes
    #[arg(long)]
    pub echo: bool,
}

pub fn replay(args: ReplayArgs, cwd: &str) -> Result<()> {
    let mut config = Config::load(cwd)?.with_overrides(args.platform, args.target);
    config.echo_writes |= args.echo;

    let source = fs::read_to_string(&args.script)
        .with_context(|| format!("Cannot read event script {}", args.script.display()))?;
    let events: Vec<HostEvent> = serde_json::from_str(&source)
        .map_err(|e| anyhow!("Invalid event script {}: {}", args.script.display(), e))?;

    info!(events = events.len(), platform = ?config.platform, "Replaying event script");

    let surface = if config.echo_writes {
        MemorySurface::with_echo()
    } else {
        MemorySurface::new()
    };
    let mut engine = InputEngine::new(surface, RecordingChannel::new(), config.engine_options());
    let mut clipboard = MemoryClipboard::new();

    if !args.json {
        println!(
            "{} {} events from {}",
            "▶".bright_blue().bold(),
            events.len(),
            args.script.display()
        );
    }

    for (index, event) in events.into_iter().enumerate() {
        let label = event_label(&event);
        let disposition = dispatch(&mut engine, event, &mut clipboard);
        let sent = engine.channel_mut().take();

        if args.json {
            for out in &sent {
                println!("{}", outbound_json(index, out)?);
            }
            continue;
        }

        let marker = match disposition {
            EventDisposition::PreventDefault => " (default prevented)".dimmed().to_string(),
            EventDisposition::Default => String::new(),
        };
        println!("{:>4} {}{}", index.to_string().dimmed(), label.bold(), marker);
        for out in &sent {
            match out {
                Outbound::Message(message) => {
                    println!("       {} {}", "→".cyan(), message.to_frame().trim_end())
                }
                Outbound::DocumentTransfer { target, payload } => println!(
                    "       {} document transfer to {} ({} items)",
                    "⇒".yellow(),
                    target,
                    payload.items.len()
                ),
            }
        }
    }

    if !args.json {
        println!();
        println!(
            "{} surface {:?}, composition {:?}",
            "✓".green(),
            engine.surface().content(),
            engine.composition_state()
        );
    }

    Ok(())
}

fn event_label(event: &HostEvent) -> String {
    match event {
        HostEvent::Input { raw } => format!("input {:?}", raw),
        HostEvent::CompositionStart => "composition start".to_string(),
        HostEvent::CompositionUpdate { raw } => format!("composition update {:?}", raw),
        HostEvent::CompositionEnd { raw } => format!("composition end {:?}", raw),
        HostEvent::KeyUp { key } => format!("key up {}", key),
        HostEvent::PointerDown => "pointer down".to_string(),
        HostEvent::TouchStart => "touch start".to_string(),
        HostEvent::Blur => "blur".to_string(),
        HostEvent::FocusRequest => "focus request".to_string(),
        HostEvent::Select => "select".to_string(),
        HostEvent::Paste { payload } => format!("paste {:?}", payload.plain_text),
        HostEvent::Copy { selection } => format!("copy {:?}", selection),
        HostEvent::Cut { selection } => format!("cut {:?}", selection),
    }
}

fn outbound_json(index: usize, out: &Outbound) -> Result<String> {
    let value = match out {
        Outbound::Message(message) => json!({
            "event": index,
            "frame": message.to_frame(),
            "message": message,
        }),
        Outbound::DocumentTransfer { target, payload } => json!({
            "event": index,
            "documentTransfer": { "target": target, "payload": payload },
        }),
    };
    Ok(serde_json::to_string(&value)?)
}
