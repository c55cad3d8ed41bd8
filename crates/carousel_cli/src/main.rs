//! Carousel CLI
//!
//! Replay input scenarios against a headless carousel.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod replay;
mod scenario;

use replay::Replay;
use scenario::Scenario;

#[derive(Parser)]
#[command(name = "carousel")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Carousel navigation CLI", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Feed a scenario's events to a headless carousel and print its state
    Replay {
        /// Scenario file (TOML)
        scenario: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Replay { scenario } => cmd_replay(&scenario),
    }
}

fn cmd_replay(path: &Path) -> Result<()> {
    let scenario = Scenario::load(path)?;
    info!(
        "Replaying {} event(s) over {} item(s)",
        scenario.events.len(),
        scenario.items.len()
    );

    let mut replay = Replay::new(&scenario)?;
    println!("{:>4}  {:<14} {}", "#", "load", replay.frame());

    for (step, event) in scenario.events.iter().enumerate() {
        let frame = replay.step(event)?;
        println!("{:>4}  {:<14} {}", step + 1, event_label(event), frame);
    }

    info!("{} listener(s) still registered", replay.listener_count());
    Ok(())
}

fn event_label(event: &scenario::ScenarioEvent) -> String {
    use scenario::ScenarioEvent::*;

    match event {
        Key { key } => format!("key {:?}", key),
        Press { .. } => "press".to_string(),
        Move { .. } => "move".to_string(),
        Release { .. } => "release".to_string(),
        TouchStart { id, .. } => format!("touch_start {}", id),
        TouchMove { id, .. } => format!("touch_move {}", id),
        TouchEnd { id, .. } => format!("touch_end {}", id),
        TouchCancel { id } => format!("touch_cancel {}", id),
        Thumbnail { index } => format!("thumbnail {}", index),
        Attribute { name, .. } => format!("attr {}", name),
        Load { items } => format!("load {}", items),
        Tick { frames } => format!("tick {}", frames),
        Detach => "detach".to_string(),
    }
}
