//! Drift CLI
//!
//! Replay auto-scroll scenarios and inspect gutter geometry without a window.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use drift_core::{Point, Rect};
use drift_scroll::{AutoScrollConfig, Gutter};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod simulate;

use config::Scenario;

#[derive(Parser)]
#[command(name = "drift")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Drift edge auto-scroll CLI", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a scenario and report the scroll offset after every frame
    Simulate {
        /// Scenario file (TOML)
        scenario: PathBuf,

        /// Override the scenario's frame count
        #[arg(short, long)]
        frames: Option<u64>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Pace frames at the display rate instead of running back to back
        #[arg(long)]
        realtime: bool,
    },

    /// Check a scenario file for errors
    Check {
        /// Scenario file (TOML)
        scenario: PathBuf,
    },

    /// Classify one pointer position against a container's gutters
    Gutter {
        /// Container edges: left,top,right,bottom
        #[arg(long, value_delimiter = ',', default_values_t = [0.0, 0.0, 500.0, 300.0])]
        bounds: Vec<f32>,

        /// Gutter width
        #[arg(long, default_value_t = drift_scroll::DEFAULT_SIZE)]
        size: f32,

        /// Speed scale factor
        #[arg(long, default_value_t = drift_scroll::DEFAULT_INTENSITY, allow_negative_numbers = true)]
        intensity: f32,

        /// Pointer x
        #[arg(allow_negative_numbers = true)]
        x: f32,

        /// Pointer y
        #[arg(allow_negative_numbers = true)]
        y: f32,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
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
        Commands::Simulate {
            scenario,
            frames,
            format,
            realtime,
        } => cmd_simulate(&scenario, frames, format, realtime),

        Commands::Check { scenario } => cmd_check(&scenario),

        Commands::Gutter {
            bounds,
            size,
            intensity,
            x,
            y,
        } => cmd_gutter(&bounds, size, intensity, x, y),
    }
}

fn cmd_simulate(
    path: &Path,
    frames: Option<u64>,
    format: OutputFormat,
    realtime: bool,
) -> Result<()> {
    let scenario = Scenario::load(path)?;
    info!(
        "Replaying {} ({} frames)",
        path.display(),
        frames.unwrap_or(scenario.frames)
    );

    let report = simulate::run(&scenario, frames, realtime)?;
    match format {
        OutputFormat::Text => print!("{}", simulate::render_text(&report)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}

fn cmd_check(path: &Path) -> Result<()> {
    let scenario = Scenario::load(path)?;
    let config = scenario.config();

    info!("{} is valid", path.display());
    println!("  Frames:      {}", scenario.frames);
    println!("  Bounds:      {:?}", scenario.container.bounds);
    println!("  Scroll size: {:?}", scenario.container.scroll_size);
    println!(
        "  Auto-scroll: {} (size {}, intensity {})",
        if config.enabled { "enabled" } else { "disabled" },
        config.size,
        config.intensity
    );
    println!("  Input steps: {}", scenario.input.len());
    Ok(())
}

fn cmd_gutter(bounds: &[f32], size: f32, intensity: f32, x: f32, y: f32) -> Result<()> {
    let [left, top, right, bottom] = bounds else {
        anyhow::bail!("Expected --bounds left,top,right,bottom, got {:?}", bounds);
    };
    AutoScrollConfig::default()
        .with_size(size)
        .with_intensity(intensity)
        .validate()?;

    let gutter = Gutter::new(Rect::from_edges(*left, *top, *right, *bottom), size);
    let pointer = Point::new(x, y);
    let hit = gutter.hit(pointer);
    let delta = gutter.velocity(pointer, intensity);

    let edges: Vec<&str> = [
        (hit.top, "top"),
        (hit.bottom, "bottom"),
        (hit.left, "left"),
        (hit.right, "right"),
    ]
    .into_iter()
    .filter_map(|(hit, name)| hit.then_some(name))
    .collect();

    println!(
        "Edges:    top {}, bottom {}, left {}, right {}",
        gutter.edge_top, gutter.edge_bottom, gutter.edge_left, gutter.edge_right
    );
    if edges.is_empty() {
        println!("Gutters:  none");
    } else {
        println!("Gutters:  {}", edges.join(", "));
    }
    println!("Velocity: ({}, {}) per frame", delta.x, delta.y);
    Ok(())
}
