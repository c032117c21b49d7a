// src/main.rs

// Declare modules
pub mod classify;
pub mod color;
pub mod config;
pub mod export;
pub mod grid;
pub mod primes;
pub mod render;
pub mod stats;

use crate::config::Config;
use crate::grid::GridBuilder;
use crate::render::Renderer;
use crate::stats::Summary;

use anyhow::Result;
use clap::Parser;
use log::info;
use std::path::PathBuf;

/// Default config file looked up next to the working directory.
const DEFAULT_CONFIG_FILE: &str = "prime-vis.json";

/// Headless prime number visualization tool.
///
/// Classifies each grid value by prime type and renders the grid as a
/// color-coded PNG.
#[derive(Parser, Debug)]
#[command(name = "primevis", version, about)]
struct Args {
    /// Number of columns in the grid
    #[arg(long)]
    cols: Option<u32>,

    /// Number of rows in the grid
    #[arg(long)]
    rows: Option<u32>,

    /// Size of each dot in pixels
    #[arg(long)]
    dot_size: Option<u32>,

    /// Spacing between dots in pixels
    #[arg(long)]
    spacing: Option<u32>,

    /// Output image path
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Path to a custom configuration file
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Initialize the logger. Default filter is "info" if RUST_LOG is not set.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    let args = Args::parse();

    // --- Configuration ---
    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    let mut config = Config::load(&config_path)?;

    // CLI arguments override the config file.
    if let Some(cols) = args.cols {
        config.grid.columns = cols;
    }
    if let Some(rows) = args.rows {
        config.grid.rows = rows;
    }
    if let Some(dot_size) = args.dot_size {
        config.grid.dot_size = dot_size;
    }
    if let Some(spacing) = args.spacing {
        config.grid.spacing = spacing;
    }
    config.validate()?;

    let output_path = args
        .output
        .unwrap_or_else(|| PathBuf::from(&config.application.default_output_file));

    info!(
        "Generating prime visualization: {}x{} grid, dot size {}, spacing {}",
        config.grid.columns, config.grid.rows, config.grid.dot_size, config.grid.spacing
    );

    // --- Pipeline: build, render, export ---
    let builder = GridBuilder::new();
    let grid = builder.build(config.grid.rows, config.grid.columns, config.grid.base_offset);

    let renderer = Renderer::new();
    let bitmap = renderer.render(
        &grid,
        &config.colors,
        config.grid.dot_size,
        config.grid.spacing,
        config.grid.background_color,
    );

    let summary = Summary::from_grid(&grid, config.grid.dot_size, config.grid.spacing);
    export::save_png(bitmap, &output_path)?;

    println!("Image generated: {}", output_path.display());
    if config.application.enable_statistics {
        println!("{}", summary);
    }

    Ok(())
}
