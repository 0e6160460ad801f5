//! Rent-price heatmap overlay generator.
//!
//! Loads geocoded rent samples, drops median-absolute-deviation outliers,
//! projects everything into Web Mercator world space, interpolates the
//! samples into a raster heatmap, and writes the heatmap PNG plus a
//! colormap legend JSON.

use std::path::PathBuf;

use anyhow::{ensure, Result};
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use overlay_common::Area;
use rent_overlay::config::OverlayConfig;
use rent_overlay::pipeline;

#[derive(Parser, Debug)]
#[command(name = "rent-overlay")]
#[command(about = "Render a rent-price heatmap overlay and its colormap legend")]
struct Args {
    /// Samples JSON path or http(s) URL
    #[arg(long, env = "OVERLAY_INPUT", default_value = "samples.json")]
    input: String,

    /// Heatmap PNG output path
    #[arg(long, env = "OVERLAY_OUTPUT", default_value = "heatmap.png")]
    output: PathBuf,

    /// Legend JSON output path
    #[arg(long, env = "OVERLAY_LEGEND", default_value = "legend.json")]
    legend: PathBuf,

    /// Target area as "left,top,right,bottom" in degrees
    #[arg(long)]
    area: Option<String>,

    /// Raster width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Raster height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Interpolation search radius in world-coordinate units
    #[arg(long)]
    radius: Option<f64>,

    /// Colormap name (summer, autumn, winter, spring)
    #[arg(long)]
    colormap: Option<String>,

    /// Number of entries in the exported legend
    #[arg(long)]
    legend_entries: Option<usize>,

    /// Outlier threshold as a relative MAD distance (strict)
    #[arg(long)]
    threshold: Option<f64>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Initialize tracing
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut config = OverlayConfig::default();
    if let Some(area) = &args.area {
        config.area = Area::from_param(area)?;
    }
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if let Some(radius) = args.radius {
        config.radius = radius;
    }
    if let Some(name) = &args.colormap {
        config.colormap = name.parse()?;
    }
    if let Some(entries) = args.legend_entries {
        config.legend_entries = entries;
    }
    if let Some(threshold) = args.threshold {
        config.outlier_threshold = threshold;
    }
    ensure!(
        config.legend_entries >= 1,
        "the legend needs at least one entry"
    );

    pipeline::run(&config, &args.input, &args.output, &args.legend)
}
