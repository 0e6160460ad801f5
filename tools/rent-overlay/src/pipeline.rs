//! The load → clean → project → render → save pipeline.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use overlay_common::{SampleError, SampleTable};
use projection::{project_area, project_points};
use renderer::{export_colormap, png, Interpolate, KernelInterpolator};

use crate::config::OverlayConfig;

/// Run the full pipeline once. Every failure carries the stage it
/// happened in; on success both output files exist.
pub fn run(
    config: &OverlayConfig,
    input: &str,
    heatmap_path: &Path,
    legend_path: &Path,
) -> Result<()> {
    let table = read_source(input).context("loading samples")?;
    info!(samples = table.len(), input, "Loaded samples");

    let clean = table.drop_outliers(config.outlier_threshold);
    info!(
        kept = clean.len(),
        dropped = table.len() - clean.len(),
        "Removed outliers"
    );

    let world_points = project_points(&clean.points).context("projecting sample points")?;
    let world_area = project_area(&config.area).context("projecting target area")?;

    let raster = KernelInterpolator
        .render(
            &world_points,
            &clean.values,
            &world_area,
            config.width,
            config.height,
            config.radius,
            &config.colormap,
        )
        .context("rendering heatmap")?;
    let heatmap_bytes = png::encode(&raster).context("encoding heatmap PNG")?;

    let legend = export_colormap(&config.colormap, config.legend_entries);
    let legend_bytes = serde_json::to_vec(&legend).context("encoding legend JSON")?;

    write_outputs(heatmap_path, &heatmap_bytes, legend_path, &legend_bytes)?;
    info!(
        heatmap = %heatmap_path.display(),
        legend = %legend_path.display(),
        "Wrote overlay outputs"
    );
    Ok(())
}

/// Read the sample source, either a local path or an http(s) URL as the
/// upstream scraper publishes it.
pub fn read_source(input: &str) -> Result<SampleTable, SampleError> {
    if input.starts_with("http://") || input.starts_with("https://") {
        let body = reqwest::blocking::get(input)
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.text())
            .map_err(|e| SampleError::Unavailable(format!("{}: {}", input, e)))?;
        SampleTable::from_json_str(&body)
    } else {
        SampleTable::from_path(input)
    }
}

/// Both files or neither: the buffers are complete before the first write,
/// and a failed second write removes the first file again.
fn write_outputs(
    heatmap_path: &Path,
    heatmap: &[u8],
    legend_path: &Path,
    legend: &[u8],
) -> Result<()> {
    std::fs::write(heatmap_path, heatmap)
        .with_context(|| format!("writing {}", heatmap_path.display()))?;

    if let Err(e) = std::fs::write(legend_path, legend) {
        let _ = std::fs::remove_file(heatmap_path);
        return Err(e).with_context(|| format!("writing {}", legend_path.display()));
    }
    Ok(())
}
