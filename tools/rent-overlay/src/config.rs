//! Pipeline configuration with documented defaults.

use overlay_common::Area;
use renderer::Colormap;

/// Everything the pipeline needs besides the file locations.
///
/// The defaults reproduce the published Karlsruhe overlay; tests and the
/// CLI override individual fields instead of mutating shared state.
#[derive(Debug, Clone)]
pub struct OverlayConfig {
    /// Geographic target area in degrees, top-left then bottom-right.
    pub area: Area,

    /// Output raster width in pixels.
    pub width: u32,

    /// Output raster height in pixels.
    pub height: u32,

    /// Interpolation search radius, in world-coordinate units because the
    /// points are projected before rendering. Roughly 0.01° of longitude.
    /// Re-tune this if the projection ever changes.
    pub radius: f64,

    /// Colormap for the heatmap and the exported legend.
    pub colormap: Colormap,

    /// Number of RGBA entries sampled into the legend export.
    pub legend_entries: usize,

    /// Strict relative-MAD threshold for outlier removal.
    pub outlier_threshold: f64,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            area: Area::new([8.28, 49.08], [8.53, 48.92]),
            width: 250,
            height: 160,
            radius: 1.75e-4,
            colormap: Colormap::summer(),
            legend_entries: 20,
            outlier_threshold: 6.0,
        }
    }
}
