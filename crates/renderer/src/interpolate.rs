//! Scatter-to-raster interpolation.
//!
//! The pipeline hands this stage projected points, projected area corners
//! and a search radius in the same world units; the collaborator turns
//! them into a colored RGBA raster. The trait keeps the engine pluggable,
//! with [`KernelInterpolator`] as the shipped implementation.

use overlay_common::Area;
use rayon::prelude::*;
use tracing::debug;

use crate::colormap::Colormap;

/// A fixed-resolution RGBA image, 4 bytes per pixel, row-major.
#[derive(Debug, Clone)]
pub struct Raster {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// A scattered-point interpolation and colorization engine.
///
/// Contract: `area` and `radius` must be expressed in the same coordinate
/// space as `points`. The pipeline projects everything into world space
/// before calling this, so the Euclidean radius behaves uniformly across
/// the map.
pub trait Interpolate {
    #[allow(clippy::too_many_arguments)]
    fn render(
        &self,
        points: &[[f64; 2]],
        values: &[f64],
        area: &Area,
        width: u32,
        height: u32,
        radius: f64,
        colormap: &Colormap,
    ) -> Result<Raster, RenderError>;
}

/// Radial-kernel smoother over the scattered samples.
///
/// Each pixel takes the weighted mean of all samples within `radius`,
/// weighted by a compactly supported quartic kernel. Interpolated values
/// are min-max normalized over the raster and colored through the
/// colormap; the alpha channel is scaled by relative sample density so
/// pixels far from any sample fade to transparent.
#[derive(Debug, Clone, Copy, Default)]
pub struct KernelInterpolator;

impl Interpolate for KernelInterpolator {
    fn render(
        &self,
        points: &[[f64; 2]],
        values: &[f64],
        area: &Area,
        width: u32,
        height: u32,
        radius: f64,
        colormap: &Colormap,
    ) -> Result<Raster, RenderError> {
        if points.len() != values.len() {
            return Err(RenderError::Misaligned {
                points: points.len(),
                values: values.len(),
            });
        }
        if points.is_empty() {
            return Err(RenderError::NoSamples);
        }
        if width == 0 || height == 0 {
            return Err(RenderError::ZeroDimension { width, height });
        }
        if !(radius > 0.0 && radius.is_finite()) {
            return Err(RenderError::InvalidRadius(radius));
        }

        let w = width as usize;
        let h = height as usize;
        let step_x = area.width() / width as f64;
        let step_y = area.height() / height as f64;
        let radius_sq = radius * radius;

        // Pass 1: weighted mean and kernel density per pixel, sampled at
        // pixel centers. Rows are independent.
        let mut cells: Vec<(f64, f64)> = vec![(f64::NAN, 0.0); w * h];
        cells
            .par_chunks_mut(w)
            .enumerate()
            .for_each(|(py, row)| {
                let y = area.top_left[1] + (py as f64 + 0.5) * step_y;
                for (px, cell) in row.iter_mut().enumerate() {
                    let x = area.top_left[0] + (px as f64 + 0.5) * step_x;

                    let mut weighted_sum = 0.0;
                    let mut weight = 0.0;
                    for (point, value) in points.iter().zip(values) {
                        let dx = point[0] - x;
                        let dy = point[1] - y;
                        let dist_sq = dx * dx + dy * dy;
                        if dist_sq < radius_sq {
                            let falloff = 1.0 - dist_sq / radius_sq;
                            let k = falloff * falloff;
                            weighted_sum += k * value;
                            weight += k;
                        }
                    }

                    if weight > 0.0 {
                        *cell = (weighted_sum / weight, weight);
                    }
                }
            });

        // Pass 2: raster-wide ranges for value normalization and relative
        // density.
        let mut min_val = f64::INFINITY;
        let mut max_val = f64::NEG_INFINITY;
        let mut max_density = 0.0f64;
        for &(value, density) in &cells {
            if density > 0.0 {
                min_val = min_val.min(value);
                max_val = max_val.max(value);
                max_density = max_density.max(density);
            }
        }

        let range = max_val - min_val;
        debug!(
            covered = cells.iter().filter(|(_, d)| *d > 0.0).count(),
            min_val,
            max_val,
            "Interpolated raster field"
        );

        // Pass 3: colorize. Uncovered pixels stay fully transparent.
        let mut pixels = vec![0u8; w * h * 4];
        for (cell, pixel) in cells.iter().zip(pixels.chunks_exact_mut(4)) {
            let (value, density) = *cell;
            if density <= 0.0 {
                continue;
            }

            // A flat field (all samples equal) sits mid-ramp.
            let normalized = if range.abs() < 1e-12 {
                0.5
            } else {
                ((value - min_val) / range).clamp(0.0, 1.0)
            };

            let color = colormap.sample(normalized);
            let alpha = color[3] * (density / max_density);

            pixel[0] = to_channel(color[0]);
            pixel[1] = to_channel(color[1]);
            pixel[2] = to_channel(color[2]);
            pixel[3] = to_channel(alpha);
        }

        Ok(Raster {
            width,
            height,
            pixels,
        })
    }
}

fn to_channel(component: f64) -> u8 {
    (component.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("No sample points to interpolate")]
    NoSamples,

    #[error("Points and values are misaligned: {points} points vs {values} values")]
    Misaligned { points: usize, values: usize },

    #[error("Raster size {width}x{height} has a zero dimension")]
    ZeroDimension { width: u32, height: u32 },

    #[error("Search radius must be positive and finite, got {0}")]
    InvalidRadius(f64),

    #[error("PNG encoding failed: {0}")]
    Encode(String),
}
