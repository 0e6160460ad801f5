//! Raster rendering for the rent-price overlay.
//!
//! - Continuous colormaps and legend export
//! - Scattered-sample interpolation to an RGBA raster
//! - PNG encoding

pub mod colormap;
pub mod interpolate;
pub mod png;

pub use colormap::{export_colormap, Colormap, ColormapParseError};
pub use interpolate::{Interpolate, KernelInterpolator, Raster, RenderError};
