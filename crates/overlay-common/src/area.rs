//! Rectangular target area for the rendered raster.

use serde::{Deserialize, Serialize};

/// The rectangular window a raster covers, given as two corner points.
///
/// The corners live in whatever coordinate space the accompanying points
/// are in: (longitude, latitude) degrees before projection, planar world
/// coordinates after. With north-up geographic corners the top-left
/// latitude is the larger one; in world space the y axis grows southward,
/// so both `width` and `height` come out positive after projection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Area {
    /// Top-left corner (x, y).
    pub top_left: [f64; 2],
    /// Bottom-right corner (x, y).
    pub bottom_right: [f64; 2],
}

impl Area {
    /// Create an area from corner coordinates.
    pub fn new(top_left: [f64; 2], bottom_right: [f64; 2]) -> Self {
        Self {
            top_left,
            bottom_right,
        }
    }

    /// Parse an area parameter string: "left,top,right,bottom".
    pub fn from_param(s: &str) -> Result<Self, AreaParseError> {
        let parts: Vec<&str> = s.split(',').collect();
        if parts.len() != 4 {
            return Err(AreaParseError::InvalidFormat(s.to_string()));
        }

        let mut coords = [0.0f64; 4];
        for (slot, part) in coords.iter_mut().zip(&parts) {
            *slot = part
                .trim()
                .parse()
                .map_err(|_| AreaParseError::InvalidNumber(part.trim().to_string()))?;
        }

        Ok(Self {
            top_left: [coords[0], coords[1]],
            bottom_right: [coords[2], coords[3]],
        })
    }

    /// Signed horizontal extent, left corner to right corner.
    pub fn width(&self) -> f64 {
        self.bottom_right[0] - self.top_left[0]
    }

    /// Signed vertical extent, top corner to bottom corner.
    pub fn height(&self) -> f64 {
        self.bottom_right[1] - self.top_left[1]
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AreaParseError {
    #[error("Invalid area format: {0}. Expected 'left,top,right,bottom'")]
    InvalidFormat(String),

    #[error("Invalid number in area: {0}")]
    InvalidNumber(String),
}
