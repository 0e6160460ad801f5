//! Continuous colormaps and the legend export table.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A continuous map from a normalized scalar in [0, 1] to an RGBA color
/// with components in [0, 1].
///
/// Colors are linearly interpolated between ascending position stops;
/// inputs outside [0, 1] clamp to the end stops.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Colormap {
    stops: Vec<ColorStop>,
}

/// A color stop at a normalized position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorStop {
    pub position: f64,
    pub color: [f64; 4],
}

impl Colormap {
    /// Yellow-green ramp, the default for the rent overlay.
    pub fn summer() -> Self {
        Self::from_stops(vec![
            ColorStop {
                position: 0.0,
                color: [0.0, 0.5, 0.4, 1.0],
            },
            ColorStop {
                position: 1.0,
                color: [1.0, 1.0, 0.4, 1.0],
            },
        ])
    }

    /// Red to yellow.
    pub fn autumn() -> Self {
        Self::from_stops(vec![
            ColorStop {
                position: 0.0,
                color: [1.0, 0.0, 0.0, 1.0],
            },
            ColorStop {
                position: 1.0,
                color: [1.0, 1.0, 0.0, 1.0],
            },
        ])
    }

    /// Blue to green.
    pub fn winter() -> Self {
        Self::from_stops(vec![
            ColorStop {
                position: 0.0,
                color: [0.0, 0.0, 1.0, 1.0],
            },
            ColorStop {
                position: 1.0,
                color: [0.0, 1.0, 0.5, 1.0],
            },
        ])
    }

    /// Magenta to yellow.
    pub fn spring() -> Self {
        Self::from_stops(vec![
            ColorStop {
                position: 0.0,
                color: [1.0, 0.0, 1.0, 1.0],
            },
            ColorStop {
                position: 1.0,
                color: [1.0, 1.0, 0.0, 1.0],
            },
        ])
    }

    /// Build a colormap from stops. Stops must be in ascending position
    /// order with at least two entries.
    pub fn from_stops(stops: Vec<ColorStop>) -> Self {
        debug_assert!(stops.len() >= 2, "a colormap needs at least 2 stops");
        debug_assert!(
            stops.windows(2).all(|w| w[0].position < w[1].position),
            "colormap stops must be in ascending position order"
        );
        Self { stops }
    }

    /// Sample the colormap at a normalized position.
    pub fn sample(&self, t: f64) -> [f64; 4] {
        let t = t.clamp(0.0, 1.0);

        let first = &self.stops[0];
        if t <= first.position {
            return first.color;
        }

        for window in self.stops.windows(2) {
            let (low, high) = (&window[0], &window[1]);
            if t <= high.position {
                let frac = (t - low.position) / (high.position - low.position);
                return lerp_color(low.color, high.color, frac);
            }
        }

        self.stops.last().expect("stops are never empty").color
    }
}

impl FromStr for Colormap {
    type Err = ColormapParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "summer" => Ok(Colormap::summer()),
            "autumn" => Ok(Colormap::autumn()),
            "winter" => Ok(Colormap::winter()),
            "spring" => Ok(Colormap::spring()),
            _ => Err(ColormapParseError::UnknownColormap(s.to_string())),
        }
    }
}

fn lerp_color(a: [f64; 4], b: [f64; 4], t: f64) -> [f64; 4] {
    let mut out = [0.0; 4];
    for (i, slot) in out.iter_mut().enumerate() {
        *slot = a[i] * (1.0 - t) + b[i] * t;
    }
    out
}

/// Sample a colormap at `entries` linearly spaced positions from 0 to 1
/// inclusive, for external legend rendering.
///
/// `entries == 1` samples only position 0; `entries >= 2` includes both
/// endpoints. The output order follows ascending position.
pub fn export_colormap(colormap: &Colormap, entries: usize) -> Vec<[f64; 4]> {
    match entries {
        0 => Vec::new(),
        1 => vec![colormap.sample(0.0)],
        n => (0..n)
            .map(|i| colormap.sample(i as f64 / (n - 1) as f64))
            .collect(),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ColormapParseError {
    #[error("Unknown colormap: {0}")]
    UnknownColormap(String),
}
