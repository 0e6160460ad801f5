//! Spherical Web Mercator projection.
//!
//! The interpolation stage measures Euclidean distance, so points have to
//! leave degree space first: a fixed search radius in degrees covers a
//! latitude-dependent ground distance, while the Mercator plane keeps the
//! falloff visually uniform across the map. World x spans [0, 2π] for the
//! full longitude range; world y grows southward and is unbounded toward
//! the poles.

use std::f64::consts::PI;

use overlay_common::Area;

/// Project a single (longitude, latitude) degree pair into world
/// coordinates.
///
/// This is the raw transform; latitudes at or beyond ±90° are outside its
/// domain. Use [`project_points`] or [`project_area`] for checked input.
pub fn lon_lat_to_world(lon_deg: f64, lat_deg: f64) -> (f64, f64) {
    let lon = lon_deg.to_radians();
    let lat = lat_deg.to_radians();

    let x = lon + PI;
    let y = PI - (PI / 4.0 + lat / 2.0).tan().ln();
    (x, y)
}

/// Invert [`lon_lat_to_world`], returning (longitude, latitude) degrees.
pub fn world_to_lon_lat(x: f64, y: f64) -> (f64, f64) {
    let lon = x - PI;
    let lat = 2.0 * ((-(y - PI)).exp().atan() - PI / 4.0);
    (lon.to_degrees(), lat.to_degrees())
}

/// Project an N×2 point table from (longitude, latitude) degrees into
/// world coordinates.
///
/// Any latitude at or beyond the poles is rejected rather than silently
/// producing an off-the-map coordinate.
pub fn project_points(points: &[[f64; 2]]) -> Result<Vec<[f64; 2]>, ProjectionError> {
    points
        .iter()
        .map(|&[lon, lat]| {
            check_latitude(lat)?;
            let (x, y) = lon_lat_to_world(lon, lat);
            Ok([x, y])
        })
        .collect()
}

/// Invert [`project_points`] over an N×2 world-coordinate table.
pub fn unproject_points(points: &[[f64; 2]]) -> Vec<[f64; 2]> {
    points
        .iter()
        .map(|&[x, y]| {
            let (lon, lat) = world_to_lon_lat(x, y);
            [lon, lat]
        })
        .collect()
}

/// Project an area's corners with the same transform as the points, so the
/// rendered raster and its declared extent stay in agreement.
pub fn project_area(area: &Area) -> Result<Area, ProjectionError> {
    let corners = project_points(&[area.top_left, area.bottom_right])?;
    Ok(Area::new(corners[0], corners[1]))
}

fn check_latitude(lat_deg: f64) -> Result<(), ProjectionError> {
    // NaN fails both comparisons and is rejected along with the poles.
    if lat_deg > -90.0 && lat_deg < 90.0 {
        Ok(())
    } else {
        Err(ProjectionError::DegenerateLatitude(lat_deg))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ProjectionError {
    #[error("Latitude {0}° is at or beyond the poles, where the Mercator forward transform is undefined")]
    DegenerateLatitude(f64),
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    #[test]
    fn test_origin_maps_to_map_center() {
        // tan(π/4) = 1 and ln(1) = 0, so (0°, 0°) lands at (π, π).
        let (x, y) = lon_lat_to_world(0.0, 0.0);
        assert!((x - PI).abs() < TOLERANCE, "x should be π, got {}", x);
        assert!((y - PI).abs() < TOLERANCE, "y should be π, got {}", y);
    }

    #[test]
    fn test_northern_latitudes_have_smaller_y() {
        let (_, y_north) = lon_lat_to_world(8.4, 49.08);
        let (_, y_south) = lon_lat_to_world(8.4, 48.92);
        assert!(y_north < y_south, "world y must grow southward");
    }

    #[test]
    fn test_roundtrip_forward_then_back() {
        let cases = [
            [8.40, 49.00],
            [-122.72, 21.14],
            [0.0, 0.0],
            [179.9, -83.0],
            [-179.9, 83.0],
        ];

        for &[lon, lat] in &cases {
            let (x, y) = lon_lat_to_world(lon, lat);
            let (lon2, lat2) = world_to_lon_lat(x, y);
            assert!(
                (lon - lon2).abs() < TOLERANCE,
                "lon roundtrip failed: {} vs {}",
                lon,
                lon2
            );
            assert!(
                (lat - lat2).abs() < TOLERANCE,
                "lat roundtrip failed: {} vs {}",
                lat,
                lat2
            );
        }
    }

    #[test]
    fn test_roundtrip_back_then_forward() {
        let cases = [[PI, PI], [2.0, 3.5], [5.9, 2.4]];

        for &[x, y] in &cases {
            let (lon, lat) = world_to_lon_lat(x, y);
            let (x2, y2) = lon_lat_to_world(lon, lat);
            assert!((x - x2).abs() < TOLERANCE, "x roundtrip: {} vs {}", x, x2);
            assert!((y - y2).abs() < TOLERANCE, "y roundtrip: {} vs {}", y, y2);
        }
    }

    #[test]
    fn test_project_points_empty() {
        assert!(project_points(&[]).unwrap().is_empty());
        assert!(unproject_points(&[]).is_empty());
    }

    #[test]
    fn test_project_points_rejects_poles() {
        for lat in [90.0, -90.0, 90.1, -123.0, f64::NAN] {
            let result = project_points(&[[0.0, lat]]);
            assert!(
                matches!(result, Err(ProjectionError::DegenerateLatitude(_))),
                "latitude {} should be rejected",
                lat
            );
        }
    }

    #[test]
    fn test_project_area_preserves_orientation() {
        let area = Area::new([8.28, 49.08], [8.53, 48.92]);
        let world = project_area(&area).unwrap();

        // North-up degrees become top-down world coordinates: both extents
        // are positive in world space.
        assert!(world.width() > 0.0);
        assert!(world.height() > 0.0);

        let (x, y) = lon_lat_to_world(8.28, 49.08);
        assert!((world.top_left[0] - x).abs() < TOLERANCE);
        assert!((world.top_left[1] - y).abs() < TOLERANCE);
    }
}
