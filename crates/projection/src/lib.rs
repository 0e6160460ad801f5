//! Coordinate transforms between geographic and planar world space.

pub mod mercator;

pub use mercator::{
    lon_lat_to_world, project_area, project_points, unproject_points, world_to_lon_lat,
    ProjectionError,
};
