//! Common types shared across the rent-overlay crates.

pub mod area;
pub mod samples;
pub mod stats;

pub use area::{Area, AreaParseError};
pub use samples::{SampleError, SampleTable};
