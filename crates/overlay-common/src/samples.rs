//! Geocoded rent samples: loading and outlier removal.
//!
//! The upstream scraper exports a JSON array of `[latitude, longitude,
//! value]` rows. The table keeps points and values in separate,
//! index-aligned columns so later stages can transform the coordinates
//! without touching the values.

use thiserror::Error;
use tracing::debug;

use crate::stats::median;

/// An index-aligned table of sample points and their values.
///
/// `points[i]` is (longitude, latitude) in degrees until projected;
/// `values[i]` is the price per unit area of the same sample.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleTable {
    pub points: Vec<[f64; 2]>,
    pub values: Vec<f64>,
}

impl SampleTable {
    /// Create a table from aligned columns.
    pub fn new(points: Vec<[f64; 2]>, values: Vec<f64>) -> Self {
        debug_assert_eq!(points.len(), values.len());
        Self { points, values }
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the table holds no samples.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Parse the scraper export format: a JSON array of 3-element arrays
    /// `[latitude, longitude, value]`.
    ///
    /// Columns are reordered so points come out as (longitude, latitude).
    /// No range checks happen here; a row that is not exactly 3 numeric
    /// fields is a format error.
    pub fn from_json_str(json: &str) -> Result<Self, SampleError> {
        let rows: serde_json::Value = serde_json::from_str(json)
            .map_err(|e| SampleError::Unavailable(format!("not parseable as JSON: {}", e)))?;

        let rows = rows
            .as_array()
            .ok_or_else(|| SampleError::Format("expected a top-level JSON array".to_string()))?;

        let mut points = Vec::with_capacity(rows.len());
        let mut values = Vec::with_capacity(rows.len());

        for (index, row) in rows.iter().enumerate() {
            let fields = row.as_array().filter(|f| f.len() == 3).ok_or_else(|| {
                SampleError::Format(format!("row {}: expected exactly 3 fields", index))
            })?;

            let mut nums = [0.0f64; 3];
            for (slot, field) in nums.iter_mut().zip(fields) {
                *slot = field.as_f64().ok_or_else(|| {
                    SampleError::Format(format!("row {}: expected 3 numeric fields", index))
                })?;
            }

            // Export order is (latitude, longitude, value).
            points.push([nums[1], nums[0]]);
            values.push(nums[2]);
        }

        debug!(count = points.len(), "Parsed sample table");
        Ok(Self { points, values })
    }

    /// Load the table from a JSON file on disk.
    pub fn from_path(path: impl AsRef<std::path::Path>) -> Result<Self, SampleError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            SampleError::Unavailable(format!("{}: {}", path.as_ref().display(), e))
        })?;
        Self::from_json_str(&content)
    }

    /// Drop statistical outliers in the value distribution.
    ///
    /// A sample survives when its absolute deviation from the value median,
    /// divided by the median absolute deviation (MAD), is strictly below
    /// `max_rel_dist`. A zero MAD means the values are too uniform to rank,
    /// and every sample is kept. Surviving rows keep their relative order
    /// and stay index-aligned.
    pub fn drop_outliers(&self, max_rel_dist: f64) -> SampleTable {
        if self.is_empty() {
            return SampleTable::default();
        }

        let center = median(&self.values);
        let abs_dist: Vec<f64> = self.values.iter().map(|v| (v - center).abs()).collect();
        let mad = median(&abs_dist);

        let mut points = Vec::with_capacity(self.len());
        let mut values = Vec::with_capacity(self.len());

        for (i, dist) in abs_dist.iter().enumerate() {
            let rel_dist = if mad == 0.0 { 0.0 } else { dist / mad };
            if rel_dist < max_rel_dist {
                points.push(self.points[i]);
                values.push(self.values[i]);
            }
        }

        debug!(
            kept = values.len(),
            dropped = self.len() - values.len(),
            "Filtered outliers"
        );
        SampleTable { points, values }
    }
}

#[derive(Debug, Error)]
pub enum SampleError {
    #[error("Sample source unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid sample data: {0}")]
    Format(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_reorders_columns() {
        let json = "[[49.00, 8.40, 10.0], [49.00, 8.41, 12.0]]";
        let table = SampleTable::from_json_str(json).unwrap();

        assert_eq!(table.points, vec![[8.40, 49.00], [8.41, 49.00]]);
        assert_eq!(table.values, vec![10.0, 12.0]);
    }

    #[test]
    fn test_load_empty_array() {
        let table = SampleTable::from_json_str("[]").unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_load_rejects_wrong_arity() {
        let err = SampleTable::from_json_str("[[49.0, 8.4]]").unwrap_err();
        assert!(matches!(err, SampleError::Format(_)), "got {:?}", err);

        let err = SampleTable::from_json_str("[[49.0, 8.4, 10.0, 1.0]]").unwrap_err();
        assert!(matches!(err, SampleError::Format(_)), "got {:?}", err);
    }

    #[test]
    fn test_load_rejects_non_numeric() {
        let err = SampleTable::from_json_str(r#"[[49.0, "8.4", 10.0]]"#).unwrap_err();
        assert!(matches!(err, SampleError::Format(_)), "got {:?}", err);
    }

    #[test]
    fn test_load_rejects_invalid_json() {
        let err = SampleTable::from_json_str("not json").unwrap_err();
        assert!(matches!(err, SampleError::Unavailable(_)), "got {:?}", err);
    }

    #[test]
    fn test_load_rejects_non_array_root() {
        let err = SampleTable::from_json_str(r#"{"rows": []}"#).unwrap_err();
        assert!(matches!(err, SampleError::Format(_)), "got {:?}", err);
    }

    #[test]
    fn test_drop_outliers_example() {
        // Values {10, 12, 1000}: median 12, abs distances {2, 0, 988},
        // MAD 2, relative distances {1, 0, 494}. The third row is dropped.
        let json = "[[49.00, 8.40, 10.0], [49.00, 8.41, 12.0], [49.00, 8.42, 1000.0]]";
        let table = SampleTable::from_json_str(json).unwrap();
        let clean = table.drop_outliers(6.0);

        assert_eq!(clean.points, vec![[8.40, 49.00], [8.41, 49.00]]);
        assert_eq!(clean.values, vec![10.0, 12.0]);
    }

    #[test]
    fn test_drop_outliers_threshold_is_strict() {
        // Values {9, 10, 10, 11, 16}: median 10, abs distances
        // {1, 0, 0, 1, 6}, MAD 1. The last sample sits exactly at
        // relative distance 6 and must be dropped.
        let table = SampleTable::new(
            vec![[0.0, 0.0]; 5],
            vec![9.0, 10.0, 10.0, 11.0, 16.0],
        );
        let clean = table.drop_outliers(6.0);
        assert_eq!(clean.values, vec![9.0, 10.0, 10.0, 11.0]);

        // Just below the threshold survives.
        let table = SampleTable::new(
            vec![[0.0, 0.0]; 5],
            vec![9.0, 10.0, 10.0, 11.0, 15.9],
        );
        let clean = table.drop_outliers(6.0);
        assert_eq!(clean.len(), 5);
    }

    #[test]
    fn test_drop_outliers_zero_mad_keeps_all() {
        let table = SampleTable::new(vec![[0.0, 0.0]; 4], vec![7.0, 7.0, 7.0, 7.0]);
        let clean = table.drop_outliers(6.0);
        assert_eq!(clean.len(), 4);

        // A single extreme value among otherwise identical ones still
        // yields a zero MAD, so even the extreme row is kept.
        let table = SampleTable::new(
            vec![[0.0, 0.0]; 5],
            vec![7.0, 7.0, 7.0, 7.0, 9000.0],
        );
        let clean = table.drop_outliers(6.0);
        assert_eq!(clean.len(), 5);
    }

    #[test]
    fn test_drop_outliers_preserves_order_and_alignment() {
        let table = SampleTable::new(
            vec![[1.0, 1.0], [2.0, 2.0], [3.0, 3.0], [4.0, 4.0], [5.0, 5.0]],
            vec![11.0, 500.0, 10.0, 9.0, 12.0],
        );
        let clean = table.drop_outliers(6.0);

        assert_eq!(clean.points.len(), clean.values.len());
        assert_eq!(clean.points, vec![[1.0, 1.0], [3.0, 3.0], [4.0, 4.0], [5.0, 5.0]]);
        assert_eq!(clean.values, vec![11.0, 10.0, 9.0, 12.0]);
    }

    #[test]
    fn test_drop_outliers_empty_table() {
        let clean = SampleTable::default().drop_outliers(6.0);
        assert!(clean.is_empty());
    }
}
