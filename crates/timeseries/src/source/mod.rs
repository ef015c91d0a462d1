//! Data sources for per-identifier time series
//!
//! A [`DataSource`] resolves an identifier to its dataset and returns the
//! points inside an inclusive date range, sorted by date.

use async_trait::async_trait;
use chrono::NaiveDate;
use common::TimeSeriesPoint;

use crate::error::Result;

pub mod csv_file;
pub mod memory;

pub use csv_file::CsvDataSource;
pub use memory::InMemoryDataSource;

/// Read-only access to time series datasets
///
/// Implementations must fail with
/// [`TimeSeriesError::NotFound`](crate::TimeSeriesError::NotFound) for unknown
/// identifiers rather than returning an empty series.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Points of `identifier` with `start <= date <= end`, sorted by date
    ///
    /// Duplicate dates are kept in dataset order.
    async fn load(
        &self,
        identifier: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<TimeSeriesPoint>>;
}

/// Keep points inside `[start, end]` and sort them by date
///
/// The sort is stable so duplicate dates keep their relative order.
pub fn select_range(
    points: impl IntoIterator<Item = TimeSeriesPoint>,
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<TimeSeriesPoint> {
    let mut selected: Vec<TimeSeriesPoint> = points
        .into_iter()
        .filter(|p| p.date >= start && p.date <= end)
        .collect();
    selected.sort_by_key(|p| p.date);
    selected
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(d: &str, v: f64) -> TimeSeriesPoint {
        TimeSeriesPoint::new(NaiveDate::parse_from_str(d, "%Y-%m-%d").unwrap(), v)
    }

    #[test]
    fn test_select_range_is_inclusive_and_sorted() {
        let points = vec![
            point("2024-01-05", 5.0),
            point("2024-01-01", 1.0),
            point("2024-01-03", 3.0),
            point("2024-01-06", 6.0),
        ];
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();

        let selected = select_range(points, start, end);
        let values: Vec<f64> = selected.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![1.0, 3.0, 5.0]);
    }

    #[test]
    fn test_select_range_keeps_duplicate_order() {
        let points = vec![
            point("2024-01-02", 20.0),
            point("2024-01-01", 1.0),
            point("2024-01-02", 21.0),
        ];
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();

        let values: Vec<f64> = select_range(points, start, end).iter().map(|p| p.value).collect();
        assert_eq!(values, vec![1.0, 20.0, 21.0]);
    }

    #[test]
    fn test_inverted_range_selects_nothing() {
        let start = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert!(select_range(vec![point("2024-01-15", 1.0)], start, end).is_empty());
    }
}
