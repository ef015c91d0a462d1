//! In-memory data source, used by tests and demos

use async_trait::async_trait;
use chrono::NaiveDate;
use common::TimeSeriesPoint;
use std::collections::HashMap;

use super::{select_range, DataSource};
use crate::error::{Result, TimeSeriesError};

/// Datasets held in a map keyed by identifier
#[derive(Debug, Clone, Default)]
pub struct InMemoryDataSource {
    series: HashMap<String, Vec<TimeSeriesPoint>>,
}

impl InMemoryDataSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the dataset of an identifier
    pub fn with_series(
        mut self,
        identifier: impl Into<String>,
        points: impl IntoIterator<Item = TimeSeriesPoint>,
    ) -> Self {
        self.series
            .insert(identifier.into(), points.into_iter().collect());
        self
    }
}

#[async_trait]
impl DataSource for InMemoryDataSource {
    async fn load(
        &self,
        identifier: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<TimeSeriesPoint>> {
        let points = self
            .series
            .get(identifier)
            .ok_or_else(|| TimeSeriesError::NotFound(identifier.to_string()))?;

        Ok(select_range(points.iter().copied(), start, end))
    }
}
