//! Request orchestration: validate, load, shape

use common::{SeriesSet, WideTable};
use futures::future::try_join_all;
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::error::{Result, TimeSeriesError};
use crate::request::SeriesRequest;
use crate::responders::{build_chart, build_table};
use crate::source::DataSource;

/// Serves chart and table requests from a [`DataSource`]
#[derive(Clone)]
pub struct TimeSeriesService {
    source: Arc<dyn DataSource>,
}

impl TimeSeriesService {
    pub fn new(source: Arc<dyn DataSource>) -> Self {
        Self { source }
    }

    /// Load every requested series, in request order
    ///
    /// The request is validated before any data is read. Series are read
    /// concurrently; the first failure aborts the whole request.
    #[instrument(skip(self, request), fields(identifiers = request.data_identifiers.len()))]
    pub async fn load_series(&self, request: &SeriesRequest) -> Result<SeriesSet> {
        request.validate()?;

        let loads = request.data_identifiers.iter().map(|identifier| async move {
            let points = self
                .source
                .load(identifier, request.start_date, request.end_date)
                .await?;
            debug!(%identifier, points = points.len(), "Series loaded");
            Ok::<_, TimeSeriesError>((identifier.clone(), points))
        });

        let series: SeriesSet = try_join_all(loads).await?.into_iter().collect();
        Ok(series)
    }

    /// Per-identifier series for a multi-line chart
    pub async fn multi_lines_chart(&self, request: &SeriesRequest) -> Result<SeriesSet> {
        let chart = build_chart(self.load_series(request).await?);
        info!(series = chart.len(), "Built multi-lines chart");
        Ok(chart)
    }

    /// Date-aligned table of every requested series
    pub async fn multi_time_series_table(&self, request: &SeriesRequest) -> Result<WideTable> {
        let table = build_table(&self.load_series(request).await?);
        info!(
            rows = table.row_count,
            columns = table.columns.len(),
            "Built multi-series table"
        );
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TimeSeriesError;
    use crate::source::InMemoryDataSource;
    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use common::TimeSeriesPoint;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn service() -> TimeSeriesService {
        let source = InMemoryDataSource::new()
            .with_series(
                "A",
                [
                    TimeSeriesPoint::new(date("2024-01-01"), 1.0),
                    TimeSeriesPoint::new(date("2024-01-02"), 2.0),
                ],
            )
            .with_series(
                "B",
                [
                    TimeSeriesPoint::new(date("2024-01-02"), 5.0),
                    TimeSeriesPoint::new(date("2024-01-03"), 6.0),
                ],
            );
        TimeSeriesService::new(Arc::new(source))
    }

    fn request(ids: &[&str]) -> SeriesRequest {
        SeriesRequest::new(ids.iter().copied(), date("2024-01-01"), date("2024-12-31"))
    }

    /// Counts loads so tests can assert nothing was read
    struct CountingSource(AtomicUsize);

    #[async_trait]
    impl DataSource for CountingSource {
        async fn load(
            &self,
            _identifier: &str,
            _start: NaiveDate,
            _end: NaiveDate,
        ) -> Result<Vec<TimeSeriesPoint>> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn test_chart_in_request_order() {
        let chart = service().multi_lines_chart(&request(&["B", "A"])).await.unwrap();
        assert_eq!(chart.identifiers().collect::<Vec<_>>(), vec!["B", "A"]);
        assert_eq!(chart.get("A").unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_table_aligns() {
        let table = service()
            .multi_time_series_table(&request(&["A", "B"]))
            .await
            .unwrap();
        assert_eq!(table.row_count, 3);
        assert_eq!(table.columns, vec!["date", "A", "B"]);
    }

    #[tokio::test]
    async fn test_unknown_identifier_fails_whole_request() {
        let result = service().multi_time_series_table(&request(&["A", "NOPE"])).await;
        assert_matches!(result, Err(TimeSeriesError::NotFound(id)) if id == "NOPE");
    }

    #[tokio::test]
    async fn test_duplicates_rejected_before_loading() {
        let source = Arc::new(CountingSource(AtomicUsize::new(0)));
        let service = TimeSeriesService::new(source.clone());

        let result = service.multi_lines_chart(&request(&["A", "A"])).await;
        assert_matches!(result, Err(TimeSeriesError::Validation { .. }));
        assert_eq!(source.0.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_inverted_range_yields_empty_table() {
        let req = SeriesRequest::new(["A", "B"], date("2024-02-01"), date("2024-01-01"));
        let table = service().multi_time_series_table(&req).await.unwrap();
        assert_eq!(table.row_count, 0);
        assert_eq!(table.columns, vec!["date", "A", "B"]);
    }
}
