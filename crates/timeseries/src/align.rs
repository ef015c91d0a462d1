//! Multi-series alignment
//!
//! Builds a wide, date-keyed table from independently sourced series: a full
//! outer join on date computed as the union of all dates followed by one
//! lookup per identifier.

use chrono::NaiveDate;
use common::{CellValue, SeriesSet, TableRow, WideTable, DATE_COLUMN};
use std::collections::BTreeMap;

/// Align every series of `series` on date
///
/// Rows are sorted by date ascending. Columns are `date` followed by the
/// identifiers in the order they appear in `series`. A date missing from a
/// series yields a null cell for that identifier. When a series repeats a
/// date, its last value wins.
pub fn align(series: &SeriesSet) -> WideTable {
    if series.is_empty() {
        return WideTable::empty();
    }

    let width = series.len();
    let mut by_date: BTreeMap<NaiveDate, Vec<Option<f64>>> = BTreeMap::new();
    for (column, (_, points)) in series.iter().enumerate() {
        for point in points {
            by_date
                .entry(point.date)
                .or_insert_with(|| vec![None; width])[column] = Some(point.value);
        }
    }

    let columns: Vec<String> = std::iter::once(DATE_COLUMN)
        .chain(series.identifiers())
        .map(str::to_string)
        .collect();

    let rows: Vec<TableRow> = by_date
        .into_iter()
        .map(|(date, values)| {
            let mut row = TableRow::new();
            row.push(DATE_COLUMN, CellValue::Date(date));
            for (identifier, value) in series.identifiers().zip(values) {
                row.push(identifier, value.into());
            }
            row
        })
        .collect();

    WideTable {
        row_count: rows.len(),
        columns,
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::TimeSeriesPoint;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn series(points: &[(&str, f64)]) -> Vec<TimeSeriesPoint> {
        points
            .iter()
            .map(|(d, v)| TimeSeriesPoint::new(date(d), *v))
            .collect()
    }

    fn cell(row: &TableRow, column: &str) -> Option<f64> {
        row.get(column).and_then(CellValue::as_f64)
    }

    #[test]
    fn test_partial_overlap() {
        let mut set = SeriesSet::new();
        set.insert("A", series(&[("2024-01-01", 1.0), ("2024-01-02", 2.0)]));
        set.insert("B", series(&[("2024-01-02", 5.0), ("2024-01-03", 6.0)]));

        let table = align(&set);

        assert_eq!(table.row_count, 3);
        assert_eq!(table.columns, vec!["date", "A", "B"]);

        let r = &table.rows;
        assert_eq!(r[0].date(), Some(date("2024-01-01")));
        assert_eq!((cell(&r[0], "A"), cell(&r[0], "B")), (Some(1.0), None));
        assert!(r[0].get("B").unwrap().is_null());
        assert_eq!((cell(&r[1], "A"), cell(&r[1], "B")), (Some(2.0), Some(5.0)));
        assert_eq!(r[2].date(), Some(date("2024-01-03")));
        assert_eq!((cell(&r[2], "A"), cell(&r[2], "B")), (None, Some(6.0)));
    }

    #[test]
    fn test_empty_input() {
        let table = align(&SeriesSet::new());
        assert_eq!(table.row_count, 0);
        assert_eq!(table.columns, vec!["date"]);
        assert!(table.rows.is_empty());
    }

    #[test]
    fn test_identical_coverage_has_no_nulls() {
        let dates = [("2024-01-01", 1.0), ("2024-01-02", 2.0), ("2024-01-03", 3.0)];
        let mut set = SeriesSet::new();
        set.insert("X", series(&dates));
        set.insert("Y", series(&dates));
        set.insert("Z", series(&dates));

        let table = align(&set);
        assert_eq!(table.row_count, 3);
        assert!(table
            .rows
            .iter()
            .all(|row| ["X", "Y", "Z"].iter().all(|c| !row.get(c).unwrap().is_null())));
    }

    #[test]
    fn test_disjoint_coverage() {
        let mut set = SeriesSet::new();
        set.insert("A", series(&[("2024-01-01", 1.0), ("2024-01-03", 3.0)]));
        set.insert("B", series(&[("2024-01-02", 2.0), ("2024-01-04", 4.0)]));

        let table = align(&set);
        assert_eq!(table.row_count, 4);
        for row in &table.rows {
            let nulls = ["A", "B"]
                .iter()
                .filter(|c| row.get(c).unwrap().is_null())
                .count();
            assert_eq!(nulls, 1);
        }
    }

    #[test]
    fn test_empty_series_is_all_null_column() {
        let mut set = SeriesSet::new();
        set.insert("A", series(&[("2024-01-01", 1.0), ("2024-01-02", 2.0)]));
        set.insert("EMPTY", Vec::new());

        let table = align(&set);
        assert_eq!(table.columns, vec!["date", "A", "EMPTY"]);
        assert_eq!(table.row_count, 2);
        assert!(table.rows.iter().all(|row| row.get("EMPTY") == Some(&CellValue::Null)));
    }

    #[test]
    fn test_rows_sorted_regardless_of_input_order() {
        let mut set = SeriesSet::new();
        set.insert("B", series(&[("2024-03-01", 3.0), ("2024-01-01", 1.0)]));
        set.insert("A", series(&[("2024-02-01", 2.0)]));

        let table = align(&set);
        let dates: Vec<NaiveDate> = table.rows.iter().filter_map(TableRow::date).collect();
        assert_eq!(dates, vec![date("2024-01-01"), date("2024-02-01"), date("2024-03-01")]);
        assert_eq!(table.columns, vec!["date", "B", "A"]);
    }

    #[test]
    fn test_repeated_date_keeps_last_value() {
        let mut set = SeriesSet::new();
        set.insert("A", series(&[("2024-01-01", 1.0), ("2024-01-01", 1.5)]));

        let table = align(&set);
        assert_eq!(table.row_count, 1);
        assert_eq!(cell(&table.rows[0], "A"), Some(1.5));
    }

    #[test]
    fn test_serialized_shape() {
        let mut set = SeriesSet::new();
        set.insert("B", series(&[("2024-01-02", 5.0)]));
        set.insert("A", series(&[("2024-01-01", 1.0)]));

        let json = serde_json::to_string(&align(&set)).unwrap();
        assert_eq!(
            json,
            r#"{"number_of_rows":2,"columns":["date","B","A"],"rows":[{"date":"2024-01-01","B":null,"A":1.0},{"date":"2024-01-02","B":5.0,"A":null}]}"#
        );
    }
}
