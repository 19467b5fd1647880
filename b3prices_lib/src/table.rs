//! Date-indexed table of closing prices, one column per symbol.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use crate::series::PriceSeries;

/// One date's values, aligned with [`AlignedTable::columns`].
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub date: NaiveDate,
    pub values: Vec<Option<f64>>,
}

/// Outer join of several [`PriceSeries`] on date.
///
/// Rows are ascending by date and cover every date seen in any series.
/// A cell is `None` when that column's series has no point on that date.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AlignedTable {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl AlignedTable {
    /// Joins the series in the order given; that order becomes the column order.
    pub fn outer_join(series: &[PriceSeries]) -> Self {
        let dates: BTreeSet<NaiveDate> = series
            .iter()
            .flat_map(|s| s.points().map(|p| p.date))
            .collect();
        let rows = dates
            .into_iter()
            .map(|date| Row {
                date,
                values: series.iter().map(|s| s.get(&date)).collect(),
            })
            .collect();
        Self {
            columns: series.iter().map(|s| s.symbol().to_string()).collect(),
            rows,
        }
    }

    pub(crate) fn from_parts(columns: Vec<String>, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.rows.iter().map(|r| r.date)
    }

    pub fn column_index(&self, symbol: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == symbol)
    }

    /// All cells of one column in date order.
    pub fn column(&self, symbol: &str) -> Option<Vec<Option<f64>>> {
        let idx = self.column_index(symbol)?;
        Some(self.rows.iter().map(|r| r.values[idx]).collect())
    }

    pub fn get(&self, date: NaiveDate, symbol: &str) -> Option<f64> {
        let idx = self.column_index(symbol)?;
        let pos = self.rows.binary_search_by_key(&date, |r| r.date).ok()?;
        self.rows[pos].values[idx]
    }

    /// The last `n` rows (all of them when `n` exceeds the row count).
    pub fn tail(&self, n: usize) -> &[Row] {
        &self.rows[self.rows.len().saturating_sub(n)..]
    }

    /// A new table holding only the last `n` rows.
    pub fn last_rows(&self, n: usize) -> AlignedTable {
        Self::from_parts(self.columns.clone(), self.tail(n).to_vec())
    }
}

struct RowView<'a> {
    columns: &'a [String],
    row: &'a Row,
}

impl Serialize for RowView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len() + 1))?;
        map.serialize_entry("date", &self.row.date)?;
        for (column, value) in self.columns.iter().zip(&self.row.values) {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}

/// Serializes as an array of `{"date": .., "<symbol>": value|null, ..}` objects.
impl Serialize for AlignedTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.rows.len()))?;
        for row in &self.rows {
            seq.serialize_element(&RowView {
                columns: &self.columns,
                row,
            })?;
        }
        seq.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::PricePoint;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn series(symbol: &str, points: &[(NaiveDate, f64)]) -> PriceSeries {
        PriceSeries::from_points(
            symbol,
            points.iter().map(|&(date, close)| PricePoint { date, close }),
        )
    }

    #[test]
    fn join_is_outer_not_inner() {
        let a = series("A", &[(date(2024, 1, 2), 10.0), (date(2024, 1, 3), 11.0)]);
        let b = series("B", &[(date(2024, 1, 3), 20.0), (date(2024, 1, 4), 21.0)]);
        let table = AlignedTable::outer_join(&[a, b]);

        assert_eq!(table.columns(), &["A", "B"]);
        let dates: Vec<NaiveDate> = table.dates().collect();
        assert_eq!(
            dates,
            vec![date(2024, 1, 2), date(2024, 1, 3), date(2024, 1, 4)]
        );
        assert_eq!(table.column("A").unwrap(), vec![Some(10.0), Some(11.0), None]);
        assert_eq!(table.column("B").unwrap(), vec![None, Some(20.0), Some(21.0)]);
    }

    #[test]
    fn rows_sorted_ascending_regardless_of_input_order() {
        let a = series("A", &[(date(2024, 3, 1), 3.0), (date(2024, 1, 1), 1.0)]);
        let b = series("B", &[(date(2024, 2, 1), 2.0)]);
        let table = AlignedTable::outer_join(&[b, a]);
        assert_eq!(table.columns(), &["B", "A"]);
        let dates: Vec<NaiveDate> = table.dates().collect();
        assert!(dates.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn empty_input_gives_empty_table() {
        let table = AlignedTable::outer_join(&[]);
        assert!(table.is_empty());
        assert!(table.columns().is_empty());
    }

    #[test]
    fn get_and_missing_lookups() {
        let table = AlignedTable::outer_join(&[series("A", &[(date(2024, 1, 2), 10.0)])]);
        assert_eq!(table.get(date(2024, 1, 2), "A"), Some(10.0));
        assert_eq!(table.get(date(2024, 1, 3), "A"), None);
        assert_eq!(table.get(date(2024, 1, 2), "Z"), None);
        assert!(table.column("Z").is_none());
    }

    #[test]
    fn tail_returns_last_rows() {
        let points: Vec<(NaiveDate, f64)> =
            (1..=10).map(|d| (date(2024, 1, d), d as f64)).collect();
        let table = AlignedTable::outer_join(&[series("A", &points)]);
        let tail = table.tail(5);
        assert_eq!(tail.len(), 5);
        assert_eq!(tail[0].date, date(2024, 1, 6));
        assert_eq!(tail[4].values, vec![Some(10.0)]);
        assert_eq!(table.tail(50).len(), 10);
        assert!(table.tail(0).is_empty());

        let last = table.last_rows(3);
        assert_eq!(last.columns(), table.columns());
        assert_eq!(last.len(), 3);
        assert_eq!(last.rows()[0].date, date(2024, 1, 8));
    }

    #[test]
    fn serializes_rows_as_objects() {
        let a = series("A", &[(date(2024, 1, 2), 10.5)]);
        let b = series("B", &[(date(2024, 1, 3), 20.0)]);
        let table = AlignedTable::outer_join(&[a, b]);
        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                {"date": "2024-01-02", "A": 10.5, "B": null},
                {"date": "2024-01-03", "A": null, "B": 20.0}
            ])
        );
    }
}
