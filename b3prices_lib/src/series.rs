//! Per-symbol daily close series decoded from quote responses.

use std::collections::BTreeMap;

use brapi_api::types::{HistoricalDataPrice, QuoteResponse};
use chrono::{DateTime, NaiveDate};
use serde::Serialize;

/// One daily close.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

impl PricePoint {
    /// Converts an upstream candle, or `None` when it has no usable close or
    /// its timestamp is out of range. Time of day is discarded (UTC).
    pub fn from_candle(candle: &HistoricalDataPrice) -> Option<Self> {
        let close = candle.close.filter(|c| c.is_finite())?;
        let date = DateTime::from_timestamp(candle.date, 0)?.date_naive();
        Some(Self { date, close })
    }
}

/// Closing prices of one symbol, unique by date and ordered ascending.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    symbol: String,
    points: BTreeMap<NaiveDate, f64>,
}

impl PriceSeries {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            points: BTreeMap::new(),
        }
    }

    /// Builds a series from points in any order.
    pub fn from_points(
        symbol: impl Into<String>,
        points: impl IntoIterator<Item = PricePoint>,
    ) -> Self {
        let mut series = Self::new(symbol);
        for point in points {
            series.insert(point);
        }
        series
    }

    /// Inserts a point. A later point on an existing date replaces the earlier one.
    pub fn insert(&mut self, point: PricePoint) {
        self.points.insert(point.date, point.close);
    }

    /// Builds a series from a quote response. Candles without a usable close
    /// are dropped individually; returns `None` if nothing usable remains.
    pub fn from_response(symbol: &str, response: &QuoteResponse) -> Option<Self> {
        let mut series = Self::new(symbol);
        let history = response.history();
        for point in history.iter().filter_map(PricePoint::from_candle) {
            series.insert(point);
        }
        let dropped = history.len() - series.len();
        if dropped > 0 {
            tracing::debug!("{}: dropped {} unusable candles", symbol, dropped);
        }
        if series.is_empty() {
            None
        } else {
            Some(series)
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, date: &NaiveDate) -> Option<f64> {
        self.points.get(date).copied()
    }

    /// Points in ascending date order.
    pub fn points(&self) -> impl Iterator<Item = PricePoint> + '_ {
        self.points
            .iter()
            .map(|(date, close)| PricePoint { date: *date, close: *close })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candle(date: i64, close: Option<f64>) -> HistoricalDataPrice {
        HistoricalDataPrice {
            date,
            open: None,
            high: None,
            low: None,
            close,
            volume: None,
            adjusted_close: None,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn candle_timestamp_becomes_utc_date() {
        // 2024-06-03 13:00:00 UTC
        let point = PricePoint::from_candle(&candle(1717419600, Some(37.12))).unwrap();
        assert_eq!(point.date, date(2024, 6, 3));
        assert_eq!(point.close, 37.12);
    }

    #[test]
    fn candle_late_in_day_keeps_utc_date() {
        // 2024-06-03 23:59:59 UTC
        let point = PricePoint::from_candle(&candle(1717459199, Some(1.0))).unwrap();
        assert_eq!(point.date, date(2024, 6, 3));
    }

    #[test]
    fn candle_without_close_is_unusable() {
        assert!(PricePoint::from_candle(&candle(1717419600, None)).is_none());
        assert!(PricePoint::from_candle(&candle(1717419600, Some(f64::NAN))).is_none());
        assert!(PricePoint::from_candle(&candle(1717419600, Some(f64::INFINITY))).is_none());
    }

    #[test]
    fn candle_with_out_of_range_timestamp_is_unusable() {
        assert!(PricePoint::from_candle(&candle(i64::MAX, Some(1.0))).is_none());
    }

    #[test]
    fn from_response_drops_bad_candles_and_sorts() {
        let response: QuoteResponse = serde_json::from_value(serde_json::json!({
            "results": [{
                "symbol": "VALE3",
                "historicalDataPrice": [
                    {"date": 1717592400, "close": 63.5},
                    {"date": 1717419600, "close": 64.1},
                    {"date": 1717506000, "close": null}
                ]
            }]
        }))
        .unwrap();
        let series = PriceSeries::from_response("VALE3", &response).unwrap();
        assert_eq!(series.symbol(), "VALE3");
        assert_eq!(series.len(), 2);
        let dates: Vec<NaiveDate> = series.points().map(|p| p.date).collect();
        assert_eq!(dates, vec![date(2024, 6, 3), date(2024, 6, 5)]);
    }

    #[test]
    fn from_response_with_no_usable_candles_is_none() {
        let response: QuoteResponse = serde_json::from_value(serde_json::json!({
            "results": [{"symbol": "X", "historicalDataPrice": [{"date": 1717419600, "close": null}]}]
        }))
        .unwrap();
        assert!(PriceSeries::from_response("X", &response).is_none());
        assert!(PriceSeries::from_response("X", &QuoteResponse::default()).is_none());
    }

    #[test]
    fn same_day_candles_keep_the_last() {
        let response: QuoteResponse = serde_json::from_value(serde_json::json!({
            "results": [{
                "symbol": "ITUB4",
                "historicalDataPrice": [
                    {"date": 1717419600, "close": 32.0},
                    {"date": 1717430400, "close": 32.5}
                ]
            }]
        }))
        .unwrap();
        let series = PriceSeries::from_response("ITUB4", &response).unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series.get(&date(2024, 6, 3)), Some(32.5));
    }
}
