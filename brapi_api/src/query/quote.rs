//! Query builder for the `/api/quote/{symbol}` history endpoint.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::Url;

use super::common::Query;

/// Candle interval requested from the API. History is always daily.
const DAILY_INTERVAL: &str = "1d";

/// Lookback window understood by the quote endpoint.
///
/// Each variant has a wire code (`5y`) sent as the `range` parameter and a
/// user-facing label (`5 anos`) shown in menus.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Range {
    #[serde(rename = "1mo")]
    OneMonth,
    #[serde(rename = "3mo")]
    ThreeMonths,
    #[serde(rename = "6mo")]
    SixMonths,
    #[serde(rename = "1y")]
    OneYear,
    #[serde(rename = "2y")]
    TwoYears,
    #[default]
    #[serde(rename = "5y")]
    FiveYears,
    #[serde(rename = "10y")]
    TenYears,
}

impl Range {
    /// Every accepted range, shortest first.
    pub const ALL: [Range; 7] = [
        Range::OneMonth,
        Range::ThreeMonths,
        Range::SixMonths,
        Range::OneYear,
        Range::TwoYears,
        Range::FiveYears,
        Range::TenYears,
    ];

    /// The value sent as the `range` query parameter.
    pub fn code(&self) -> &'static str {
        match self {
            Range::OneMonth => "1mo",
            Range::ThreeMonths => "3mo",
            Range::SixMonths => "6mo",
            Range::OneYear => "1y",
            Range::TwoYears => "2y",
            Range::FiveYears => "5y",
            Range::TenYears => "10y",
        }
    }

    /// The label shown to end users.
    pub fn label(&self) -> &'static str {
        match self {
            Range::OneMonth => "1 mês",
            Range::ThreeMonths => "3 meses",
            Range::SixMonths => "6 meses",
            Range::OneYear => "1 ano",
            Range::TwoYears => "2 anos",
            Range::FiveYears => "5 anos",
            Range::TenYears => "Máximo (10 anos)",
        }
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Range {
    type Err = ();

    /// Accepts either the wire code or the user label, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Range::ALL
            .into_iter()
            .find(|r| r.code() == needle || r.label().to_lowercase() == needle)
            .ok_or(())
    }
}

/// Query for a symbol's daily price history.
#[derive(Clone, Copy, Debug, Default)]
pub struct QuoteQuery {
    pub range: Range,
}

impl QuoteQuery {
    /// Sets the lookback window.
    pub fn with_range(mut self, range: Range) -> Self {
        self.range = range;
        self
    }
}

impl Query for QuoteQuery {
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        url.query_pairs_mut()
            .append_pair("range", self.range.code())
            .append_pair("interval", DAILY_INTERVAL);
        url
    }
}
