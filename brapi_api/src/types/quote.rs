use serde::{Deserialize, Deserializer, Serialize};

/// Envelope returned by `/api/quote/{symbol}`.
///
/// A missing `results` array decodes as empty so callers can treat it the
/// same as "no data".
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct QuoteResponse {
    #[serde(default)]
    pub results: Vec<QuoteResult>,
}

impl QuoteResponse {
    /// History of the first result, which is the requested symbol.
    pub fn history(&self) -> &[HistoricalDataPrice] {
        self.results
            .first()
            .map(|r| r.historical_data_price.as_slice())
            .unwrap_or_default()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResult {
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub short_name: Option<String>,
    #[serde(default, deserialize_with = "conforming_candles")]
    pub historical_data_price: Vec<HistoricalDataPrice>,
}

/// Decodes the candle array one element at a time, dropping any element
/// that is not a well-typed [`HistoricalDataPrice`].
fn conforming_candles<'de, D>(deserializer: D) -> Result<Vec<HistoricalDataPrice>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<serde_json::Value>>::deserialize(deserializer)?.unwrap_or_default();
    let total = raw.len();
    let candles: Vec<HistoricalDataPrice> = raw
        .into_iter()
        .filter_map(|value| serde_json::from_value(value).ok())
        .collect();
    if candles.len() < total {
        tracing::debug!("dropped {} malformed candles", total - candles.len());
    }
    Ok(candles)
}

/// One daily candle. `date` is seconds since the Unix epoch.
///
/// Price fields are optional because the API emits `null` for sessions
/// without trades.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalDataPrice {
    pub date: i64,
    #[serde(default)]
    pub open: Option<f64>,
    #[serde(default)]
    pub high: Option<f64>,
    #[serde(default)]
    pub low: Option<f64>,
    #[serde(default)]
    pub close: Option<f64>,
    #[serde(default)]
    pub volume: Option<f64>,
    #[serde(default)]
    pub adjusted_close: Option<f64>,
}
