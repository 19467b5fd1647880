//! Fetch-and-align: one request per symbol, merged into an [`AlignedTable`].
//!
//! Per-symbol failures (HTTP errors, timeouts, malformed or empty payloads)
//! are logged and dropped, so one bad ticker never sinks the others. Fetches
//! run concurrently under a semaphore; the join is order-independent and the
//! column order always follows the request order.

use std::sync::Arc;

use brapi_api::{Client, QuoteQuery, Range};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::config::Config;
use crate::error::Error;
use crate::series::PriceSeries;
use crate::table::AlignedTable;

/// Result of [`SeriesAligner::align`].
#[derive(Debug, Clone, PartialEq)]
pub enum AlignOutcome {
    /// At least one symbol produced data.
    Table(AlignedTable),
    /// Every symbol failed or came back empty.
    NoData,
}

impl AlignOutcome {
    pub fn into_table(self) -> Option<AlignedTable> {
        match self {
            AlignOutcome::Table(table) => Some(table),
            AlignOutcome::NoData => None,
        }
    }
}

pub struct SeriesAligner {
    client: Client,
    concurrency: usize,
}

impl SeriesAligner {
    pub fn new(client: Client, concurrency: usize) -> Self {
        Self {
            client,
            concurrency: concurrency.max(1),
        }
    }

    /// Builds the HTTP client from the configured base URL and timeout.
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        let client = Client::with_base_url_and_timeout(&config.base_url, config.timeout)?;
        Ok(Self::new(client, config.concurrency))
    }

    /// Fetches one symbol. Any failure is logged and becomes `None`.
    pub async fn fetch_series(&self, symbol: &str, range: Range) -> Option<PriceSeries> {
        fetch_one(&self.client, symbol, range).await
    }

    /// Fetches every symbol and outer-joins the results on date.
    ///
    /// Duplicate symbols are fetched once. An empty selection is rejected
    /// with [`Error::InvalidInput`] before any request is made.
    pub async fn align<S: AsRef<str>>(
        &self,
        symbols: &[S],
        range: Range,
    ) -> Result<AlignOutcome, Error> {
        let mut unique: Vec<String> = Vec::with_capacity(symbols.len());
        for symbol in symbols {
            let symbol = symbol.as_ref();
            if !unique.iter().any(|s| s == symbol) {
                unique.push(symbol.to_string());
            }
        }
        if unique.is_empty() {
            return Err(Error::InvalidInput(
                "select at least one symbol".to_string(),
            ));
        }

        tracing::info!(
            "Fetching {} symbols for range {} (concurrency {})",
            unique.len(),
            range,
            self.concurrency
        );

        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let mut join_set = JoinSet::new();
        for (idx, symbol) in unique.iter().enumerate() {
            let sem = Arc::clone(&semaphore);
            let client = self.client.clone();
            let symbol = symbol.clone();
            join_set.spawn(async move {
                let Ok(_permit) = sem.acquire().await else {
                    return (idx, None);
                };
                (idx, fetch_one(&client, &symbol, range).await)
            });
        }

        let mut fetched: Vec<Option<PriceSeries>> = vec![None; unique.len()];
        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((idx, series)) => fetched[idx] = series,
                Err(e) => tracing::warn!("Fetch task failed: {}", e),
            }
        }

        let series: Vec<PriceSeries> = fetched.into_iter().flatten().collect();
        if series.is_empty() {
            tracing::warn!("No data returned for any of {} symbols", unique.len());
            return Ok(AlignOutcome::NoData);
        }

        let table = AlignedTable::outer_join(&series);
        tracing::info!(
            "Aligned {} of {} symbols over {} dates",
            table.columns().len(),
            unique.len(),
            table.len()
        );
        Ok(AlignOutcome::Table(table))
    }
}

async fn fetch_one(client: &Client, symbol: &str, range: Range) -> Option<PriceSeries> {
    let query = QuoteQuery::default().with_range(range);
    match client.get_quote_history(symbol, &query).await {
        Ok(response) => {
            let series = PriceSeries::from_response(symbol, &response);
            if series.is_none() {
                tracing::warn!("{}: response contained no usable prices", symbol);
            }
            series
        }
        Err(e) => {
            tracing::warn!("{}: fetch failed, skipping: {}", symbol, e);
            None
        }
    }
}
