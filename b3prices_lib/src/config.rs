//! Runtime configuration: upstream URL, default symbol universe, and fetch limits.
//!
//! Values come from the process environment (optionally seeded from a `.env`
//! file). Anything missing or unparseable falls back to its default.

use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://brapi.dev";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONCURRENCY: usize = 4;

const DEFAULT_SYMBOLS: [&str; 6] = ["PETR4", "VALE3", "ITUB4", "ABEV3", "GGBR4", "MGLU3"];

/// The list of symbols offered by default when the user selects nothing explicitly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Universe {
    symbols: Vec<String>,
}

impl Default for Universe {
    fn default() -> Self {
        Self::new(DEFAULT_SYMBOLS.iter().map(|s| s.to_string()).collect())
    }
}

impl Universe {
    pub fn new(symbols: Vec<String>) -> Self {
        Self { symbols }
    }

    /// Parses a comma-separated list. Blank entries are skipped; `None` if
    /// nothing remains.
    pub fn parse(list: &str) -> Option<Self> {
        let symbols: Vec<String> = list
            .split(',')
            .map(|s| s.trim().to_uppercase())
            .filter(|s| !s.is_empty())
            .collect();
        if symbols.is_empty() {
            None
        } else {
            Some(Self::new(symbols))
        }
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub base_url: String,
    pub universe: Universe,
    pub timeout: Duration,
    /// Upper bound on in-flight symbol fetches. Always at least 1.
    pub concurrency: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            universe: Universe::default(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

impl Config {
    /// Loads `.env` if present, then reads the process environment.
    pub fn load() -> Self {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!("Loaded environment from {}", path.display());
        }
        Self::from_env()
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup. Recognized keys:
    /// `BRAPI_BASE_URL`, `B3PRICES_SYMBOLS`, `B3PRICES_TIMEOUT_SECS`,
    /// `B3PRICES_CONCURRENCY`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let base_url = lookup("BRAPI_BASE_URL")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.base_url);
        let universe = lookup("B3PRICES_SYMBOLS")
            .and_then(|v| Universe::parse(&v))
            .unwrap_or(defaults.universe);
        let timeout = Duration::from_secs(parse_or(
            lookup("B3PRICES_TIMEOUT_SECS"),
            DEFAULT_TIMEOUT_SECS,
        ));
        let concurrency =
            parse_or(lookup("B3PRICES_CONCURRENCY"), DEFAULT_CONCURRENCY).max(1);
        Self {
            base_url,
            universe,
            timeout,
            concurrency,
        }
    }
}

fn parse_or<T: std::str::FromStr>(value: Option<String>, default: T) -> T {
    value
        .and_then(|val| val.trim().parse::<T>().ok())
        .unwrap_or(default)
}
