//! Library layer for b3prices: fetches daily closes for B3 equities from the
//! BRAPI API and aligns them into a date-indexed table.
//!
//! Wraps the `brapi_api` client with per-symbol soft failure, an outer join
//! on date, the percentage-return transform, input validation, and
//! spreadsheet export.

pub mod aligner;
pub mod config;
pub mod error;
pub mod export;
pub mod returns;
pub mod series;
pub mod table;
pub mod validation;

pub use brapi_api;
pub use brapi_api::types;
pub use brapi_api::{QuoteQuery, Range};

pub use aligner::{AlignOutcome, SeriesAligner};
pub use config::{Config, Universe};
pub use error::Error;
pub use export::ExportFormat;
pub use returns::{percent_returns, DisplayMode};
pub use series::{PricePoint, PriceSeries};
pub use table::{AlignedTable, Row};
