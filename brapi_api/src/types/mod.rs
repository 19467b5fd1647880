mod quote;
pub use self::quote::{HistoricalDataPrice, QuoteResponse, QuoteResult};
