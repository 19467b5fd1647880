mod common;
pub use self::common::Query;

mod quote;
pub use self::quote::{QuoteQuery, Range};
