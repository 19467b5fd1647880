use brapi_api::Range;

use crate::error::Error;
use crate::returns::DisplayMode;

pub const MAX_SYMBOL_LENGTH: usize = 32;

/// Strip ASCII control characters, trim whitespace and uppercase.
pub fn sanitize_symbol(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_ascii_control())
        .collect::<String>()
        .trim()
        .to_uppercase()
}

/// Sanitize and enforce a byte-length limit. The symbol's shape is otherwise
/// not checked: an unknown ticker simply yields no data upstream.
pub fn validate_symbol(input: &str) -> Result<String, Error> {
    let sanitized = sanitize_symbol(input);
    if sanitized.is_empty() {
        return Err(Error::InvalidInput(
            "symbol is empty after sanitization".to_string(),
        ));
    }
    if sanitized.len() > MAX_SYMBOL_LENGTH {
        return Err(Error::InvalidInput(format!(
            "symbol '{}' exceeds maximum length of {} bytes",
            sanitized, MAX_SYMBOL_LENGTH
        )));
    }
    Ok(sanitized)
}

/// Validate a symbol selection. Duplicates collapse to their first
/// occurrence; an empty selection is rejected before any request is made.
pub fn validate_symbols<S: AsRef<str>>(inputs: &[S]) -> Result<Vec<String>, Error> {
    let mut symbols: Vec<String> = Vec::with_capacity(inputs.len());
    for input in inputs {
        let symbol = validate_symbol(input.as_ref())?;
        if !symbols.contains(&symbol) {
            symbols.push(symbol);
        }
    }
    if symbols.is_empty() {
        return Err(Error::InvalidInput(
            "select at least one symbol".to_string(),
        ));
    }
    Ok(symbols)
}

/// Validate a range given as a code (`5y`) or a label (`5 anos`).
pub fn validate_range(input: &str) -> Result<Range, Error> {
    input.parse::<Range>().map_err(|_| {
        let valid = Range::ALL
            .iter()
            .map(|r| format!("{} ({})", r.code(), r.label()))
            .collect::<Vec<_>>()
            .join(", ");
        Error::InvalidInput(format!("unknown range '{}'. Valid: {}", input, valid))
    })
}

/// Validate a display mode: `price` or `return` (aliases `returns`, `%`).
pub fn validate_display_mode(input: &str) -> Result<DisplayMode, Error> {
    match input.trim().to_lowercase().as_str() {
        "price" | "prices" | "close" => Ok(DisplayMode::Price),
        "return" | "returns" | "%" => Ok(DisplayMode::Return),
        _ => Err(Error::InvalidInput(format!(
            "unknown display mode '{}'. Valid: price, return",
            input
        ))),
    }
}
