use anyhow::Result;
use b3prices_lib::Config;

use crate::output::{
    print_symbols_csv, print_symbols_json, print_symbols_markdown, print_symbols_table,
    OutputFormat,
};

/// Lists the configured default universe.
pub fn run(config: &Config, format: &OutputFormat) -> Result<()> {
    let symbols = config.universe.symbols();
    match format {
        OutputFormat::Table => print_symbols_table(symbols),
        OutputFormat::Json => print_symbols_json(symbols),
        OutputFormat::Csv => print_symbols_csv(symbols)?,
        OutputFormat::Markdown => print_symbols_markdown(symbols),
    }
    Ok(())
}
