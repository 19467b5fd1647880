use anyhow::Result;

use crate::output::{
    print_ranges_csv, print_ranges_json, print_ranges_markdown, print_ranges_table, OutputFormat,
};

/// Lists the accepted lookback ranges with their user labels.
pub fn run(format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => print_ranges_table(),
        OutputFormat::Json => print_ranges_json(),
        OutputFormat::Csv => print_ranges_csv()?,
        OutputFormat::Markdown => print_ranges_markdown(),
    }
    Ok(())
}
