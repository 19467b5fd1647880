use std::path::PathBuf;

use anyhow::Result;
use b3prices_lib::{export, validation, AlignOutcome, Config, DisplayMode, SeriesAligner};
use clap::Args;

use crate::output::{
    print_json, print_prices_csv, print_prices_markdown, print_prices_table, OutputFormat,
};

#[derive(Args)]
pub struct FetchArgs {
    /// Comma-separated symbols (e.g. PETR4,VALE3). Defaults to the configured universe
    #[arg(long, value_delimiter = ',')]
    pub symbols: Option<Vec<String>>,

    /// Lookback range: 1mo, 3mo, 6mo, 1y, 2y, 5y, 10y or its label (e.g. "5 anos")
    #[arg(long, default_value = "5y")]
    pub range: String,

    /// Show percentage return since the start of the period instead of prices
    #[arg(long, conflicts_with = "mode")]
    pub returns: bool,

    /// Display mode: price or return
    #[arg(long)]
    pub mode: Option<String>,

    /// Number of most recent rows to print
    #[arg(long, default_value = "5")]
    pub rows: usize,

    /// Print every row instead of the most recent ones
    #[arg(long)]
    pub all: bool,

    /// Write the full table to a spreadsheet (.xlsx or .csv), e.g. dados_acoes.xlsx
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Override the BRAPI base URL
    #[arg(long)]
    pub base_url: Option<String>,
}

pub async fn run(args: &FetchArgs, config: &Config, format: &OutputFormat) -> Result<()> {
    let requested = requested_symbols(args.symbols.as_deref(), config.universe.symbols());
    if requested.is_empty() {
        eprintln!("Select at least one symbol to display prices.");
        return Ok(());
    }
    let symbols = validation::validate_symbols(requested.as_slice())?;
    let range = validation::validate_range(&args.range)?;
    let mode = display_mode(args)?;

    let mut config = config.clone();
    if let Some(ref base_url) = args.base_url {
        config.base_url = base_url.clone();
    }
    let aligner = SeriesAligner::from_config(&config)?;

    eprintln!(
        "Fetching {} for {}, please wait...",
        range.label(),
        symbols.join(", ")
    );
    let prices = match aligner.align(symbols.as_slice(), range).await? {
        AlignOutcome::Table(table) => table,
        AlignOutcome::NoData => {
            eprintln!("No data returned by the BRAPI API.");
            return Ok(());
        }
    };

    let missing: Vec<&str> = symbols
        .iter()
        .filter(|s| prices.column_index(s).is_none())
        .map(|s| s.as_str())
        .collect();
    eprintln!(
        "Data loaded successfully: {} symbols, {} rows",
        prices.columns().len(),
        prices.len()
    );
    if !missing.is_empty() {
        eprintln!("No data for: {}", missing.join(", "));
    }

    let table = mode.apply(&prices);
    let shown = if args.all {
        table.clone()
    } else {
        table.last_rows(args.rows)
    };

    eprintln!("{}", mode.caption());
    match format {
        OutputFormat::Table => print_prices_table(&shown, mode),
        OutputFormat::Json => print_json(&shown),
        OutputFormat::Csv => print_prices_csv(&shown)?,
        OutputFormat::Markdown => print_prices_markdown(&shown, mode),
    }

    if let Some(ref path) = args.export {
        export::export(&table, path)?;
        eprintln!("Saved {} rows to {}", table.len(), path.display());
    }

    Ok(())
}

/// Symbols from the flag, or the universe when the flag is absent. Entries
/// that sanitize to nothing are dropped so a blank selection becomes a notice.
fn requested_symbols(flag: Option<&[String]>, universe: &[String]) -> Vec<String> {
    flag.unwrap_or(universe)
        .iter()
        .filter(|s| !validation::sanitize_symbol(s).is_empty())
        .cloned()
        .collect()
}

fn display_mode(args: &FetchArgs) -> Result<DisplayMode> {
    if args.returns {
        return Ok(DisplayMode::Return);
    }
    match args.mode {
        Some(ref mode) => Ok(validation::validate_display_mode(mode)?),
        None => Ok(DisplayMode::Price),
    }
}
