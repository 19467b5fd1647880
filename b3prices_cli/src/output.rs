use anyhow::Result;
use b3prices_lib::{AlignedTable, DisplayMode, Range};
use serde::Serialize;
use tabled::builder::Builder;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Clone, Debug, PartialEq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
}

#[derive(Tabled, Serialize)]
struct RangeRow {
    #[tabled(rename = "Code")]
    #[serde(rename = "Code")]
    code: String,
    #[tabled(rename = "Label")]
    #[serde(rename = "Label")]
    label: String,
}

#[derive(Tabled, Serialize)]
struct SymbolRow {
    #[tabled(rename = "Symbol")]
    #[serde(rename = "Symbol")]
    symbol: String,
}

// -- Row builders --

fn build_range_rows() -> Vec<RangeRow> {
    Range::ALL
        .iter()
        .map(|r| RangeRow {
            code: r.code().to_string(),
            label: r.label().to_string(),
        })
        .collect()
}

fn build_symbol_rows(symbols: &[String]) -> Vec<SymbolRow> {
    symbols
        .iter()
        .map(|s| SymbolRow { symbol: s.clone() })
        .collect()
}

/// Header plus one formatted record per row; the date is the first column.
fn build_price_records(table: &AlignedTable, mode: DisplayMode) -> Vec<Vec<String>> {
    let mut records = Vec::with_capacity(table.len() + 1);
    let mut header = vec!["Date".to_string()];
    header.extend(table.columns().iter().cloned());
    records.push(header);
    for row in table.rows() {
        let mut record = vec![row.date.format("%Y-%m-%d").to_string()];
        record.extend(row.values.iter().map(|v| format_cell(*v, mode)));
        records.push(record);
    }
    records
}

fn price_table(table: &AlignedTable, mode: DisplayMode) -> Table {
    let mut builder = Builder::default();
    for record in build_price_records(table, mode) {
        builder.push_record(record);
    }
    builder.build()
}

// -- Table output --

pub fn print_prices_table(table: &AlignedTable, mode: DisplayMode) {
    println!("{}", price_table(table, mode));
}

pub fn print_ranges_table() {
    println!("{}", Table::new(build_range_rows()));
}

pub fn print_symbols_table(symbols: &[String]) {
    println!("{}", Table::new(build_symbol_rows(symbols)));
}

// -- Markdown output --

pub fn print_prices_markdown(table: &AlignedTable, mode: DisplayMode) {
    let mut t = price_table(table, mode);
    t.with(Style::markdown());
    println!("{}", t);
}

pub fn print_ranges_markdown() {
    let mut table = Table::new(build_range_rows());
    table.with(Style::markdown());
    println!("{}", table);
}

pub fn print_symbols_markdown(symbols: &[String]) {
    let mut table = Table::new(build_symbol_rows(symbols));
    table.with(Style::markdown());
    println!("{}", table);
}

// -- CSV output --

pub fn print_prices_csv(table: &AlignedTable) -> Result<()> {
    b3prices_lib::export::write_csv(table, std::io::stdout())?;
    Ok(())
}

pub fn print_ranges_csv() -> Result<()> {
    print_rows_csv(&build_range_rows())
}

pub fn print_symbols_csv(symbols: &[String]) -> Result<()> {
    print_rows_csv(&build_symbol_rows(symbols))
}

fn print_rows_csv<T: Serialize>(rows: &[T]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

// -- JSON output --

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

pub fn print_ranges_json() {
    print_json(&build_range_rows());
}

pub fn print_symbols_json(symbols: &[String]) {
    print_json(&build_symbol_rows(symbols));
}

fn format_cell(value: Option<f64>, mode: DisplayMode) -> String {
    match (value, mode) {
        (None, _) => String::new(),
        (Some(v), _) if v.is_nan() => "NaN".to_string(),
        (Some(v), DisplayMode::Price) => format!("R$ {:.2}", v),
        (Some(v), DisplayMode::Return) => format!("{:+.2}%", v),
    }
}
