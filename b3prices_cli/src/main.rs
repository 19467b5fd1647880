mod commands;
mod output;

use anyhow::Result;
use b3prices_lib::Config;
use clap::{Parser, Subcommand};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "b3prices")]
#[command(about = "Daily closing prices of B3 equities from the BRAPI API")]
struct Cli {
    /// Output format: table, json, csv or markdown
    #[arg(long, default_value = "table", global = true)]
    output: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch, align and print closing prices (or returns)
    Fetch(commands::fetch::FetchArgs),
    /// List the accepted lookback ranges
    Ranges,
    /// List the default symbol universe
    Symbols,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("b3prices=info".parse()?)
                .add_directive("brapi_api=warn".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let format = match cli.output.as_str() {
        "json" => OutputFormat::Json,
        "csv" => OutputFormat::Csv,
        "markdown" | "md" => OutputFormat::Markdown,
        _ => OutputFormat::Table,
    };

    let config = Config::load();

    match &cli.command {
        Commands::Fetch(args) => commands::fetch::run(args, &config, &format).await?,
        Commands::Ranges => commands::ranges::run(&format)?,
        Commands::Symbols => commands::symbols::run(&config, &format)?,
    }

    Ok(())
}
