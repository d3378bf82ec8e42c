use clap::Parser;
use financial_decoder::{
    load_statement, render_json, render_text, DecoderConfig, GeminiClient, ReportGenerator,
    StatementKind,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Transform complex financial data into clear actionable insights.
#[derive(Parser, Debug)]
#[command(name = "financial-decoder", version)]
struct Cli {
    /// Balance sheet (.csv or .xlsx)
    #[arg(long)]
    balance_sheet: Option<PathBuf>,

    /// Profit & loss statement (.csv or .xlsx)
    #[arg(long)]
    profit_loss: Option<PathBuf>,

    /// Cash flow statement (.csv or .xlsx)
    #[arg(long)]
    cash_flow: Option<PathBuf>,

    /// Print the reports as JSON instead of text
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match DecoderConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e);
            return ExitCode::FAILURE;
        }
    };

    let client = GeminiClient::new(config.api_key.clone());
    let generator = ReportGenerator::new(client, config);

    let uploads = [
        (StatementKind::BalanceSheet, cli.balance_sheet),
        (StatementKind::ProfitAndLoss, cli.profit_loss),
        (StatementKind::CashFlow, cli.cash_flow),
    ];
    let statements = uploads
        .into_iter()
        .map(|(kind, path)| load_statement(kind, path.as_deref()))
        .collect();

    eprintln!("Analyzing financial data...");
    let reports = generator.generate_all(statements).await;

    let mut stdout = std::io::stdout().lock();
    let rendered = if cli.json {
        render_json(&mut stdout, &reports)
    } else {
        render_text(&mut stdout, &reports)
    };

    match rendered {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("❌ {}", e);
            ExitCode::FAILURE
        }
    }
}
