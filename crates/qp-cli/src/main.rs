//! qp - quotation pricing from the command line
//!
//! Reads quotation and proforma documents as JSON, recomputes every derived figure,
//! validates the result and prints the document that would be submitted.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use qp_core::config::{AppConfig, LoggingConfig};
use qp_core::{days_between, round_money};
use qp_models::{ProformaDraft, QuotationDocument, QuotationDraft, ServiceCatalog};
use qp_services::proformas::SubmitProformaService;
use qp_services::quotations::SubmitQuotationService;
use qp_services::worker::PricingWorker;
use qp_services::ServiceResult;

#[derive(Debug, Parser)]
#[command(name = "qp", version, about = "Recompute and validate quotations and proformas")]
struct Cli {
    /// Settings file layered under `QP__` environment variables
    #[arg(long, global = true, env = "QP_CONFIG")]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Recompute and validate a quotation document
    Quote {
        document: PathBuf,
        /// Service catalog (JSON array of {id, nombre, tipo}) used to check references
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
    /// Recompute and validate a proforma document
    Proforma { document: PathBuf },
    /// Whole days between two dates
    Days { start: String, end: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let (config, config_error) = match cli.config.as_deref() {
        Some(path) => (AppConfig::load(Some(path))?, None),
        None => match AppConfig::from_env() {
            Ok(config) => (config, None),
            Err(e) => (AppConfig::default(), Some(e)),
        },
    };

    init_tracing(&config.logging);
    if let Some(e) = config_error {
        tracing::warn!("Failed to load config from env: {}, using defaults", e);
    }

    match cli.command {
        Command::Quote { document, catalog } => quote(&config, &document, catalog.as_deref()).await,
        Command::Proforma { document } => proforma(&config, &document),
        Command::Days { start, end } => {
            println!("{}", days_between(&start, &end));
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Initialize tracing/logging
fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| logging.filter.as_str().into());

    // Logs go to stderr so stdout carries only the document
    let registry = tracing_subscriber::registry().with(filter);
    if logging.json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

async fn quote(config: &AppConfig, document: &Path, catalog: Option<&Path>) -> anyhow::Result<ExitCode> {
    let document: QuotationDocument = read_json(document)?;
    let catalog = catalog.map(read_json::<ServiceCatalog>).transpose()?;

    let draft = match &catalog {
        Some(catalog) => document.into_draft(catalog)?,
        None => QuotationDraft::from(&document),
    };

    let (handle, worker) = PricingWorker::spawn(&config.worker);
    let (draft, totals) = handle.recompute(draft).await?;
    drop(handle);
    worker.await.context("pricing worker panicked")?;

    info!(
        total_price = %round_money(totals.total_price, config.pricing.display_scale),
        days = totals.days,
        costings = draft.costings.len(),
        "Quotation recomputed"
    );

    let service = match &catalog {
        Some(catalog) => SubmitQuotationService::with_catalog(catalog),
        None => SubmitQuotationService::new(),
    };
    emit(service.build(&draft))
}

fn proforma(config: &AppConfig, document: &Path) -> anyhow::Result<ExitCode> {
    let proforma: ProformaDraft = read_json(document)?;
    let result = SubmitProformaService::new(&config.pricing).call(&proforma);

    if let Some(proforma) = result.result() {
        info!(
            total_amount = %round_money(proforma.total_amount, config.pricing.display_scale),
            days = proforma.days,
            lines = proforma.lines.len(),
            "Proforma recomputed"
        );
    }
    emit(result)
}

/// Print the document, or the validation messages and a failing exit code
fn emit<T: serde::Serialize>(result: ServiceResult<T>) -> anyhow::Result<ExitCode> {
    if result.is_failure() {
        for message in result.full_messages() {
            eprintln!("{}", message);
        }
        return Ok(ExitCode::FAILURE);
    }

    let document = result.into_result()?;
    println!("{}", serde_json::to_string_pretty(&document)?);
    Ok(ExitCode::SUCCESS)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let raw = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quote_command() {
        let cli = Cli::try_parse_from(["qp", "quote", "draft.json", "--catalog", "services.json"]).unwrap();
        match cli.command {
            Command::Quote { document, catalog } => {
                assert_eq!(document, PathBuf::from("draft.json"));
                assert_eq!(catalog, Some(PathBuf::from("services.json")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_days_command() {
        let cli = Cli::try_parse_from(["qp", "days", "2024-01-01", "2024-01-10"]).unwrap();
        assert!(matches!(cli.command, Command::Days { .. }));
    }

    #[test]
    fn test_missing_subcommand_is_an_error() {
        assert!(Cli::try_parse_from(["qp"]).is_err());
    }

    #[test]
    fn test_read_json_reports_path() {
        let err = read_json::<QuotationDocument>(Path::new("/nonexistent/quote.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/quote.json"));
    }
}
