use clap::Parser;
use miette::{IntoDiagnostic, Result, miette};
use receipt_reconciler::application::engine::{EditOutcome, ReceiptEngine};
use receipt_reconciler::config::{OutputFormat, PrecisionOverrides, ReconcilerConfig};
use receipt_reconciler::domain::ports::{NotifierBox, ReceiptStoreBox};
use receipt_reconciler::domain::quantity::RoundingRule;
use receipt_reconciler::domain::reconciler::ReceiptLineReconciler;
use receipt_reconciler::infrastructure::in_memory::InMemoryReceiptStore;
use receipt_reconciler::infrastructure::tracing_notifier::TracingNotifier;
use receipt_reconciler::interfaces::csv::edit_reader::EditReader;
use receipt_reconciler::interfaces::csv::line_item_writer::LineItemWriter;
use receipt_reconciler::interfaces::json;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input CSV of field edits (receipt, row, field, value)
    input: PathBuf,

    /// Decimal places for all quantity fields
    #[arg(long, env = "RECONCILER_PRECISION")]
    precision: Option<u32>,

    /// Decimal places for the accepted quantity
    #[arg(long)]
    qty_precision: Option<u32>,

    /// Decimal places for the received quantity
    #[arg(long)]
    received_precision: Option<u32>,

    /// Decimal places for the rejected quantity
    #[arg(long)]
    rejected_precision: Option<u32>,

    /// Rounding rule: half-up, half-even or truncate
    #[arg(long, env = "RECONCILER_ROUNDING", default_value = "half-up")]
    rounding: RoundingRule,

    /// Output format: csv or json
    #[arg(long, default_value = "csv")]
    format: OutputFormat,

    /// Fail if any row is left with quantities that do not add up
    #[arg(long)]
    strict: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .init();

    let cli = Cli::parse();
    let config = ReconcilerConfig::new(
        PrecisionOverrides {
            base: cli.precision,
            qty: cli.qty_precision,
            received_qty: cli.received_precision,
            rejected_qty: cli.rejected_precision,
        },
        cli.rounding,
        cli.format,
        cli.strict,
    )
    .into_diagnostic()?;
    info!(?config, "starting reconciliation");

    let store: ReceiptStoreBox = Box::new(InMemoryReceiptStore::new());
    let notifier: NotifierBox = Box::new(TracingNotifier);
    let engine = ReceiptEngine::new(
        store,
        notifier,
        ReceiptLineReconciler::new(config.rounding),
        config.precision,
    );

    // Apply edits in file order
    let reader = EditReader::open(&cli.input).into_diagnostic()?;
    let (mut applied, mut mismatches) = (0usize, 0usize);
    for edit_result in reader.edits() {
        match edit_result {
            Ok(edit) => match engine.process_edit(edit).await {
                Ok(EditOutcome::Applied) => applied += 1,
                Ok(EditOutcome::Mismatch(_)) => mismatches += 1,
                Err(e) => eprintln!("Error processing edit: {}", e),
            },
            Err(e) => {
                eprintln!("Error reading edit: {}", e);
            }
        }
    }
    info!(applied, mismatches, "edits processed");

    let receipts = engine.into_results().await.into_diagnostic()?;

    let stdout = io::stdout();
    match config.format {
        OutputFormat::Csv => LineItemWriter::new(stdout.lock())
            .write_receipts(&receipts)
            .into_diagnostic()?,
        OutputFormat::Json => json::write_receipts(stdout.lock(), &receipts).into_diagnostic()?,
    }

    if config.strict {
        let invalid: Vec<String> = receipts
            .iter()
            .flat_map(|receipt| {
                receipt
                    .validate()
                    .into_iter()
                    .map(move |row| format!("{}#{}", receipt.id, row))
            })
            .collect();
        if !invalid.is_empty() {
            return Err(miette!(
                "Rows with inconsistent quantities: {}",
                invalid.join(", ")
            ));
        }
    }

    Ok(())
}
