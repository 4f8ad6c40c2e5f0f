use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use catalog_app::modules::books::models::BookInput;
use catalog_app::ValidationResult;
use clap::{Parser, Subcommand};

/// Book catalog service and validation tools
#[derive(Debug, Parser)]
#[command(name = "catalog", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP service
    Serve,
    /// Validate a single field value, as the form does on input
    CheckField {
        /// Field name, e.g. `isbn` or `publishDate`
        name: String,
        /// Raw value; omit to check an absent value
        value: Option<String>,
    },
    /// Validate a whole book record given as JSON (`null` for no record)
    CheckBook {
        /// File to read; stdin when omitted or `-`
        path: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve => serve(),
        Command::CheckField { name, value } => {
            report(catalog_app::validate_field(&name, value.as_deref()))
        }
        Command::CheckBook { path } => {
            let raw = read_input(path.as_deref())?;
            let record: Option<BookInput> =
                serde_json::from_str(&raw).context("book record is not valid JSON")?;
            report(catalog_app::validate_book(record.as_ref()))
        }
    }
}

fn serve() -> anyhow::Result<ExitCode> {
    let settings = catalog_kernel::settings::Settings::load()
        .with_context(|| "failed to load catalog settings")?;
    catalog_telemetry::init(&settings.telemetry)?;

    tracing::info!(env = ?settings.environment, "catalog CLI serving");

    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    runtime.block_on(catalog_app::serve(&settings))?;

    Ok(ExitCode::SUCCESS)
}

fn read_input(path: Option<&std::path::Path>) -> anyhow::Result<String> {
    match path {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .context("failed to read stdin")?;
            Ok(raw)
        }
    }
}

/// Print the result as JSON; failing checks exit with status 1.
fn report(result: ValidationResult) -> anyhow::Result<ExitCode> {
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(if result.is_valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
