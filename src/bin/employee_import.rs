//! Read one employee file and print the parsed records as JSON.
//!
//! ```text
//! RUST_LOG=debug employee-import Employees.xlsx --pretty
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use employee_ingest::ErrorKind;
use employee_ingest::ingestion::{
    EmployeeUpload, ImportOptions, ReaderRegistry, TracingObserver, import_employees,
};

#[derive(Debug, Parser)]
#[command(name = "employee-import", version, about = "Parse a CSV or XLSX employee file")]
struct Args {
    /// Input file; its extension selects the reader.
    path: PathBuf,

    /// Declared content type, logged only.
    #[arg(long)]
    content_type: Option<String>,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    init_logging();
    let args = Args::parse();

    let bytes = match std::fs::read(&args.path) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!(path = %args.path.display(), error = %e, "cannot read input");
            return ExitCode::FAILURE;
        }
    };
    let upload = EmployeeUpload {
        filename: args
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned()),
        content_type: args.content_type,
        bytes,
    };
    tracing::info!(
        filename = ?upload.filename,
        content_type = ?upload.content_type,
        size = upload.bytes.len(),
        "importing employees"
    );

    let registry = ReaderRegistry::with_default_readers();
    let options = ImportOptions {
        observer: Some(Arc::new(TracingObserver)),
        ..Default::default()
    };

    let employees = match import_employees(&registry, &upload, &options) {
        Ok(employees) => employees,
        Err(e) => {
            // Read failures were already logged by the observer; rejected uploads never reach it.
            if matches!(e.kind(), ErrorKind::UnsupportedFormat) {
                tracing::error!(filename = ?upload.filename, error = %e, "unsupported upload");
            }
            return ExitCode::FAILURE;
        }
    };

    let json = if args.pretty {
        serde_json::to_string_pretty(&employees)
    } else {
        serde_json::to_string(&employees)
    };
    match json {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "cannot serialize records");
            ExitCode::FAILURE
        }
    }
}
