//! Unified import entrypoints.
//!
//! Most callers should use [`import_employees`] (for uploaded bytes) or
//! [`import_employees_from_path`] (for files on disk). Both:
//!
//! - resolve the reader from the filename extension through a [`ReaderRegistry`]
//! - read the input into an ordered `Vec` of [`Employee`] records
//! - optionally report row events and the outcome to an [`ImportObserver`]
//!
//! Unsupported extensions are returned to the caller without being reported: no read started.

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::{ErrorKind, ImportError, ImportResult};
use crate::types::Employee;

use super::observability::{
    ImportContext, ImportObserver, ImportSeverity, ImportStats, NoopObserver,
};
use super::reader::EmployeeReader;
use super::registry::ReaderRegistry;

/// Options controlling unified import behavior.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct ImportOptions {
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn ImportObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: ImportSeverity,
}

impl fmt::Debug for ImportOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImportOptions")
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            observer: None,
            alert_at_or_above: ImportSeverity::Critical,
        }
    }
}

/// An uploaded employee file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeUpload {
    /// Declared filename; only its extension is used, to pick the reader.
    pub filename: Option<String>,
    /// Declared content type. Informational; never used for parsing decisions.
    pub content_type: Option<String>,
    /// Raw file content.
    pub bytes: Vec<u8>,
}

impl EmployeeUpload {
    pub fn new(filename: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: Some(filename.into()),
            content_type: None,
            bytes: bytes.into(),
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// Import an uploaded file.
///
/// When an observer is configured, this function reports:
///
/// - `on_row_dropped` / `on_field_nulled` while reading
/// - `on_success` on success, with record/drop/null counts
/// - `on_failure` on failure, with a computed severity
/// - `on_alert` on failure when the computed severity is >= `options.alert_at_or_above`
///
/// # Examples
///
/// ```
/// use employee_ingest::ingestion::{import_employees, EmployeeUpload, ImportOptions, ReaderRegistry};
///
/// # fn main() -> Result<(), employee_ingest::ImportError> {
/// let registry = ReaderRegistry::with_default_readers();
/// let upload = EmployeeUpload::new(
///     "employees.csv",
///     "name,dateOfBirth,gender,role,email,phoneNumber,active\n\
///      John Doe,1990-01-01,MALE,Engineer,john@example.com,1234567890,true\n",
/// );
///
/// let employees = import_employees(&registry, &upload, &ImportOptions::default())?;
/// assert_eq!(employees.len(), 1);
/// assert_eq!(employees[0].name.as_deref(), Some("John Doe"));
/// # Ok(())
/// # }
/// ```
pub fn import_employees(
    registry: &ReaderRegistry,
    upload: &EmployeeUpload,
    options: &ImportOptions,
) -> ImportResult<Vec<Employee>> {
    let reader = registry.resolve(upload.filename.as_deref())?;
    let ctx = ImportContext::new(
        upload.filename.as_deref().unwrap_or_default(),
        reader.format(),
    );
    let mut input = upload.bytes.as_slice();
    read_and_report(reader, &ctx, &mut input, options)
}

/// Import a file from disk, dispatching on its file name.
///
/// The file stays open only for the duration of the read.
///
/// ```no_run
/// use std::sync::Arc;
///
/// use employee_ingest::ingestion::{
///     import_employees_from_path, ImportOptions, ReaderRegistry, TracingObserver,
/// };
///
/// # fn main() -> Result<(), employee_ingest::ImportError> {
/// let registry = ReaderRegistry::with_default_readers();
/// let opts = ImportOptions {
///     observer: Some(Arc::new(TracingObserver)),
///     ..Default::default()
/// };
///
/// let employees = import_employees_from_path(&registry, "Employees.xlsx", &opts)?;
/// println!("records={}", employees.len());
/// # Ok(())
/// # }
/// ```
pub fn import_employees_from_path(
    registry: &ReaderRegistry,
    path: impl AsRef<Path>,
    options: &ImportOptions,
) -> ImportResult<Vec<Employee>> {
    let path = path.as_ref();
    let reader = registry.resolve(path.file_name().and_then(|name| name.to_str()))?;
    let ctx = ImportContext::new(path.display().to_string(), reader.format());

    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            let err = ImportError::Io(e);
            report_failure(&ctx, &err, options);
            return Err(err);
        }
    };
    read_and_report(reader, &ctx, &mut file, options)
}

fn read_and_report(
    reader: &dyn EmployeeReader,
    ctx: &ImportContext,
    input: &mut dyn Read,
    options: &ImportOptions,
) -> ImportResult<Vec<Employee>> {
    let counting = CountingObserver::new(options.observer.as_deref());
    let result = reader.read_with(input, ctx, &counting);

    match &result {
        Ok(employees) => {
            if let Some(obs) = options.observer.as_ref() {
                obs.on_success(ctx, counting.stats(employees.len()));
            }
        }
        Err(e) => report_failure(ctx, e, options),
    }

    result
}

fn report_failure(ctx: &ImportContext, err: &ImportError, options: &ImportOptions) {
    if let Some(obs) = options.observer.as_ref() {
        let sev = severity_for_error(err);
        obs.on_failure(ctx, sev, err);
        if sev >= options.alert_at_or_above {
            obs.on_alert(ctx, sev, err);
        }
    }
}

/// Severity assigned to an error when reporting it to an observer.
pub fn severity_for_error(e: &ImportError) -> ImportSeverity {
    match e {
        ImportError::Io(_) => ImportSeverity::Critical,
        ImportError::Csv(err) => match err.kind() {
            ::csv::ErrorKind::Io(_) => ImportSeverity::Critical,
            _ => ImportSeverity::Error,
        },
        ImportError::Excel(calamine::Error::Io(_)) => ImportSeverity::Critical,
        other => match other.kind() {
            ErrorKind::Configuration => ImportSeverity::Critical,
            ErrorKind::Structural | ErrorKind::UnsupportedFormat => ImportSeverity::Error,
        },
    }
}

/// Forwards row events to the configured observer while counting them.
struct CountingObserver<'a> {
    inner: &'a dyn ImportObserver,
    dropped_rows: AtomicUsize,
    nulled_fields: AtomicUsize,
}

impl<'a> CountingObserver<'a> {
    fn new(inner: Option<&'a dyn ImportObserver>) -> Self {
        Self {
            inner: inner.unwrap_or(&NoopObserver),
            dropped_rows: AtomicUsize::new(0),
            nulled_fields: AtomicUsize::new(0),
        }
    }

    fn stats(&self, records: usize) -> ImportStats {
        ImportStats {
            records,
            dropped_rows: self.dropped_rows.load(Ordering::Relaxed),
            nulled_fields: self.nulled_fields.load(Ordering::Relaxed),
        }
    }
}

impl ImportObserver for CountingObserver<'_> {
    fn on_row_dropped(&self, ctx: &ImportContext, line: u64, reason: &str) {
        self.dropped_rows.fetch_add(1, Ordering::Relaxed);
        self.inner.on_row_dropped(ctx, line, reason);
    }

    fn on_field_nulled(&self, ctx: &ImportContext, row: u64, column: &str, raw: &str) {
        self.nulled_fields.fetch_add(1, Ordering::Relaxed);
        self.inner.on_field_nulled(ctx, row, column, raw);
    }
}
