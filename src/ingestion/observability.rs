use std::fmt;
use std::sync::Arc;

use crate::error::ImportError;
use crate::types::FileFormat;

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ImportSeverity {
    /// Informational event.
    Info,
    /// Warning-level event (non-fatal).
    Warning,
    /// Error-level event (operation failed).
    Error,
    /// Critical error (I/O failures or a misconfigured registry).
    Critical,
}

/// Context about a single read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportContext {
    /// Name of the input (upload filename or path), for reporting only.
    pub source: String,
    /// Format the input is being read as.
    pub format: FileFormat,
}

impl ImportContext {
    pub fn new(source: impl Into<String>, format: FileFormat) -> Self {
        Self {
            source: source.into(),
            format,
        }
    }
}

/// Stats reported on a successful read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportStats {
    /// Number of records returned.
    pub records: usize,
    /// Delimited rows dropped for having the wrong field count.
    pub dropped_rows: usize,
    /// Fields whose raw value was present but could not be coerced.
    pub nulled_fields: usize,
}

/// Observer interface for notable import events.
///
/// Readers call the row/field hooks while iterating; the unified entrypoints call the outcome
/// hooks once per import. Every method defaults to a no-op.
pub trait ImportObserver: Send + Sync {
    /// A delimited data row was skipped. `line` is 1-based and counts the header.
    fn on_row_dropped(&self, _ctx: &ImportContext, _line: u64, _reason: &str) {}

    /// A present, non-sentinel value was coerced to null.
    fn on_field_nulled(&self, _ctx: &ImportContext, _row: u64, _column: &str, _raw: &str) {}

    /// Called when an import succeeds.
    fn on_success(&self, _ctx: &ImportContext, _stats: ImportStats) {}

    /// Called when an import fails.
    fn on_failure(&self, _ctx: &ImportContext, _severity: ImportSeverity, _error: &ImportError) {}

    /// Called when a failure meets the alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(&self, ctx: &ImportContext, severity: ImportSeverity, error: &ImportError) {
        self.on_failure(ctx, severity, error)
    }
}

/// An observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ImportObserver for NoopObserver {}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn ImportObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn ImportObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl ImportObserver for CompositeObserver {
    fn on_row_dropped(&self, ctx: &ImportContext, line: u64, reason: &str) {
        for o in &self.observers {
            o.on_row_dropped(ctx, line, reason);
        }
    }

    fn on_field_nulled(&self, ctx: &ImportContext, row: u64, column: &str, raw: &str) {
        for o in &self.observers {
            o.on_field_nulled(ctx, row, column, raw);
        }
    }

    fn on_success(&self, ctx: &ImportContext, stats: ImportStats) {
        for o in &self.observers {
            o.on_success(ctx, stats);
        }
    }

    fn on_failure(&self, ctx: &ImportContext, severity: ImportSeverity, error: &ImportError) {
        for o in &self.observers {
            o.on_failure(ctx, severity, error);
        }
    }

    fn on_alert(&self, ctx: &ImportContext, severity: ImportSeverity, error: &ImportError) {
        for o in &self.observers {
            o.on_alert(ctx, severity, error);
        }
    }
}

/// Emits import events as structured `tracing` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl ImportObserver for TracingObserver {
    fn on_row_dropped(&self, ctx: &ImportContext, line: u64, reason: &str) {
        tracing::warn!(format = %ctx.format, source = %ctx.source, line, reason, "skipping malformed row");
    }

    fn on_field_nulled(&self, ctx: &ImportContext, row: u64, column: &str, raw: &str) {
        tracing::debug!(format = %ctx.format, source = %ctx.source, row, column, raw, "value coerced to null");
    }

    fn on_success(&self, ctx: &ImportContext, stats: ImportStats) {
        tracing::info!(
            format = %ctx.format,
            source = %ctx.source,
            records = stats.records,
            dropped_rows = stats.dropped_rows,
            nulled_fields = stats.nulled_fields,
            "import finished"
        );
    }

    fn on_failure(&self, ctx: &ImportContext, severity: ImportSeverity, error: &ImportError) {
        tracing::error!(format = %ctx.format, source = %ctx.source, ?severity, error = %error, "import failed");
    }

    fn on_alert(&self, ctx: &ImportContext, severity: ImportSeverity, error: &ImportError) {
        tracing::error!(format = %ctx.format, source = %ctx.source, ?severity, error = %error, alert = true, "import failed");
    }
}
