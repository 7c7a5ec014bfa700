use thiserror::Error;

/// Convenience result type for import operations.
pub type ImportResult<T> = Result<T, ImportError>;

/// Error type returned by the readers, the registry and the unified entrypoints.
///
/// Row-shape mismatches and best-effort field coercion failures are *not* errors; they surface
/// through [`crate::ingestion::ImportObserver`] instead.
#[derive(Debug, Error)]
pub enum ImportError {
    /// Underlying I/O error while reading the input stream.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV decoder error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Workbook decoder error.
    #[error("excel error: {0}")]
    Excel(#[from] calamine::Error),

    /// The input is structurally invalid and the whole read was aborted.
    #[error("file processing failed: {message}")]
    FileProcessing { message: String },

    /// The filename carries no extension, or one without a registered reader.
    #[error("unsupported format: {message}")]
    UnsupportedFormat { message: String },

    /// A required reader was missing when the registry was built.
    #[error("reader not found: {message}")]
    ReaderNotFound { message: String },

    /// More than one reader was supplied for the same format.
    #[error("duplicate reader: {message}")]
    DuplicateReader { message: String },
}

/// Coarse classification of an [`ImportError`], for callers choosing a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The input could not be read; the import produced nothing.
    Structural,
    /// The input format is not handled (client-side problem).
    UnsupportedFormat,
    /// The registry was misconfigured at startup.
    Configuration,
}

impl ImportError {
    pub(crate) fn file_processing(message: impl Into<String>) -> Self {
        Self::FileProcessing {
            message: message.into(),
        }
    }

    pub(crate) fn unsupported_format(message: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            message: message.into(),
        }
    }

    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Io(_) | Self::Csv(_) | Self::Excel(_) | Self::FileProcessing { .. } => {
                ErrorKind::Structural
            }
            Self::UnsupportedFormat { .. } => ErrorKind::UnsupportedFormat,
            Self::ReaderNotFound { .. } | Self::DuplicateReader { .. } => ErrorKind::Configuration,
        }
    }
}
