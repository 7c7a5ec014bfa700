//! Extension-based reader lookup.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::{ImportError, ImportResult};
use crate::types::FileFormat;

use super::csv::CsvEmployeeReader;
use super::excel::XlsxEmployeeReader;
use super::reader::EmployeeReader;

/// Maps each [`FileFormat`] to the reader responsible for it.
///
/// Built once at startup and read-only afterwards; share it freely across threads.
#[derive(Clone)]
pub struct ReaderRegistry {
    readers: HashMap<FileFormat, Arc<dyn EmployeeReader>>,
}

impl ReaderRegistry {
    /// Build a registry from the available readers.
    ///
    /// Every format in [`FileFormat::ALL`] needs exactly one reader. A missing format fails with
    /// [`ImportError::ReaderNotFound`], a repeated one with [`ImportError::DuplicateReader`].
    pub fn new(readers: Vec<Arc<dyn EmployeeReader>>) -> ImportResult<Self> {
        let mut by_format: HashMap<FileFormat, Arc<dyn EmployeeReader>> = HashMap::new();
        for reader in readers {
            let format = reader.format();
            if by_format.insert(format, reader).is_some() {
                return Err(ImportError::DuplicateReader {
                    message: format!("more than one reader supplied for format '{format}'"),
                });
            }
        }

        for format in FileFormat::ALL {
            if !by_format.contains_key(&format) {
                return Err(ImportError::ReaderNotFound {
                    message: format!("no reader supplied for format '{format}'"),
                });
            }
        }

        Ok(Self { readers: by_format })
    }

    /// Registry holding the built-in CSV and XLSX readers.
    pub fn with_default_readers() -> Self {
        Self {
            readers: HashMap::from([
                (FileFormat::Csv, Arc::new(CsvEmployeeReader::new()) as Arc<dyn EmployeeReader>),
                (FileFormat::Xlsx, Arc::new(XlsxEmployeeReader::new()) as Arc<dyn EmployeeReader>),
            ]),
        }
    }

    /// Resolve the reader for `filename` by its extension (the text after the last `.`,
    /// case-insensitive).
    pub fn resolve(&self, filename: Option<&str>) -> ImportResult<&dyn EmployeeReader> {
        let format = format_for_filename(filename)?;
        self.reader_for(format).ok_or_else(|| {
            ImportError::unsupported_format(format!("Unsupported file extension: {format}"))
        })
    }

    /// The reader registered for `format`.
    pub fn reader_for(&self, format: FileFormat) -> Option<&dyn EmployeeReader> {
        self.readers.get(&format).map(|reader| reader.as_ref())
    }
}

impl Default for ReaderRegistry {
    fn default() -> Self {
        Self::with_default_readers()
    }
}

impl fmt::Debug for ReaderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut formats: Vec<&str> = self.readers.keys().map(FileFormat::tag).collect();
        formats.sort_unstable();
        f.debug_struct("ReaderRegistry")
            .field("formats", &formats)
            .finish()
    }
}

/// Infer the [`FileFormat`] from a filename's extension.
pub fn format_for_filename(filename: Option<&str>) -> ImportResult<FileFormat> {
    let (name, ext) = match filename {
        Some(name) => match name.rsplit_once('.') {
            Some((_, ext)) => (name, ext),
            None => {
                return Err(ImportError::unsupported_format(format!(
                    "File has no valid extension: {name}"
                )));
            }
        },
        None => {
            return Err(ImportError::unsupported_format(
                "File has no valid extension: <none>",
            ));
        }
    };

    FileFormat::from_extension(ext).ok_or_else(|| {
        ImportError::unsupported_format(format!(
            "Unsupported file extension: {} ({name})",
            ext.to_ascii_lowercase()
        ))
    })
}
