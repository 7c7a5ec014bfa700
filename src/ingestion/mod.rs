//! Import entrypoints and implementations.
//!
//! Most callers should use [`import_employees`] (from [`unified`]) which:
//!
//! - picks the reader for the upload's file extension through a [`ReaderRegistry`]
//! - reads the upload into an ordered `Vec` of [`crate::types::Employee`] records
//! - optionally reports row events and the outcome to an [`ImportObserver`]
//!
//! Format-specific readers are also available under:
//! - [`csv`]
//! - [`excel`]
//!
//! and the best-effort field parsers they share under [`coerce`].

pub mod coerce;
pub mod csv;
pub mod excel;
pub mod observability;
pub mod reader;
pub mod registry;
pub mod unified;

pub use self::csv::CsvEmployeeReader;
pub use excel::{CellContent, XlsxEmployeeReader};
pub use observability::{
    CompositeObserver, ImportContext, ImportObserver, ImportSeverity, ImportStats, NoopObserver,
    TracingObserver,
};
pub use reader::EmployeeReader;
pub use registry::ReaderRegistry;
pub use unified::{EmployeeUpload, ImportOptions, import_employees, import_employees_from_path};
