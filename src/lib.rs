//! `employee-ingest` turns uploaded employee files into an ordered list of typed
//! [`types::Employee`] records, ready for a persistence layer.
//!
//! The primary entrypoint is [`ingestion::import_employees`], which picks a reader from the
//! upload's file extension through a [`ingestion::ReaderRegistry`].
//!
//! ## Supported files
//!
//! - **CSV**: `.csv`, comma-separated, no quoting
//! - **Excel workbooks**: `.xlsx`, first sheet only
//!
//! Both expect seven columns in a fixed order, with a header row first:
//! `name, dateOfBirth, gender, role, email, phoneNumber, active`.
//!
//! ## Leniency
//!
//! Three outcomes are kept apart:
//!
//! - A value that cannot be coerced (a bad date, an unknown gender, `yes` for a boolean) becomes
//!   `None`; the record is still produced. Empty text, `null` and `n/a` always mean `None`.
//! - A CSV data line with the wrong number of fields is dropped and the read continues.
//! - Structural problems (empty file, bad header, missing sheet or header row, an unreadable
//!   spreadsheet cell) abort the whole read with an [`ImportError`].
//!
//! Dropped rows and nulled fields are reported to an optional [`ingestion::ImportObserver`].
//!
//! ## Quick example
//!
//! ```rust
//! use employee_ingest::ingestion::{import_employees, EmployeeUpload, ImportOptions, ReaderRegistry};
//! use employee_ingest::types::Gender;
//!
//! # fn main() -> Result<(), employee_ingest::ImportError> {
//! let registry = ReaderRegistry::with_default_readers();
//! let upload = EmployeeUpload::new(
//!     "team.CSV",
//!     "name,dateOfBirth,gender,role,email,phoneNumber,active\n\
//!      Jane Doe,invalid_date,invalid_gender,Manager,jane@x.com,123,false\n\
//!      too,few,fields\n",
//! );
//!
//! let employees = import_employees(&registry, &upload, &ImportOptions::default())?;
//! assert_eq!(employees.len(), 1);
//! assert_eq!(employees[0].date_of_birth, None);
//! assert_eq!(employees[0].gender, None::<Gender>);
//! assert_eq!(employees[0].active, Some(false));
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`ingestion`]: unified entrypoints, the reader registry and format-specific readers
//! - [`types`]: the employee record and file formats
//! - [`error`]: error types used across ingestion

pub mod error;
pub mod ingestion;
pub mod types;

pub use error::{ErrorKind, ImportError, ImportResult};
