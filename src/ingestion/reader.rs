//! The reader capability shared by every supported file format.

use std::fmt;
use std::io::Read;

use crate::error::ImportResult;
use crate::types::{Employee, FileFormat, COLUMNS, COLUMN_COUNT};

use super::coerce;
use super::observability::{ImportContext, ImportObserver, NoopObserver};

/// Parses a byte stream of one known format into employee records, in input row order.
///
/// Implementations hold no per-call state: a single instance is shared by every caller of a
/// [`super::ReaderRegistry`].
pub trait EmployeeReader: Send + Sync {
    /// The format this reader handles.
    fn format(&self) -> FileFormat;

    /// Read all records from `input`, reporting dropped rows and nulled fields to `observer`.
    fn read_with(
        &self,
        input: &mut dyn Read,
        ctx: &ImportContext,
        observer: &dyn ImportObserver,
    ) -> ImportResult<Vec<Employee>>;

    /// Read all records from `input` without observing events.
    fn read(&self, input: &mut dyn Read) -> ImportResult<Vec<Employee>> {
        let ctx = ImportContext::new("<stream>", self.format());
        self.read_with(input, &ctx, &NoopObserver)
    }
}

impl fmt::Debug for dyn EmployeeReader + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmployeeReader")
            .field("format", &self.format().tag())
            .finish()
    }
}

/// Build a record from the seven raw column values of one row.
///
/// `row` is the reader's own row numbering, used only for reporting.
pub(crate) fn employee_from_raw(
    raw: &[&str; COLUMN_COUNT],
    row: u64,
    ctx: &ImportContext,
    observer: &dyn ImportObserver,
) -> Employee {
    Employee {
        name: coerce::parse_string(raw[0]),
        date_of_birth: coerce_field(observer, ctx, row, COLUMNS[1], raw[1], coerce::parse_date),
        gender: coerce_field(observer, ctx, row, COLUMNS[2], raw[2], coerce::parse_gender),
        role: coerce::parse_string(raw[3]),
        email: coerce::parse_string(raw[4]),
        phone_number: coerce::parse_string(raw[5]),
        active: coerce_field(observer, ctx, row, COLUMNS[6], raw[6], coerce::parse_boolean),
    }
}

// Present-but-unparsable values are reported; sentinels are silently null.
fn coerce_field<T>(
    observer: &dyn ImportObserver,
    ctx: &ImportContext,
    row: u64,
    column: &str,
    raw: &str,
    parse: impl FnOnce(&str) -> Option<T>,
) -> Option<T> {
    let parsed = parse(raw);
    if parsed.is_none() && coerce::normalize_nullity(raw).is_some() {
        observer.on_field_nulled(ctx, row, column, raw);
    }
    parsed
}
