//! Spreadsheet (XLSX) reader.

use std::io::{Cursor, Read};

use calamine::{Data, Range, Reader, Xlsx, open_workbook_from_rs};
use thiserror::Error;

use crate::error::{ImportError, ImportResult};
use crate::types::{COLUMN_COUNT, Employee, FileFormat};

use super::observability::{ImportContext, ImportObserver};
use super::reader::{EmployeeReader, employee_from_raw};

/// Reads `.xlsx` employee workbooks.
///
/// Behavior:
/// - Uses the first sheet only; row 0 must be present (its content is not checked)
/// - Reads rows 1 through the last used row; rows without any content are skipped
/// - Renders columns 0-6 to text per [`CellContent`] and coerces them like CSV values
/// - A cell that cannot be rendered aborts the whole read, naming the row index
#[derive(Debug, Default, Clone, Copy)]
pub struct XlsxEmployeeReader;

impl XlsxEmployeeReader {
    pub fn new() -> Self {
        Self
    }
}

impl EmployeeReader for XlsxEmployeeReader {
    fn format(&self) -> FileFormat {
        FileFormat::Xlsx
    }

    fn read_with(
        &self,
        input: &mut dyn Read,
        ctx: &ImportContext,
        observer: &dyn ImportObserver,
    ) -> ImportResult<Vec<Employee>> {
        // The zip container needs random access.
        let mut bytes = Vec::new();
        input.read_to_end(&mut bytes)?;

        let mut workbook = open_workbook_from_rs::<Xlsx<_>, _>(Cursor::new(bytes))
            .map_err(calamine::Error::from)?;
        let range = match workbook.worksheet_range_at(0) {
            Some(range) => range.map_err(calamine::Error::from)?,
            None => return Err(ImportError::file_processing("no sheet found in Excel file")),
        };

        read_employees_from_range(&range, ctx, observer)
    }
}

/// Read employee records from an already-loaded sheet.
///
/// Row and column indexes are absolute sheet positions; cells outside `range` are blank.
pub fn read_employees_from_range(
    range: &Range<Data>,
    ctx: &ImportContext,
    observer: &dyn ImportObserver,
) -> ImportResult<Vec<Employee>> {
    if !row_has_content(range, 0) {
        return Err(ImportError::file_processing(
            "Excel file is missing header row",
        ));
    }

    let last_row = range.end().map_or(0, |(row, _)| row);
    let mut employees = Vec::new();
    for row in 1..=last_row {
        if !row_has_content(range, row) {
            continue;
        }

        let rendered = render_row(range, row).map_err(|fault| {
            ImportError::file_processing(format!("failed to parse Excel row {row}: {fault}"))
        })?;
        let raw: [&str; COLUMN_COUNT] = std::array::from_fn(|idx| rendered[idx].as_str());
        employees.push(employee_from_raw(&raw, u64::from(row), ctx, observer));
    }

    Ok(employees)
}

fn row_has_content(range: &Range<Data>, row: u32) -> bool {
    let (Some((_, first_col)), Some((_, last_col))) = (range.start(), range.end()) else {
        return false;
    };
    (first_col..=last_col).any(|col| !matches!(range.get_value((row, col)), None | Some(Data::Empty)))
}

fn render_row(range: &Range<Data>, row: u32) -> Result<[String; COLUMN_COUNT], CellFault> {
    let mut rendered: [String; COLUMN_COUNT] = Default::default();
    for (col, slot) in rendered.iter_mut().enumerate() {
        let data = range.get_value((row, col as u32)).unwrap_or(&Data::Empty);
        *slot = CellContent::from_data(data)
            .map_err(|message| CellFault { column: col, message })?
            .render();
    }
    Ok(rendered)
}

/// A cell that could not be turned into [`CellContent`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("column {column}: {message}")]
pub struct CellFault {
    /// Zero-based column index.
    pub column: usize,
    pub message: String,
}

/// Cell content by kind, each with a single rendering rule.
#[derive(Debug, Clone, PartialEq)]
pub enum CellContent {
    /// Rendered trimmed.
    Text(String),
    /// Rendered as decimal text; whole numbers keep a trailing `.0`.
    Number(f64),
    /// Rendered as `true` / `false`.
    Boolean(bool),
    /// Rendered as the `N/A` nullity sentinel.
    Blank,
    /// Rendered as `UNKNOWN`, which no typed parser accepts.
    Other,
}

impl CellContent {
    /// Classify a decoded cell.
    ///
    /// Dates stored as serial numbers are numbers. Durations and formula error values
    /// (`#N/A`, `#REF!`, ...) fall into [`CellContent::Other`]. A non-finite number has no
    /// decimal rendering and is rejected.
    pub fn from_data(data: &Data) -> Result<Self, String> {
        Ok(match data {
            Data::String(s) => Self::Text(s.clone()),
            Data::DateTimeIso(s) => Self::Text(s.clone()),
            Data::Float(f) if !f.is_finite() => {
                return Err(format!("cell holds non-finite number {f}"));
            }
            Data::Float(f) => Self::Number(*f),
            Data::Int(i) => Self::Number(*i as f64),
            Data::DateTime(dt) => Self::Number(dt.as_f64()),
            Data::Bool(b) => Self::Boolean(*b),
            Data::Empty => Self::Blank,
            Data::DurationIso(_) | Data::Error(_) => Self::Other,
        })
    }

    /// Render the cell to the text the field coercion functions consume.
    pub fn render(&self) -> String {
        match self {
            Self::Text(s) => s.trim().to_owned(),
            Self::Number(n) => render_number(*n),
            Self::Boolean(b) => b.to_string(),
            Self::Blank => "N/A".to_owned(),
            Self::Other => "UNKNOWN".to_owned(),
        }
    }
}

fn render_number(n: f64) -> String {
    if n.fract() == 0.0 {
        format!("{n:.1}")
    } else {
        n.to_string()
    }
}
