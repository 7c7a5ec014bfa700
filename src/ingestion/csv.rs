//! Delimited-text (CSV) reader.

use std::borrow::Cow;
use std::io::{BufRead, BufReader, Read};

use csv::ByteRecord;

use crate::error::{ImportError, ImportResult};
use crate::types::{COLUMN_COUNT, Employee, FileFormat};

use super::observability::{ImportContext, ImportObserver};
use super::reader::{EmployeeReader, employee_from_raw};

/// Reads comma-separated employee files.
///
/// Rules:
///
/// - The first line is the header and must split into exactly seven fields (trailing empty
///   fields do not count). Its content is not checked; a blank first line fails the check.
/// - Blank data lines are skipped.
/// - A data line with any other field count is dropped and the read continues.
/// - Values are never quoted; every comma separates a field.
/// - Bytes that are not valid UTF-8 are replaced with U+FFFD.
#[derive(Debug, Default, Clone, Copy)]
pub struct CsvEmployeeReader;

impl CsvEmployeeReader {
    pub fn new() -> Self {
        Self
    }
}

impl EmployeeReader for CsvEmployeeReader {
    fn format(&self) -> FileFormat {
        FileFormat::Csv
    }

    fn read_with(
        &self,
        input: &mut dyn Read,
        ctx: &ImportContext,
        observer: &dyn ImportObserver,
    ) -> ImportResult<Vec<Employee>> {
        read_employees_from_csv(BufReader::new(input), ctx, observer)
    }
}

/// Read employee records from buffered CSV text, header line included.
///
/// Line numbers reported to `observer` are 1-based positions in `input`.
pub fn read_employees_from_csv<R: BufRead>(
    mut input: R,
    ctx: &ImportContext,
    observer: &dyn ImportObserver,
) -> ImportResult<Vec<Employee>> {
    let mut header = Vec::new();
    if input.read_until(b'\n', &mut header)? == 0 {
        return Err(ImportError::file_processing("CSV file is empty"));
    }
    let header = trim_line_end(&header);
    let header_fields = header_field_count(header);
    if header_fields != COLUMN_COUNT {
        return Err(ImportError::file_processing(format!(
            "invalid CSV header format: expected {COLUMN_COUNT} fields, found {header_fields} ({})",
            String::from_utf8_lossy(header)
        )));
    }

    // The header is consumed already, so positions from `rdr` start one line late.
    let mut rdr = data_reader(input);
    let mut employees = Vec::new();
    for result in rdr.byte_records() {
        let record = result?;
        let line = record.position().map_or(0, |p| p.line()) + 1;

        if is_blank(&record) {
            continue;
        }
        if record.len() != COLUMN_COUNT {
            observer.on_row_dropped(
                ctx,
                line,
                &format!("expected {COLUMN_COUNT} fields, found {}", record.len()),
            );
            continue;
        }

        employees.push(employee_from_record(&record, line, ctx, observer));
    }

    Ok(employees)
}

// Rows may vary in length and quotes are ordinary characters.
fn data_reader<R: Read>(input: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(input)
}

fn employee_from_record(
    record: &ByteRecord,
    line: u64,
    ctx: &ImportContext,
    observer: &dyn ImportObserver,
) -> Employee {
    let fields: Vec<Cow<'_, str>> = record.iter().map(String::from_utf8_lossy).collect();
    let raw: [&str; COLUMN_COUNT] = std::array::from_fn(|idx| &*fields[idx]);
    employee_from_raw(&raw, line, ctx, observer)
}

fn trim_line_end(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

// Trailing empty fields are not counted, so `a,b,` has two fields.
fn header_field_count(line: &[u8]) -> usize {
    let fields: Vec<&[u8]> = line.split(|&b| b == b',').collect();
    (0..fields.len())
        .rev()
        .find(|&idx| !fields[idx].is_empty())
        .map_or(0, |idx| idx + 1)
}

fn is_blank(record: &ByteRecord) -> bool {
    record.iter().all(|field| field.trim_ascii().is_empty()) && record.len() <= 1
}
