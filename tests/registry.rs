use std::io::Read;
use std::sync::Arc;

use employee_ingest::ingestion::{
    CsvEmployeeReader, EmployeeReader, ImportContext, ImportObserver, ReaderRegistry,
    XlsxEmployeeReader,
};
use employee_ingest::types::{Employee, FileFormat};
use employee_ingest::{ErrorKind, ImportError, ImportResult};

fn both_readers() -> Vec<Arc<dyn EmployeeReader>> {
    vec![
        Arc::new(CsvEmployeeReader::new()),
        Arc::new(XlsxEmployeeReader::new()),
    ]
}

#[test]
fn resolves_reader_by_extension() {
    let registry = ReaderRegistry::new(both_readers()).unwrap();

    assert_eq!(registry.resolve(Some("employees.csv")).unwrap().format(), FileFormat::Csv);
    assert_eq!(registry.resolve(Some("Employees.xlsx")).unwrap().format(), FileFormat::Xlsx);
}

#[test]
fn resolution_is_case_insensitive_and_uses_last_dot() {
    let registry = ReaderRegistry::with_default_readers();

    assert_eq!(registry.resolve(Some("EMPLOYEES.CSV")).unwrap().format(), FileFormat::Csv);
    assert_eq!(registry.resolve(Some("q1.report.XlSx")).unwrap().format(), FileFormat::Xlsx);
}

#[test]
fn unsupported_extension_is_rejected() {
    let registry = ReaderRegistry::with_default_readers();

    let err = registry.resolve(Some("employees.txt")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnsupportedFormat);
    assert!(err.to_string().contains("Unsupported file extension: txt"));

    let err = registry.resolve(Some("employees.csv.bak")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnsupportedFormat);

    let err = registry.resolve(Some("employees.")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnsupportedFormat);
}

#[test]
fn missing_or_extensionless_filename_is_rejected() {
    let registry = ReaderRegistry::with_default_readers();

    let err = registry.resolve(None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnsupportedFormat);
    assert!(err.to_string().contains("File has no valid extension"));

    let err = registry.resolve(Some("noextension")).unwrap_err();
    assert!(err.to_string().contains("File has no valid extension: noextension"));
}

#[test]
fn construction_fails_when_a_reader_is_missing() {
    let err = ReaderRegistry::new(vec![Arc::new(CsvEmployeeReader::new())]).unwrap_err();
    assert!(matches!(err, ImportError::ReaderNotFound { .. }));
    assert_eq!(err.kind(), ErrorKind::Configuration);
    assert!(err.to_string().contains("xlsx"));

    let err = ReaderRegistry::new(Vec::new()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
}

#[test]
fn construction_fails_on_duplicate_readers() {
    let mut readers = both_readers();
    readers.push(Arc::new(CsvEmployeeReader::new()));

    let err = ReaderRegistry::new(readers).unwrap_err();
    assert!(matches!(err, ImportError::DuplicateReader { .. }));
    assert_eq!(err.kind(), ErrorKind::Configuration);
}

/// A stand-in reader, to check the registry hands out what it was given.
struct FixedCsvReader;

impl EmployeeReader for FixedCsvReader {
    fn format(&self) -> FileFormat {
        FileFormat::Csv
    }

    fn read_with(
        &self,
        _input: &mut dyn Read,
        _ctx: &ImportContext,
        _observer: &dyn ImportObserver,
    ) -> ImportResult<Vec<Employee>> {
        Ok(vec![Employee::default()])
    }
}

#[test]
fn registry_uses_supplied_reader_instances() {
    let registry = ReaderRegistry::new(vec![
        Arc::new(XlsxEmployeeReader::new()),
        Arc::new(FixedCsvReader),
    ])
    .unwrap();

    let reader = registry.resolve(Some("anything.csv")).unwrap();
    assert_eq!(reader.read(&mut "".as_bytes()).unwrap(), vec![Employee::default()]);
}

#[test]
fn registry_is_shared_across_threads() {
    let registry = ReaderRegistry::with_default_readers();
    let header = "name,dateOfBirth,gender,role,email,phoneNumber,active";

    std::thread::scope(|s| {
        for i in 0..8 {
            let registry = &registry;
            s.spawn(move || {
                let input = format!("{header}\nWorker {i},,,,,,true\n");
                let reader = registry.resolve(Some("batch.csv")).unwrap();
                let employees = reader.read(&mut input.as_bytes()).unwrap();
                assert_eq!(employees[0].name, Some(format!("Worker {i}")));
            });
        }
    });
}
