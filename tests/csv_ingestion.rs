use std::io::BufReader;

use chrono::NaiveDate;

use employee_ingest::ErrorKind;
use employee_ingest::ingestion::csv::read_employees_from_csv;
use employee_ingest::ingestion::{CsvEmployeeReader, EmployeeReader, ImportContext, NoopObserver};
use employee_ingest::types::{Employee, FileFormat, Gender};

const HEADER: &str = "name,dateOfBirth,gender,role,email,phoneNumber,active";

fn read(input: &str) -> employee_ingest::ImportResult<Vec<Employee>> {
    CsvEmployeeReader::new().read(&mut input.as_bytes())
}

#[test]
fn read_csv_happy_path() {
    let input = format!(
        "{HEADER}\nJohn Doe,1990-01-01,MALE,Engineer,john@example.com,1234567890,true"
    );
    let employees = read(&input).unwrap();

    assert_eq!(
        employees,
        vec![Employee {
            name: Some("John Doe".to_string()),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1),
            gender: Some(Gender::Male),
            role: Some("Engineer".to_string()),
            email: Some("john@example.com".to_string()),
            phone_number: Some("1234567890".to_string()),
            active: Some(true),
        }]
    );
}

#[test]
fn read_csv_from_fixture_keeps_row_order() {
    let mut file = std::fs::File::open("tests/fixtures/employees.csv").unwrap();
    let employees = CsvEmployeeReader::new().read(&mut file).unwrap();

    let names: Vec<_> = employees.iter().map(|e| e.name.as_deref()).collect();
    assert_eq!(names, vec![Some("John Doe"), Some("Jane Doe"), Some("Alex Roe")]);

    let alex = &employees[2];
    assert_eq!(alex.date_of_birth, NaiveDate::from_ymd_opt(1985, 12, 31));
    assert_eq!(alex.gender, Some(Gender::Other));
    assert_eq!(alex.role, None);
    assert_eq!(alex.email, None);
    assert_eq!(alex.phone_number, None);
    assert_eq!(alex.active, Some(true));
}

#[test]
fn read_csv_errors_on_empty_input() {
    let err = read("").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Structural);
    assert!(err.to_string().contains("CSV file is empty"));
}

#[test]
fn read_csv_errors_on_short_header() {
    let err = read("name,dateOfBirth,gender\nJohn Doe,1990-01-01,MALE").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Structural);
    assert!(err.to_string().contains("invalid CSV header format"));
}

#[test]
fn read_csv_header_ignores_trailing_empty_fields() {
    let input = format!("{HEADER},,\n,,,,,,");
    let employees = read(&input).unwrap();
    assert_eq!(employees, vec![Employee::default()]);
}

#[test]
fn read_csv_drops_rows_with_wrong_field_count() {
    let input = format!("{HEADER}\nJohn Doe,1990-01-01,MALE,Engineer,john@example.com");
    let employees = read(&input).unwrap();
    assert!(employees.is_empty());

    let input = format!("{HEADER}\na,b,c,d,e,f,g,h\nAda,,,,,,true\n");
    let employees = read(&input).unwrap();
    assert_eq!(employees.len(), 1);
    assert_eq!(employees[0].name.as_deref(), Some("Ada"));
}

#[test]
fn read_csv_nulls_unparsable_values_but_keeps_the_row() {
    let input = format!(
        "{HEADER}\nJane Doe,invalid_date,invalid_gender,Manager,jane@x.com,123,false"
    );
    let employees = read(&input).unwrap();

    assert_eq!(employees.len(), 1);
    let jane = &employees[0];
    assert_eq!(jane.name.as_deref(), Some("Jane Doe"));
    assert_eq!(jane.date_of_birth, None);
    assert_eq!(jane.gender, None);
    assert_eq!(jane.role.as_deref(), Some("Manager"));
    assert_eq!(jane.active, Some(false));
}

#[test]
fn read_csv_rejects_numeric_booleans() {
    let input = format!("{HEADER}\nA,,,,,,1\nB,,,,,,yes\nC,,,,,,False");
    let active: Vec<_> = read(&input).unwrap().into_iter().map(|e| e.active).collect();
    assert_eq!(active, vec![None, None, Some(false)]);
}

#[test]
fn read_csv_skips_blank_lines() {
    let input = format!("{HEADER}\n\n   \nAda,,,,,,\n\n");
    let employees = read(&input).unwrap();
    assert_eq!(employees.len(), 1);
}

#[test]
fn read_csv_treats_quotes_as_plain_text() {
    let input = format!("{HEADER}\n\"Doe, John\",1990-01-01,MALE,Engineer,j@x.com,1,true\n\"Ada\",,,,,,");
    let employees = read(&input).unwrap();
    assert_eq!(employees.len(), 1);
    assert_eq!(employees[0].name.as_deref(), Some("\"Ada\""));
}

#[test]
fn read_csv_replaces_invalid_utf8_and_keeps_the_row() {
    let mut input = format!("{HEADER}\n").into_bytes();
    input.extend_from_slice(b"Jos\xe9 Garc\xeda,1990-01-01,MALE,Engineer,j@x.com,1,true\n");

    let employees = CsvEmployeeReader::new().read(&mut input.as_slice()).unwrap();
    assert_eq!(employees.len(), 1);
    assert_eq!(employees[0].name.as_deref(), Some("Jos\u{FFFD} Garc\u{FFFD}a"));
    assert_eq!(employees[0].gender, Some(Gender::Male));
    assert_eq!(employees[0].active, Some(true));
}

#[test]
fn read_csv_header_must_be_the_first_line() {
    let input = format!("\n{HEADER}\nJohn,1990-01-01,MALE,E,e,1,true\n");
    let err = read(&input).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Structural);
    assert!(err.to_string().contains("invalid CSV header format"), "{err}");

    let err = read("\n\n").unwrap_err();
    assert!(err.to_string().contains("invalid CSV header format"), "{err}");
}

#[test]
fn read_csv_from_buffered_reader_with_crlf() {
    let input = format!("{HEADER}\r\nAda,1815-12-10,female,Analyst,ada@x.com,555,TRUE\r\n");
    let ctx = ImportContext::new("inline.csv", FileFormat::Csv);

    let employees =
        read_employees_from_csv(BufReader::new(input.as_bytes()), &ctx, &NoopObserver).unwrap();
    assert_eq!(employees.len(), 1);
    assert_eq!(employees[0].gender, Some(Gender::Female));
    assert_eq!(employees[0].active, Some(true));
}
