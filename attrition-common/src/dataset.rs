//! CSV employee dataset loading
//!
//! Columns are matched by header name. Unknown columns are ignored, empty
//! cells become absent attributes. When the file has no `id` column, ids are
//! assigned in file order starting at 1.
//!
//! Exported files carry an `id` column followed by every attribute in
//! classifier column order, so they load back with the same ids.

use std::io;
use std::path::Path;

use tracing::debug;

use crate::features::{FeatureValue, FEATURE_COLUMNS};
use crate::models::{Employee, EmployeeProfile};
use crate::{Error, Result};

/// Parse employees from any CSV source with a header row
pub fn read_employees<R: io::Read>(source: R) -> Result<Vec<Employee>> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(source);

    let headers = reader.headers()?.clone();
    let id_index = headers.iter().position(|h| h == "id");

    let mut employees = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        let profile: EmployeeProfile = record.deserialize(Some(&headers))?;

        let id = match id_index.and_then(|i| record.get(i)) {
            Some(raw) if !raw.is_empty() => raw.parse::<i64>().map_err(|_| {
                Error::Config(format!("Invalid id '{}' on data row {}", raw, row + 1))
            })?,
            _ => row as i64 + 1,
        };

        employees.push(Employee { id, profile });
    }

    debug!(
        rows = employees.len(),
        explicit_ids = id_index.is_some(),
        "Parsed employee CSV"
    );
    Ok(employees)
}

/// Load employees from a CSV file
pub fn load_employees_csv(path: &Path) -> Result<Vec<Employee>> {
    let file = std::fs::File::open(path)?;
    read_employees(io::BufReader::new(file))
}

/// Write employees as CSV; absent attributes become empty cells
pub fn write_employees<W: io::Write>(sink: W, employees: &[&Employee]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(sink);

    writer.write_record(std::iter::once("id").chain(FEATURE_COLUMNS.iter().copied()))?;

    for employee in employees {
        let attributes = employee.profile.to_feature_map();
        let mut record = Vec::with_capacity(FEATURE_COLUMNS.len() + 1);
        record.push(employee.id.to_string());
        record.extend(FEATURE_COLUMNS.iter().map(|column| {
            attributes
                .get(*column)
                .map(FeatureValue::to_string)
                .unwrap_or_default()
        }));
        writer.write_record(&record)?;
    }

    writer.flush()?;
    debug!(rows = employees.len(), "Wrote employee CSV");
    Ok(())
}

/// Export employees to a CSV file, replacing it if present
pub fn save_employees_csv(path: &Path, employees: &[&Employee]) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_employees(io::BufWriter::new(file), employees)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assigns_sequential_ids() {
        let csv = "age,genre,satisfaction_moyenne,departement\n\
                   35,F,3.25,Consulting\n\
                   28,M,,Commercial\n";

        let employees = read_employees(csv.as_bytes()).unwrap();
        assert_eq!(employees.len(), 2);
        assert_eq!(employees[0].id, 1);
        assert_eq!(employees[1].id, 2);
        assert_eq!(employees[0].profile.satisfaction_moyenne, Some(3.25));
        assert_eq!(employees[1].profile.satisfaction_moyenne, None);
        assert_eq!(employees[1].profile.departement.as_deref(), Some("Commercial"));
    }

    #[test]
    fn test_keeps_explicit_ids_and_ignores_unknown_columns() {
        let csv = "id,age,eval_number\n10,40,E_1\n20,31,E_2\n";

        let employees = read_employees(csv.as_bytes()).unwrap();
        let ids: Vec<i64> = employees.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![10, 20]);
        assert_eq!(employees[1].profile.age, Some(31));
    }

    #[test]
    fn test_rejects_bad_numbers() {
        let csv = "age\ntrente\n";
        assert!(matches!(read_employees(csv.as_bytes()), Err(Error::Csv(_))));
    }

    #[test]
    fn test_rejects_bad_id() {
        let csv = "id,age\nabc,30\n";
        assert!(matches!(read_employees(csv.as_bytes()), Err(Error::Config(_))));
    }

    #[test]
    fn test_export_reloads_with_same_ids() {
        let employees = vec![
            Employee {
                id: 12,
                profile: EmployeeProfile {
                    age: Some(41),
                    departement: Some("Consulting".to_string()),
                    poste: Some("Manager, Senior".to_string()),
                    satisfaction_moyenne: Some(2.75),
                    ..Default::default()
                },
            },
            Employee {
                id: 30,
                profile: EmployeeProfile::default(),
            },
        ];
        let selection: Vec<&Employee> = employees.iter().collect();

        let mut buffer = Vec::new();
        write_employees(&mut buffer, &selection).unwrap();

        let text = String::from_utf8(buffer.clone()).unwrap();
        let mut lines = text.lines();
        assert!(lines.next().unwrap().starts_with("id,genre,statut_marital,"));
        assert!(text.contains("\"Manager, Senior\""));

        let reloaded = read_employees(buffer.as_slice()).unwrap();
        assert_eq!(reloaded, employees);
    }

    #[test]
    fn test_export_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("employees_filtered.csv");
        let employee = Employee {
            id: 1,
            profile: EmployeeProfile {
                age: Some(30),
                ..Default::default()
            },
        };

        save_employees_csv(&path, &[&employee]).unwrap();

        assert_eq!(load_employees_csv(&path).unwrap(), vec![employee]);
    }
}
