use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::{Local, NaiveDate, TimeZone};
use thiserror::Error;

use crate::{model::person::Person, persistence::storage::io_to_generic_error};

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("There is nothing to export")]
    NothingToExport,

    #[error("Unable to write export to {0}: {1}")]
    UnableToWrite(PathBuf, anyhow::Error),
}

const HEADER: [&str; 5] = ["Name", "Email", "Phone", "Role", "Registration Date"];

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// CSV for people in the order given, registration dates rendered in `tz` as dd/mm/yyyy
pub fn to_csv_in<Tz: TimeZone>(people: &[Person], tz: &Tz) -> Result<String, ExportError> {
    if people.is_empty() {
        return Err(ExportError::NothingToExport);
    }

    let mut lines = Vec::with_capacity(people.len() + 1);
    lines.push(HEADER.iter().map(|field| quote(field)).collect::<Vec<_>>().join(","));

    for person in people {
        let date = person
            .registered_at
            .with_timezone(tz)
            .date_naive()
            .format("%d/%m/%Y")
            .to_string();

        let row = [
            person.name.as_str(),
            person.email.as_str(),
            person.phone.as_str(),
            person.role.as_str(),
            date.as_str(),
        ];

        lines.push(row.iter().map(|field| quote(field)).collect::<Vec<_>>().join(","));
    }

    Ok(lines.join("\n"))
}

pub fn to_csv(people: &[Person]) -> Result<String, ExportError> {
    to_csv_in(people, &Local)
}

pub fn default_file_name(date: NaiveDate) -> String {
    format!("directory_{}.csv", date.format("%Y-%m-%d"))
}

/// Writes the export to `path` and returns the number of rows, header excluded
#[tracing::instrument(skip(people))]
pub fn write_csv(people: &[Person], path: &Path) -> Result<usize, ExportError> {
    let csv = to_csv(people)?;

    fs::write(path, csv)
        .map_err(|e| ExportError::UnableToWrite(path.to_path_buf(), io_to_generic_error(e)))?;

    log::info!("📄 Exported {} people to {}", people.len(), path.display());

    Ok(people.len())
}

#[cfg(test)]
mod tests {
    use chrono::{Utc, TimeZone as _};

    use super::*;
    use crate::{
        consts::consts::PersonId,
        view::controller::ListViewController,
    };

    fn person(id: u64, name: &str, role: &str) -> Person {
        let mut person = Person::new_test();
        person.id = PersonId(id);
        person.name = name.to_string();
        person.email = format!("person{}@example.com", id);
        person.role = role.to_string();
        person.registered_at = Utc.with_ymd_and_hms(2024, 1, 5, 12, 0, 0).unwrap();
        person
    }

    #[test]
    fn renders_header_quoted_fields_and_dates() {
        let csv = to_csv_in(&[person(1, "Ana Silva", "Developer")], &Utc).unwrap();

        assert_eq!(
            csv,
            "\"Name\",\"Email\",\"Phone\",\"Role\",\"Registration Date\"\n\
             \"Ana Silva\",\"person1@example.com\",\"(11) 99999-9999\",\"Developer\",\"05/01/2024\""
        );
    }

    #[test]
    fn embedded_quotes_are_doubled() {
        let csv = to_csv_in(&[person(1, "Ana", "Lead \"Ops\", Infra")], &Utc).unwrap();

        assert!(csv.ends_with("\"Lead \"\"Ops\"\", Infra\",\"05/01/2024\""));
    }

    #[test]
    fn empty_export_fails() {
        assert!(matches!(to_csv(&[]), Err(ExportError::NothingToExport)));
    }

    #[test]
    fn row_count_matches_filtered_projection() {
        // Given a filtered view
        let mut controller = ListViewController::new_test();
        controller.load(vec![
            person(1, "Ana", "Developer"),
            person(2, "Bruno", "Designer"),
            person(3, "Carla", "Developer"),
        ]);
        controller.set_role_filter(Some("Developer".to_string()));

        // When exporting it
        let csv = to_csv_in(controller.filtered(), &Utc).unwrap();

        // Then there is one row per filtered person, in projection order
        let rows: Vec<&str> = csv.lines().skip(1).collect();
        assert_eq!(rows.len(), controller.filtered().len());
        assert!(rows[0].starts_with("\"Ana\""));
    }

    #[test]
    fn writes_file() {
        let path = std::env::temp_dir().join(format!("{}.csv", uuid::Uuid::new_v4()));

        let rows = write_csv(&[person(1, "Ana", "Developer")], &path).unwrap();

        assert_eq!(rows, 1);
        assert!(fs::read_to_string(&path).unwrap().starts_with("\"Name\","));

        fs::remove_file(path).unwrap();
    }

    #[test]
    fn file_name_carries_the_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();

        assert_eq!(default_file_name(date), "directory_2024-03-09.csv");
    }
}
