//! Plain-text rendering of records for the terminal.

use hms_core::{Department, DoctorRecord, DOCTOR_TITLES};

pub const NO_DATA_MESSAGE: &str = "No data to show";

/// One record as `Title : value` lines.
pub fn render_record(record: &DoctorRecord) -> String {
    let width = DOCTOR_TITLES
        .iter()
        .map(|title| title.chars().count())
        .max()
        .unwrap_or(0);

    DOCTOR_TITLES
        .iter()
        .zip(record.display_row())
        .map(|(title, value)| format!("{title:<width$} : {value}").trim_end().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// All records as a column-aligned table, or [`NO_DATA_MESSAGE`].
pub fn render_table(records: &[DoctorRecord]) -> String {
    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|record| record.display_row().to_vec())
        .collect();
    render_grid(&DOCTOR_TITLES, &rows)
}

pub fn render_departments(departments: &[Department]) -> String {
    let rows: Vec<Vec<String>> = departments
        .iter()
        .map(|department| vec![department.id.clone(), department.name.clone()])
        .collect();
    render_grid(&["Department ID", "Department name"], &rows)
}

fn render_grid(titles: &[&str], rows: &[Vec<String>]) -> String {
    if rows.is_empty() {
        return NO_DATA_MESSAGE.to_string();
    }

    let mut widths: Vec<usize> = titles.iter().map(|title| title.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let header: Vec<String> = titles.iter().map(|title| title.to_string()).collect();
    let separator: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
    std::iter::once(&header)
        .chain(std::iter::once(&separator))
        .chain(rows)
        .map(|cells| format_line(cells, &widths))
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_line(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join(" | ")
        .trim_end()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::{render_departments, render_record, render_table, NO_DATA_MESSAGE};
    use chrono::NaiveDate;
    use hms_core::{Department, DoctorId, DoctorRecord, Gender};

    fn record() -> DoctorRecord {
        DoctorRecord {
            id: DoctorId::new("DR-0930-150624"),
            name: "Asha Rao".to_string(),
            age: 44,
            gender: Gender::Female,
            date_of_birth: NaiveDate::from_ymd_opt(1980, 6, 15).unwrap(),
            blood_group: "O+".to_string(),
            department_id: "DEP-CARD".to_string(),
            department_name: "Cardiology".to_string(),
            contact_number_1: "9876543210".to_string(),
            contact_number_2: None,
            aadhar_or_voter_id: "1234-5678-9012".to_string(),
            email_id: "asha@example.org".to_string(),
            qualification: "MBBS".to_string(),
            specialisation: "Cardiology".to_string(),
            years_of_experience: 18,
            address: "12 Lake Road".to_string(),
            city: "Pune".to_string(),
            state: "Maharashtra".to_string(),
            pin_code: "411001".to_string(),
        }
    }

    #[test]
    fn empty_listing_shows_no_data_message() {
        assert_eq!(render_table(&[]), NO_DATA_MESSAGE);
        assert_eq!(render_departments(&[]), NO_DATA_MESSAGE);
    }

    #[test]
    fn record_lists_every_title_with_its_value() {
        let text = render_record(&record());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 19);
        assert!(lines[0].starts_with("Doctor ID"));
        assert!(lines[0].ends_with(": DR-0930-150624"));
        assert!(lines[4].ends_with(": 15-06-1980"));
        assert!(lines[9].ends_with(':'), "missing alternate contact renders empty");
    }

    #[test]
    fn table_has_header_separator_and_one_line_per_record() {
        let text = render_table(&[record(), record()]);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Doctor ID"));
        assert!(lines[1].starts_with("---"));
        assert!(lines[2].starts_with("DR-0930-150624"));
    }

    #[test]
    fn department_columns_are_aligned() {
        let text = render_departments(&[
            Department::new("DEP-CARD", "Cardiology"),
            Department::new("D1", "ENT"),
        ]);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[2], "DEP-CARD      | Cardiology");
        assert_eq!(lines[3], "D1            | ENT");
    }
}
