//! CSV and Excel export functionality.

use crate::entities::{employee, student};
use crate::error::Result;
use chrono::Local;
use rust_xlsxwriter::{Color, Format, FormatBorder, Workbook};
use std::path::{Path, PathBuf};

/// Fixed column header for student CSV exports.
pub const STUDENT_CSV_HEADERS: [&str; 4] = ["ID", "Student Name", "School Name", "Created At"];

/// Fixed column header for employee CSV exports.
pub const EMPLOYEE_CSV_HEADERS: [&str; 5] = ["ID", "Name", "Age", "Salary", "Created At"];

/// Export student records to a CSV file with the fixed header row.
pub fn export_students_to_csv(students: &[student::Model], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(STUDENT_CSV_HEADERS)?;

    for record in students {
        writer.write_record([
            record.id.to_string(),
            record.student_name.clone(),
            record.school_name.clone(),
            record.created_at.to_rfc3339(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Export employee records to a CSV file with the fixed header row.
pub fn export_employees_to_csv(employees: &[employee::Model], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(EMPLOYEE_CSV_HEADERS)?;

    for record in employees {
        writer.write_record([
            record.id.to_string(),
            record.name.clone(),
            record.age.to_string(),
            record.salary_display(),
            record.created_at.to_rfc3339(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Export employee records to an Excel file.
pub fn export_employees_to_excel(employees: &[employee::Model], path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    worksheet.set_name("Employees")?;

    // Header format
    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0x4472C4))
        .set_font_color(Color::White)
        .set_border(FormatBorder::Thin);

    // Number format for salary
    let salary_format = Format::new().set_num_format("#,##0.00");

    for (col, header) in EMPLOYEE_CSV_HEADERS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    // Column widths
    worksheet.set_column_width(0, 8)?; // ID
    worksheet.set_column_width(1, 30)?; // Name
    worksheet.set_column_width(2, 8)?; // Age
    worksheet.set_column_width(3, 14)?; // Salary
    worksheet.set_column_width(4, 26)?; // Created At

    // Data rows
    for (idx, emp) in employees.iter().enumerate() {
        let row = (idx + 1) as u32;

        worksheet.write_number(row, 0, emp.id as f64)?;
        worksheet.write_string(row, 1, &emp.name)?;
        worksheet.write_number(row, 2, emp.age as f64)?;
        worksheet.write_number_with_format(row, 3, emp.salary_cents as f64 / 100.0, &salary_format)?;
        worksheet.write_string(row, 4, emp.created_at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string())?;
    }

    // Autofilter
    if !employees.is_empty() {
        let last_row = employees.len() as u32;
        worksheet.autofilter(0, 0, last_row, 4)?;
    }

    // Freeze top row
    worksheet.set_freeze_panes(1, 0)?;

    workbook.save(path)?;
    Ok(())
}

/// Open save file dialog and return selected path.
pub fn show_save_dialog(default_name: &str, filter_name: &str, extensions: &[&str]) -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_file_name(default_name)
        .add_filter(filter_name, extensions)
        .save_file()
}

/// Generate default filename for export.
pub fn generate_export_filename(prefix: &str, ext: &str) -> String {
    let now = Local::now();
    format!("{prefix}_{ts}.{ext}", ts = now.format("%Y%m%d_%H%M%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_students() -> Vec<student::Model> {
        vec![
            student::Model {
                id: 1,
                student_name: "Dana".to_string(),
                school_name: "Northside High".to_string(),
                created_at: Utc::now(),
            },
            student::Model {
                id: 2,
                student_name: "Lee, Jr.".to_string(),
                school_name: "Southside \"Prep\"".to_string(),
                created_at: Utc::now(),
            },
        ]
    }

    #[test]
    fn test_student_csv_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("students.csv");

        export_students_to_csv(&sample_students(), &path).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers, csv::StringRecord::from(STUDENT_CSV_HEADERS.to_vec()));

        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        // Quoting of embedded commas/quotes survives the round trip.
        assert_eq!(&rows[1][1], "Lee, Jr.");
        assert_eq!(&rows[1][2], "Southside \"Prep\"");
    }

    #[test]
    fn test_employee_csv_salary_formatting() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("employees.csv");

        let employees = vec![employee::Model {
            id: 7,
            name: "Evan".to_string(),
            age: 41,
            salary_cents: 550_050,
            created_at: Utc::now(),
        }];

        export_employees_to_csv(&employees, &path).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let row = reader.records().next().unwrap().unwrap();
        assert_eq!(&row[3], "5500.50");
    }

    #[test]
    fn test_employee_excel_export_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("employees.xlsx");

        let employees = vec![employee::Model {
            id: 1,
            name: "Evan".to_string(),
            age: 41,
            salary_cents: 550_000,
            created_at: Utc::now(),
        }];

        export_employees_to_excel(&employees, &path).unwrap();
        assert!(path.metadata().unwrap().len() > 0);
    }

    #[test]
    fn test_generate_export_filename() {
        let name = generate_export_filename("students", "csv");
        assert!(name.starts_with("students_"));
        assert!(name.ends_with(".csv"));
    }
}
