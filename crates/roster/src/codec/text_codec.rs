//! Delimited text: a header line, then one comma-joined line per record.
//!
//! ```text
//! Code,Name,Category,Base Salary,Sales Revenue,Commission Rate,Responsibility Allowance,Income,Income Tax
//! HC0001,Nguyen Van A,Administrative,10000000.0,0.0,0.0,0.0,10000000.0,1000000.0
//! ```
//!
//! There is no quoting. Values containing a comma or a line break cannot be
//! written and fail with [`RosterError::Encode`]; use CSV for such data.

use std::path::Path;

use super::record::{Column, EmployeeRecord, RawRecord};
use super::{
    append_line, read_nonblank_bytes, write_atomic, Codec, Decoded, FileFormat, WriteData,
};
use crate::error::{Result, RosterError};
use crate::model::Employee;

const DELIMITER: char = ',';

pub struct TextCodec;

impl TextCodec {
    fn header() -> String {
        let mut line = Column::ALL
            .iter()
            .map(|c| c.header())
            .collect::<Vec<_>>()
            .join(",");
        line.push('\n');
        line
    }

    fn encode(employee: &Employee) -> Result<String> {
        let values = EmployeeRecord::from(employee).values();
        if let Some(bad) = values
            .iter()
            .find(|v| v.contains(|c: char| c == DELIMITER || c == '\n' || c == '\r'))
        {
            return Err(RosterError::Encode {
                code: employee.code().to_string(),
                message: format!("{:?} contains a comma or line break", bad),
            });
        }
        let mut line = values.join(",");
        line.push('\n');
        Ok(line)
    }

    /// A first line whose first field names the code column is a header.
    fn is_header(fields: &[&str]) -> bool {
        fields
            .first()
            .and_then(|field| Column::from_name(field))
            .is_some_and(|column| column == Column::Code)
    }
}

impl Codec for TextCodec {
    fn format(&self) -> FileFormat {
        FileFormat::Text
    }

    fn read(&self, path: &Path) -> Result<Decoded> {
        let mut decoded = Decoded::default();
        let Some(content) = read_nonblank_bytes(path)? else {
            return Ok(decoded);
        };

        let mut seen_first = false;
        for (idx, raw) in content.split(|&b| b == b'\n').enumerate() {
            let location = format!("line {}", idx + 1);
            let line = match std::str::from_utf8(raw) {
                Ok(line) => line.trim(),
                Err(_) => {
                    seen_first = true;
                    decoded.skip(path, location, "not valid UTF-8");
                    continue;
                }
            };
            if line.is_empty() {
                continue;
            }

            let fields: Vec<&str> = line.split(DELIMITER).map(str::trim).collect();
            if !seen_first {
                seen_first = true;
                if Self::is_header(&fields) {
                    continue;
                }
            }

            if fields.len() != Column::ALL.len() {
                decoded.skip(
                    path,
                    location,
                    format!(
                        "expected {} fields, found {}",
                        Column::ALL.len(),
                        fields.len()
                    ),
                );
                continue;
            }

            let mut record = RawRecord::default();
            for (column, value) in Column::ALL.into_iter().zip(fields) {
                record.set(column, value);
            }
            decoded.accept(path, location, &record);
        }

        Ok(decoded)
    }

    fn write(&self, path: &Path, data: WriteData<'_>) -> Result<()> {
        match data {
            WriteData::All(employees) => {
                let mut content = Self::header();
                for employee in employees {
                    content.push_str(&Self::encode(employee)?);
                }
                write_atomic(path, content.as_bytes())
            }
            WriteData::Append(employee) => {
                let line = Self::encode(employee)?;
                append_line(path, Self::header().as_bytes(), line.as_bytes())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, EmployeeCode};
    use std::fs;
    use tempfile::tempdir;

    fn employee(code: &str, name: &str) -> Employee {
        let code = EmployeeCode::parse(code).unwrap();
        let mut e = Employee::empty(code.category(), code);
        e.set_name(name);
        e.set_base_salary(12_000_000.0);
        e
    }

    #[test]
    fn writes_header_and_uniform_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("employees.txt");
        let mut head = employee("TP0001", "Tran Van C");
        head.set_responsibility_allowance(3_000_000.0);

        TextCodec
            .write(&path, WriteData::All(&[employee("HC0001", "An"), head]))
            .unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Code,Name,Category,Base Salary"));
        assert_eq!(
            lines[1],
            "HC0001,An,Administrative,12000000.0,0.0,0.0,0.0,12000000.0,1200000.0"
        );
        assert!(lines[2].starts_with("TP0001,Tran Van C,Department Head,12000000.0,0.0,0.0,3000000.0"));
    }

    #[test]
    fn skips_malformed_lines_and_keeps_the_rest() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("employees.txt");
        fs::write(
            &path,
            "Code,Name,Category,Base Salary,Sales Revenue,Commission Rate,Responsibility Allowance,Income,Income Tax\n\
             HC0001,An,Administrative,1.0,0.0,0.0,0.0,1.0,0.0\n\
             HC0002,Broken,Administrative,1.0\n\
             \n\
             TT0001,Binh,Marketing,1.0,100.0,0.1,0.0,11.0,0.0\n",
        )
        .unwrap();

        let decoded = TextCodec.read(&path).unwrap();
        assert_eq!(decoded.employees.len(), 2);
        assert_eq!(decoded.skipped.len(), 1);
        assert_eq!(decoded.skipped[0].location, "line 3");
        assert!(decoded.skipped[0].reason.contains("expected 9 fields"));
    }

    #[test]
    fn skips_lines_that_are_not_utf8() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("employees.txt");
        let mut bytes = b"HC0001,An,Administrative,1.0,0.0,0.0,0.0,1.0,0.0\r\n".to_vec();
        bytes.extend_from_slice(b"HC0002,Nguy\xEAn,Administrative,1.0,0.0,0.0,0.0,1.0,0.0\r\n");
        bytes.extend_from_slice(b"HC0003,Binh,Administrative,2.0,0.0,0.0,0.0,2.0,0.0\r\n");
        fs::write(&path, bytes).unwrap();

        let decoded = TextCodec.read(&path).unwrap();
        let names: Vec<&str> = decoded.employees.iter().map(|e| e.name()).collect();
        assert_eq!(names, ["An", "Binh"]);
        assert_eq!(decoded.skipped.len(), 1);
        assert_eq!(decoded.skipped[0].location, "line 2");
        assert_eq!(decoded.skipped[0].reason, "not valid UTF-8");
    }

    #[test]
    fn reads_files_without_header() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("employees.txt");
        fs::write(&path, "HC0001,An,Administrative,1.0,0.0,0.0,0.0,1.0,0.0\n").unwrap();

        let decoded = TextCodec.read(&path).unwrap();
        assert_eq!(decoded.employees.len(), 1);
        assert_eq!(decoded.employees[0].category(), Category::Administrative);
    }

    #[test]
    fn append_creates_file_with_header() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("employees.txt");

        TextCodec
            .write(&path, WriteData::Append(&employee("HC0001", "An")))
            .unwrap();
        TextCodec
            .write(&path, WriteData::Append(&employee("HC0002", "Binh")))
            .unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 3);
        assert_eq!(content.matches("Code,Name").count(), 1);
        assert_eq!(TextCodec.read(&path).unwrap().employees.len(), 2);
    }

    #[test]
    fn refuses_values_with_delimiters() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("employees.txt");

        let err = TextCodec
            .write(&path, WriteData::All(&[employee("HC0001", "Nguyen, An")]))
            .unwrap_err();
        assert!(matches!(err, RosterError::Encode { .. }));
        assert!(!path.exists());
    }
}
