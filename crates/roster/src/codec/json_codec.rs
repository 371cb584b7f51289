//! JSON: a pretty-printed array of objects with the nine named members.
//!
//! ```json
//! [
//!   {
//!     "code": "HC0001",
//!     "name": "Nguyen Van A",
//!     "category": "Administrative",
//!     "base_salary": 10000000.0,
//!     ...
//!   }
//! ]
//! ```
//!
//! For compatibility with older exports, an object document is accepted too:
//! its first array-valued member (in document order) holds the records, and
//! appends go into that same array. Amounts may be numbers or numeric
//! strings; member names go through [`Column::from_name`].

use std::path::Path;

use serde_json::{Map, Value};

use super::record::{Column, EmployeeRecord, RawRecord};
use super::{read_nonblank, write_atomic, Codec, Decoded, FileFormat, WriteData};
use crate::error::{Result, RosterError};
use crate::model::Employee;

pub struct JsonCodec;

fn records(document: &Value) -> Option<&Vec<Value>> {
    match document {
        Value::Array(items) => Some(items),
        Value::Object(members) => members.values().find_map(Value::as_array),
        _ => None,
    }
}

fn records_mut(document: &mut Value) -> Option<&mut Vec<Value>> {
    match document {
        Value::Array(items) => Some(items),
        Value::Object(members) => members.values_mut().find_map(Value::as_array_mut),
        _ => None,
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn map_entry(members: &Map<String, Value>) -> RawRecord {
    let mut record = RawRecord::default();
    for (key, value) in members {
        if let (Some(column), Some(text)) = (Column::from_name(key), scalar_text(value)) {
            record.set(column, text);
        }
    }
    record
}

fn render(document: &impl serde::Serialize) -> Result<Vec<u8>> {
    let mut bytes = serde_json::to_vec_pretty(document)?;
    bytes.push(b'\n');
    Ok(bytes)
}

fn parse_document(path: &Path, content: &str) -> Result<Value> {
    serde_json::from_str(content).map_err(|err| RosterError::parse(path, err.to_string()))
}

impl Codec for JsonCodec {
    fn format(&self) -> FileFormat {
        FileFormat::Json
    }

    fn read(&self, path: &Path) -> Result<Decoded> {
        let mut decoded = Decoded::default();
        let Some(content) = read_nonblank(path)? else {
            return Ok(decoded);
        };

        let document = parse_document(path, &content)?;
        let entries = records(&document)
            .ok_or_else(|| RosterError::parse(path, "no array of employee records found"))?;

        for (idx, entry) in entries.iter().enumerate() {
            let location = format!("entry {}", idx + 1);
            match entry {
                Value::Object(members) => decoded.accept(path, location, &map_entry(members)),
                _ => decoded.skip(path, location, "entry is not an object"),
            }
        }

        Ok(decoded)
    }

    fn write(&self, path: &Path, data: WriteData<'_>) -> Result<()> {
        match data {
            WriteData::All(employees) => {
                let records: Vec<EmployeeRecord> =
                    employees.iter().map(EmployeeRecord::from).collect();
                write_atomic(path, &render(&records)?)
            }
            WriteData::Append(employee) => append(path, employee),
        }
    }
}

fn append(path: &Path, employee: &Employee) -> Result<()> {
    let record = EmployeeRecord::from(employee);
    let Some(content) = read_nonblank(path)? else {
        return write_atomic(path, &render(&[record])?);
    };

    let mut document = parse_document(path, &content)?;
    let entries = records_mut(&mut document)
        .ok_or_else(|| RosterError::parse(path, "no array of employee records found"))?;
    entries.push(serde_json::to_value(record)?);
    write_atomic(path, &render(&document)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, EmployeeCode};
    use std::fs;
    use tempfile::tempdir;

    fn head(code: &str, name: &str) -> Employee {
        let mut e = Employee::empty(
            Category::DepartmentHead,
            EmployeeCode::parse(code).unwrap(),
        );
        e.set_name(name);
        e.set_base_salary(50_000_000.0);
        e.set_responsibility_allowance(10_000_000.0);
        e
    }

    #[test]
    fn writes_every_field_as_a_named_member() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("employees.json");
        JsonCodec
            .write(&path, WriteData::All(&[head("TP0001", "Chi")]))
            .unwrap();

        let value: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        let entry = &value[0];
        let keys: Vec<&str> = entry
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(
            keys,
            Column::ALL.iter().map(|c| c.key()).collect::<Vec<_>>()
        );
        assert_eq!(entry["category"], "Department Head");
        assert_eq!(entry["sales_revenue"], 0.0);
        assert_eq!(entry["income"], 60_000_000.0);
    }

    #[test]
    fn accepts_wrapped_documents_and_string_amounts() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("employees.json");
        fs::write(
            &path,
            r#"{
                "version": 2,
                "employees": [
                    {"code": "HC0001", "name": "An", "category": "Administrative", "base_salary": "9000000"},
                    {"Ma_NV": "TT0001", "Ho_Ten": "Binh", "Chuc_Vu": "Tiếp Thị", "Luong": 1,
                     "Doanh_so": 10, "Hoa_hong": 0.5}
                ],
                "archived": []
            }"#,
        )
        .unwrap();

        let decoded = JsonCodec.read(&path).unwrap();
        assert_eq!(decoded.employees.len(), 2);
        assert_eq!(decoded.employees[0].base_salary(), 9_000_000.0);
        assert_eq!(decoded.employees[1].income(), 6.0);
    }

    #[test]
    fn skips_bad_entries() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("employees.json");
        fs::write(
            &path,
            r#"[
                {"code": "HC0001", "name": "An", "category": "Administrative", "base_salary": 1},
                "not an object",
                {"code": "HC0002", "name": "Bo", "category": "Janitor", "base_salary": 1},
                {"code": "HC0003", "name": "Cu", "category": "Administrative", "base_salary": 2}
            ]"#,
        )
        .unwrap();

        let decoded = JsonCodec.read(&path).unwrap();
        assert_eq!(decoded.employees.len(), 2);
        assert_eq!(decoded.skipped.len(), 2);
        assert_eq!(decoded.skipped[0].location, "entry 2");
        assert!(decoded.skipped[1].reason.contains("unknown category"));
    }

    #[test]
    fn malformed_document_is_a_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("employees.json");
        fs::write(&path, "[{\"code\": ").unwrap();

        assert!(matches!(
            JsonCodec.read(&path),
            Err(RosterError::Parse { .. })
        ));
    }

    #[test]
    fn append_pushes_into_existing_array() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("employees.json");

        JsonCodec
            .write(&path, WriteData::Append(&head("TP0001", "Chi")))
            .unwrap();
        JsonCodec
            .write(&path, WriteData::Append(&head("TP0002", "Dao")))
            .unwrap();

        let decoded = JsonCodec.read(&path).unwrap();
        let names: Vec<&str> = decoded.employees.iter().map(|e| e.name()).collect();
        assert_eq!(names, ["Chi", "Dao"]);
    }

    #[test]
    fn append_keeps_wrapper_object() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("employees.json");
        fs::write(&path, r#"{"meta": {"v": 1}, "staff": []}"#).unwrap();

        JsonCodec
            .write(&path, WriteData::Append(&head("TP0001", "Chi")))
            .unwrap();

        let value: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["meta"]["v"], 1);
        assert_eq!(value["staff"][0]["code"], "TP0001");
    }
}
