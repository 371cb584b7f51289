use super::backend::StorageBackend;
use crate::codec::{Decoded, FileFormat, WriteData};
use crate::error::{Result, RosterError};
use crate::model::Employee;
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since the roster is single-threaded.
/// Each format gets its own collection, so format switches can be exercised
/// without touching the filesystem.
#[derive(Default)]
pub struct MemBackend {
    data: RefCell<HashMap<FileFormat, Vec<Employee>>>,
    simulate_write_error: RefCell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the collection stored under `format`.
    pub fn with_employees(self, format: FileFormat, employees: Vec<Employee>) -> Self {
        self.data.borrow_mut().insert(format, employees);
        self
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// What is currently persisted under `format`.
    pub fn stored(&self, format: FileFormat) -> Vec<Employee> {
        self.data
            .borrow()
            .get(&format)
            .cloned()
            .unwrap_or_default()
    }
}

impl StorageBackend for MemBackend {
    fn load(&self, format: FileFormat) -> Result<Decoded> {
        Ok(Decoded {
            employees: self.stored(format),
            ..Decoded::default()
        })
    }

    fn save(&self, format: FileFormat, data: WriteData<'_>) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(RosterError::Store("Simulated write error".to_string()));
        }
        let mut stored = self.data.borrow_mut();
        let entry = stored.entry(format).or_default();
        match data {
            WriteData::All(employees) => *entry = employees.to_vec(),
            WriteData::Append(employee) => entry.push(employee.clone()),
        }
        Ok(())
    }

    fn location(&self, format: FileFormat) -> PathBuf {
        PathBuf::from(format!("memory://employees{}", format.extension()))
    }
}
