//! # Roster Facade
//!
//! [`Roster`] is the single entry point for every roster operation. It owns
//! the in-memory collection and the active [`FileFormat`], and dispatches to
//! the command functions in [`crate::commands`].
//!
//! ## Generic Over StorageBackend
//!
//! `Roster<B: StorageBackend>` is generic over where the data lives:
//! - Production: `Roster<FsBackend>`, usually built with [`Roster::from_config`]
//! - Testing: `Roster<MemBackend>`
//!
//! ## What the Facade Does NOT Do
//!
//! - **Business logic**: That belongs in `commands/*.rs`
//! - **Presentation**: Returns records and reports, not strings
//!
//! Facade tests only check dispatch; behavior is tested in the command modules.

use std::path::PathBuf;

use crate::codec::{FileFormat, SkippedRecord, WriteData};
use crate::commands::{self, check::CheckReport, EmployeeFields};
use crate::config::RosterConfig;
use crate::error::Result;
use crate::model::{Category, Employee, EmployeeCode, FieldWarning};
use crate::store::{FsBackend, StorageBackend};

/// What the last read found.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub path: PathBuf,
    /// Records now in the roster.
    pub loaded: usize,
    pub skipped: Vec<SkippedRecord>,
    pub warnings: Vec<FieldWarning>,
    /// Codes seen again after their first record; the later records were dropped.
    pub duplicates: Vec<EmployeeCode>,
}

impl LoadReport {
    /// True when every record in the file made it into the roster unchanged.
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty() && self.warnings.is_empty() && self.duplicates.is_empty()
    }
}

pub struct Roster<B: StorageBackend> {
    pub(crate) backend: B,
    pub(crate) format: FileFormat,
    pub(crate) employees: Vec<Employee>,
    pub(crate) last_load: LoadReport,
}

impl Roster<FsBackend> {
    /// Opens the roster described by a loaded configuration.
    pub fn from_config(config: &RosterConfig) -> Result<Self> {
        let backend = FsBackend::new(config.data_dir.clone())
            .with_file_stem(&config.file_stem)
            .with_csv_bom(config.csv_bom);
        Self::open(backend, config.format()?)
    }
}

impl<B: StorageBackend> Roster<B> {
    /// Reads the collection stored in `format`. A missing file is an empty roster.
    pub fn open(backend: B, format: FileFormat) -> Result<Self> {
        let (employees, last_load) = commands::format::load(&backend, format)?;
        Ok(Self {
            backend,
            format,
            employees,
            last_load,
        })
    }

    /// Re-reads the active format's file, discarding in-memory order.
    pub fn reload(&mut self) -> Result<&LoadReport> {
        let format = self.format;
        commands::format::switch(self, format)
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn len(&self) -> usize {
        self.employees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    pub fn format(&self) -> FileFormat {
        self.format
    }

    /// The file (or virtual location) of the active format.
    pub fn data_path(&self) -> PathBuf {
        self.backend.location(self.format)
    }

    pub fn last_load(&self) -> &LoadReport {
        &self.last_load
    }

    pub(crate) fn persist_all(&self) -> Result<()> {
        self.backend
            .save(self.format, WriteData::All(&self.employees))
    }

    pub(crate) fn persist_append(&self, employee: &Employee) -> Result<()> {
        self.backend.save(self.format, WriteData::Append(employee))
    }

    // --- Mutations ---

    pub fn add(&mut self, category: Category, fields: &EmployeeFields) -> Result<Employee> {
        commands::add::run(self, category, fields)
    }

    pub fn delete(&mut self, code: &str) -> Result<Employee> {
        commands::delete::run(self, code)
    }

    pub fn remove(&mut self, code: &str) -> Result<Option<Employee>> {
        commands::delete::remove(self, code)
    }

    pub fn update(&mut self, code: &str, fields: &EmployeeFields) -> Result<Employee> {
        commands::update::run(self, code, fields)
    }

    pub fn set_file_format(&mut self, format: FileFormat) -> Result<&LoadReport> {
        commands::format::switch(self, format)
    }

    // --- Queries ---

    pub fn find_by_code(&self, code: &str) -> Result<&Employee> {
        commands::find::run(&self.employees, code)
    }

    pub fn find_by_salary_range(&self, min: f64, max: f64) -> Result<Vec<&Employee>> {
        commands::query::salary_range(&self.employees, min, max)
    }

    pub fn top_by_income(&self, n: usize) -> Vec<Employee> {
        commands::sort::top_by_income(&self.employees, n)
    }

    pub fn check(&self) -> CheckReport {
        commands::check::run(&self.employees)
    }

    // --- Ordering (in memory only) ---

    pub fn sort_by_name(&mut self) {
        commands::sort::by_name(&mut self.employees);
    }

    pub fn sort_by_income_descending(&mut self) {
        commands::sort::by_income_descending(&mut self.employees);
    }
}
