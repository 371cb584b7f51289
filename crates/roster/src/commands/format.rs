use std::collections::HashSet;

use crate::codec::FileFormat;
use crate::error::Result;
use crate::model::Employee;
use crate::roster::{LoadReport, Roster};
use crate::store::StorageBackend;
use tracing::{debug, warn};

/// Reads the collection stored under `format`.
///
/// Codes must be unique within a roster, so a repeated code keeps its first
/// record and the rest are dropped and listed in [`LoadReport::duplicates`].
pub fn load<B: StorageBackend>(
    backend: &B,
    format: FileFormat,
) -> Result<(Vec<Employee>, LoadReport)> {
    let path = backend.location(format);
    let decoded = backend.load(format)?;

    let mut seen = HashSet::new();
    let mut employees = Vec::with_capacity(decoded.employees.len());
    let mut duplicates = Vec::new();
    for employee in decoded.employees {
        if seen.insert(employee.code()) {
            employees.push(employee);
        } else {
            warn!(path = %path.display(), code = %employee.code(), "dropping duplicate code");
            duplicates.push(employee.code());
        }
    }

    debug!(path = %path.display(), %format, count = employees.len(), "opened roster");
    let report = LoadReport {
        path,
        loaded: employees.len(),
        skipped: decoded.skipped,
        warnings: decoded.warnings,
        duplicates,
    };
    Ok((employees, report))
}

/// Makes `format` the active format and replaces the collection with that
/// format's data. Nothing is merged. If the read fails the roster keeps its
/// current format and records.
pub fn switch<B: StorageBackend>(roster: &mut Roster<B>, format: FileFormat) -> Result<&LoadReport> {
    let (employees, report) = load(&roster.backend, format)?;
    roster.format = format;
    roster.employees = employees;
    roster.last_load = report;
    Ok(&roster.last_load)
}
