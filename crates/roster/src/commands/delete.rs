use crate::commands::find;
use crate::error::Result;
use crate::model::{Employee, EmployeeCode};
use crate::roster::Roster;
use crate::store::StorageBackend;
use tracing::debug;

/// Removes the record with `code` and rewrites the data file.
///
/// Fails with `InvalidCode` or `NotFound` like [`find::run`]. Callers that
/// confirm with the user look the record up first and call this afterwards.
pub fn run<B: StorageBackend>(roster: &mut Roster<B>, code: &str) -> Result<Employee> {
    let idx = find::position(&roster.employees, code)?;
    remove_at(roster, idx)
}

/// Like [`run`], but an absent code is `Ok(None)` and nothing is written.
pub fn remove<B: StorageBackend>(roster: &mut Roster<B>, code: &str) -> Result<Option<Employee>> {
    let code = EmployeeCode::parse(code)?;
    match find::index_of(&roster.employees, code) {
        Some(idx) => remove_at(roster, idx).map(Some),
        None => Ok(None),
    }
}

fn remove_at<B: StorageBackend>(roster: &mut Roster<B>, idx: usize) -> Result<Employee> {
    let removed = roster.employees.remove(idx);
    if let Err(err) = roster.persist_all() {
        roster.employees.insert(idx, removed);
        return Err(err);
    }
    debug!(code = %removed.code(), "deleted employee");
    Ok(removed)
}
