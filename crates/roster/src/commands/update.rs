use crate::commands::{find, EmployeeFields};
use crate::error::Result;
use crate::model::Employee;
use crate::roster::Roster;
use crate::store::StorageBackend;
use tracing::debug;

/// Applies the supplied fields to the record with `code`.
///
/// Unsupplied fields, and a blank name, keep their current values. Amounts
/// are validated like [`super::add::run`] does before anything changes.
pub fn run<B: StorageBackend>(
    roster: &mut Roster<B>,
    code: &str,
    fields: &EmployeeFields,
) -> Result<Employee> {
    let idx = find::position(&roster.employees, code)?;
    fields.validate_for(roster.employees[idx].category())?;

    let previous = roster.employees[idx].clone();
    fields.apply(&mut roster.employees[idx]);

    if let Err(err) = roster.persist_all() {
        roster.employees[idx] = previous;
        return Err(err);
    }

    let updated = roster.employees[idx].clone();
    debug!(code = %updated.code(), "updated employee");
    Ok(updated)
}
