use crate::commands::EmployeeFields;
use crate::error::{Result, RosterError};
use crate::model::{Category, Employee, EmployeeCode};
use crate::roster::Roster;
use crate::store::StorageBackend;
use tracing::debug;

/// Creates an employee with the next free code for its category.
///
/// The record is appended to the data file; if that write fails the
/// collection is left as it was.
pub fn run<B: StorageBackend>(
    roster: &mut Roster<B>,
    category: Category,
    fields: &EmployeeFields,
) -> Result<Employee> {
    fields.validate_for(category)?;
    if fields.supplied_name().is_none() {
        return Err(RosterError::Validation("name is required".to_string()));
    }

    let code = next_code(&roster.employees, category)?;
    let mut employee = Employee::empty(category, code);
    fields.apply(&mut employee);

    roster.employees.push(employee.clone());
    if let Err(err) = roster.persist_append(&employee) {
        roster.employees.pop();
        return Err(err);
    }

    debug!(code = %employee.code(), "added employee");
    Ok(employee)
}

/// One past the highest sequence among codes with the category's prefix,
/// or `0001` when there are none.
pub fn next_code(employees: &[Employee], category: Category) -> Result<EmployeeCode> {
    let highest = employees
        .iter()
        .map(Employee::code)
        .filter(|code| code.category() == category)
        .map(|code| code.sequence())
        .max()
        .unwrap_or(0);
    EmployeeCode::new(category, highest + 1)
}
