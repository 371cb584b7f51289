use crate::error::{Result, RosterError};
use crate::model::{Employee, EmployeeCode};

/// Looks up a record by its code.
///
/// The code is checked syntactically first, so a malformed code is always
/// [`RosterError::InvalidCode`] and never [`RosterError::NotFound`].
pub fn run<'a>(employees: &'a [Employee], code: &str) -> Result<&'a Employee> {
    position(employees, code).map(|idx| &employees[idx])
}

pub(crate) fn position(employees: &[Employee], code: &str) -> Result<usize> {
    let code = EmployeeCode::parse(code)?;
    index_of(employees, code).ok_or_else(|| RosterError::NotFound(code.to_string()))
}

pub(crate) fn index_of(employees: &[Employee], code: EmployeeCode) -> Option<usize> {
    employees.iter().position(|e| e.code() == code)
}
