//! # Command Layer
//!
//! This module contains the **core business logic** of the roster. Each
//! operation lives in its own submodule as plain functions over the
//! in-memory collection; [`crate::roster::Roster`] is the thin facade that
//! callers use.
//!
//! ## Role and Responsibilities
//!
//! Commands are where the real work happens:
//! - Validate caller input before anything changes
//! - Mutate the collection, then persist through the backend
//! - Roll the collection back when persistence fails
//! - Return typed values (records, reports), never strings for display
//!
//! ## What Commands Do NOT Do
//!
//! - **Any terminal I/O**: No stdout, stderr or prompts
//! - **Confirmation**: A caller that wants "are you sure?" previews the record
//!   with [`find::run`] and decides before calling [`delete::run`]
//! - **Encoding**: Formats are the codec layer's job
//!
//! ## Testing Strategy
//!
//! **This is where the lion's share of testing lives.** Command tests run
//! against [`MemBackend`](crate::store::MemBackend), including its simulated
//! write failure for the rollback paths.
//!
//! ## Command Modules
//!
//! - [`add`]: Create employees with generated codes
//! - [`find`]: Look up by code
//! - [`delete`]: Remove by code
//! - [`update`]: Change supplied fields of an existing record
//! - [`query`]: Salary range search
//! - [`sort`]: In-memory ordering and top-N by income
//! - [`format`]: Load and switch the active file format
//! - [`check`]: Report inconsistent records

use crate::error::{Result, RosterError};
use crate::model::{is_valid_amount, Category, Employee, FieldWarning};

pub mod add;
pub mod check;
pub mod delete;
pub mod find;
pub mod format;
pub mod query;
pub mod sort;
pub mod update;

/// Field values supplied by a caller for `add` or `update`.
///
/// `None` means "not supplied": `add` falls back to `0.0` for amounts,
/// `update` keeps the current value. A blank name counts as not supplied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmployeeFields {
    pub name: Option<String>,
    pub base_salary: Option<f64>,
    pub sales_revenue: Option<f64>,
    pub commission_rate: Option<f64>,
    pub responsibility_allowance: Option<f64>,
}

impl EmployeeFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_base_salary(mut self, value: f64) -> Self {
        self.base_salary = Some(value);
        self
    }

    pub fn with_sales_revenue(mut self, value: f64) -> Self {
        self.sales_revenue = Some(value);
        self
    }

    pub fn with_commission_rate(mut self, value: f64) -> Self {
        self.commission_rate = Some(value);
        self
    }

    pub fn with_responsibility_allowance(mut self, value: f64) -> Self {
        self.responsibility_allowance = Some(value);
        self
    }

    /// The trimmed name, if one was given and it is not blank.
    pub(crate) fn supplied_name(&self) -> Option<&str> {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    fn amounts(&self) -> [(&'static str, Option<f64>); 4] {
        [
            ("base_salary", self.base_salary),
            ("sales_revenue", self.sales_revenue),
            ("commission_rate", self.commission_rate),
            ("responsibility_allowance", self.responsibility_allowance),
        ]
    }

    /// Rejects invalid amounts and fields the category does not have.
    pub(crate) fn validate_for(&self, category: Category) -> Result<()> {
        for (field, value) in self.amounts() {
            let Some(value) = value else { continue };
            if !is_valid_amount(value) {
                return Err(RosterError::Validation(format!(
                    "{} must be a finite, non-negative number, got {}",
                    field, value
                )));
            }
            let applies = match field {
                "sales_revenue" | "commission_rate" => category == Category::Marketing,
                "responsibility_allowance" => category == Category::DepartmentHead,
                _ => true,
            };
            if !applies {
                return Err(RosterError::Validation(format!(
                    "{} does not apply to {} employees",
                    field, category
                )));
            }
        }
        Ok(())
    }

    /// Writes every supplied field into `employee`.
    pub(crate) fn apply(&self, employee: &mut Employee) -> Vec<FieldWarning> {
        let mut warnings = Vec::new();
        if let Some(name) = self.supplied_name() {
            warnings.extend(employee.set_name(name));
        }
        if let Some(value) = self.base_salary {
            warnings.extend(employee.set_base_salary(value));
        }
        if let Some(value) = self.sales_revenue {
            warnings.extend(employee.set_sales_revenue(value));
        }
        if let Some(value) = self.commission_rate {
            warnings.extend(employee.set_commission_rate(value));
        }
        if let Some(value) = self.responsibility_allowance {
            warnings.extend(employee.set_responsibility_allowance(value));
        }
        warnings
    }
}
