//! # Domain Model: Employees, Categories and Codes
//!
//! This module defines the core data structures of the roster: [`Employee`],
//! its closed set of variants ([`EmployeeKind`] / [`Category`]) and the
//! [`EmployeeCode`] identifier.
//!
//! ## Categories
//!
//! | Category | Label | Prefix | Extra fields | Income |
//! |----------|-------|--------|--------------|--------|
//! | Administrative | `Administrative` | `HC` | — | `base_salary` |
//! | Marketing | `Marketing` | `TT` | `sales_revenue`, `commission_rate` | `base_salary + sales_revenue × commission_rate` |
//! | Department head | `Department Head` | `TP` | `responsibility_allowance` | `base_salary + responsibility_allowance` |
//!
//! The label is what the codecs persist; the prefix is what codes carry.
//! Records loaded from disk may disagree between the two, which is why the
//! code keeps its own [`Category`] and [`crate::commands::check`] reports
//! mismatches instead of the model refusing them.
//!
//! ## Income Tax
//!
//! A flat bracket applied to the whole income (not a marginal schedule):
//!
//! ```text
//! income <  9,000,000            -> 0
//! 9,000,000 <= income <= 15,000,000 -> income × 0.10
//! income > 15,000,000            -> income × 0.12
//! ```
//!
//! ## Setters Never Fail
//!
//! Every setter is total over its input. Bad input is replaced by a safe
//! default (or ignored, for names) and reported as a [`FieldWarning`], which
//! is returned to the caller and logged through `tracing`.
//!
//! ## Codes
//!
//! `<PREFIX><4 digits>`, e.g. `HC0001`. [`EmployeeCode::parse`] accepts raw
//! user text: it trims and upper-cases before checking the shape.

use std::fmt;
use std::str::FromStr;

use tracing::warn;

use crate::error::{Result, RosterError};

/// Incomes strictly below this pay no tax.
pub const TAX_FREE_LIMIT: f64 = 9_000_000.0;
/// Incomes up to and including this pay the middle rate.
pub const MIDDLE_BRACKET_LIMIT: f64 = 15_000_000.0;
pub const MIDDLE_RATE: f64 = 0.10;
pub const TOP_RATE: f64 = 0.12;

/// Highest sequence number a 4-digit code can carry.
pub const MAX_SEQUENCE: u16 = 9999;

/// Income tax for a given income.
pub fn tax_for_income(income: f64) -> f64 {
    if income < TAX_FREE_LIMIT {
        0.0
    } else if income <= MIDDLE_BRACKET_LIMIT {
        income * MIDDLE_RATE
    } else {
        income * TOP_RATE
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Administrative,
    Marketing,
    DepartmentHead,
}

impl Category {
    pub const ALL: [Category; 3] = [
        Category::Administrative,
        Category::Marketing,
        Category::DepartmentHead,
    ];

    /// The persisted category label.
    pub fn label(self) -> &'static str {
        match self {
            Category::Administrative => "Administrative",
            Category::Marketing => "Marketing",
            Category::DepartmentHead => "Department Head",
        }
    }

    pub fn prefix(self) -> &'static str {
        match self {
            Category::Administrative => "HC",
            Category::Marketing => "TT",
            Category::DepartmentHead => "TP",
        }
    }

    pub fn from_prefix(prefix: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.prefix() == prefix)
    }

    /// Resolves a persisted label.
    ///
    /// Case-insensitive. Besides the canonical labels this accepts the labels
    /// and class names written by older data files.
    pub fn from_label(label: &str) -> Option<Self> {
        let normalized = label.trim().to_lowercase();
        match normalized.as_str() {
            "administrative" | "hành chính" | "hanh chinh" | "hanhchinh" => {
                Some(Category::Administrative)
            }
            "marketing" | "tiếp thị" | "tiep thi" | "tiepthi" => Some(Category::Marketing),
            "department head" | "department_head" | "departmenthead" | "trưởng phòng"
            | "truong phong" | "truongphong" => Some(Category::DepartmentHead),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An employee identifier: category prefix plus a 4-digit sequence number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EmployeeCode {
    category: Category,
    sequence: u16,
}

impl EmployeeCode {
    pub fn new(category: Category, sequence: u16) -> Result<Self> {
        if sequence > MAX_SEQUENCE {
            return Err(RosterError::Validation(format!(
                "No {} codes left: sequence {} exceeds {}",
                category.prefix(),
                sequence,
                MAX_SEQUENCE
            )));
        }
        Ok(Self { category, sequence })
    }

    /// Parses raw code text: exactly 6 characters, a known prefix and 4 digits.
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        let invalid = || RosterError::InvalidCode(trimmed.to_string());

        let code = trimmed.to_ascii_uppercase();
        if !code.is_ascii() || code.len() != 6 {
            return Err(invalid());
        }

        let (prefix, digits) = code.split_at(2);
        let category = Category::from_prefix(prefix).ok_or_else(invalid)?;
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let sequence = digits.parse::<u16>().map_err(|_| invalid())?;

        Ok(Self { category, sequence })
    }

    /// The category implied by the prefix.
    pub fn category(&self) -> Category {
        self.category
    }

    pub fn sequence(&self) -> u16 {
        self.sequence
    }
}

impl fmt::Display for EmployeeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:04}", self.category.prefix(), self.sequence)
    }
}

impl FromStr for EmployeeCode {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Category-specific data. Matched exhaustively wherever behavior differs.
#[derive(Debug, Clone, PartialEq)]
pub enum EmployeeKind {
    Administrative,
    Marketing {
        sales_revenue: f64,
        commission_rate: f64,
    },
    DepartmentHead {
        responsibility_allowance: f64,
    },
}

impl EmployeeKind {
    pub fn empty(category: Category) -> Self {
        match category {
            Category::Administrative => EmployeeKind::Administrative,
            Category::Marketing => EmployeeKind::Marketing {
                sales_revenue: 0.0,
                commission_rate: 0.0,
            },
            Category::DepartmentHead => EmployeeKind::DepartmentHead {
                responsibility_allowance: 0.0,
            },
        }
    }

    pub fn category(&self) -> Category {
        match self {
            EmployeeKind::Administrative => Category::Administrative,
            EmployeeKind::Marketing { .. } => Category::Marketing,
            EmployeeKind::DepartmentHead { .. } => Category::DepartmentHead,
        }
    }
}

/// A rejected or coerced setter input.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldWarning {
    pub code: EmployeeCode,
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for FieldWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.code, self.field, self.message)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Employee {
    code: EmployeeCode,
    name: String,
    base_salary: f64,
    kind: EmployeeKind,
}

impl Employee {
    /// A blank employee of the given category: no name, every amount `0.0`.
    pub fn empty(category: Category, code: EmployeeCode) -> Self {
        Self {
            code,
            name: String::new(),
            base_salary: 0.0,
            kind: EmployeeKind::empty(category),
        }
    }

    pub fn code(&self) -> EmployeeCode {
        self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base_salary(&self) -> f64 {
        self.base_salary
    }

    pub fn kind(&self) -> &EmployeeKind {
        &self.kind
    }

    pub fn category(&self) -> Category {
        self.kind.category()
    }

    pub fn sales_revenue(&self) -> Option<f64> {
        match self.kind {
            EmployeeKind::Marketing { sales_revenue, .. } => Some(sales_revenue),
            _ => None,
        }
    }

    pub fn commission_rate(&self) -> Option<f64> {
        match self.kind {
            EmployeeKind::Marketing {
                commission_rate, ..
            } => Some(commission_rate),
            _ => None,
        }
    }

    pub fn responsibility_allowance(&self) -> Option<f64> {
        match self.kind {
            EmployeeKind::DepartmentHead {
                responsibility_allowance,
            } => Some(responsibility_allowance),
            _ => None,
        }
    }

    /// Income, recomputed on every call.
    pub fn income(&self) -> f64 {
        match self.kind {
            EmployeeKind::Administrative => self.base_salary,
            EmployeeKind::Marketing {
                sales_revenue,
                commission_rate,
            } => self.base_salary + sales_revenue * commission_rate,
            EmployeeKind::DepartmentHead {
                responsibility_allowance,
            } => self.base_salary + responsibility_allowance,
        }
    }

    pub fn income_tax(&self) -> f64 {
        tax_for_income(self.income())
    }

    /// Sets the name. Blank input keeps the current name.
    pub fn set_name(&mut self, name: &str) -> Option<FieldWarning> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Some(self.warning("name", "name must not be empty, keeping current value"));
        }
        self.name = trimmed.to_string();
        None
    }

    pub fn set_base_salary(&mut self, value: f64) -> Option<FieldWarning> {
        let (value, warning) = self.checked_amount("base_salary", value);
        self.base_salary = value;
        warning
    }

    pub fn set_sales_revenue(&mut self, value: f64) -> Option<FieldWarning> {
        if !matches!(self.kind, EmployeeKind::Marketing { .. }) {
            return Some(self.not_applicable("sales_revenue"));
        }
        let (value, warning) = self.checked_amount("sales_revenue", value);
        if let EmployeeKind::Marketing { sales_revenue, .. } = &mut self.kind {
            *sales_revenue = value;
        }
        warning
    }

    pub fn set_commission_rate(&mut self, value: f64) -> Option<FieldWarning> {
        if !matches!(self.kind, EmployeeKind::Marketing { .. }) {
            return Some(self.not_applicable("commission_rate"));
        }
        let (value, warning) = self.checked_amount("commission_rate", value);
        if let EmployeeKind::Marketing {
            commission_rate, ..
        } = &mut self.kind
        {
            *commission_rate = value;
        }
        warning
    }

    pub fn set_responsibility_allowance(&mut self, value: f64) -> Option<FieldWarning> {
        if !matches!(self.kind, EmployeeKind::DepartmentHead { .. }) {
            return Some(self.not_applicable("responsibility_allowance"));
        }
        let (value, warning) = self.checked_amount("responsibility_allowance", value);
        if let EmployeeKind::DepartmentHead {
            responsibility_allowance,
        } = &mut self.kind
        {
            *responsibility_allowance = value;
        }
        warning
    }

    fn checked_amount(&self, field: &'static str, value: f64) -> (f64, Option<FieldWarning>) {
        if is_valid_amount(value) {
            (value, None)
        } else {
            let warning = self.warning(
                field,
                format!("invalid amount {}, resetting to 0", value),
            );
            (0.0, Some(warning))
        }
    }

    fn not_applicable(&self, field: &'static str) -> FieldWarning {
        self.warning(
            field,
            format!("field does not apply to {} employees, ignored", self.category()),
        )
    }

    fn warning(&self, field: &'static str, message: impl Into<String>) -> FieldWarning {
        let warning = FieldWarning {
            code: self.code,
            field,
            message: message.into(),
        };
        warn!(code = %warning.code, field, "{}", warning.message);
        warning
    }
}

/// Amounts must be finite and non-negative.
pub fn is_valid_amount(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}
