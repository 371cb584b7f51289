//! Consistency report over the loaded records.
//!
//! Decoding accepts a record whose code prefix names one category while its
//! label names another, since the file is still readable. This command lists
//! such records, together with records that have no name, so a caller can
//! show them to the user. Nothing is changed.

use std::fmt;

use crate::model::{Category, Employee, EmployeeCode};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueKind {
    /// The code prefix belongs to `prefix`, the record is a `label`.
    PrefixMismatch { prefix: Category, label: Category },
    MissingName,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordIssue {
    pub code: EmployeeCode,
    pub kind: IssueKind,
}

impl fmt::Display for RecordIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            IssueKind::PrefixMismatch { prefix, label } => write!(
                f,
                "{}: prefix {} is for {} employees, record is {}",
                self.code,
                prefix.prefix(),
                prefix,
                label
            ),
            IssueKind::MissingName => write!(f, "{}: name is empty", self.code),
        }
    }
}

#[derive(Debug, Default)]
pub struct CheckReport {
    pub checked: usize,
    pub issues: Vec<RecordIssue>,
}

impl CheckReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

pub fn run(employees: &[Employee]) -> CheckReport {
    let mut report = CheckReport {
        checked: employees.len(),
        ..CheckReport::default()
    };

    for employee in employees {
        let code = employee.code();
        if code.category() != employee.category() {
            report.issues.push(RecordIssue {
                code,
                kind: IssueKind::PrefixMismatch {
                    prefix: code.category(),
                    label: employee.category(),
                },
            });
        }
        if employee.name().trim().is_empty() {
            report.issues.push(RecordIssue {
                code,
                kind: IssueKind::MissingName,
            });
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::admin;

    #[test]
    fn clean_roster_has_no_issues() {
        let report = run(&[admin("HC0001", "An", 1.0)]);
        assert!(report.is_clean());
        assert_eq!(report.checked, 1);
    }

    #[test]
    fn reports_prefix_mismatch_and_missing_name() {
        let mut mislabeled = Employee::empty(
            Category::Administrative,
            EmployeeCode::parse("TT0004").unwrap(),
        );
        mislabeled.set_name("Wrong prefix");
        let nameless = Employee::empty(
            Category::DepartmentHead,
            EmployeeCode::parse("TP0001").unwrap(),
        );

        let report = run(&[admin("HC0001", "An", 1.0), mislabeled, nameless]);
        assert_eq!(report.issues.len(), 2);
        assert_eq!(
            report.issues[0].kind,
            IssueKind::PrefixMismatch {
                prefix: Category::Marketing,
                label: Category::Administrative
            }
        );
        assert_eq!(report.issues[1].kind, IssueKind::MissingName);
        assert_eq!(
            report.issues[0].to_string(),
            "TT0004: prefix TT is for Marketing employees, record is Administrative"
        );
    }
}
