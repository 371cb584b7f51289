use crate::error::{Result, RosterError};
use crate::model::Employee;

/// Records with `min <= base_salary <= max`, in collection order.
pub fn salary_range(employees: &[Employee], min: f64, max: f64) -> Result<Vec<&Employee>> {
    if min.is_nan() || max.is_nan() {
        return Err(RosterError::Validation(
            "salary bounds must be numbers".to_string(),
        ));
    }
    if min > max {
        return Err(RosterError::InvalidRange { min, max });
    }
    Ok(employees
        .iter()
        .filter(|e| (min..=max).contains(&e.base_salary()))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::admin;

    fn staff() -> Vec<Employee> {
        vec![
            admin("HC0001", "A", 5_000_000.0),
            admin("HC0002", "B", 10_000_000.0),
            admin("HC0003", "C", 15_000_000.0),
            admin("HC0004", "D", 20_000_000.0),
        ]
    }

    fn codes(found: &[&Employee]) -> Vec<String> {
        found.iter().map(|e| e.code().to_string()).collect()
    }

    #[test]
    fn bounds_are_inclusive() {
        let staff = staff();
        let found = salary_range(&staff, 10_000_000.0, 15_000_000.0).unwrap();
        assert_eq!(codes(&found), ["HC0002", "HC0003"]);
    }

    #[test]
    fn equal_bounds_match_exact_salary() {
        let staff = staff();
        let found = salary_range(&staff, 20_000_000.0, 20_000_000.0).unwrap();
        assert_eq!(codes(&found), ["HC0004"]);
    }

    #[test]
    fn no_match_is_empty() {
        assert!(salary_range(&staff(), 1.0, 2.0).unwrap().is_empty());
    }

    #[test]
    fn inverted_range_is_rejected() {
        assert!(matches!(
            salary_range(&staff(), 2.0, 1.0),
            Err(RosterError::InvalidRange { .. })
        ));
        assert!(matches!(
            salary_range(&staff(), f64::NAN, 1.0),
            Err(RosterError::Validation(_))
        ));
    }
}
