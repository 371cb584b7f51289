use crate::model::Employee;

/// How many records [`top_by_income`] returns when the caller has no preference.
pub const DEFAULT_TOP: usize = 5;

/// Ascending by name. Stable.
pub fn by_name(employees: &mut [Employee]) {
    employees.sort_by(|a, b| a.name().cmp(b.name()));
}

/// Descending by computed income. Stable, so ties keep their order.
pub fn by_income_descending(employees: &mut [Employee]) {
    employees.sort_by(|a, b| b.income().total_cmp(&a.income()));
}

/// The `n` highest earners, without reordering the collection.
pub fn top_by_income(employees: &[Employee], n: usize) -> Vec<Employee> {
    let mut ranked = employees.to_vec();
    by_income_descending(&mut ranked);
    ranked.truncate(n);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{admin, head, marketing};

    fn names(employees: &[Employee]) -> Vec<&str> {
        employees.iter().map(|e| e.name()).collect()
    }

    fn seven() -> Vec<Employee> {
        vec![
            admin("HC0001", "Low", 5_000_000.0),
            marketing("TT0001", "Mid-a", 10_000_000.0, 100_000_000.0, 0.1),
            head("TP0001", "Top", 50_000_000.0, 10_000_000.0),
            admin("HC0002", "Mid-b", 20_000_000.0),
            admin("HC0003", "Lowest", 1_000_000.0),
            marketing("TT0002", "Mid-c", 15_000_000.0, 50_000_000.0, 0.1),
            admin("HC0004", "High", 30_000_000.0),
        ]
    }

    #[test]
    fn sorts_by_name() {
        let mut staff = seven();
        by_name(&mut staff);
        assert_eq!(
            names(&staff),
            ["High", "Low", "Lowest", "Mid-a", "Mid-b", "Mid-c", "Top"]
        );
    }

    #[test]
    fn sorts_by_income_keeping_ties_in_order() {
        let mut staff = seven();
        by_income_descending(&mut staff);
        // Mid-a, Mid-b and Mid-c all earn 20,000,000
        assert_eq!(
            names(&staff),
            ["Top", "High", "Mid-a", "Mid-b", "Mid-c", "Low", "Lowest"]
        );
    }

    #[test]
    fn top_five_of_seven() {
        let staff = seven();
        let top = top_by_income(&staff, DEFAULT_TOP);
        assert_eq!(names(&top), ["Top", "High", "Mid-a", "Mid-b", "Mid-c"]);
        // Collection order untouched
        assert_eq!(staff[0].name(), "Low");
    }

    #[test]
    fn top_of_short_list_returns_everything() {
        let staff = vec![admin("HC0001", "Only", 1.0)];
        assert_eq!(top_by_income(&staff, DEFAULT_TOP).len(), 1);
        assert!(top_by_income(&[], 3).is_empty());
    }
}
