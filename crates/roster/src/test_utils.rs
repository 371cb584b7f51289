use crate::codec::FileFormat;
use crate::model::{Category, Employee, EmployeeCode};
use crate::roster::Roster;
use crate::store::MemBackend;

fn employee(category: Category, code: &str, name: &str, salary: f64) -> Employee {
    let code = EmployeeCode::parse(code).expect("fixture code");
    let mut e = Employee::empty(category, code);
    e.set_name(name);
    e.set_base_salary(salary);
    e
}

pub fn admin(code: &str, name: &str, salary: f64) -> Employee {
    employee(Category::Administrative, code, name, salary)
}

pub fn marketing(code: &str, name: &str, salary: f64, revenue: f64, rate: f64) -> Employee {
    let mut e = employee(Category::Marketing, code, name, salary);
    e.set_sales_revenue(revenue);
    e.set_commission_rate(rate);
    e
}

pub fn head(code: &str, name: &str, salary: f64, allowance: f64) -> Employee {
    let mut e = employee(Category::DepartmentHead, code, name, salary);
    e.set_responsibility_allowance(allowance);
    e
}

/// A roster over a memory backend seeded with `employees` as text data.
pub fn mem_roster(employees: Vec<Employee>) -> Roster<MemBackend> {
    let backend = MemBackend::new().with_employees(FileFormat::Text, employees);
    Roster::open(backend, FileFormat::Text).expect("memory roster opens")
}

/// One employee of each category plus a second administrative one.
pub fn sample_roster() -> Roster<MemBackend> {
    mem_roster(vec![
        admin("HC0001", "Nguyen Van A", 10_000_000.0),
        marketing("TT0001", "Le Thi B", 10_000_000.0, 200_000_000.0, 0.05),
        head("TP0001", "Tran Van C", 50_000_000.0, 10_000_000.0),
        admin("HC0002", "Pham Thi D", 8_000_000.0),
    ])
}
