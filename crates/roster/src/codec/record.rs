//! The uniform nine-field record shared by every format.
//!
//! Writers go through [`EmployeeRecord`], which flattens an [`Employee`] into
//! the fixed column order with `0.0` for fields the variant does not have.
//! Readers collect whatever they find into a [`RawRecord`] keyed by
//! [`Column`] and let [`RawRecord::decode`] apply the structural checks, so
//! the four formats agree on what "malformed" means.

use serde::Serialize;

use crate::model::{Category, Employee, EmployeeCode, FieldWarning};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Code,
    Name,
    Category,
    BaseSalary,
    SalesRevenue,
    CommissionRate,
    ResponsibilityAllowance,
    Income,
    IncomeTax,
}

impl Column {
    pub const ALL: [Column; 9] = [
        Column::Code,
        Column::Name,
        Column::Category,
        Column::BaseSalary,
        Column::SalesRevenue,
        Column::CommissionRate,
        Column::ResponsibilityAllowance,
        Column::Income,
        Column::IncomeTax,
    ];

    /// Member / element name used by JSON and XML.
    pub fn key(self) -> &'static str {
        match self {
            Column::Code => "code",
            Column::Name => "name",
            Column::Category => "category",
            Column::BaseSalary => "base_salary",
            Column::SalesRevenue => "sales_revenue",
            Column::CommissionRate => "commission_rate",
            Column::ResponsibilityAllowance => "responsibility_allowance",
            Column::Income => "income",
            Column::IncomeTax => "income_tax",
        }
    }

    /// Column title used by the header line of text and CSV files.
    pub fn header(self) -> &'static str {
        match self {
            Column::Code => "Code",
            Column::Name => "Name",
            Column::Category => "Category",
            Column::BaseSalary => "Base Salary",
            Column::SalesRevenue => "Sales Revenue",
            Column::CommissionRate => "Commission Rate",
            Column::ResponsibilityAllowance => "Responsibility Allowance",
            Column::Income => "Income",
            Column::IncomeTax => "Income Tax",
        }
    }

    /// Resolves a header, member or element name.
    ///
    /// Names are compared after stripping a byte-order mark, trimming,
    /// lower-casing and turning spaces and hyphens into underscores, so
    /// `Base Salary`, `base_salary`, `baseSalary` and `BASE-SALARY` all match.
    /// The column names of the older Vietnamese data files are accepted too.
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized: String = name
            .trim_start_matches('\u{feff}')
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| if c == ' ' || c == '-' { '_' } else { c })
            .collect();

        let column = match normalized.as_str() {
            "code" | "employee_code" | "employeecode" | "mã_nv" | "ma_nv" => Column::Code,
            "name" | "full_name" | "fullname" | "họ_tên" | "ho_ten" => Column::Name,
            "category" | "chức_vụ" | "chuc_vu" => Column::Category,
            "base_salary" | "basesalary" | "salary" | "lương" | "luong" => Column::BaseSalary,
            "sales_revenue" | "salesrevenue" | "doanh_số" | "doanh_so" => Column::SalesRevenue,
            "commission_rate" | "commissionrate" | "hoa_hồng" | "hoa_hong" => {
                Column::CommissionRate
            }
            "responsibility_allowance"
            | "responsibilityallowance"
            | "lương_trách_nhiệm"
            | "luong_trach_nhiem" => Column::ResponsibilityAllowance,
            "income" | "thu_nhập" | "thu_nhap" => Column::Income,
            "income_tax" | "incometax" | "thuế_tn" | "thue_tn" => Column::IncomeTax,
            _ => return None,
        };
        Some(column)
    }
}

/// Text form of an amount. Always carries a decimal part (`0.0`, `12.5`).
pub fn format_amount(value: f64) -> String {
    format!("{:?}", value)
}

/// An employee flattened into the nine persisted fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmployeeRecord {
    pub code: String,
    pub name: String,
    pub category: String,
    pub base_salary: f64,
    pub sales_revenue: f64,
    pub commission_rate: f64,
    pub responsibility_allowance: f64,
    pub income: f64,
    pub income_tax: f64,
}

impl From<&Employee> for EmployeeRecord {
    fn from(employee: &Employee) -> Self {
        Self {
            code: employee.code().to_string(),
            name: employee.name().to_string(),
            category: employee.category().label().to_string(),
            base_salary: employee.base_salary(),
            sales_revenue: employee.sales_revenue().unwrap_or(0.0),
            commission_rate: employee.commission_rate().unwrap_or(0.0),
            responsibility_allowance: employee.responsibility_allowance().unwrap_or(0.0),
            income: employee.income(),
            income_tax: employee.income_tax(),
        }
    }
}

impl EmployeeRecord {
    /// Field values as text, in [`Column::ALL`] order.
    pub fn values(&self) -> [String; 9] {
        [
            self.code.clone(),
            self.name.clone(),
            self.category.clone(),
            format_amount(self.base_salary),
            format_amount(self.sales_revenue),
            format_amount(self.commission_rate),
            format_amount(self.responsibility_allowance),
            format_amount(self.income),
            format_amount(self.income_tax),
        ]
    }
}

/// Field values collected by a reader before validation.
#[derive(Debug, Default, Clone)]
pub struct RawRecord {
    values: [Option<String>; 9],
}

impl RawRecord {
    pub fn set(&mut self, column: Column, value: impl Into<String>) {
        self.values[column as usize] = Some(value.into());
    }

    pub fn get(&self, column: Column) -> Option<&str> {
        self.values[column as usize].as_deref().map(str::trim)
    }

    fn required(&self, column: Column) -> Result<&str, String> {
        match self.get(column) {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(format!("missing {}", column.key())),
        }
    }

    fn amount(&self, column: Column) -> Result<f64, String> {
        let raw = self.required(column)?;
        raw.parse::<f64>()
            .map_err(|_| format!("{} is not a number: {:?}", column.key(), raw))
    }

    /// Builds an employee, or explains why the record has to be skipped.
    ///
    /// Stored income and tax are ignored; they are recomputed from the
    /// other fields. Amounts that parse but are out of range are coerced by
    /// the model setters and come back as warnings.
    pub fn decode(&self) -> Result<(Employee, Vec<FieldWarning>), String> {
        let raw_code = self.required(Column::Code)?;
        let code =
            EmployeeCode::parse(raw_code).map_err(|_| format!("invalid code {:?}", raw_code))?;
        let name = self.required(Column::Name)?;
        let label = self.required(Column::Category)?;
        let category =
            Category::from_label(label).ok_or_else(|| format!("unknown category {:?}", label))?;
        let base_salary = self.amount(Column::BaseSalary)?;

        let extras = match category {
            Category::Administrative => Extras::None,
            Category::Marketing => Extras::Marketing {
                sales_revenue: self.amount(Column::SalesRevenue)?,
                commission_rate: self.amount(Column::CommissionRate)?,
            },
            Category::DepartmentHead => Extras::DepartmentHead {
                responsibility_allowance: self.amount(Column::ResponsibilityAllowance)?,
            },
        };

        let mut employee = Employee::empty(category, code);
        let mut warnings = Vec::new();
        warnings.extend(employee.set_name(name));
        warnings.extend(employee.set_base_salary(base_salary));
        match extras {
            Extras::None => {}
            Extras::Marketing {
                sales_revenue,
                commission_rate,
            } => {
                warnings.extend(employee.set_sales_revenue(sales_revenue));
                warnings.extend(employee.set_commission_rate(commission_rate));
            }
            Extras::DepartmentHead {
                responsibility_allowance,
            } => {
                warnings.extend(employee.set_responsibility_allowance(responsibility_allowance));
            }
        }

        Ok((employee, warnings))
    }
}

enum Extras {
    None,
    Marketing {
        sales_revenue: f64,
        commission_rate: f64,
    },
    DepartmentHead {
        responsibility_allowance: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EmployeeKind;

    fn raw(pairs: &[(Column, &str)]) -> RawRecord {
        let mut record = RawRecord::default();
        for (column, value) in pairs {
            record.set(*column, *value);
        }
        record
    }

    #[test]
    fn column_names_resolve_across_spellings() {
        for name in ["Base Salary", "base_salary", "baseSalary", "BASE-SALARY", "Lương"] {
            assert_eq!(Column::from_name(name), Some(Column::BaseSalary), "{name}");
        }
        assert_eq!(Column::from_name("\u{feff}Code"), Some(Column::Code));
        assert_eq!(Column::from_name("Mã NV"), Some(Column::Code));
        assert_eq!(Column::from_name("Ma_NV"), Some(Column::Code));
        assert_eq!(Column::from_name("Họ Tên"), Some(Column::Name));
        assert_eq!(Column::from_name("Lương trách nhiệm"), Some(Column::ResponsibilityAllowance));
        assert_eq!(Column::from_name("Thuế TN"), Some(Column::IncomeTax));
        assert_eq!(Column::from_name("Department"), None);
    }

    #[test]
    fn headers_and_keys_resolve_to_their_column() {
        for column in Column::ALL {
            assert_eq!(Column::from_name(column.header()), Some(column));
            assert_eq!(Column::from_name(column.key()), Some(column));
        }
    }

    #[test]
    fn amounts_always_have_a_decimal_part() {
        assert_eq!(format_amount(0.0), "0.0");
        assert_eq!(format_amount(10_000_000.0), "10000000.0");
        assert_eq!(format_amount(0.05), "0.05");
    }

    #[test]
    fn record_zero_fills_missing_variant_fields() {
        let mut e = Employee::empty(
            Category::Administrative,
            EmployeeCode::parse("HC0001").unwrap(),
        );
        e.set_name("An");
        e.set_base_salary(10_000_000.0);

        let values = EmployeeRecord::from(&e).values();
        assert_eq!(
            values,
            [
                "HC0001",
                "An",
                "Administrative",
                "10000000.0",
                "0.0",
                "0.0",
                "0.0",
                "10000000.0",
                "1000000.0"
            ]
            .map(String::from)
        );
    }

    #[test]
    fn decodes_marketing_record() {
        let record = raw(&[
            (Column::Code, "TT0002"),
            (Column::Name, " Le Thi B "),
            (Column::Category, "Marketing"),
            (Column::BaseSalary, "10000000"),
            (Column::SalesRevenue, "200000000"),
            (Column::CommissionRate, "0.05"),
            (Column::Income, "garbage is ignored"),
        ]);
        let (employee, warnings) = record.decode().unwrap();
        assert!(warnings.is_empty());
        assert_eq!(employee.name(), "Le Thi B");
        assert_eq!(
            employee.kind(),
            &EmployeeKind::Marketing {
                sales_revenue: 200_000_000.0,
                commission_rate: 0.05
            }
        );
    }

    #[test]
    fn ignores_fields_the_variant_does_not_have() {
        let record = raw(&[
            (Column::Code, "HC0001"),
            (Column::Name, "An"),
            (Column::Category, "Administrative"),
            (Column::BaseSalary, "1.0"),
            (Column::SalesRevenue, "not a number"),
        ]);
        assert!(record.decode().is_ok());
    }

    #[test]
    fn rejects_structurally_broken_records() {
        let base = [
            (Column::Code, "TP0001"),
            (Column::Name, "Chi"),
            (Column::Category, "Department Head"),
            (Column::BaseSalary, "1.0"),
            (Column::ResponsibilityAllowance, "2.0"),
        ];
        assert!(raw(&base).decode().is_ok());

        let cases: [(Column, &str, &str); 5] = [
            (Column::Code, "TP01", "invalid code"),
            (Column::Name, "  ", "missing name"),
            (Column::Category, "Intern", "unknown category"),
            (Column::BaseSalary, "abc", "not a number"),
            (Column::ResponsibilityAllowance, "", "missing responsibility_allowance"),
        ];
        for (column, value, expected) in cases {
            let mut record = raw(&base);
            record.set(column, value);
            let reason = record.decode().unwrap_err();
            assert!(reason.contains(expected), "{reason} should mention {expected}");
        }
    }

    #[test]
    fn negative_amounts_are_coerced_with_a_warning() {
        let record = raw(&[
            (Column::Code, "HC0001"),
            (Column::Name, "An"),
            (Column::Category, "Administrative"),
            (Column::BaseSalary, "-5"),
        ]);
        let (employee, warnings) = record.decode().unwrap();
        assert_eq!(employee.base_salary(), 0.0);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].field, "base_salary");
    }
}
