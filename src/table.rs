use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;

use crate::record::TableName;

/// Every table the generator knows how to build, declared in load order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TableKind {
    Country,
    BillingCycle,
    ServiceType,
    Tax,
    Tariff,
    Customer,
    Contract,
    Invoice,
    Payment,
    RevenueRecognition,
    InvoiceLine,
    Employee,
    Attendance,
    SalaryPayment,
}

impl TableKind {
    pub const FINANCE: [TableKind; 11] = [
        TableKind::Country,
        TableKind::BillingCycle,
        TableKind::ServiceType,
        TableKind::Tax,
        TableKind::Tariff,
        TableKind::Customer,
        TableKind::Contract,
        TableKind::Invoice,
        TableKind::Payment,
        TableKind::RevenueRecognition,
        TableKind::InvoiceLine,
    ];

    pub const HR: [TableKind; 3] = [
        TableKind::Employee,
        TableKind::Attendance,
        TableKind::SalaryPayment,
    ];

    pub fn all() -> impl Iterator<Item = TableKind> {
        Self::FINANCE.into_iter().chain(Self::HR)
    }

    pub fn qualified_name(self) -> &'static str {
        match self {
            TableKind::Country => "Common.Country",
            TableKind::BillingCycle => "Finance.BillingCycle",
            TableKind::ServiceType => "Finance.ServiceType",
            TableKind::Tax => "Finance.Tax",
            TableKind::Tariff => "Finance.Tariff",
            TableKind::Customer => "Finance.Customer",
            TableKind::Contract => "Finance.Contract",
            TableKind::Invoice => "Finance.Invoice",
            TableKind::Payment => "Finance.Payment",
            TableKind::RevenueRecognition => "Finance.RevenueRecognition",
            TableKind::InvoiceLine => "Finance.InvoiceLine",
            TableKind::Employee => "HR.Employee",
            TableKind::Attendance => "HR.Attendance",
            TableKind::SalaryPayment => "HR.SalaryPayment",
        }
    }

    pub fn table_name(self) -> TableName {
        TableName::parse(self.qualified_name())
    }

    /// Column list in insert order. The first column is always the primary key.
    pub fn columns(self) -> Vec<&'static str> {
        match self {
            TableKind::Country => vec!["CountryID", "CountryName", "CountryCode"],
            TableKind::Customer => vec![
                "CustomerID",
                "CustomerCode",
                "CustomerName",
                "CustomerType",
                "TIN",
                "VATNumber",
                "Phone",
                "Email",
                "Address",
                "CountryID",
            ],
            TableKind::BillingCycle => vec!["BillingCycleID", "CycleName", "CycleLengthInDays"],
            TableKind::ServiceType => vec![
                "ServiceTypeID",
                "ServiceName",
                "ServiceCategory",
                "BaseRate",
                "UnitOfMeasure",
                "Taxable",
                "IsActive",
            ],
            TableKind::Tax => vec![
                "TaxID",
                "TaxName",
                "TaxRate",
                "TaxType",
                "EffectiveFrom",
                "EffectiveTo",
            ],
            TableKind::Tariff => vec![
                "TariffID",
                "ServiceTypeID",
                "ValidFrom",
                "ValidTo",
                "UnitRate",
            ],
            TableKind::Contract => vec![
                "ContractID",
                "CustomerID",
                "ContractNumber",
                "StartDate",
                "EndDate",
                "BillingCycleID",
                "PaymentTerms",
                "ContractStatus",
                "CreatedDate",
            ],
            TableKind::Invoice => vec![
                "InvoiceID",
                "ContractID",
                "InvoiceNumber",
                "InvoiceDate",
                "DueDate",
                "Status",
                "TotalAmount",
                "TaxAmount",
                "CreatedBy",
                "CreatedDate",
            ],
            TableKind::Payment => vec![
                "PaymentID",
                "InvoiceID",
                "PaymentDate",
                "Amount",
                "PaymentMethod",
                "ConfirmedBy",
                "ReferenceNumber",
                "Notes",
            ],
            TableKind::RevenueRecognition => {
                vec!["RecognitionID", "InvoiceID", "DateRecognized", "Amount", "Notes"]
            }
            TableKind::InvoiceLine => vec![
                "InvoiceLineID",
                "InvoiceID",
                "ServiceTypeID",
                "TaxID",
                "Quantity",
                "UnitPrice",
                "DiscountPercent",
                "TaxAmount",
                "NetAmount",
            ],
            TableKind::Employee => vec![
                "EmployeeID",
                "FullName",
                "Position",
                "NationalID",
                "HireDate",
                "BirthDate",
                "Gender",
                "MaritalStatus",
                "Address",
                "Phone",
                "Email",
                "EmploymentStatus",
            ],
            TableKind::Attendance => vec![
                "AttendanceID",
                "EmployeeID",
                "AttendanceDate",
                "Status",
                "CheckInTime",
                "CheckOutTime",
                "HoursWorked",
                "Notes",
            ],
            TableKind::SalaryPayment => vec![
                "SalaryPaymentID",
                "EmployeeID",
                "PaymentDate",
                "Amount",
                "Bonus",
                "Deductions",
                "NetAmount",
                "PaymentMethod",
                "ReferenceNumber",
            ],
        }
    }

    pub fn key_column(self) -> &'static str {
        self.columns()[0]
    }

    /// Foreign-key columns as (column, referenced table).
    pub fn references(self) -> &'static [(&'static str, TableKind)] {
        match self {
            TableKind::Customer => &[("CountryID", TableKind::Country)],
            TableKind::Tariff => &[("ServiceTypeID", TableKind::ServiceType)],
            TableKind::Contract => &[
                ("CustomerID", TableKind::Customer),
                ("BillingCycleID", TableKind::BillingCycle),
            ],
            TableKind::Invoice => &[("ContractID", TableKind::Contract)],
            TableKind::Payment | TableKind::RevenueRecognition => {
                &[("InvoiceID", TableKind::Invoice)]
            }
            TableKind::InvoiceLine => &[
                ("InvoiceID", TableKind::Invoice),
                ("ServiceTypeID", TableKind::ServiceType),
                ("TaxID", TableKind::Tax),
            ],
            TableKind::Attendance | TableKind::SalaryPayment => {
                &[("EmployeeID", TableKind::Employee)]
            }
            _ => &[],
        }
    }

    pub fn default_rows(self) -> usize {
        match self {
            TableKind::Country => 30,
            TableKind::Customer => 500,
            TableKind::BillingCycle => 5,
            TableKind::ServiceType => 100,
            TableKind::Tax => 50,
            TableKind::Tariff => 200,
            TableKind::Contract => 1_000,
            TableKind::Invoice => 10_000,
            TableKind::Payment => 150_000,
            TableKind::RevenueRecognition => 200_000,
            TableKind::InvoiceLine => 1_000_000,
            TableKind::Employee => 1_000,
            TableKind::Attendance => 1_000_000,
            TableKind::SalaryPayment => 400_000,
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.qualified_name())
    }
}

/// Accepts `Finance.Invoice` or `Invoice`, case-insensitive.
impl FromStr for TableKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        TableKind::all()
            .find(|k| {
                let qualified = k.qualified_name();
                let bare = qualified.split_once('.').map_or(qualified, |(_, n)| n);
                qualified.eq_ignore_ascii_case(wanted) || bare.eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| format!("unknown table '{}'", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Dataset {
    Finance,
    Hr,
    All,
}

impl Dataset {
    pub fn tables(self) -> Vec<TableKind> {
        match self {
            Dataset::Finance => TableKind::FINANCE.to_vec(),
            Dataset::Hr => TableKind::HR.to_vec(),
            Dataset::All => TableKind::all().collect(),
        }
    }
}
