use anyhow::Result;

fn main() -> Result<()> {
    let path = std::path::Path::new("dev/sqlite");
    std::fs::create_dir_all(path)?;
    let db_path = path.join("tradeport.db");
    let conn = rusqlite::Connection::open(&db_path)?;
    conn.execute_batch(
        r#"
        PRAGMA foreign_keys = ON;

        DROP TABLE IF EXISTS SalaryPayment;
        DROP TABLE IF EXISTS Attendance;
        DROP TABLE IF EXISTS Employee;
        DROP TABLE IF EXISTS InvoiceLine;
        DROP TABLE IF EXISTS RevenueRecognition;
        DROP TABLE IF EXISTS Payment;
        DROP TABLE IF EXISTS Invoice;
        DROP TABLE IF EXISTS Contract;
        DROP TABLE IF EXISTS Customer;
        DROP TABLE IF EXISTS Tariff;
        DROP TABLE IF EXISTS Tax;
        DROP TABLE IF EXISTS ServiceType;
        DROP TABLE IF EXISTS BillingCycle;
        DROP TABLE IF EXISTS Country;

        CREATE TABLE Country (
            CountryID INTEGER PRIMARY KEY,
            CountryName TEXT NOT NULL,
            CountryCode TEXT NOT NULL
        );
        CREATE TABLE BillingCycle (
            BillingCycleID INTEGER PRIMARY KEY,
            CycleName TEXT NOT NULL,
            CycleLengthInDays INTEGER NOT NULL
        );
        CREATE TABLE ServiceType (
            ServiceTypeID INTEGER PRIMARY KEY,
            ServiceName TEXT NOT NULL,
            ServiceCategory TEXT,
            BaseRate REAL,
            UnitOfMeasure TEXT,
            Taxable INTEGER,
            IsActive INTEGER
        );
        CREATE TABLE Tax (
            TaxID INTEGER PRIMARY KEY,
            TaxName TEXT NOT NULL,
            TaxRate REAL,
            TaxType TEXT,
            EffectiveFrom TEXT,
            EffectiveTo TEXT
        );
        CREATE TABLE Tariff (
            TariffID INTEGER PRIMARY KEY,
            ServiceTypeID INTEGER NOT NULL REFERENCES ServiceType(ServiceTypeID),
            ValidFrom TEXT,
            ValidTo TEXT,
            UnitRate REAL
        );
        CREATE TABLE Customer (
            CustomerID INTEGER PRIMARY KEY,
            CustomerCode TEXT,
            CustomerName TEXT NOT NULL,
            CustomerType TEXT,
            TIN TEXT,
            VATNumber TEXT,
            Phone TEXT,
            Email TEXT,
            Address TEXT,
            CountryID INTEGER NOT NULL REFERENCES Country(CountryID)
        );
        CREATE TABLE Contract (
            ContractID INTEGER PRIMARY KEY,
            CustomerID INTEGER NOT NULL REFERENCES Customer(CustomerID),
            ContractNumber TEXT,
            StartDate TEXT,
            EndDate TEXT,
            BillingCycleID INTEGER NOT NULL REFERENCES BillingCycle(BillingCycleID),
            PaymentTerms TEXT,
            ContractStatus TEXT,
            CreatedDate TEXT
        );
        CREATE TABLE Invoice (
            InvoiceID INTEGER PRIMARY KEY,
            ContractID INTEGER NOT NULL REFERENCES Contract(ContractID),
            InvoiceNumber TEXT,
            InvoiceDate TEXT,
            DueDate TEXT,
            Status TEXT,
            TotalAmount REAL,
            TaxAmount REAL,
            CreatedBy TEXT,
            CreatedDate TEXT
        );
        CREATE TABLE Payment (
            PaymentID INTEGER PRIMARY KEY,
            InvoiceID INTEGER NOT NULL REFERENCES Invoice(InvoiceID),
            PaymentDate TEXT,
            Amount REAL,
            PaymentMethod TEXT,
            ConfirmedBy TEXT,
            ReferenceNumber TEXT,
            Notes TEXT
        );
        CREATE TABLE RevenueRecognition (
            RecognitionID INTEGER PRIMARY KEY,
            InvoiceID INTEGER NOT NULL REFERENCES Invoice(InvoiceID),
            DateRecognized TEXT,
            Amount REAL,
            Notes TEXT
        );
        CREATE TABLE InvoiceLine (
            InvoiceLineID INTEGER PRIMARY KEY,
            InvoiceID INTEGER NOT NULL REFERENCES Invoice(InvoiceID),
            ServiceTypeID INTEGER NOT NULL REFERENCES ServiceType(ServiceTypeID),
            TaxID INTEGER NOT NULL REFERENCES Tax(TaxID),
            Quantity INTEGER,
            UnitPrice REAL,
            DiscountPercent REAL,
            TaxAmount REAL,
            NetAmount REAL
        );
        CREATE TABLE Employee (
            EmployeeID INTEGER PRIMARY KEY,
            FullName TEXT NOT NULL,
            Position TEXT,
            NationalID TEXT UNIQUE,
            HireDate TEXT,
            BirthDate TEXT,
            Gender TEXT,
            MaritalStatus TEXT,
            Address TEXT,
            Phone TEXT,
            Email TEXT,
            EmploymentStatus TEXT
        );
        CREATE TABLE Attendance (
            AttendanceID INTEGER PRIMARY KEY,
            EmployeeID INTEGER NOT NULL REFERENCES Employee(EmployeeID),
            AttendanceDate TEXT,
            Status TEXT,
            CheckInTime TEXT,
            CheckOutTime TEXT,
            HoursWorked REAL,
            Notes TEXT
        );
        CREATE TABLE SalaryPayment (
            SalaryPaymentID INTEGER PRIMARY KEY,
            EmployeeID INTEGER NOT NULL REFERENCES Employee(EmployeeID),
            PaymentDate TEXT,
            Amount REAL,
            Bonus REAL,
            Deductions REAL,
            NetAmount REAL,
            PaymentMethod TEXT,
            ReferenceNumber TEXT
        );
        "#,
    )?;
    println!("Created table layout at {}", db_path.display());
    Ok(())
}
