use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::record::{RecordSet, Row};

/// Render one row as a literal INSERT statement.
pub fn insert_literal(set: &RecordSet, row: &Row) -> String {
    let values = row
        .iter()
        .map(|v| v.to_literal())
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "INSERT INTO {} ({}) VALUES ({});",
        set.table,
        set.columns.join(", "),
        values
    )
}

/// Appends literal INSERT statements for each table to a single SQL file.
pub struct ScriptWriter<W: Write> {
    out: W,
    statements: usize,
}

impl ScriptWriter<BufWriter<File>> {
    pub fn create(path: &Path) -> Result<Self> {
        let file =
            File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> ScriptWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out, statements: 0 }
    }

    /// Returns the number of statements written for this table.
    pub fn append(&mut self, set: &RecordSet) -> Result<usize> {
        writeln!(self.out, "-- {} ({} rows)", set.table, set.len())?;
        for row in &set.rows {
            writeln!(self.out, "{}", insert_literal(set, row))?;
        }
        self.statements += set.len();
        Ok(set.len())
    }

    pub fn statements(&self) -> usize {
        self.statements
    }

    pub fn finish(mut self) -> Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{SqlValue, TableName};
    use chrono::NaiveDate;

    fn customers() -> RecordSet {
        let mut set = RecordSet::new(
            TableName::parse("Finance.Customer"),
            vec!["CustomerID", "CustomerName", "Email"],
        );
        set.push(vec![SqlValue::Int(1), "O'Neil Group".into(), SqlValue::Null]);
        set
    }

    #[test]
    fn renders_literal_insert() {
        let set = customers();
        assert_eq!(
            insert_literal(&set, &set.rows[0]),
            "INSERT INTO Finance.Customer (CustomerID, CustomerName, Email) \
             VALUES (1, N'O''Neil Group', NULL);"
        );
    }

    #[test]
    fn quotes_dates() {
        let mut set = RecordSet::new(
            TableName::parse("Finance.Tax"),
            vec!["TaxID", "EffectiveFrom"],
        );
        let d = NaiveDate::from_ymd_opt(2025, 6, 26).unwrap();
        set.push(vec![SqlValue::Int(4), d.into()]);
        assert!(insert_literal(&set, &set.rows[0]).ends_with("VALUES (4, '2025-06-26');"));
    }

    #[test]
    fn appends_tables_in_order() {
        let mut writer = ScriptWriter::new(Vec::new());
        writer.append(&customers()).unwrap();
        writer.append(&customers()).unwrap();
        assert_eq!(writer.statements(), 2);
        let text = String::from_utf8(writer.finish().unwrap()).unwrap();
        let inserts = text.lines().filter(|l| l.starts_with("INSERT")).count();
        assert_eq!(inserts, 2);
        assert!(text.starts_with("-- Finance.Customer (1 rows)"));
        assert!(!text.contains("\nGO"));
    }
}
