use std::fmt;

use chrono::{NaiveDate, NaiveTime};

/// A single cell of a generated row.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Int(i64),
    Float(f64),
    Text(String),
    Date(NaiveDate),
    Time(NaiveTime),
}

impl SqlValue {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            SqlValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            SqlValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Plain field rendering used by CSV output. NULL becomes an empty field.
    pub fn to_field(&self) -> String {
        match self {
            SqlValue::Null => String::new(),
            SqlValue::Int(v) => v.to_string(),
            SqlValue::Float(v) => v.to_string(),
            SqlValue::Text(s) => s.clone(),
            SqlValue::Date(d) => d.format("%Y-%m-%d").to_string(),
            SqlValue::Time(t) => t.format("%H:%M:%S").to_string(),
        }
    }

    /// T-SQL style literal used by the INSERT script export.
    pub fn to_literal(&self) -> String {
        match self {
            SqlValue::Null => "NULL".to_string(),
            SqlValue::Text(s) => format!("N'{}'", s.replace('\'', "''")),
            SqlValue::Date(_) | SqlValue::Time(_) => format!("'{}'", self.to_field()),
            SqlValue::Int(_) | SqlValue::Float(_) => self.to_field(),
        }
    }
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        SqlValue::Int(v)
    }
}

impl From<f64> for SqlValue {
    fn from(v: f64) -> Self {
        SqlValue::Float(v)
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        SqlValue::Text(v)
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        SqlValue::Text(v.to_string())
    }
}

impl From<NaiveDate> for SqlValue {
    fn from(v: NaiveDate) -> Self {
        SqlValue::Date(v)
    }
}

impl From<NaiveTime> for SqlValue {
    fn from(v: NaiveTime) -> Self {
        SqlValue::Time(v)
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(SqlValue::Null, Into::into)
    }
}

pub type Row = Vec<SqlValue>;

/// Destination table identifier, optionally schema qualified (`Finance.Invoice`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableName {
    pub schema: Option<String>,
    pub name: String,
}

impl TableName {
    pub fn parse(s: &str) -> Self {
        match s.split_once('.') {
            Some((schema, name)) => Self {
                schema: Some(schema.to_string()),
                name: name.to_string(),
            },
            None => Self {
                schema: None,
                name: s.to_string(),
            },
        }
    }

    /// `SalaryPayment` -> `salary_payment`
    pub fn snake_case(&self) -> String {
        let mut out = String::with_capacity(self.name.len() + 4);
        for (i, c) in self.name.chars().enumerate() {
            if c.is_uppercase() {
                if i > 0 {
                    out.push('_');
                }
                out.extend(c.to_lowercase());
            } else {
                out.push(c);
            }
        }
        out
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.schema {
            Some(schema) => write!(f, "{}.{}", schema, self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

/// In-memory table: a fixed column list and rows aligned to it.
#[derive(Debug, Clone)]
pub struct RecordSet {
    pub table: TableName,
    pub columns: Vec<&'static str>,
    pub rows: Vec<Row>,
}

impl RecordSet {
    pub fn new(table: TableName, columns: Vec<&'static str>) -> Self {
        Self {
            table,
            columns,
            rows: Vec::new(),
        }
    }

    pub fn with_capacity(table: TableName, columns: Vec<&'static str>, rows: usize) -> Self {
        Self {
            table,
            columns,
            rows: Vec::with_capacity(rows),
        }
    }

    pub fn push(&mut self, row: Row) {
        debug_assert_eq!(row.len(), self.columns.len(), "row width mismatch for {}", self.table);
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| *c == column)
    }

    /// Integer values of one column, in row order. Non-integer cells are skipped.
    pub fn int_column(&self, column: &str) -> Vec<i64> {
        match self.column_index(column) {
            Some(idx) => self
                .rows
                .iter()
                .filter_map(|r| r.get(idx).and_then(SqlValue::as_int))
                .collect(),
            None => Vec::new(),
        }
    }
}

/// Truncate to at most `max` characters, never splitting a code point.
pub fn truncate(s: String, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s,
    }
}
