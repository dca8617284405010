use std::collections::HashMap;
use std::error::Error;

use anyhow::Result;
use bytes::BytesMut;
use postgres::types::{accepts, to_sql_checked, IsNull, ToSql, Type};
use postgres::Statement;

use crate::connection::Connection;
use crate::db::Destination;
use crate::logger::debug;
use crate::record::{Row, SqlValue};

pub struct Postgres {
    client: postgres::Client,
    statements: HashMap<String, Statement>,
    in_tx: bool,
}

impl Postgres {
    pub fn database_url(conn: &Connection) -> Result<String> {
        super::network_url("postgres", conn)
    }

    pub fn connect(conn: &Connection) -> Result<Self> {
        debug("postgres: connecting");
        let url = Postgres::database_url(conn)?;
        let client = postgres::Client::connect(&url, postgres::NoTls)?;
        debug("postgres: connected");
        Ok(Self {
            client,
            statements: HashMap::new(),
            in_tx: false,
        })
    }

    fn prepared(&mut self, sql: &str) -> Result<Statement> {
        if let Some(stmt) = self.statements.get(sql) {
            return Ok(stmt.clone());
        }
        let stmt = self.client.prepare(sql)?;
        self.statements.insert(sql.to_string(), stmt.clone());
        Ok(stmt)
    }
}

impl Destination for Postgres {
    fn placeholder(&self, position: usize) -> String {
        format!("${}", position)
    }

    fn execute_batch(&mut self, sql: &str, rows: &[Row]) -> Result<()> {
        let stmt = self.prepared(sql)?;
        if !self.in_tx {
            self.client.batch_execute("BEGIN")?;
            self.in_tx = true;
        }
        for row in rows {
            let params: Vec<&(dyn ToSql + Sync)> =
                row.iter().map(|v| v as &(dyn ToSql + Sync)).collect();
            self.client.execute(&stmt, &params)?;
        }
        Ok(())
    }

    fn commit(&mut self) -> Result<()> {
        if self.in_tx {
            self.client.batch_execute("COMMIT")?;
            self.in_tx = false;
        }
        Ok(())
    }

    fn rollback(&mut self) -> Result<()> {
        if self.in_tx {
            self.in_tx = false;
            self.client.batch_execute("ROLLBACK")?;
        }
        Ok(())
    }

    fn server_time(&mut self) -> Result<String> {
        let row = self.client.query_one("SELECT now()::text", &[])?;
        Ok(row.get::<_, String>(0))
    }
}

/// Values are converted to whatever the target column declares, so integer keys
/// fit int4 columns and amounts fit real or double precision. Any other pairing
/// is a type error rather than a silent reinterpretation.
impl ToSql for SqlValue {
    fn to_sql(
        &self,
        ty: &Type,
        out: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn Error + Sync + Send>> {
        match self {
            SqlValue::Null => Ok(IsNull::Yes),
            SqlValue::Int(v) => {
                if *ty == Type::INT2 {
                    i16::try_from(*v)?.to_sql(ty, out)
                } else if *ty == Type::INT4 {
                    i32::try_from(*v)?.to_sql(ty, out)
                } else if *ty == Type::INT8 {
                    v.to_sql(ty, out)
                } else if *ty == Type::FLOAT4 {
                    (*v as f32).to_sql(ty, out)
                } else if *ty == Type::FLOAT8 {
                    (*v as f64).to_sql(ty, out)
                } else if *ty == Type::BOOL {
                    (*v != 0).to_sql(ty, out)
                } else if is_text(ty) {
                    v.to_string().to_sql(ty, out)
                } else {
                    Err(mismatch(self, ty))
                }
            }
            SqlValue::Float(v) => {
                if *ty == Type::FLOAT4 {
                    (*v as f32).to_sql(ty, out)
                } else if *ty == Type::FLOAT8 {
                    v.to_sql(ty, out)
                } else if is_text(ty) {
                    v.to_string().to_sql(ty, out)
                } else {
                    Err(mismatch(self, ty))
                }
            }
            SqlValue::Text(s) if is_text(ty) => s.as_str().to_sql(ty, out),
            SqlValue::Date(_) | SqlValue::Time(_) if is_text(ty) => {
                self.to_field().to_sql(ty, out)
            }
            SqlValue::Date(d) if *ty == Type::DATE => d.to_sql(ty, out),
            SqlValue::Time(t) if *ty == Type::TIME => t.to_sql(ty, out),
            SqlValue::Text(_) | SqlValue::Date(_) | SqlValue::Time(_) => Err(mismatch(self, ty)),
        }
    }

    accepts!(INT2, INT4, INT8, FLOAT4, FLOAT8, BOOL, TEXT, VARCHAR, BPCHAR, DATE, TIME);

    to_sql_checked!();
}

fn is_text(ty: &Type) -> bool {
    *ty == Type::TEXT || *ty == Type::VARCHAR || *ty == Type::BPCHAR
}

fn mismatch(value: &SqlValue, ty: &Type) -> Box<dyn Error + Sync + Send> {
    format!("cannot write {:?} into a {} column", value, ty.name()).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn encode(v: &SqlValue, ty: &Type) -> (IsNull, Vec<u8>) {
        let mut buf = BytesMut::new();
        let is_null = v.to_sql(ty, &mut buf).unwrap();
        (is_null, buf.to_vec())
    }

    #[test]
    fn narrows_integers_to_column_width() {
        let (_, bytes) = encode(&SqlValue::Int(7), &Type::INT4);
        assert_eq!(bytes, 7i32.to_be_bytes());
        let (_, bytes) = encode(&SqlValue::Int(7), &Type::INT8);
        assert_eq!(bytes, 7i64.to_be_bytes());

        let mut buf = BytesMut::new();
        assert!(SqlValue::Int(i64::MAX).to_sql(&Type::INT4, &mut buf).is_err());
    }

    #[test]
    fn null_is_sql_null() {
        let (is_null, bytes) = encode(&SqlValue::Null, &Type::TEXT);
        assert!(matches!(is_null, IsNull::Yes));
        assert!(bytes.is_empty());
    }

    #[test]
    fn dates_into_text_columns_use_iso_format() {
        let d = NaiveDate::from_ymd_opt(2025, 6, 26).unwrap();
        let (_, bytes) = encode(&SqlValue::Date(d), &Type::VARCHAR);
        assert_eq!(bytes, b"2025-06-26");
    }

    #[test]
    fn rejects_unmapped_type_pairs() {
        let mut buf = BytesMut::new();
        let err = match SqlValue::Float(1.5).to_sql(&Type::INT4, &mut buf) {
            Ok(_) => panic!("called `Result::unwrap_err()` on an `Ok` value"),
            Err(e) => e,
        };
        assert!(err.to_string().contains("int4"));
        assert!(SqlValue::Int(3).to_sql(&Type::DATE, &mut buf).is_err());
        assert!(SqlValue::from("x").to_sql(&Type::INT8, &mut buf).is_err());
        let d = NaiveDate::from_ymd_opt(2025, 6, 26).unwrap();
        assert!(SqlValue::Date(d).to_sql(&Type::TIME, &mut buf).is_err());
        assert!(buf.is_empty());
    }

    #[test]
    fn accepts_only_mapped_types() {
        assert!(<SqlValue as ToSql>::accepts(&Type::DATE));
        assert!(!<SqlValue as ToSql>::accepts(&Type::JSONB));
    }

    #[test]
    fn builds_url_without_password() {
        let conn: Connection =
            serde_yaml::from_str("type: postgres\nuser: u\nhost: h\nport: 5432").unwrap();
        assert_eq!(Postgres::database_url(&conn).unwrap(), "postgres://u:@h:5432");
    }
}
