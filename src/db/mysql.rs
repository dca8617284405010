use anyhow::Result;
use chrono::{Datelike, Timelike};
use mysql::prelude::Queryable;
use mysql::{Opts, Params, Value};

use crate::connection::Connection;
use crate::db::Destination;
use crate::logger::debug;
use crate::record::{Row, SqlValue};

pub struct Mysql {
    conn: mysql::Conn,
    in_tx: bool,
}

impl Mysql {
    pub fn database_url(conn: &Connection) -> Result<String> {
        super::network_url("mysql", conn)
    }

    pub fn connect(conn: &Connection) -> Result<Self> {
        debug("mysql: connecting");
        let url = Mysql::database_url(conn)?;
        let opts = Opts::from_url(&url)?;
        let conn = mysql::Conn::new(opts)?;
        debug("mysql: connected");
        Ok(Self { conn, in_tx: false })
    }
}

impl Destination for Mysql {
    fn execute_batch(&mut self, sql: &str, rows: &[Row]) -> Result<()> {
        if !self.in_tx {
            self.conn.query_drop("START TRANSACTION")?;
            self.in_tx = true;
        }
        let params = rows
            .iter()
            .map(|row| Params::Positional(row.iter().map(Value::from).collect()));
        self.conn.exec_batch(sql, params)?;
        Ok(())
    }

    fn commit(&mut self) -> Result<()> {
        if self.in_tx {
            self.conn.query_drop("COMMIT")?;
            self.in_tx = false;
        }
        Ok(())
    }

    fn rollback(&mut self) -> Result<()> {
        if self.in_tx {
            self.in_tx = false;
            self.conn.query_drop("ROLLBACK")?;
        }
        Ok(())
    }

    fn server_time(&mut self) -> Result<String> {
        let now: Option<String> = self.conn.query_first("SELECT CAST(NOW() AS CHAR)")?;
        now.ok_or_else(|| anyhow::anyhow!("mysql returned no server time"))
    }
}

impl From<&SqlValue> for Value {
    fn from(v: &SqlValue) -> Self {
        match v {
            SqlValue::Null => Value::NULL,
            SqlValue::Int(i) => Value::Int(*i),
            SqlValue::Float(f) => Value::Double(*f),
            SqlValue::Text(s) => Value::Bytes(s.as_bytes().to_vec()),
            SqlValue::Date(d) => Value::Date(
                d.year() as u16,
                d.month() as u8,
                d.day() as u8,
                0,
                0,
                0,
                0,
            ),
            SqlValue::Time(t) => Value::Time(
                false,
                0,
                t.hour() as u8,
                t.minute() as u8,
                t.second() as u8,
                0,
            ),
        }
    }
}
