use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rusqlite::types::{ToSql, ToSqlOutput, Value};

use crate::connection::Connection;
use crate::db::Destination;
use crate::logger::debug;
use crate::record::{Row, SqlValue, TableName};

pub struct Sqlite {
    conn: rusqlite::Connection,
}

impl Sqlite {
    pub fn database_url(conn: &Connection) -> Result<String> {
        let path = sqlite_path(conn)?;
        Ok(format!("sqlite://{}", path.display()))
    }

    pub fn connect(conn: &Connection) -> Result<Self> {
        let path = sqlite_path(conn)?;
        debug(&format!("sqlite: opening {}", path.display()));
        let sc = rusqlite::Connection::open(&path)
            .with_context(|| format!("failed to open sqlite database {}", path.display()))?;
        sc.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(Self::from_connection(sc))
    }

    pub fn from_connection(conn: rusqlite::Connection) -> Self {
        Self { conn }
    }

    #[cfg(test)]
    pub fn raw(&self) -> &rusqlite::Connection {
        &self.conn
    }

    fn begin_if_needed(&mut self) -> Result<()> {
        if self.conn.is_autocommit() {
            self.conn.execute_batch("BEGIN")?;
        }
        Ok(())
    }
}

impl Destination for Sqlite {
    /// SQLite has no schemas; `Finance.Invoice` lands in `Invoice`.
    fn qualify(&self, table: &TableName) -> String {
        format!("\"{}\"", table.name.replace('"', "\"\""))
    }

    fn execute_batch(&mut self, sql: &str, rows: &[Row]) -> Result<()> {
        self.begin_if_needed()?;
        let mut stmt = self.conn.prepare_cached(sql)?;
        for row in rows {
            stmt.execute(rusqlite::params_from_iter(row.iter()))?;
        }
        Ok(())
    }

    fn commit(&mut self) -> Result<()> {
        if !self.conn.is_autocommit() {
            self.conn.execute_batch("COMMIT")?;
        }
        Ok(())
    }

    fn rollback(&mut self) -> Result<()> {
        // a failed statement may already have ended the transaction
        if !self.conn.is_autocommit() {
            self.conn.execute_batch("ROLLBACK")?;
        }
        Ok(())
    }

    fn server_time(&mut self) -> Result<String> {
        Ok(self
            .conn
            .query_row("SELECT datetime('now')", [], |row| row.get::<_, String>(0))?)
    }
}

impl ToSql for SqlValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            SqlValue::Null => ToSqlOutput::Owned(Value::Null),
            SqlValue::Int(v) => ToSqlOutput::Owned(Value::Integer(*v)),
            SqlValue::Float(v) => ToSqlOutput::Owned(Value::Real(*v)),
            SqlValue::Text(s) => ToSqlOutput::from(s.as_str()),
            SqlValue::Date(_) | SqlValue::Time(_) => {
                ToSqlOutput::Owned(Value::Text(self.to_field()))
            }
        })
    }
}

fn sqlite_path(conn: &Connection) -> Result<PathBuf> {
    conn.path.as_ref().map_or(
        Err(anyhow::anyhow!("type sqlite needs the path field")),
        |path| expand_path(path).ok_or_else(|| anyhow::anyhow!("cannot expand file path")),
    )
}

fn expand_path(path: &Path) -> Option<PathBuf> {
    let mut expanded_path = PathBuf::new();
    let mut path_iter = path.iter();
    if path.starts_with("~") {
        path_iter.next()?;
        expanded_path = expanded_path.join(dirs_next::home_dir()?);
    }
    for path in path_iter {
        let path = path.to_str()?;
        expanded_path = if cfg!(unix) && path.starts_with('$') {
            expanded_path.join(std::env::var(path.strip_prefix('$')?).unwrap_or_default())
        } else if cfg!(windows) && path.starts_with('%') && path.ends_with('%') {
            expanded_path
                .join(std::env::var(path.strip_prefix('%')?.strip_suffix('%')?).unwrap_or_default())
        } else {
            expanded_path.join(path)
        }
    }
    Some(expanded_path)
}
