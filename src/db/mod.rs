mod mysql;
mod postgres;
mod sqlite;

use crate::connection::Connection;
use crate::record::{Row, TableName};
use anyhow::Result;
use serde::Deserialize;

pub use mysql::Mysql;
pub use postgres::Postgres;
pub use sqlite::Sqlite;

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseType {
    #[serde(rename = "mysql")]
    MySql,
    #[serde(rename = "postgres")]
    Postgres,
    #[serde(rename = "sqlite")]
    Sqlite,
}

impl DatabaseType {
    pub fn as_str(self) -> &'static str {
        match self {
            DatabaseType::MySql => "mysql",
            DatabaseType::Postgres => "postgres",
            DatabaseType::Sqlite => "sqlite",
        }
    }
}

/// Write side of a database connection as the batch loader sees it.
///
/// A transaction is opened implicitly by the first `execute_batch` after a
/// `commit` or `rollback`.
pub trait Destination {
    /// Placeholder for the 1-based parameter `position`.
    fn placeholder(&self, _position: usize) -> String {
        "?".to_string()
    }

    /// Table reference as written in the INSERT statement.
    fn qualify(&self, table: &TableName) -> String {
        table.to_string()
    }

    /// Run `sql` once per row inside the open transaction.
    fn execute_batch(&mut self, sql: &str, rows: &[Row]) -> Result<()>;

    fn commit(&mut self) -> Result<()>;

    fn rollback(&mut self) -> Result<()>;

    /// Server clock as text; doubles as a connectivity check.
    fn server_time(&mut self) -> Result<String>;
}

pub struct DB;

impl DB {
    pub fn database_url(conn: &Connection) -> Result<String> {
        match conn.r#type {
            DatabaseType::MySql => Mysql::database_url(conn),
            DatabaseType::Postgres => Postgres::database_url(conn),
            DatabaseType::Sqlite => Sqlite::database_url(conn),
        }
    }

    pub fn connect(conn: &Connection) -> Result<Box<dyn Destination>> {
        Ok(match conn.r#type {
            DatabaseType::MySql => Box::new(Mysql::connect(conn)?),
            DatabaseType::Postgres => Box::new(Postgres::connect(conn)?),
            DatabaseType::Sqlite => Box::new(Sqlite::connect(conn)?),
        })
    }
}

/// Build `user:password@host:port[/database]` URLs for the network backends.
fn network_url(scheme: &str, conn: &Connection) -> Result<String> {
    let user = conn
        .user
        .as_ref()
        .ok_or_else(|| anyhow::anyhow!("type {} needs the user field", scheme))?;
    let host = conn
        .host
        .as_ref()
        .ok_or_else(|| anyhow::anyhow!("type {} needs the host field", scheme))?;
    let port = conn
        .port
        .as_ref()
        .ok_or_else(|| anyhow::anyhow!("type {} needs the port field", scheme))?;
    let password = conn
        .password
        .as_ref()
        .map_or(String::new(), |p| p.to_string());

    match conn.database.as_ref() {
        Some(database) => Ok(format!(
            "{scheme}://{user}:{password}@{host}:{port}/{database}",
        )),
        None => Ok(format!("{scheme}://{user}:{password}@{host}:{port}")),
    }
}
