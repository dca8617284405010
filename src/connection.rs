use anyhow::Result;
use serde::Deserialize;

use crate::db::DatabaseType;

#[derive(Debug, Deserialize, Clone)]
pub struct Connection {
    pub r#type: DatabaseType,
    pub name: Option<String>,
    pub user: Option<String>,
    pub host: Option<String>,
    pub port: Option<u64>,
    pub path: Option<std::path::PathBuf>,
    pub password: Option<String>,
    pub database: Option<String>,
}

impl Connection {
    pub fn label(&self) -> String {
        let kind = self.r#type.as_str();
        match (&self.name, &self.database, &self.path) {
            (Some(name), _, _) => format!("{} ({})", name, kind),
            (None, Some(db), _) => format!("{} ({})", db, kind),
            (None, None, Some(path)) => format!("{} ({})", path.display(), kind),
            _ => kind.to_string(),
        }
    }
}

/// Pick a connection by name, or the only/first one when no name is given.
pub fn select<'a>(connections: &'a [Connection], name: Option<&str>) -> Result<&'a Connection> {
    match name {
        Some(wanted) => connections
            .iter()
            .find(|c| c.name.as_deref() == Some(wanted))
            .ok_or_else(|| anyhow::anyhow!("no connection named '{}' in config", wanted)),
        None => connections
            .first()
            .ok_or_else(|| anyhow::anyhow!("no connections configured")),
    }
}
