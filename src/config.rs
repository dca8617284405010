use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::connection::Connection;
use crate::table::TableKind;

const APP_NAME: &str = "tradegen";
const CONFIG_FILE: &str = "config.yaml";

pub const DEFAULT_CHUNK_SIZE: usize = 1000;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub connections: Vec<Connection>,
    pub generation: GenerationSettings,
}

/// Knobs for the table builders and the batch loader.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenerationSettings {
    /// Fixed seed for reproducible runs; a random one is drawn when absent.
    pub seed: Option<u64>,
    /// "Today" for every generated date.
    pub base_date: NaiveDate,
    /// Finance dates are drawn from `base_date - date_window_days ..= base_date`.
    pub date_window_days: u32,
    pub chunk_size: usize,
    /// Added to every generated primary key, for topping up an existing database.
    pub id_offset: i64,
    pub scale: f64,
    /// Per-table row count overrides keyed by table name.
    pub rows: BTreeMap<String, usize>,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            seed: None,
            base_date: NaiveDate::from_ymd_opt(2025, 6, 26).unwrap_or_default(),
            date_window_days: 0,
            chunk_size: DEFAULT_CHUNK_SIZE,
            id_offset: 0,
            scale: 1.0,
            rows: BTreeMap::new(),
        }
    }
}

impl GenerationSettings {
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            anyhow::bail!("chunk_size must be at least 1");
        }
        if !self.scale.is_finite() || self.scale < 0.0 {
            anyhow::bail!("scale must be a non-negative number, got {}", self.scale);
        }
        if self
            .base_date
            .checked_sub_signed(Duration::days(i64::from(self.date_window_days)))
            .is_none()
        {
            anyhow::bail!(
                "date_window_days {} reaches before the earliest representable date",
                self.date_window_days
            );
        }
        if self.id_offset < 0 {
            anyhow::bail!("id_offset must not be negative");
        }
        for name in self.rows.keys() {
            name.parse::<TableKind>()
                .map_err(|e| anyhow::anyhow!("generation.rows: {}", e))?;
        }
        Ok(())
    }

    /// Row count for a table after overrides and scaling.
    pub fn rows_for(&self, kind: TableKind) -> usize {
        let base = self
            .rows
            .iter()
            .find(|(name, _)| name.parse::<TableKind>().ok() == Some(kind))
            .map_or(kind.default_rows(), |(_, n)| *n);
        let scaled = (base as f64 * self.scale).round() as usize;
        // a scaled-down parent keeps at least one row so its children have keys
        if base > 0 && self.scale > 0.0 {
            scaled.max(1)
        } else {
            scaled
        }
    }
}

impl Config {
    /// Load from an explicit file, or from the app config dir when `path` is None.
    /// A missing default file yields the built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(p) => Self::from_file(p)?,
            None => {
                let default_path = get_app_config_path()?.join(CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(&default_path)?
                } else {
                    Self::default()
                }
            }
        };
        config.generation.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let data = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
        serde_yaml::from_slice(&data)
            .with_context(|| format!("failed to parse YAML at {}", path.display()))
    }
}

/// Return the application config directory path, creating it if missing.
pub fn get_app_config_path() -> Result<PathBuf> {
    let mut path = if cfg!(target_os = "macos") {
        dirs_next::home_dir().map(|h| h.join(".config"))
    } else {
        dirs_next::config_dir()
    }
    .ok_or_else(|| anyhow::anyhow!("failed to find os config dir."))?;

    path.push(APP_NAME);
    fs::create_dir_all(&path)?;
    Ok(path)
}
