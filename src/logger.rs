use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::{Mutex, OnceLock};

static LOG_FILE: OnceLock<Mutex<File>> = OnceLock::new();
static LEVEL: OnceLock<LogLevel> = OnceLock::new();

const LEVEL_ENV: &str = "TRADEGEN_LOG";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            other => Err(format!("unknown log level '{}'", other)),
        }
    }
}

impl LogLevel {
    fn from_env() -> LogLevel {
        std::env::var(LEVEL_ENV)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(LogLevel::Info)
    }

    fn tag(self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }
}

/// Open the log file in append mode. An explicit level wins over `TRADEGEN_LOG`.
pub fn init(log_path: impl AsRef<Path>, level: Option<LogLevel>) -> std::io::Result<PathBuf> {
    let path = log_path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let _ = LOG_FILE.set(Mutex::new(file));
    let _ = LEVEL.set(level.unwrap_or_else(LogLevel::from_env));
    info(&format!("logging initialized: {}", path.display()));
    Ok(path.to_path_buf())
}

fn enabled(level: LogLevel) -> bool {
    level >= *LEVEL.get_or_init(LogLevel::from_env)
}

fn write_line(level: LogLevel, msg: &str) {
    if !enabled(level) {
        return;
    }
    if let Some(m) = LOG_FILE.get() {
        if let Ok(mut f) = m.lock() {
            let ts = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
            let _ = writeln!(f, "{} [{}] {}", ts, level.tag(), msg);
            let _ = f.flush();
        }
    }
}

pub fn error(msg: &str) {
    write_line(LogLevel::Error, msg);
}
pub fn warn(msg: &str) {
    write_line(LogLevel::Warn, msg);
}
pub fn info(msg: &str) {
    write_line(LogLevel::Info, msg);
}
pub fn debug(msg: &str) {
    write_line(LogLevel::Debug, msg);
}
