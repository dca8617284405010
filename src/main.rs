mod cmd;
mod config;
mod connection;
mod db;
mod export;
mod generate;
mod loader;
mod logger;
mod pipeline;
mod record;
mod report;
mod table;

use std::process::ExitCode;

use clap::Parser;
use crossterm::style::Stylize;

use crate::cmd::Cli;
use crate::logger::{error, init};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize file logging under the app config directory
    if let Ok(dir) = crate::config::get_app_config_path() {
        let _ = init(dir.join("tradegen.log"), cli.log_level);
    }

    match cmd::run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("{} {:#}", "❌".red(), err);
            error(&format!("fatal error: {:#}", err));
            ExitCode::FAILURE
        }
    }
}
