//! Command-line arguments and resolved runtime configuration.

use crate::shell::Shell;
use anyhow::{anyhow, Context};
use clap::Parser;
use log::info;
use std::path::{Path, PathBuf};
use veteri_core::db::open_db;
use veteri_core::{default_log_level, init_logging};

const DEFAULT_LOG_DIR: &str = "logs";

#[derive(Debug, Parser)]
#[command(name = "veteri", version, about = "Veterinary clinic records shell")]
pub struct Cli {
    /// SQLite database file, created when missing
    #[arg(long, env = "VETERI_DB", default_value = "veteri.sqlite3")]
    db: PathBuf,

    /// Directory for rotated log files [default: ./logs]
    #[arg(long, env = "VETERI_LOG_DIR")]
    log_dir: Option<PathBuf>,

    /// trace, debug, info, warn or error [default: debug in debug builds, info otherwise]
    #[arg(long, env = "VETERI_LOG_LEVEL")]
    log_level: Option<String>,
}

/// Configuration with every default applied and paths made absolute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_path: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: String,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        let cwd = std::env::current_dir().context("failed to read the working directory")?;
        let config = self.resolve(&cwd);

        init_logging(&config.log_level, &config.log_dir)
            .map_err(|err| anyhow!("failed to initialize logging: {err}"))?;
        info!(
            "event=cli_start module=cli status=ok db={} log_level={}",
            config.db_path.display(),
            config.log_level
        );

        let conn = open_db(&config.db_path)
            .with_context(|| format!("failed to open database `{}`", config.db_path.display()))?;

        let stdin = std::io::stdin();
        let stdout = std::io::stdout();
        let mut shell = Shell::new(&conn, stdin.lock(), stdout.lock())
            .context("database is not ready for the shell")?;
        shell.run().context("terminal I/O failed")?;
        Ok(())
    }

    /// Applies defaults relative to `cwd`.
    pub fn resolve(self, cwd: &Path) -> Config {
        let log_dir = self
            .log_dir
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR));
        Config {
            db_path: absolutize(cwd, self.db),
            log_dir: absolutize(cwd, log_dir),
            log_level: self
                .log_level
                .unwrap_or_else(|| default_log_level().to_string()),
        }
    }
}

fn absolutize(cwd: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    }
}
