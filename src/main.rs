// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;
mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::{Env, Target};
use log::{info, warn};
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;
use std::rc::Rc;

use virtual_wardrobe::{Config, KeyValueStore, MemoryStore, SqliteStore};

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    let mut config = Config::load(args.config.as_deref()).context("Failed to load config")?;
    if let Some(db) = &args.db {
        config.db_path = db.clone();
    }
    if args.seed {
        config.seed_on_first_run = true;
    }
    config.validate()?;

    if let Some(cli::Command::Config(cmd)) = &args.command {
        return cli::run_config(cmd, &config, args.config.as_deref());
    }

    init_logging(&config, interactive(&args.command));

    // A database we cannot open still leaves a usable, unsaved session
    let backend: Rc<dyn KeyValueStore> = match SqliteStore::open(&config.db_path) {
        Ok(store) => {
            info!("Using database {}", config.db_path.display());
            Rc::new(store)
        }
        Err(e) => {
            warn!(
                "Could not open {}: {}. Changes will not be saved.",
                config.db_path.display(),
                e
            );
            Rc::new(MemoryStore::new())
        }
    };

    let mut session = cli::Session::open(backend, config.load_fallback());
    cli::run(args.command, &mut session)
}

#[cfg(feature = "tui")]
fn interactive(command: &Option<cli::Command>) -> bool {
    matches!(command, None | Some(cli::Command::Browse))
}

#[cfg(not(feature = "tui"))]
fn interactive(_command: &Option<cli::Command>) -> bool {
    false
}

/// stderr for commands; a log file next to the database while the TUI owns the screen
fn init_logging(config: &Config, interactive: bool) {
    let mut builder =
        env_logger::Builder::from_env(Env::default().default_filter_or(config.log_level.as_str()));

    if interactive {
        let log_path = config.db_path.with_extension("log");
        match open_log_file(&log_path) {
            Ok(file) => {
                builder.target(Target::Pipe(Box::new(file)));
            }
            Err(e) => {
                // logger is not up yet
                eprintln!("❌ Could not open {}: {}. Logging is off.", log_path.display(), e);
                builder.filter_level(log::LevelFilter::Off);
            }
        }
    }

    builder.init();
}

/// Append-mode log file, creating its directory
fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_log_file_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("wardrobe.log");

        open_log_file(&path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_open_log_file_reports_unusable_directory() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, "").unwrap();

        assert!(open_log_file(&blocker.join("wardrobe.log")).is_err());
    }
}
