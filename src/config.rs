// ⚙️ Configuration
//
// JSON file at <config dir>/virtual-wardrobe/config.json. Every field is
// optional; a missing file means defaults.

use crate::storage::{StorageError, StorageResult};
use crate::store::LoadFallback;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const APP_DIR: &str = "virtual-wardrobe";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// SQLite file holding both collections
    pub db_path: PathBuf,

    /// Start from the demo items when a collection has never been saved
    pub seed_on_first_run: bool,

    /// Default log filter; RUST_LOG wins when set
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            db_path: default_db_path(),
            seed_on_first_run: false,
            log_level: "info".to_string(),
        }
    }
}

fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join("wardrobe.db")
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.json"))
}

impl Config {
    /// Load from `path`, or from the default location when `None`
    pub fn load(path: Option<&Path>) -> StorageResult<Self> {
        let path = match path.map(Path::to_path_buf).or_else(default_config_path) {
            Some(path) => path,
            None => return Ok(Config::default()),
        };

        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> StorageResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn load_fallback(&self) -> LoadFallback {
        if self.seed_on_first_run {
            LoadFallback::Seed
        } else {
            LoadFallback::Empty
        }
    }

    pub fn validate(&self) -> StorageResult<()> {
        if self.db_path.as_os_str().is_empty() {
            return Err(StorageError::Unavailable("db_path is empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert!(config.db_path.ends_with("virtual-wardrobe/wardrobe.db"));
        assert!(!config.seed_on_first_run);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.load_fallback(), LoadFallback::Empty);
    }

    #[test]
    fn test_config_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load(Some(dir.path().join("absent.json").as_path())).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_config_partial_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"seed_on_first_run": true}"#).unwrap();

        let config = Config::load(Some(path.as_path())).unwrap();
        assert!(config.seed_on_first_run);
        assert_eq!(config.load_fallback(), LoadFallback::Seed);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_config_save_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = Config {
            db_path: dir.path().join("w.db"),
            seed_on_first_run: true,
            log_level: "debug".to_string(),
        };
        config.save(&path).unwrap();

        assert_eq!(Config::load(Some(path.as_path())).unwrap(), config);
    }

    #[test]
    fn test_config_rejects_bad_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ nope").unwrap();

        assert!(matches!(
            Config::load(Some(path.as_path())),
            Err(StorageError::Serialization(_))
        ));
    }
}
