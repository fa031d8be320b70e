//! Client configuration file.
//!
//! Read from `<config dir>/stash/config.toml` unless a path is given on the
//! command line. Every field is optional.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: u32 = 25;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Label shown at the start of the prompt
    pub prompt: String,

    /// Where interactive history is kept
    pub history_file: Option<PathBuf>,

    /// Maximum number of history entries
    pub history_size: usize,

    /// Default `per_page` for listings
    pub page_size: u32,

    /// Tracing filter directive, overridden by `RUST_LOG`
    pub log_filter: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prompt: "stash".to_string(),
            history_file: None,
            history_size: 1000,
            page_size: DEFAULT_PAGE_SIZE,
            log_filter: None,
        }
    }
}

impl Config {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("stash").join("config.toml"))
    }

    /// Load an explicit file, or the default file when it exists.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            bail!("page_size must be at least 1");
        }
        Ok(())
    }

    /// History file location, falling back to the user data directory.
    pub fn history_path(&self) -> Option<PathBuf> {
        self.history_file
            .clone()
            .or_else(|| dirs::data_dir().map(|dir| dir.join("stash").join("history")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let file = write_config("page_size = 50\nprompt = \"lib\"\n");
        let config = Config::load(Some(file.path())).unwrap();

        assert_eq!(config.page_size, 50);
        assert_eq!(config.prompt, "lib");
        assert_eq!(config.history_size, Config::default().history_size);
        assert_eq!(config.log_filter, None);
    }

    #[test]
    fn explicit_history_file_wins() {
        let file = write_config("history_file = \"/tmp/stash-history\"\n");
        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.history_path(), Some(PathBuf::from("/tmp/stash-history")));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(Some(&dir.path().join("absent.toml"))).unwrap_err();
        assert!(err.to_string().starts_with("Failed to read config file"));
    }

    #[test]
    fn rejects_bad_values() {
        let file = write_config("page_size = 0\n");
        assert!(Config::load(Some(file.path())).is_err());

        let file = write_config("page_size = \"many\"\n");
        let err = Config::load(Some(file.path())).unwrap_err();
        assert!(err.to_string().starts_with("Failed to parse config file"));
    }
}
