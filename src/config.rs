use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::domain::BumpKind;
use crate::error::{Result, TagBumpError};
use crate::git::Backend;

/// File name looked up in the working directory and the user config directory
pub const CONFIG_FILE_NAME: &str = "tagbump.toml";

/// Represents the complete configuration for tagbump.
///
/// Every key is optional; missing keys fall back to the interactive,
/// create-only behavior.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Bump kind used when none is given on the command line
    pub default_bump: String,
    /// Remote that tags are pushed to
    pub remote: String,
    /// Limit for each `git` invocation, in seconds
    pub timeout_secs: u64,
    /// Which git implementation to use
    pub backend: Backend,
    /// Ask before creating the tag
    pub confirm: bool,
    /// Push the tag after creating it
    pub push: bool,
    /// Print the commits since the latest tag
    pub show_log: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            default_bump: BumpKind::default().to_string(),
            remote: "origin".to_string(),
            timeout_secs: 30,
            backend: Backend::default(),
            confirm: true,
            push: false,
            show_log: true,
        }
    }
}

impl Config {
    /// Parse configuration from TOML text and validate it
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(text).map_err(|e| TagBumpError::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            return Err(TagBumpError::config(
                "timeout_secs must be greater than zero",
            ));
        }
        if self.remote.trim().is_empty() {
            return Err(TagBumpError::config("remote must not be empty"));
        }
        self.default_bump.to_lowercase().parse::<BumpKind>()?;
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Locates the configuration file to load, if any.
///
/// Lookup order:
/// 1. `tagbump.toml` in `dir` (the directory tagbump runs in, `-C` included)
/// 2. `tagbump.toml` in the user config directory
pub fn discover_config_path(dir: &Path) -> Option<PathBuf> {
    let local = dir.join(CONFIG_FILE_NAME);
    if local.exists() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .filter(|path| path.exists())
}

/// Loads configuration from file or returns defaults.
///
/// # Arguments
/// * `config_path` - Optional path to a configuration file; it must exist
/// * `search_dir` - Directory searched for `tagbump.toml` when no path is given
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read, parsed, or validated
pub fn load_config(config_path: Option<&Path>, search_dir: &Path) -> Result<Config> {
    let path = match config_path {
        Some(path) => path.to_path_buf(),
        None => match discover_config_path(search_dir) {
            Some(path) => path,
            None => return Ok(Config::default()),
        },
    };

    tracing::debug!(path = %path.display(), "loading configuration");
    let text = fs::read_to_string(&path).map_err(|e| {
        TagBumpError::config(format!("cannot read {}: {}", path.display(), e))
    })?;
    Config::from_toml(&text).map_err(|e| match e {
        TagBumpError::Config(msg) => TagBumpError::config(format!("{}: {}", path.display(), msg)),
        other => other,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.default_bump, "patch");
        assert_eq!(config.remote, "origin");
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.backend, Backend::Cli);
        assert!(config.confirm);
        assert!(!config.push);
        assert!(config.show_log);
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_toml() {
        let config = Config::from_toml(
            r#"
            remote = "upstream"
            push = true
            confirm = false
            backend = "libgit2"
            "#,
        )
        .unwrap();
        assert_eq!(config.remote, "upstream");
        assert!(config.push);
        assert!(!config.confirm);
        assert_eq!(config.backend, Backend::Libgit2);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let err = Config::from_toml("timeout_secs = 0").unwrap_err();
        assert!(matches!(err, TagBumpError::Config(_)));
    }

    #[test]
    fn test_invalid_default_bump_rejected() {
        assert!(Config::from_toml(r#"default_bump = "huge""#).is_err());
        assert!(Config::from_toml(r#"default_bump = "Minor""#).is_ok());
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(Config::from_toml("remotes = []").is_err());
    }

    #[test]
    fn test_validation_error_names_the_file() {
        let dir = tempfile::TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), "timeout_secs = 0\n").unwrap();

        let err = load_config(None, dir.path()).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains(CONFIG_FILE_NAME), "got: {}", msg);
        assert!(msg.contains("timeout_secs"), "got: {}", msg);
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let err =
            load_config(Some(Path::new("/nonexistent/tagbump.toml")), Path::new(".")).unwrap_err();
        assert!(err.to_string().contains("cannot read"));
    }
}
