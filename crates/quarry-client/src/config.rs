use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// User-level defaults for the CLI, read from `~/.config/quarry/config.toml`.
///
/// Everything is optional; command-line flags override whatever is set here.
/// Passwords never live in the config file, only in `QUARRY_PASSWORD` or a
/// flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct UserConfig {
    /// Service root, e.g. `https://forge.example.net`.
    #[serde(default)]
    pub url: Option<String>,
    /// Login name for the session.
    #[serde(default)]
    pub login: Option<String>,
    /// Default project group id.
    #[serde(default)]
    pub group: Option<i32>,
    /// Default tracker id.
    #[serde(default)]
    pub tracker: Option<i32>,
    /// Default report id for column-based listings.
    #[serde(default)]
    pub report: Option<i32>,
}

/// Load the user config from the platform config directory.
///
/// A missing file (or an undeterminable config directory) yields defaults.
///
/// # Errors
///
/// Fails when the file exists but cannot be read or parsed.
pub fn load_user_config() -> Result<UserConfig> {
    let Some(config_dir) = dirs::config_dir() else {
        return Ok(UserConfig::default());
    };
    load_from(&config_dir.join("quarry/config.toml"))
}

/// Load a config file from an explicit path; a missing file yields defaults.
///
/// # Errors
///
/// Fails when the file exists but cannot be read or parsed.
pub fn load_from(path: &Path) -> Result<UserConfig> {
    if !path.exists() {
        return Ok(UserConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<UserConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_uses_defaults() {
        let root = TempDir::new().expect("temp dir");
        let cfg = load_from(&root.path().join("config.toml")).expect("load should succeed");
        assert_eq!(cfg, UserConfig::default());
    }

    #[test]
    fn parses_full_config() {
        let root = TempDir::new().expect("temp dir");
        let path = root.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
url = "https://forge.example.net"
login = "mchang"
group = 101
tracker = 102
report = 100
"#,
        )
        .expect("write config");

        let cfg = load_from(&path).expect("load should succeed");
        assert_eq!(cfg.url.as_deref(), Some("https://forge.example.net"));
        assert_eq!(cfg.login.as_deref(), Some("mchang"));
        assert_eq!(cfg.group, Some(101));
        assert_eq!(cfg.tracker, Some(102));
        assert_eq!(cfg.report, Some(100));
    }

    #[test]
    fn partial_config_leaves_rest_unset() {
        let root = TempDir::new().expect("temp dir");
        let path = root.path().join("config.toml");
        std::fs::write(&path, "url = \"https://forge.example.net\"\n").expect("write config");

        let cfg = load_from(&path).expect("load should succeed");
        assert_eq!(cfg.url.as_deref(), Some("https://forge.example.net"));
        assert_eq!(cfg.login, None);
        assert_eq!(cfg.group, None);
    }

    #[test]
    fn unparsable_config_names_the_path() {
        let root = TempDir::new().expect("temp dir");
        let path = root.path().join("config.toml");
        std::fs::write(&path, "url = [not toml").expect("write config");

        let err = load_from(&path).expect_err("parse must fail");
        assert!(err.to_string().contains("Failed to parse"));
    }
}
