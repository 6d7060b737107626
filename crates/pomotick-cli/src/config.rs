//! TOML-based shell configuration.
//!
//! Stores terminal-shell preferences:
//! - Notification toggles
//! - Status line appearance
//!
//! Configuration is stored at `~/.config/pomotick/config.toml`; the directory
//! can be overridden with `POMOTICK_CONFIG_DIR`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Notification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

/// Status line configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Prefix the status line with the interval glyph.
    #[serde(default = "default_true")]
    pub glyphs: bool,
}

/// Shell configuration.
///
/// Serialized to/from TOML at `~/.config/pomotick/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub notifications: NotificationsConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

fn default_true() -> bool {
    true
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { glyphs: true }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            notifications: NotificationsConfig::default(),
            display: DisplayConfig::default(),
        }
    }
}

impl Config {
    fn dir() -> PathBuf {
        if let Ok(dir) = std::env::var("POMOTICK_CONFIG_DIR") {
            return PathBuf::from(dir);
        }
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("pomotick")
    }

    /// Location of the config file.
    pub fn path() -> PathBuf {
        Self::dir().join("config.toml")
    }

    /// Load from disk, falling back to defaults when the file is missing or
    /// does not parse.
    pub fn load() -> Self {
        let path = Self::path();
        match std::fs::read_to_string(&path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(cfg) => cfg,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "config file ignored");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        std::fs::create_dir_all(Self::dir())?;
        let content = toml::to_string_pretty(self)?;
        std::fs::write(Self::path(), content)?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = value_at(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key and persist the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed as
    /// the field's type, or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), Box<dyn std::error::Error>> {
        let mut json = serde_json::to_value(&*self)?;
        write_at(&mut json, key, value)?;
        *self = serde_json::from_value(json)?;
        self.save()?;
        Ok(())
    }
}

fn value_at<'a>(root: &'a serde_json::Value, key: &str) -> Option<&'a serde_json::Value> {
    if key.is_empty() {
        return None;
    }
    let mut current = root;
    for part in key.split('.') {
        current = current.get(part)?;
    }
    Some(current)
}

fn write_at(
    root: &mut serde_json::Value,
    key: &str,
    value: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut parts = key.split('.').peekable();
    if parts.peek().is_none() {
        return Err("config key is empty".into());
    }

    let mut current = root;
    while let Some(part) = parts.next() {
        let is_leaf = parts.peek().is_none();
        if is_leaf {
            let obj = current
                .as_object_mut()
                .ok_or_else(|| format!("unknown config key: {key}"))?;
            let existing = obj
                .get(part)
                .ok_or_else(|| format!("unknown config key: {key}"))?;

            let new_value = match existing {
                serde_json::Value::Bool(_) => serde_json::Value::Bool(
                    value
                        .parse::<bool>()
                        .map_err(|_| format!("cannot parse '{value}' as bool"))?,
                ),
                serde_json::Value::Object(_) => {
                    return Err(format!("config key is not a leaf: {key}").into());
                }
                _ => serde_json::Value::String(value.into()),
            };

            obj.insert(part.to_string(), new_value);
            return Ok(());
        }

        current = current
            .get_mut(part)
            .ok_or_else(|| format!("unknown config key: {key}"))?;
    }

    Err(format!("unknown config key: {key}").into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert!(parsed.notifications.enabled);
        assert!(parsed.display.glyphs);
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let parsed: Config = toml::from_str("").unwrap();
        assert!(parsed.notifications.enabled);

        let parsed: Config = toml::from_str("[notifications]\nenabled = false\n").unwrap();
        assert!(!parsed.notifications.enabled);
        assert!(parsed.display.glyphs);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("notifications.enabled").as_deref(), Some("true"));
        assert_eq!(cfg.get("display.glyphs").as_deref(), Some("true"));
        assert!(cfg.get("display.missing_key").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn write_at_updates_nested_bool() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        write_at(&mut json, "notifications.enabled", "false").unwrap();
        assert_eq!(
            value_at(&json, "notifications.enabled").unwrap(),
            &serde_json::Value::Bool(false)
        );
    }

    #[test]
    fn write_at_rejects_unknown_key() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        assert!(write_at(&mut json, "display.nonexistent", "true").is_err());
        assert!(write_at(&mut json, "nonexistent.enabled", "true").is_err());
    }

    #[test]
    fn write_at_rejects_non_bool_for_bool_field() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        assert!(write_at(&mut json, "display.glyphs", "sometimes").is_err());
    }

    #[test]
    fn write_at_rejects_section_keys() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        assert!(write_at(&mut json, "notifications", "true").is_err());
    }
}
