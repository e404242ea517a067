use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_INTERVAL_MS: u64 = 30_000;
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub page: PageSettings,
    pub poller: PollerSettings,
    pub notifications: NotificationSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            page: PageSettings::default(),
            poller: PollerSettings::default(),
            notifications: NotificationSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PageSettings {
    /// statuspage.io page identifier, e.g. `kctbh9vrtdwd` for GitHub.
    pub id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PollerSettings {
    pub interval_ms: u64,
    pub history_capacity: usize,
}

impl Default for PollerSettings {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_INTERVAL_MS,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationSettings {
    pub enabled: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Settings {
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("statuswatch").join("config.toml"))
    }

    pub fn load() -> Result<Self> {
        let path = Self::config_path().context("Could not determine config directory")?;

        if !path.exists() {
            tracing::info!(?path, "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        tracing::info!(?path, "Loaded config");
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.poller.interval_ms == 0 {
            anyhow::bail!("poller.interval_ms must be greater than 0");
        }

        if self.poller.history_capacity == 0 {
            anyhow::bail!("poller.history_capacity must be greater than 0");
        }

        if matches!(&self.page.id, Some(id) if id.trim().is_empty()) {
            anyhow::bail!("page.id must not be empty when set");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert!(settings.page.id.is_none());
        assert_eq!(settings.poller.interval_ms, 30_000);
        assert_eq!(settings.poller.history_capacity, 50);
        assert!(settings.notifications.enabled);
    }

    #[test]
    fn test_settings_validation() {
        let mut settings = Settings::default();
        assert!(settings.validate().is_ok());

        settings.poller.interval_ms = 0;
        assert!(settings.validate().is_err());

        settings.poller.interval_ms = 5_000;
        settings.poller.history_capacity = 0;
        assert!(settings.validate().is_err());

        settings.poller.history_capacity = 10;
        settings.page.id = Some("  ".to_string());
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
            [page]
            id = "kctbh9vrtdwd"

            [poller]
            interval_ms = 5000
            history_capacity = 25

            [notifications]
            enabled = false
        "#;

        let settings: Settings = toml::from_str(toml).unwrap();
        assert_eq!(settings.page.id.as_deref(), Some("kctbh9vrtdwd"));
        assert_eq!(settings.poller.interval_ms, 5000);
        assert_eq!(settings.poller.history_capacity, 25);
        assert!(!settings.notifications.enabled);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml = r#"
            [page]
            id = "abc123"
        "#;

        let settings: Settings = toml::from_str(toml).unwrap();
        assert_eq!(settings.page.id.as_deref(), Some("abc123"));
        assert_eq!(settings.poller.interval_ms, 30_000);
        assert!(settings.notifications.enabled);
    }
}
