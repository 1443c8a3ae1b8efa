//! Desk configuration.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use circdesk_core::{Category, IntoDate, Item, Patron};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Config file looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "circdesk.yml";

/// Desk configuration stored in `circdesk.yml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeskConfig {
    /// Configuration version.
    #[serde(default = "default_version")]
    pub version: u32,

    /// Patron the console session acts for.
    #[serde(default = "default_patron")]
    pub patron: Patron,

    /// Items available at the desk.
    #[serde(default = "default_catalog")]
    pub catalog: Vec<Item>,

    /// Console session settings.
    #[serde(default)]
    pub session: SessionSettings,
}

fn default_version() -> u32 {
    1
}

fn default_patron() -> Patron {
    Patron::new("1234", "Edward Snowden", "snowden@protonmail.com")
}

fn default_catalog() -> Vec<Item> {
    vec![
        Item::new("111", "Secure by Design", Category::Book),
        Item::new("253", "CitizenFour (video)", Category::Video),
        Item::new("388", "The Snowball (audiobook)", Category::Audio),
        Item::new("117", "Inside the Machine", Category::Book),
        Item::new("189", "Programming Python", Category::Book),
    ]
}

/// Console session settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSettings {
    /// First day of the simulated session (`YYYY-MM-DD`). Defaults to today.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<Value>,

    /// Days the clock moves forward between statements.
    #[serde(default = "default_step_days")]
    pub step_days: u64,
}

fn default_step_days() -> u64 {
    4
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            start_date: None,
            step_days: default_step_days(),
        }
    }
}

impl SessionSettings {
    /// Parsed start date, if one is configured.
    pub fn start_date(&self) -> Result<Option<NaiveDate>> {
        self.start_date
            .as_ref()
            .map(IntoDate::into_date)
            .transpose()
            .context("Invalid session.start_date")
    }
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            patron: default_patron(),
            catalog: default_catalog(),
            session: SessionSettings::default(),
        }
    }
}

impl DeskConfig {
    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, `circdesk.yml` in `dir` is
    /// used when present, otherwise the built-in defaults.
    pub fn load(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let candidate = dir.join(DEFAULT_CONFIG_FILE);
                if !candidate.exists() {
                    debug!(dir = %dir.display(), "No config file, using defaults");
                    return Ok(Self::default());
                }
                candidate
            }
        };

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = Self::from_yaml(&content)
            .with_context(|| format!("Invalid config {}", path.display()))?;

        debug!(path = %path.display(), items = config.catalog.len(), "Loaded config");
        Ok(config)
    }

    /// Parse and validate a YAML config document.
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        config.session.start_date()?;
        config.check_catalog()?;
        Ok(config)
    }

    /// Look up a catalog item by id.
    #[must_use]
    pub fn item(&self, id: &str) -> Option<&Item> {
        self.catalog.iter().find(|i| i.id == id)
    }

    fn check_catalog(&self) -> Result<()> {
        for (i, item) in self.catalog.iter().enumerate() {
            if self.catalog[..i].iter().any(|other| other.id == item.id) {
                anyhow::bail!("duplicate catalog item id: {}", item.id);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = DeskConfig::default();
        assert_eq!(config.version, 1);
        assert_eq!(config.patron.id, "1234");
        assert_eq!(config.catalog.len(), 5);
        assert_eq!(config.session.step_days, 4);
        assert_eq!(config.session.start_date().unwrap(), None);
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config = DeskConfig::from_yaml(
            r#"
patron:
  id: "42"
  name: Ada
  email: ada@example.com
session:
  start_date: "2024-01-01"
"#,
        )
        .unwrap();

        assert_eq!(config.patron.name, "Ada");
        assert_eq!(config.catalog, default_catalog());
        assert_eq!(config.session.step_days, 4);
        assert_eq!(
            config.session.start_date().unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 1)
        );
    }

    #[test]
    fn test_unknown_category_rejected() {
        let result = DeskConfig::from_yaml(
            r#"
catalog:
  - id: "1"
    title: Vinyl
    category: record
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_bad_start_date_rejected() {
        let result = DeskConfig::from_yaml("session:\n  start_date: \"01/02/2024\"\n");
        let err = result.unwrap_err();
        assert!(format!("{err:#}").contains("invalid date string"));
    }

    #[test]
    fn test_start_date_must_be_text() {
        let err = DeskConfig::from_yaml("session:\n  start_date: 20240101\n").unwrap_err();
        assert!(format!("{err:#}").contains("date must be a string or a date, got number"));
    }

    #[test]
    fn test_legacy_category_codes() {
        let config = DeskConfig::from_yaml(
            r#"
catalog:
  - { id: "388", title: The Snowball, category: 2 }
"#,
        )
        .unwrap();
        assert_eq!(config.catalog[0].category, Category::Audio);

        let err = DeskConfig::from_yaml(
            r#"
catalog:
  - { id: "999", title: Mystery, category: 9 }
"#,
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("unknown item category: 9"));
    }

    #[test]
    fn test_duplicate_item_ids_rejected() {
        let result = DeskConfig::from_yaml(
            r#"
catalog:
  - { id: "1", title: A, category: book }
  - { id: "1", title: B, category: audio }
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_dir() {
        let tmp = TempDir::new().unwrap();
        let config = DeskConfig::load(None, tmp.path()).unwrap();
        assert_eq!(config, DeskConfig::default());

        fs::write(
            tmp.path().join(DEFAULT_CONFIG_FILE),
            "session:\n  step_days: 7\n",
        )
        .unwrap();
        let config = DeskConfig::load(None, tmp.path()).unwrap();
        assert_eq!(config.session.step_days, 7);
    }

    #[test]
    fn test_load_missing_explicit_path_fails() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("nope.yml");
        assert!(DeskConfig::load(Some(&missing), tmp.path()).is_err());
    }
}
