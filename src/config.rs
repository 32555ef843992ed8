//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/taxforge/taxforge.toml`
//! 3. Local config: `<project_dir>/.taxforge.toml`
//! 4. Environment variables: `TAXFORGE_*` prefix, `__` between nested keys
//!    (e.g. `TAXFORGE_RECORDS__OUTPUT_DIR`)

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::DEFAULT_AFFIRMATIVE_TOKEN;

/// Header names of the source table columns.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ColumnSettings {
    #[serde(rename = "type")]
    pub type_name: String,
    pub subtype: String,
    pub detail: String,
    pub connected_to_year: String,
    pub campaign_name: String,
}

impl Default for ColumnSettings {
    fn default() -> Self {
        Self {
            type_name: "Type".into(),
            subtype: "SubType".into(),
            detail: "Detail".into(),
            connected_to_year: "Connected to a Year".into(),
            campaign_name: "Campaign Name".into(),
        }
    }
}

/// Custom metadata record package settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RecordSettings {
    /// Package root (objects/, customMetadata/, package.xml)
    pub output_dir: PathBuf,
    /// API name of the metadata type, e.g. `Financial_Campaign_Config__mdt`
    pub object_name: String,
    /// Prefix of every record member name
    pub file_prefix: String,
    pub object_label: String,
    pub plural_label: String,
}

impl Default for RecordSettings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("deploy_pkg"),
            object_name: "Financial_Campaign_Config__mdt".into(),
            file_prefix: "Financial_Campaign_Config".into(),
            object_label: "Financial Campaign Config".into(),
            plural_label: "Financial Campaign Configs".into(),
        }
    }
}

/// Dependent picklist package settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PicklistSettings {
    /// Package root (objects/, standardValueSets/, package.xml)
    pub output_dir: PathBuf,
    /// Object owning the SubType and Detail fields
    pub object: String,
    /// Standard value set backing the Type field
    pub standard_value_set: String,
    /// Controlling field of the SubType picklist
    pub type_field: String,
    pub subtype_field: String,
    pub detail_field: String,
}

impl Default for PicklistSettings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("deploy_package"),
            object: "Campaign".into(),
            standard_value_set: "CampaignType".into(),
            type_field: "Type".into(),
            subtype_field: "SubType__c".into(),
            detail_field: "Detail__c".into(),
        }
    }
}

/// Unified configuration for taxforge.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Value of the "connected to a year" column that means true (case-insensitive)
    pub affirmative_token: String,
    /// Metadata API version written to package.xml
    pub api_version: String,
    pub columns: ColumnSettings,
    pub records: RecordSettings,
    pub picklists: PicklistSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            affirmative_token: DEFAULT_AFFIRMATIVE_TOKEN.into(),
            api_version: "58.0".into(),
            columns: ColumnSettings::default(),
            records: RecordSettings::default(),
            picklists: PicklistSettings::default(),
        }
    }
}

/// Get the XDG config directory for taxforge.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "taxforge").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("taxforge.toml"))
}

/// Get the path to the local config file in a project directory.
pub fn local_config_path(project_dir: &Path) -> PathBuf {
    project_dir.join(".taxforge.toml")
}

/// Expand `~`, `$VAR` and `${VAR}` in a path string.
fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

impl Settings {
    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `project_dir` - Optional directory holding a local `.taxforge.toml`
    pub fn load(project_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let defaults = Config::try_from(&Settings::default()).map_err(config_err)?;
        let mut builder = Config::builder().add_source(defaults);

        if let Some(global_path) = global_config_path() {
            builder = builder.add_source(File::from(global_path).required(false));
        }

        if let Some(dir) = project_dir {
            builder = builder.add_source(File::from(local_config_path(dir)).required(false));
        }

        builder = builder.add_source(
            Environment::with_prefix("TAXFORGE")
                .prefix_separator("_")
                .separator("__"),
        );

        let config = builder.build().map_err(config_err)?;
        let mut settings: Self = config.try_deserialize().map_err(config_err)?;

        // Expand ~ and $VAR in path-like fields
        settings.expand_paths();

        Ok(settings)
    }

    /// Load a single TOML file on top of the compiled defaults (no global, no env).
    pub fn from_file(path: &Path) -> Result<Self, ApplicationError> {
        let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
            message: format!("read {}: {}", path.display(), e),
        })?;
        let mut settings: Self = toml::from_str(&content).map_err(|e| ApplicationError::Config {
            message: format!("parse {}: {}", path.display(), e),
        })?;
        settings.expand_paths();
        Ok(settings)
    }

    fn expand_paths(&mut self) {
        let records = expand_env_vars(self.records.output_dir.to_string_lossy().as_ref());
        self.records.output_dir = PathBuf::from(records);

        let picklists = expand_env_vars(self.picklists.output_dir.to_string_lossy().as_ref());
        self.picklists.output_dir = PathBuf::from(picklists);
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# taxforge configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/taxforge/taxforge.toml
#   Local:  <project_dir>/.taxforge.toml
#   Env:    TAXFORGE_* environment variables, e.g. TAXFORGE_RECORDS__OUTPUT_DIR

# Value of the "connected to a year" column that means true (case-insensitive)
# affirmative_token = "yes"

# Metadata API version written to package.xml
# api_version = "58.0"

[columns]
# type = "Type"
# subtype = "SubType"
# detail = "Detail"
# connected_to_year = "Connected to a Year"
# campaign_name = "Campaign Name"

[records]
# output_dir = "deploy_pkg"
# object_name = "Financial_Campaign_Config__mdt"
# file_prefix = "Financial_Campaign_Config"
# object_label = "Financial Campaign Config"
# plural_label = "Financial Campaign Configs"

[picklists]
# output_dir = "deploy_package"
# object = "Campaign"
# standard_value_set = "CampaignType"
# type_field = "Type"
# subtype_field = "SubType__c"
# detail_field = "Detail__c"
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
