use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::{
    core::utils::{ensure_dir, PathResolver},
    errors::LedgerError,
    ledger::SchemaVersion,
};

const TMP_SUFFIX: &str = "tmp";

/// Settings persisted at `<home>/config/config.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Schema version whose storage key is active.
    pub schema_version: SchemaVersion,
    pub currency: String,
    pub ui_color_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema_version: SchemaVersion::default(),
            currency: "USD".into(),
            ui_color_enabled: true,
            storage_dir: None,
            export_dir: None,
        }
    }
}

impl Config {
    pub const KEYS: [&'static str; 5] = [
        "schema_version",
        "currency",
        "ui_color_enabled",
        "storage_dir",
        "export_dir",
    ];

    /// Updates one setting from its textual form; `none` clears optional paths.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), LedgerError> {
        let value = value.trim();
        match key {
            "schema_version" => {
                self.schema_version = value.parse().map_err(LedgerError::InvalidInput)?;
            }
            "currency" => {
                if value.is_empty() {
                    return Err(LedgerError::InvalidInput("currency cannot be empty".into()));
                }
                self.currency = value.to_ascii_uppercase();
            }
            "ui_color_enabled" => {
                self.ui_color_enabled = parse_flag(value).ok_or_else(|| {
                    LedgerError::InvalidInput(format!("`{}` is not on/off", value))
                })?;
            }
            "storage_dir" => self.storage_dir = optional_path(value),
            "export_dir" => self.export_dir = optional_path(value),
            other => {
                return Err(LedgerError::InvalidInput(format!(
                    "unknown config key `{}` (expected one of {})",
                    other,
                    Self::KEYS.join(", ")
                )))
            }
        }
        Ok(())
    }

    /// `(key, value)` pairs for display.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        let path_or_default = |path: &Option<PathBuf>| {
            path.as_ref()
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "(default)".into())
        };
        vec![
            ("schema_version", self.schema_version.to_string()),
            ("currency", self.currency.clone()),
            ("ui_color_enabled", self.ui_color_enabled.to_string()),
            ("storage_dir", path_or_default(&self.storage_dir)),
            ("export_dir", path_or_default(&self.export_dir)),
        ]
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Some(true),
        "false" | "off" | "no" | "0" => Some(false),
        _ => None,
    }
}

fn optional_path(value: &str) -> Option<PathBuf> {
    if value.is_empty() || value.eq_ignore_ascii_case("none") {
        None
    } else {
        Some(PathBuf::from(value))
    }
}

/// Loads and saves [`Config`] under the application home.
pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, LedgerError> {
        Self::with_base_dir(PathResolver::resolve_base(None))
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, LedgerError> {
        ensure_dir(&base)?;
        ensure_dir(&PathResolver::config_dir_in(&base))?;
        Ok(Self {
            path: PathResolver::config_file_in(&base),
            base,
        })
    }

    /// Stored config, or defaults when the file does not exist yet.
    pub fn load(&self) -> Result<Config, LedgerError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), LedgerError> {
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn base_dir(&self) -> &Path {
        &self.base
    }

    /// Directory holding the storage keys: the configured override or `<home>/data`.
    pub fn storage_dir(&self, config: &Config) -> PathBuf {
        config
            .storage_dir
            .clone()
            .unwrap_or_else(|| PathResolver::data_dir_in(&self.base))
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), LedgerError> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
