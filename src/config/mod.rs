use crate::core::submit::SubmitPolicy;
use crate::errors::{AppError, AppResult};
use crate::models::form::{DEFAULT_INSTITUTE, DEFAULT_SMD_NAME, FormDefaults};
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

/// Browsers grant roughly this much local storage per origin.
const DEFAULT_QUOTA: u64 = 5 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the draft and the activity log.
    pub storage_dir: String,
    /// Remote endpoint the report is POSTed to.
    pub endpoint: String,
    pub submit_timeout_secs: u64,
    pub min_highlight_words: usize,
    pub max_highlight_words: usize,
    /// Upper bound for everything kept in `storage_dir`; 0 disables it.
    pub storage_quota_bytes: u64,
    /// Where archives are written unless `--out` says otherwise.
    pub output_dir: String,
    pub default_smd_name: String,
    pub default_institute: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_dir: Self::config_dir().to_string_lossy().to_string(),
            endpoint: String::new(),
            submit_timeout_secs: 30,
            min_highlight_words: 1,
            max_highlight_words: 500,
            storage_quota_bytes: DEFAULT_QUOTA,
            output_dir: ".".to_string(),
            default_smd_name: DEFAULT_SMD_NAME.to_string(),
            default_institute: DEFAULT_INSTITUTE.to_string(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("scireport")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".scireport")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("scireport.conf")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).map_err(|_| AppError::ConfigLoad)?;
        serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {e}", path.display())))
    }

    /// Write the configuration file, creating its directory.
    pub fn save(&self) -> AppResult<PathBuf> {
        let path = Self::config_file();
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|_| AppError::ConfigSave)?;
        }
        let yaml = serde_yaml::to_string(self).map_err(|e| AppError::Config(e.to_string()))?;
        fs::write(&path, yaml).map_err(|_| AppError::ConfigSave)?;
        Ok(path)
    }

    /// Create the config directory, write a fresh config file (skipped in
    /// test mode) and make sure the storage directory exists.
    pub fn init_all(storage_override: Option<String>, is_test: bool) -> AppResult<Self> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        let mut config = Config::default();
        if let Some(custom) = storage_override {
            config.storage_dir = Self::resolve_storage(&custom).to_string_lossy().to_string();
        }

        if !is_test {
            config.save()?;
        }

        fs::create_dir_all(config.storage_path())?;
        Ok(config)
    }

    /// Relative storage names live under the config directory.
    pub fn resolve_storage(name: &str) -> PathBuf {
        let p = expand_tilde(name);
        if p.is_absolute() {
            p
        } else {
            Self::config_dir().join(p)
        }
    }

    pub fn storage_path(&self) -> PathBuf {
        expand_tilde(&self.storage_dir)
    }

    pub fn output_path(&self) -> PathBuf {
        expand_tilde(&self.output_dir)
    }

    pub fn policy(&self) -> SubmitPolicy {
        SubmitPolicy {
            min_words: self.min_highlight_words.max(1),
            max_words: self.max_highlight_words,
        }
    }

    pub fn form_defaults(&self) -> FormDefaults {
        FormDefaults {
            smd_name: self.default_smd_name.clone(),
            institute_name: self.default_institute.clone(),
        }
    }
}
