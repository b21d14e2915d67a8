use crate::domain::Priority;
use crate::form::default_categories;
use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log_level: Option<String>,
    pub form: FormConfig,
    pub display: DisplayConfig,
    pub import: ImportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    pub default_priority: Priority,
    pub categories: Vec<String>,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            default_priority: Priority::Medium,
            categories: default_categories(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub color: bool,
    pub bar_width: usize,
    pub max_description_width: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color: true,
            bar_width: 30,
            max_description_width: 48,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// CSV file imported when a session starts
    pub preload: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: Some("info".to_string()),
            form: FormConfig::default(),
            display: DisplayConfig::default(),
            import: ImportConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try primary location: ~/.config/<project>/<project>.yml
        if let Some(config_dir) = dirs::config_dir() {
            let project_name = env!("CARGO_PKG_NAME");
            let primary_config = config_dir.join(project_name).join(format!("{}.yml", project_name));
            if primary_config.exists() {
                match Self::load_from_file(&primary_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::warn!("Failed to load config from {}: {}", primary_config.display(), e);
                    }
                }
            }
        }

        // Try fallback location: ./<project>.yml
        let project_name = env!("CARGO_PKG_NAME");
        let fallback_config = PathBuf::from(format!("{}.yml", project_name));
        if fallback_config.exists() {
            match Self::load_from_file(&fallback_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    log::warn!("Failed to load config from {}: {}", fallback_config.display(), e);
                }
            }
        }

        // No config file found, use defaults
        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let mut config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;
        config.normalize();

        log::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Keep the category list usable: no blanks, no repeats, `Custom` last.
    fn normalize(&mut self) {
        let mut categories: Vec<String> = Vec::new();
        for category in self.form.categories.drain(..) {
            let category = category.trim().to_string();
            if category.is_empty()
                || category.eq_ignore_ascii_case(crate::form::CUSTOM_CATEGORY)
                || categories.iter().any(|c| c.eq_ignore_ascii_case(&category))
            {
                continue;
            }
            categories.push(category);
        }
        categories.push(crate::form::CUSTOM_CATEGORY.to_string());
        self.form.categories = categories;
    }
}
