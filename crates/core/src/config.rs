use serde::{Deserialize, Serialize};

use crate::matcher::DEFAULT_CUTOFF;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub matching: MatchingConfig,
    #[serde(default)]
    pub teach: TeachConfig,
    #[serde(default)]
    pub vocabulary: VocabularyConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_store_path")]
    pub path: String,
    #[serde(default = "default_backup_path")]
    pub backup_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchingConfig {
    #[serde(default = "default_cutoff")]
    pub cutoff: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeachConfig {
    /// Reply (compared case-insensitively) that declines to teach.
    #[serde(default = "default_skip_word")]
    pub skip_word: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VocabularyConfig {
    /// TOML file overriding the built-in word tables.
    #[serde(default)]
    pub path: Option<String>,
}

fn default_store_path() -> String {
    "knowledge_base.json".to_string()
}

fn default_backup_path() -> String {
    "kb_backup.json".to_string()
}

fn default_cutoff() -> f64 {
    DEFAULT_CUTOFF
}

fn default_skip_word() -> String {
    "skip".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
            backup_path: default_backup_path(),
        }
    }
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            cutoff: default_cutoff(),
        }
    }
}

impl Default for TeachConfig {
    fn default() -> Self {
        Self {
            skip_word: default_skip_word(),
        }
    }
}

pub fn load(path: Option<&str>) -> anyhow::Result<AppConfig> {
    let mut settings = config::Config::builder();
    if let Some(p) = path {
        settings = settings.add_source(config::File::with_name(p));
    } else {
        settings = settings.add_source(config::File::with_name("config/default").required(false));
    }
    let cfg = settings.build()?;
    let app: AppConfig = cfg.try_deserialize()?;
    if !(0.0..=1.0).contains(&app.matching.cutoff) {
        anyhow::bail!(
            "matching.cutoff must be between 0 and 1, got {}",
            app.matching.cutoff
        );
    }
    Ok(app)
}
