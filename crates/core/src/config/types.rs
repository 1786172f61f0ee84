use std::collections::HashMap;
use std::path::PathBuf;

use serde::Deserialize;

use crate::templates::UnresolvedPolicy;
use crate::templates::discovery::DEFAULT_TEMPLATE_SUFFIX;

#[derive(Debug, Deserialize)]
pub struct ConfigFile {
    pub version: u32,
    pub profile: Option<String>,
    pub profiles: HashMap<String, Profile>,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
pub struct Profile {
    pub docs_root: String,
    pub templates_dir: String,
    pub output_dir: String,
    /// Variables manifest used when `--vars` is not given.
    pub vars_file: Option<String>,
    /// Manifest target (e.g. a distribution release) used when `--target`
    /// is not given.
    pub target: Option<String>,
    /// File suffix identifying templates. Defaults to `.in`.
    pub template_suffix: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct RenderConfig {
    #[serde(default)]
    pub unresolved: UnresolvedPolicy,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub file_level: Option<String>,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), file_level: None, file: None }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

pub(crate) fn default_template_suffix() -> String {
    DEFAULT_TEMPLATE_SUFFIX.to_string()
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub active_profile: String,
    pub docs_root: PathBuf,
    pub templates_dir: PathBuf,
    pub output_dir: PathBuf,
    pub vars_file: Option<PathBuf>,
    pub target: Option<String>,
    pub template_suffix: String,
    pub render: RenderConfig,
    pub logging: LoggingConfig,
}
