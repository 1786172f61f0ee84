use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::templates::discovery::{
    TemplateDiscoveryError, TemplateInfo, discover_templates,
};

#[derive(Debug, Error)]
pub enum TemplateRepoError {
    #[error(transparent)]
    Discovery(#[from] TemplateDiscoveryError),

    #[error("template not found: {0}")]
    NotFound(String),

    #[error("failed to read template file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone)]
pub struct LoadedTemplate {
    pub logical_name: String,
    pub path: PathBuf,
    pub content: String,
}

impl LoadedTemplate {
    /// Wrap text that did not come from a templates directory.
    /// `path` defaults to the logical name; callers may replace it.
    pub fn from_string(logical_name: impl Into<String>, content: impl Into<String>) -> Self {
        let logical_name = logical_name.into();
        Self { path: PathBuf::from(&logical_name), logical_name, content: content.into() }
    }
}

pub struct TemplateRepository {
    pub root: PathBuf,
    pub templates: Vec<TemplateInfo>,
}

impl TemplateRepository {
    pub fn new(root: &Path, suffix: &str) -> Result<Self, TemplateDiscoveryError> {
        let templates = discover_templates(root, suffix)?;
        Ok(Self { root: root.to_path_buf(), templates })
    }

    pub fn list_all(&self) -> &[TemplateInfo] {
        &self.templates
    }

    pub fn get_by_name(&self, name: &str) -> Result<LoadedTemplate, TemplateRepoError> {
        let info = self
            .templates
            .iter()
            .find(|t| t.logical_name == name)
            .ok_or_else(|| TemplateRepoError::NotFound(name.to_string()))?;
        Self::load(info)
    }

    pub fn load(info: &TemplateInfo) -> Result<LoadedTemplate, TemplateRepoError> {
        let content = fs::read_to_string(&info.path)
            .map_err(|e| TemplateRepoError::Io { path: info.path.clone(), source: e })?;

        Ok(LoadedTemplate {
            logical_name: info.logical_name.clone(),
            path: info.path.clone(),
            content,
        })
    }
}
