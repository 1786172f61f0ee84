use std::path::{Path, PathBuf};

use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

/// Suffix marking a file as a template; stripped to get the output name.
pub const DEFAULT_TEMPLATE_SUFFIX: &str = ".in";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateInfo {
    /// Relative path with the template suffix removed, `/`-separated.
    pub logical_name: String,
    pub path: PathBuf,
}

#[derive(Debug, Error)]
pub enum TemplateDiscoveryError {
    #[error("templates directory does not exist: {0}")]
    MissingDir(String),

    #[error("template suffix must not be empty")]
    EmptySuffix,

    #[error("failed to read templates directory {0}: {1}")]
    WalkError(String, #[source] walkdir::Error),
}

pub fn discover_templates(
    root: &Path,
    suffix: &str,
) -> Result<Vec<TemplateInfo>, TemplateDiscoveryError> {
    if suffix.is_empty() {
        return Err(TemplateDiscoveryError::EmptySuffix);
    }
    if !root.is_dir() {
        return Err(TemplateDiscoveryError::MissingDir(root.display().to_string()));
    }

    let mut out = Vec::new();
    let walker = WalkDir::new(root).follow_links(true).into_iter();
    for entry in walker.filter_entry(|e| e.depth() == 0 || !is_hidden(e)) {
        let entry = entry.map_err(|e| {
            TemplateDiscoveryError::WalkError(root.display().to_string(), e)
        })?;
        let path = entry.path();
        if !entry.file_type().is_file() || !is_template_file(path, suffix) {
            continue;
        }
        let Ok(rel) = path.strip_prefix(root) else { continue };
        out.push(TemplateInfo {
            logical_name: logical_name_from_relative(rel, suffix),
            path: path.to_path_buf(),
        });
    }

    out.sort_by(|a, b| a.logical_name.cmp(&b.logical_name));
    Ok(out)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_str().is_some_and(|s| s.starts_with('.'))
}

fn is_template_file(path: &Path, suffix: &str) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.len() > suffix.len() && n.ends_with(suffix))
}

fn logical_name_from_relative(rel: &Path, suffix: &str) -> String {
    let joined = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
    joined.strip_suffix(suffix).unwrap_or(&joined).to_string()
}
