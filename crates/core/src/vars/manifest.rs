//! Variable manifests: the key/value files that feed template rendering.
//!
//! A manifest has shared `vars` and optional per-target tables, typically
//! one per distribution release:
//!
//! ```toml
//! [vars]
//! project = "horton"
//!
//! [targets.fedora-20]
//! dependencies_rst = "sudo yum install gcc gcc-c++ python-devel"
//! ```
//!
//! Values are opaque text. Package lists are never split or validated.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::templates::RenderContext;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read variables file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML in {0}: {1}")]
    Toml(String, #[source] toml::de::Error),

    #[error("failed to parse YAML in {0}: {1}")]
    Yaml(String, #[source] serde_yaml::Error),

    #[error("failed to parse JSON in {0}: {1}")]
    Json(String, #[source] serde_json::Error),

    #[error("unsupported variables file extension for {0} (expected toml, yaml, yml or json)")]
    UnsupportedFormat(String),

    #[error("variable '{key}' in {section} must be a string, number or boolean, got {kind}")]
    NonScalar { section: String, key: String, kind: &'static str },

    #[error("unknown target '{name}' (known targets: {known})")]
    UnknownTarget { name: String, known: String },
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct RawManifest {
    #[serde(default)]
    vars: BTreeMap<String, Value>,
    #[serde(default)]
    targets: BTreeMap<String, BTreeMap<String, Value>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VarsManifest {
    pub vars: BTreeMap<String, String>,
    pub targets: BTreeMap<String, BTreeMap<String, String>>,
}

impl VarsManifest {
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let s = fs::read_to_string(path)
            .map_err(|e| ManifestError::Io { path: path.to_path_buf(), source: e })?;
        let shown = path.display().to_string();

        let ext = path.extension().and_then(|e| e.to_str()).map(str::to_lowercase);
        let raw: RawManifest = match ext.as_deref() {
            Some("toml") => toml::from_str(&s).map_err(|e| ManifestError::Toml(shown, e))?,
            Some("yaml" | "yml") => {
                serde_yaml::from_str(&s).map_err(|e| ManifestError::Yaml(shown, e))?
            }
            Some("json") => {
                serde_json::from_str(&s).map_err(|e| ManifestError::Json(shown, e))?
            }
            _ => return Err(ManifestError::UnsupportedFormat(shown)),
        };

        let manifest = Self::from_raw(raw)?;
        debug!(
            path = %path.display(),
            vars = manifest.vars.len(),
            targets = manifest.targets.len(),
            "loaded variables manifest"
        );
        Ok(manifest)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ManifestError> {
        let raw: RawManifest =
            toml::from_str(s).map_err(|e| ManifestError::Toml("<string>".into(), e))?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawManifest) -> Result<Self, ManifestError> {
        let vars = stringify_section("vars", raw.vars)?;
        let mut targets = BTreeMap::new();
        for (name, table) in raw.targets {
            let section = format!("targets.{name}");
            targets.insert(name, stringify_section(&section, table)?);
        }
        Ok(Self { vars, targets })
    }

    pub fn target_names(&self) -> impl Iterator<Item = &str> {
        self.targets.keys().map(String::as_str)
    }

    /// Shared vars overlaid with the vars of `target`, if one is given.
    pub fn resolve(&self, target: Option<&str>) -> Result<RenderContext, ManifestError> {
        let mut ctx: RenderContext =
            self.vars.iter().map(|(k, v)| (k.clone(), v.clone())).collect();

        if let Some(name) = target {
            let table = self.targets.get(name).ok_or_else(|| ManifestError::UnknownTarget {
                name: name.to_string(),
                known: self.target_names().collect::<Vec<_>>().join(", "),
            })?;
            ctx.extend(table.iter().map(|(k, v)| (k.clone(), v.clone())));
        }

        Ok(ctx)
    }
}

fn stringify_section(
    section: &str,
    table: BTreeMap<String, Value>,
) -> Result<BTreeMap<String, String>, ManifestError> {
    table
        .into_iter()
        .map(|(key, value)| {
            let s = match value {
                Value::String(s) => s,
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                other => {
                    return Err(ManifestError::NonScalar {
                        section: section.to_string(),
                        key,
                        kind: kind_of(&other),
                    });
                }
            };
            Ok((key, s))
        })
        .collect()
}

fn kind_of(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "table",
    }
}
