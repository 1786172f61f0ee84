//! Render every template of a repository into an output directory.
//!
//! Each template is rendered on its own: a failure is recorded and the
//! remaining templates still go through. Nothing is written for a template
//! whose render failed.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

use super::discovery::TemplateInfo;
use super::engine::{
    RenderContext, TemplateRenderError, UnresolvedPlaceholder, UnresolvedPolicy, render,
};
use super::repository::{TemplateRepoError, TemplateRepository};

#[derive(Debug, Error)]
pub enum BatchItemError {
    #[error(transparent)]
    Load(#[from] TemplateRepoError),

    #[error(transparent)]
    Render(#[from] TemplateRenderError),

    #[error("refusing to overwrite template source {0}")]
    WouldOverwriteTemplate(PathBuf),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug)]
pub struct BatchFailure {
    pub logical_name: String,
    pub error: BatchItemError,
}

#[derive(Debug)]
pub struct BatchOutput {
    pub logical_name: String,
    pub path: PathBuf,
    /// Lenient-mode diagnostics for this output.
    pub unresolved: Vec<UnresolvedPlaceholder>,
}

#[derive(Debug, Default)]
pub struct BatchReport {
    pub written: Vec<BatchOutput>,
    pub failed: Vec<BatchFailure>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn unresolved_count(&self) -> usize {
        self.written.iter().map(|w| w.unresolved.len()).sum()
    }
}

pub fn render_all(
    repo: &TemplateRepository,
    ctx: &RenderContext,
    policy: UnresolvedPolicy,
    output_dir: &Path,
) -> BatchReport {
    let mut report = BatchReport::default();

    for info in repo.list_all() {
        let target = output_dir.join(&info.logical_name);
        match render_one(info, ctx, policy, &target) {
            Ok(unresolved) => {
                debug!(template = %info.logical_name, path = %target.display(), "written");
                report.written.push(BatchOutput {
                    logical_name: info.logical_name.clone(),
                    path: target,
                    unresolved,
                });
            }
            Err(error) => {
                warn!(template = %info.logical_name, %error, "render failed");
                report
                    .failed
                    .push(BatchFailure { logical_name: info.logical_name.clone(), error });
            }
        }
    }

    info!(
        written = report.written.len(),
        failed = report.failed.len(),
        "batch render finished"
    );
    report
}

fn render_one(
    info: &TemplateInfo,
    ctx: &RenderContext,
    policy: UnresolvedPolicy,
    target: &Path,
) -> Result<Vec<UnresolvedPlaceholder>, BatchItemError> {
    ensure_not_source(target, &info.path)?;
    let loaded = TemplateRepository::load(info)?;
    let rendered = render(&loaded, ctx, policy)?;
    write_output(target, &rendered.text)?;
    Ok(rendered.unresolved)
}

/// Fail if `target` is the template file itself.
pub fn ensure_not_source(target: &Path, source: &Path) -> Result<(), BatchItemError> {
    let same = match (fs::canonicalize(target), fs::canonicalize(source)) {
        (Ok(t), Ok(s)) => t == s,
        _ => target == source,
    };
    if same {
        return Err(BatchItemError::WouldOverwriteTemplate(target.to_path_buf()));
    }
    Ok(())
}

/// Write `content` to `path`, creating parent directories.
pub fn write_output(path: &Path, content: &str) -> Result<(), BatchItemError> {
    let io_err = |source| BatchItemError::Write { path: path.to_path_buf(), source };
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    fs::write(path, content).map_err(io_err)
}
