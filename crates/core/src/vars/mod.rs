//! Sources of template variables.
//!
//! Values come from a manifest file (shared vars plus one target's vars)
//! and from `key=value` overrides given on the command line, in that order
//! of precedence.

pub mod manifest;
pub mod overrides;

use std::path::Path;

use thiserror::Error;
use tracing::warn;

pub use manifest::{ManifestError, VarsManifest};
pub use overrides::{OverrideError, apply_overrides, parse_override};

use crate::templates::RenderContext;

#[derive(Debug, Error)]
pub enum VarsError {
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error(transparent)]
    Override(#[from] OverrideError),
}

/// Build the render context: manifest vars, then target vars, then overrides.
pub fn build_context(
    manifest: Option<&Path>,
    target: Option<&str>,
    overrides: &[String],
) -> Result<RenderContext, VarsError> {
    let mut ctx = match manifest {
        Some(path) => VarsManifest::load(path)?.resolve(target)?,
        None => {
            if let Some(t) = target {
                warn!(render_target = t, "target given without a variables file; ignoring");
            }
            RenderContext::new()
        }
    };
    apply_overrides(&mut ctx, overrides)?;
    Ok(ctx)
}
