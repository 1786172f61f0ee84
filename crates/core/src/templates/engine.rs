use std::collections::HashMap;

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use super::parser::{MarkerError, Position, Segment, parse};
use super::repository::LoadedTemplate;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateRenderError {
    #[error("malformed placeholder: {0}")]
    MalformedMarker(#[from] MarkerError),

    #[error("unresolved placeholder '${{{name}}}' at {position}")]
    UnresolvedPlaceholder { name: String, position: Position },
}

pub type RenderContext = HashMap<String, String>;

/// What to do with a marker whose name has no value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnresolvedPolicy {
    /// Fail the whole render on the first unresolved marker.
    #[default]
    Strict,
    /// Substitute an empty string and report the marker.
    Lenient,
}

impl UnresolvedPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            UnresolvedPolicy::Strict => "strict",
            UnresolvedPolicy::Lenient => "lenient",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedPlaceholder {
    pub name: String,
    pub position: Position,
}

/// Output of a successful render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub text: String,
    /// Markers that were replaced by an empty string. Always empty under
    /// [`UnresolvedPolicy::Strict`].
    pub unresolved: Vec<UnresolvedPlaceholder>,
}

impl Rendered {
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }
}

pub fn render(
    template: &LoadedTemplate,
    ctx: &RenderContext,
    policy: UnresolvedPolicy,
) -> Result<Rendered, TemplateRenderError> {
    debug!(template = %template.logical_name, ?policy, "rendering template");
    render_with_policy(&template.content, ctx, policy)
}

/// Render a string template, failing on any unresolved placeholder.
///
/// Values are inserted as-is: a value that itself contains `${...}` is not
/// expanded again.
pub fn render_string(
    template: &str,
    ctx: &RenderContext,
) -> Result<String, TemplateRenderError> {
    render_with_policy(template, ctx, UnresolvedPolicy::Strict).map(|r| r.text)
}

pub fn render_with_policy(
    template: &str,
    ctx: &RenderContext,
    policy: UnresolvedPolicy,
) -> Result<Rendered, TemplateRenderError> {
    let segments = parse(template)?;

    let mut text = String::with_capacity(template.len());
    let mut unresolved = Vec::new();

    for seg in segments {
        match seg {
            Segment::Literal(s) => text.push_str(s),
            Segment::Placeholder { name, position } => match ctx.get(name) {
                Some(value) => text.push_str(value),
                None => match policy {
                    UnresolvedPolicy::Strict => {
                        return Err(TemplateRenderError::UnresolvedPlaceholder {
                            name: name.to_string(),
                            position,
                        });
                    }
                    UnresolvedPolicy::Lenient => {
                        warn!(placeholder = name, %position, "no value for placeholder");
                        unresolved
                            .push(UnresolvedPlaceholder { name: name.to_string(), position });
                    }
                },
            },
        }
    }

    Ok(Rendered { text, unresolved })
}
