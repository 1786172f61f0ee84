//! Documentation templates with `${name}` placeholders.

pub mod batch;
pub mod discovery;
pub mod engine;
pub mod parser;
pub mod repository;

pub use engine::{
    RenderContext, Rendered, TemplateRenderError, UnresolvedPlaceholder, UnresolvedPolicy,
    render, render_string, render_with_policy,
};
pub use parser::{MarkerError, Position, placeholder_names};
