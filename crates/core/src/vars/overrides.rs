use thiserror::Error;

use crate::templates::RenderContext;
use crate::templates::parser::is_identifier;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OverrideError {
    #[error("expected KEY=VALUE, got '{0}'")]
    MissingEquals(String),

    #[error("invalid variable name '{0}' (letters, digits and '_' only)")]
    InvalidName(String),
}

/// Parse a single `key=value` argument. Everything after the first `=` is
/// the value, so values may be empty or contain `=` themselves.
pub fn parse_override(arg: &str) -> Result<(String, String), OverrideError> {
    let (key, value) =
        arg.split_once('=').ok_or_else(|| OverrideError::MissingEquals(arg.to_string()))?;
    let key = key.trim();
    if !is_identifier(key) {
        return Err(OverrideError::InvalidName(key.to_string()));
    }
    Ok((key.to_string(), value.to_string()))
}

/// Apply `key=value` arguments on top of `ctx`; later arguments win.
pub fn apply_overrides(ctx: &mut RenderContext, args: &[String]) -> Result<(), OverrideError> {
    for arg in args {
        let (k, v) = parse_override(arg)?;
        ctx.insert(k, v);
    }
    Ok(())
}
