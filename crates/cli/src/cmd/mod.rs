pub mod doctor;
pub mod inspect;
pub mod list_templates;
pub mod render;

use crate::VarsArgs;
use docfill_core::config::loader::{ConfigLoader, default_config_path};
use docfill_core::config::types::ResolvedConfig;
use docfill_core::templates::RenderContext;
use docfill_core::templates::repository::TemplateRepository;
use docfill_core::vars::build_context;
use std::fmt::Display;
use std::path::Path;

/// Print the failure banner for `cmd` and exit with status 1.
pub(crate) fn fail(cmd: &str, err: impl Display) -> ! {
    println!("FAIL docfill {cmd}");
    println!("{err}");
    std::process::exit(1);
}

/// Load the configuration and install logging, or exit.
pub(crate) fn load_config(
    cmd: &str,
    config: Option<&Path>,
    profile: Option<&str>,
) -> ResolvedConfig {
    match ConfigLoader::load(config, profile) {
        Ok(rc) => {
            crate::logging::init(&rc);
            rc
        }
        Err(e) => {
            println!("FAIL docfill {cmd}");
            println!("{e}");
            if config.is_none() {
                println!("looked for: {}", default_config_path().display());
            }
            std::process::exit(1);
        }
    }
}

pub(crate) fn open_repository(cmd: &str, cfg: &ResolvedConfig) -> TemplateRepository {
    TemplateRepository::new(&cfg.templates_dir, &cfg.template_suffix)
        .unwrap_or_else(|e| fail(cmd, e))
}

/// Collect variables: command-line flags first, then the profile defaults.
pub(crate) fn build_vars(cmd: &str, cfg: &ResolvedConfig, args: &VarsArgs) -> RenderContext {
    let manifest = args.vars_file.as_deref().or(cfg.vars_file.as_deref());
    let target = args.target.as_deref().or(cfg.target.as_deref());
    build_context(manifest, target, &args.vars).unwrap_or_else(|e| fail(cmd, e))
}
