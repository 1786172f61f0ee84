use super::load_config;
use docfill_core::config::loader::default_config_path;
use std::path::Path;
use tracing::debug;

pub fn run(config: Option<&Path>, profile: Option<&str>) {
    let rc = load_config("doctor", config, profile);
    debug!(version = docfill_core::version(), os = std::env::consts::OS, "doctor");

    println!("OK   docfill doctor");
    println!(
        "path: {}",
        config.map_or_else(
            || default_config_path().display().to_string(),
            |p| p.display().to_string()
        )
    );
    println!("profile: {}", rc.active_profile);
    println!("docs_root: {}", rc.docs_root.display());
    println!("templates_dir: {}", rc.templates_dir.display());
    println!("output_dir: {}", rc.output_dir.display());
    println!(
        "vars_file: {}",
        rc.vars_file.as_ref().map_or_else(|| "(none)".to_string(), |p| p.display().to_string())
    );
    println!("target: {}", rc.target.as_deref().unwrap_or("(none)"));
    println!("template_suffix: {}", rc.template_suffix);
    println!("render.unresolved: {}", rc.render.unresolved.as_str());
    println!("logging.level: {}", rc.logging.level);
}
