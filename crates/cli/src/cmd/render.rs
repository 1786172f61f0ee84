use super::{build_vars, fail, load_config, open_repository};
use crate::{RenderAllArgs, RenderArgs};
use docfill_core::config::types::ResolvedConfig;
use docfill_core::templates::batch::{ensure_not_source, render_all, write_output};
use docfill_core::templates::repository::LoadedTemplate;
use docfill_core::templates::{UnresolvedPlaceholder, UnresolvedPolicy, render};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

fn policy(cfg: &ResolvedConfig, lenient: bool) -> UnresolvedPolicy {
    if lenient { UnresolvedPolicy::Lenient } else { cfg.render.unresolved }
}

fn print_unresolved(unresolved: &[UnresolvedPlaceholder]) {
    for u in unresolved {
        println!("unresolved: {} at {}", u.name, u.position);
    }
}

pub fn run(config: Option<&Path>, profile: Option<&str>, args: &RenderArgs) {
    let cfg = load_config("render", config, profile);
    let loaded = load_template(&cfg, args);
    let ctx = build_vars("render", &cfg, &args.vars);

    let rendered = render(&loaded, &ctx, policy(&cfg, args.lenient))
        .unwrap_or_else(|e| fail("render", format!("{}: {e}", loaded.path.display())));

    if args.stdout {
        let mut out = std::io::stdout().lock();
        if let Err(e) = out.write_all(rendered.text.as_bytes()) {
            eprintln!("Failed to write to stdout: {e}");
            std::process::exit(1);
        }
        return;
    }

    let output = args.output.clone().unwrap_or_else(|| cfg.output_dir.join(&loaded.logical_name));
    ensure_not_source(&output, &loaded.path).unwrap_or_else(|e| fail("render", e));
    write_output(&output, &rendered.text).unwrap_or_else(|e| fail("render", e));
    debug!(output = %output.display(), "render complete");

    println!("OK   docfill render");
    println!("template: {}", loaded.logical_name);
    println!("output: {}", output.display());
    print_unresolved(&rendered.unresolved);
}

fn load_template(cfg: &ResolvedConfig, args: &RenderArgs) -> LoadedTemplate {
    if let Some(ref file) = args.file {
        let content = fs::read_to_string(file)
            .unwrap_or_else(|e| fail("render", format!("failed to read {}: {e}", file.display())));
        let logical_name = logical_name_for_file(file, &cfg.template_suffix);
        return LoadedTemplate {
            path: file.clone(),
            ..LoadedTemplate::from_string(logical_name, content)
        };
    }

    // clap guarantees one of --template / --file
    let name = args.template.as_deref().unwrap_or_default();
    open_repository("render", cfg).get_by_name(name).unwrap_or_else(|e| fail("render", e))
}

fn logical_name_for_file(file: &Path, suffix: &str) -> String {
    let name = file.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_default();
    name.strip_suffix(suffix).filter(|s| !s.is_empty()).map(str::to_string).unwrap_or(name)
}

pub fn run_all(config: Option<&Path>, profile: Option<&str>, args: &RenderAllArgs) {
    let cfg = load_config("render-all", config, profile);
    let repo = open_repository("render-all", &cfg);
    let ctx = build_vars("render-all", &cfg, &args.vars);
    let output_dir: PathBuf = args.output_dir.clone().unwrap_or_else(|| cfg.output_dir.clone());

    let report = render_all(&repo, &ctx, policy(&cfg, args.lenient), &output_dir);

    for w in &report.written {
        println!("wrote {} -> {}", w.logical_name, w.path.display());
        print_unresolved(&w.unresolved);
    }
    for f in &report.failed {
        println!("FAIL {}: {}", f.logical_name, f.error);
    }
    println!("-- {} written, {} failed --", report.written.len(), report.failed.len());

    if !report.is_success() {
        std::process::exit(1);
    }
}
