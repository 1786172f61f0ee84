//! Shell completion support with dynamic value completers.
//!
//! Template names are read from the active profile's templates_dir so
//! `docfill render --template <TAB>` offers the logical names.

use clap_complete::engine::CompletionCandidate;
use docfill_core::config::loader::ConfigLoader;
use docfill_core::templates::repository::TemplateRepository;

/// Complete template names from TemplateRepository.
pub fn complete_templates() -> Vec<CompletionCandidate> {
    let Ok(cfg) = ConfigLoader::load(None, None) else {
        return Vec::new();
    };
    let Ok(repo) = TemplateRepository::new(&cfg.templates_dir, &cfg.template_suffix) else {
        return Vec::new();
    };

    repo.list_all()
        .iter()
        .map(|info| {
            CompletionCandidate::new(&info.logical_name)
                .help(Some(info.path.display().to_string().into()))
        })
        .collect()
}
