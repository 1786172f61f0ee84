mod cmd;
mod completions;
mod logging;

use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::engine::ArgValueCandidates;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "docfill",
    version,
    about = "Fill ${placeholders} in documentation templates"
)]
struct Cli {
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[arg(long, global = true)]
    profile: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Validate configuration and print resolved paths
    Doctor,

    /// List logical template names discovered under templates_dir
    ListTemplates,

    /// Show the placeholders of a template and whether they have values
    Inspect(InspectArgs),

    /// Render one template
    Render(RenderArgs),

    /// Render every template into the output directory
    RenderAll(RenderAllArgs),
}

/// Where variable values come from.
#[derive(Debug, Args)]
pub struct VarsArgs {
    /// Variables manifest (toml, yaml or json); overrides the profile's vars_file
    #[arg(long = "vars", value_name = "FILE")]
    pub vars_file: Option<PathBuf>,

    /// Manifest target to overlay on the shared vars (e.g. "fedora-20")
    #[arg(long)]
    pub target: Option<String>,

    /// Extra variable, may be repeated; wins over the manifest
    #[arg(long = "var", value_name = "KEY=VALUE")]
    pub vars: Vec<String>,
}

#[derive(Debug, Args)]
pub struct InspectArgs {
    /// Logical template name (e.g. "download_and_compile.rst")
    #[arg(long, add = ArgValueCandidates::new(completions::complete_templates))]
    pub template: String,

    #[command(flatten)]
    pub vars: VarsArgs,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Logical template name under templates_dir
    #[arg(
        long,
        required_unless_present = "file",
        conflicts_with = "file",
        add = ArgValueCandidates::new(completions::complete_templates)
    )]
    pub template: Option<String>,

    /// Render a template file from anywhere instead of templates_dir
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Output file; defaults to <output_dir>/<logical name>
    #[arg(long, conflicts_with = "stdout")]
    pub output: Option<PathBuf>,

    /// Write the rendered text to stdout
    #[arg(long)]
    pub stdout: bool,

    /// Replace unresolved placeholders with "" instead of failing
    #[arg(long)]
    pub lenient: bool,

    #[command(flatten)]
    pub vars: VarsArgs,
}

#[derive(Debug, Args)]
pub struct RenderAllArgs {
    /// Output directory; defaults to the profile's output_dir
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Replace unresolved placeholders with "" instead of failing
    #[arg(long)]
    pub lenient: bool,

    #[command(flatten)]
    pub vars: VarsArgs,
}

fn main() {
    clap_complete::CompleteEnv::with_factory(Cli::command).complete();

    let cli = Cli::parse();
    let config = cli.config.as_deref();
    let profile = cli.profile.as_deref();

    match cli.command {
        Commands::Doctor => cmd::doctor::run(config, profile),
        Commands::ListTemplates => cmd::list_templates::run(config, profile),
        Commands::Inspect(args) => cmd::inspect::run(config, profile, &args),
        Commands::Render(args) => cmd::render::run(config, profile, &args),
        Commands::RenderAll(args) => cmd::render::run_all(config, profile, &args),
    }
}
