use clap::{Parser, Subcommand};
use dep_searcher::application::dto::OutputFormat;
use std::path::PathBuf;

/// Inspect Maven and Gradle dependency trees, then fetch and build the
/// repositories behind them
#[derive(Parser, Debug)]
#[command(name = "dep-searcher")]
#[command(version)]
#[command(
    about = "Inspect Maven/Gradle dependency trees, fetch dependency sources and build them",
    long_about = None
)]
pub struct Args {
    /// Configuration file (defaults to ./dep-searcher.config.yml when present)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable debug logging (RUST_LOG is honored otherwise)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load a project's dependency tree and resolve SCM URLs
    Tree(TreeArgs),
    /// Clone the repositories of selected dependencies at their release tags
    Fetch(FetchArgs),
    /// Build every fetched repository, retrying with fallback JDKs
    Build(BuildArgs),
}

#[derive(clap::Args, Debug)]
pub struct TreeArgs {
    /// Path to the project directory
    #[arg(short, long, default_value = ".")]
    pub path: PathBuf,

    /// Output format: text or json
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Skip the CycloneDX plugins and read plain build tool output only
    #[arg(long)]
    pub no_cyclonedx: bool,

    /// Do not look up missing SCM URLs in the artifact repository
    #[arg(long)]
    pub no_scm: bool,
}

#[derive(clap::Args, Debug)]
pub struct FetchArgs {
    /// Path to the project directory
    #[arg(short, long, default_value = ".")]
    pub path: PathBuf,

    /// Select dependencies matching patterns (supports wildcards: *)
    /// Can be specified multiple times: -s "guava" -s "com.fasterxml*:*"
    /// Without patterns every dependency with a known repository is fetched
    #[arg(short, long = "select", value_name = "PATTERN")]
    pub select: Vec<String>,

    /// Delete existing checkouts and clone again
    #[arg(long)]
    pub clean: bool,

    /// Directory receiving the checkouts (overrides repositories_dir)
    #[arg(long, value_name = "DIR")]
    pub repositories: Option<PathBuf>,

    /// Skip the CycloneDX plugins and read plain build tool output only
    #[arg(long)]
    pub no_cyclonedx: bool,

    /// Output format: text or json
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct BuildArgs {
    /// Directory holding the checkouts (overrides repositories_dir)
    #[arg(long, value_name = "DIR")]
    pub repositories: Option<PathBuf>,

    /// Output format: text or json
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
