mod cli;
mod config;

use clap::Parser;
use cli::{Args, BuildArgs, Command, FetchArgs, TreeArgs};
use config::Settings;
use dep_searcher::adapters::outbound::console::{render_batch_summary, StderrProgressReporter};
use dep_searcher::adapters::outbound::filesystem::{FileSystemReader, LocalWorkspace};
use dep_searcher::adapters::outbound::network::{
    CachingDescriptorRepository, MavenCentralRepository,
};
use dep_searcher::adapters::outbound::process::{GitCli, GradleCli, MavenCli, SystemCommandRunner};
use dep_searcher::application::dto::{
    BuildRequest, FetchRequest, OutputFormat, TreeRequest, TreeResponse,
};
use dep_searcher::application::factories::{FormatterFactory, PresenterFactory, PresenterType};
use dep_searcher::application::use_cases::{
    annotate_checkouts, select_fetch_targets, BuildOrchestrator, BuildTool,
    LoadDependenciesUseCase, RepoFetcher, ScmResolver,
};
use dep_searcher::dependency_analysis::domain::ProjectType;
use dep_searcher::dependency_analysis::services::toolchains::TOOLCHAINS_FILE_NAME;
use dep_searcher::dependency_analysis::services::{JdkSelector, SelectionFilter};
use dep_searcher::ports::outbound::{ProgressReporter, Workspace};
use dep_searcher::shared::error::ExitCode;
use dep_searcher::shared::Result;
use std::collections::BTreeSet;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            // --help and --version also arrive here
            let code = if e.use_stderr() {
                ExitCode::InvalidArguments
            } else {
                ExitCode::Success
            };
            let _ = e.print();
            process::exit(code.as_i32());
        }
    };

    init_tracing(args.verbose);

    let code = match run(args).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            // Display error chain
            let mut source = e.source();
            while let Some(err) = source {
                eprintln!("\nCaused by: {}", err);
                source = err.source();
            }

            eprintln!();
            ExitCode::ApplicationError
        }
    };

    process::exit(code.as_i32());
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("warn,dep_searcher=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(args: Args) -> Result<ExitCode> {
    // Explicit --config must exist; the default file is optional
    let config = match args.config {
        Some(ref path) => config::load_config_from_path(path)?,
        None => config::discover_config(&std::env::current_dir()?)?.unwrap_or_default(),
    };
    let settings = Settings::resolve(config, |key| std::env::var(key).ok());
    tracing::debug!(?settings, "resolved settings");

    match args.command {
        Command::Tree(tree) => run_tree(tree, &settings).await,
        Command::Fetch(fetch) => run_fetch(fetch, &settings).await,
        Command::Build(build) => run_build(build, &settings).await,
    }
}

async fn run_tree(args: TreeArgs, settings: &Settings) -> Result<ExitCode> {
    let response = load_tree(&args.path, !args.no_cyclonedx, !args.no_scm, settings).await?;

    let formatter = FormatterFactory::create(args.format);
    let output = with_progress_message(args.format, || formatter.format_tree(&response))?;
    PresenterFactory::create(PresenterType::from_output(args.output)).present(&output)?;

    Ok(ExitCode::Success)
}

async fn run_fetch(args: FetchArgs, settings: &Settings) -> Result<ExitCode> {
    let filter = SelectionFilter::new(args.select)?;
    let mut tree = load_tree(&args.path, !args.no_cyclonedx, true, settings).await?;
    let reporter = StderrProgressReporter::new();

    // Step 1: Mark the selection and collapse it to one target per repository
    let targets = select_fetch_targets(&mut tree.forest, &filter);
    for pattern in filter.unmatched_patterns() {
        reporter.report_error(&format!(
            "⚠️  Warning: Selection pattern '{}' did not match any dependency with a known repository.",
            pattern
        ));
    }
    if targets.is_empty() {
        reporter.report("ℹ️  Nothing to fetch.");
    }

    // Step 2: Clone and check out
    let repositories_dir = args
        .repositories
        .unwrap_or_else(|| settings.repositories_dir.clone());
    let fetcher = RepoFetcher::new(
        Arc::new(GitCli::new(SystemCommandRunner::new())),
        Arc::new(LocalWorkspace::new()),
        reporter,
    )
    .with_concurrency(settings.clone_concurrency);
    let response = fetcher
        .execute(FetchRequest::new(targets, repositories_dir, args.clean))
        .await?;

    // Step 3: Reflect checkouts in the tree
    let annotated = annotate_checkouts(&mut tree.forest, &response);
    tracing::debug!(annotated, "annotated checkout tags");

    let formatter = FormatterFactory::create(args.format);
    let output = with_progress_message(args.format, || formatter.format_fetch(&response))?;
    PresenterFactory::create(PresenterType::from_output(args.output)).present(&output)?;

    let succeeded: BTreeSet<String> = response.checkout_tags.keys().cloned().collect();
    let failed: BTreeSet<String> = response.failures.keys().cloned().collect();
    eprint!(
        "{}",
        render_batch_summary("Fetch", &succeeded, &failed, std::io::stderr().is_terminal())
    );

    Ok(batch_exit_code(response.has_failures()))
}

async fn run_build(args: BuildArgs, settings: &Settings) -> Result<ExitCode> {
    settings.jdk_homes.validate()?;

    let repositories_dir = args
        .repositories
        .unwrap_or_else(|| settings.repositories_dir.clone());
    let workspace = LocalWorkspace::new();
    let needs_maven = repositories_dir.is_dir()
        && workspace
            .list_repositories(&repositories_dir)?
            .iter()
            .any(|repository| BuildTool::detect(repository) == Some(BuildTool::Maven));
    let maven_home = maven_home_for(needs_maven, settings)?;

    let maven = MavenCli::new(SystemCommandRunner::new(), maven_home)
        .with_toolchains_file(repositories_dir.join(TOOLCHAINS_FILE_NAME));
    let mut orchestrator = BuildOrchestrator::new(
        FileSystemReader::new(),
        maven,
        GradleCli::new(SystemCommandRunner::new()),
        workspace,
        StderrProgressReporter::new(),
        JdkSelector::new(settings.jdk_homes.clone()),
    );

    let request = BuildRequest::new(repositories_dir);
    let response = tokio::task::spawn_blocking(move || orchestrator.execute(request)).await??;
    tracing::debug!(last_jdk = ?response.last_jdk_used, "build session finished");

    let formatter = FormatterFactory::create(args.format);
    let output = with_progress_message(args.format, || formatter.format_build(&response))?;
    PresenterFactory::create(PresenterType::from_output(args.output)).present(&output)?;

    eprint!(
        "{}",
        render_batch_summary(
            "Build",
            &response.succeeded,
            &response.failed,
            std::io::stderr().is_terminal()
        )
    );

    Ok(batch_exit_code(response.has_failures()))
}

/// Loads the project tree on a blocking worker, then resolves missing SCM
/// URLs unless disabled.
async fn load_tree(
    project_path: &Path,
    use_cyclonedx: bool,
    resolve_scm: bool,
    settings: &Settings,
) -> Result<TreeResponse> {
    let project_type = ProjectType::detect(project_path);
    if project_type != ProjectType::Unknown {
        settings.jdk_homes.validate()?;
    }
    let maven_home = maven_home_for(project_type == ProjectType::Maven, settings)?;

    let use_case = LoadDependenciesUseCase::new(
        FileSystemReader::new(),
        MavenCli::new(SystemCommandRunner::new(), maven_home)
            .with_toolchains_file(settings.repositories_dir.join(TOOLCHAINS_FILE_NAME)),
        GradleCli::new(SystemCommandRunner::new()),
        StderrProgressReporter::new(),
        JdkSelector::new(settings.jdk_homes.clone()),
        settings.scm_overrides.clone(),
    );
    let request = TreeRequest::new(project_path.to_path_buf(), use_cyclonedx, resolve_scm);
    let mut response = tokio::task::spawn_blocking(move || use_case.execute(request)).await??;

    response.forest.subscribe(|change| tracing::trace!(?change, "node updated"));

    if resolve_scm {
        let repository = MavenCentralRepository::new(
            settings.maven_central_url.clone(),
            settings.local_repository.clone(),
            settings.http_timeout,
        )?;
        let resolver = ScmResolver::new(
            CachingDescriptorRepository::new(repository),
            StderrProgressReporter::new(),
            settings.scm_overrides.clone(),
        )
        .with_concurrency(settings.resolve_concurrency);
        response.scm_resolution = Some(resolver.resolve(&mut response.forest).await);
    }

    Ok(response)
}

/// Validates MAVEN_HOME when Maven will be invoked; otherwise it may be unset.
fn maven_home_for(required: bool, settings: &Settings) -> Result<PathBuf> {
    if required {
        let maven_home = settings.require_maven_home()?;
        MavenCli::<SystemCommandRunner>::validate_installation(maven_home)?;
        return Ok(maven_home.to_path_buf());
    }
    Ok(settings.maven_home.clone().unwrap_or_default())
}

fn with_progress_message(
    format: OutputFormat,
    render: impl FnOnce() -> Result<String>,
) -> Result<String> {
    eprintln!("{}", FormatterFactory::progress_message(format));
    render()
}

fn batch_exit_code(has_failures: bool) -> ExitCode {
    if has_failures {
        ExitCode::BatchFailures
    } else {
        ExitCode::Success
    }
}
