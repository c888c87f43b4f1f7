use std::path::{Path, PathBuf};

use chrono::Local;
use clap::{Args, Parser, Subcommand};
use latest_stats_core::{ReportConfig, RunContext, ScanSummary, format_size};
use latest_stats_discovery::discover::{DiscoveredFile, discover_files};
use latest_stats_discovery::render::ReportMeta;
use latest_stats_discovery::{repository_name, scan, summarize, write_artifacts};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// CLI-specific output format enum with clap argument parsing support.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliOutputFormat {
    Json,
    Yaml,
    Markdown,
    Table,
}

impl From<CliOutputFormat> for latest_stats_discovery::output::OutputFormat {
    fn from(fmt: CliOutputFormat) -> Self {
        match fmt {
            CliOutputFormat::Json => Self::Json,
            CliOutputFormat::Yaml => Self::Yaml,
            CliOutputFormat::Markdown => Self::Markdown,
            CliOutputFormat::Table => Self::Table,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "latest-stats")]
#[command(about = "Render an HTML dashboard and JSON snapshot for *_latest files")]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
    #[command(flatten)]
    generate: GenerateArgs,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Scan the root directory and write the report and snapshot (default).
    Generate(GenerateArgs),
    /// Print the scan summary to stdout without writing any files.
    Summary(SummaryArgs),
    /// Write the default configuration as YAML.
    InitConfig(InitConfigArgs),
}

#[derive(Debug, Args)]
struct GenerateArgs {
    /// Directory whose direct children are scanned.
    #[arg(long, default_value = ".")]
    root: PathBuf,
    /// Directory the report and snapshot are written to.
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,
    /// Optional YAML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Branch the run must be on (overrides the config value).
    #[arg(long)]
    required_branch: Option<String>,
    /// Generate regardless of the current branch.
    #[arg(long)]
    ignore_branch: bool,
    /// Enable debug logging (overrides RUST_LOG).
    #[arg(long, short)]
    verbose: bool,
}

#[derive(Debug, Args)]
struct SummaryArgs {
    /// Directory whose direct children are scanned.
    #[arg(long, default_value = ".")]
    root: PathBuf,
    /// Optional YAML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Output format.
    #[arg(long, default_value = "table")]
    format: CliOutputFormat,
    /// Enable debug logging (overrides RUST_LOG).
    #[arg(long, short)]
    verbose: bool,
}

#[derive(Debug, Args)]
struct InitConfigArgs {
    /// Destination path for the YAML configuration.
    #[arg(long, default_value = "latest-stats.yaml")]
    output: PathBuf,
    /// Overwrite an existing file.
    #[arg(long)]
    force: bool,
}

fn main() {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::Generate(cli.generate));
    let verbose = match &command {
        Command::Generate(args) => args.verbose,
        Command::Summary(args) => args.verbose,
        Command::InitConfig(_) => false,
    };
    init_tracing(verbose);

    let result = match command {
        Command::Generate(args) => run_generate(args),
        Command::Summary(args) => run_summary(args),
        Command::InitConfig(args) => run_init_config(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<ReportConfig, String> {
    match path {
        Some(path) => ReportConfig::load(path)
            .map_err(|err| format!("Failed to load config '{}': {err}", path.display())),
        None => Ok(ReportConfig::default()),
    }
}

fn run_generate(args: GenerateArgs) -> Result<(), String> {
    let config = load_config(args.config.as_deref())?;
    let context = RunContext::from_env();
    debug!(?config, ?context, "resolved run settings");
    let required_branch = args
        .required_branch
        .as_deref()
        .unwrap_or(&config.required_branch);

    println!("Current branch: {}", context.branch);
    if !args.ignore_branch && context.branch != required_branch {
        println!(
            "Branch '{}' is not '{required_branch}'; skipping report generation.",
            context.branch
        );
        return Ok(());
    }

    let patterns = config.suffixes.patterns();
    println!(
        "Scanning '{}' for {} ...",
        args.root.display(),
        patterns.join(", ")
    );

    let files = discover_files(&args.root, &config.suffixes)
        .map_err(|err| format!("Failed to scan '{}': {err}", args.root.display()))?;
    println!("Found {} matching file(s).", files.len());

    if files.is_empty() {
        println!("No matching files found; nothing to report.");
        return Ok(());
    }

    let summary = summarize(&args.root, &files);
    let meta = ReportMeta {
        repository: repository_name(&args.root),
        generated_at: Local::now(),
        patterns,
    };

    let artifacts = write_artifacts(&summary, &context, &meta, &config, &args.output_dir)
        .map_err(|err| {
            format!(
                "Failed to write report to '{}': {err}",
                args.output_dir.display()
            )
        })?;

    println!("Report written to '{}'.", artifacts.report_path.display());
    println!("Snapshot written to '{}'.", artifacts.snapshot_path.display());
    print_run_summary(&summary, &context, &files);

    Ok(())
}

fn print_run_summary(summary: &ScanSummary, context: &RunContext, files: &[DiscoveredFile]) {
    let totals = &summary.totals;
    println!();
    println!("=== Summary ===");
    println!("Total files: {}", totals.total_count);
    println!("TXT files: {}", totals.plain_text_count);
    println!("YAML files: {}", totals.structured_data_count);
    println!("Total size: {}", format_size(totals.total_size));
    let degraded = summary.degraded_count();
    if degraded > 0 {
        println!("Files with errors: {degraded}");
    }
    println!("Branch: {}", context.branch);

    println!();
    println!("=== Files ===");
    for file in files {
        println!("- {}", file.path.display());
    }
}

fn run_summary(args: SummaryArgs) -> Result<(), String> {
    let config = load_config(args.config.as_deref())?;
    let summary = scan(&args.root, &config)
        .map_err(|err| format!("Failed to scan '{}': {err}", args.root.display()))?;
    let output = latest_stats_discovery::output::format_summary(&summary, args.format.into())?;
    print!("{output}");
    if !output.ends_with('\n') {
        println!();
    }
    Ok(())
}

fn run_init_config(args: InitConfigArgs) -> Result<(), String> {
    if args.output.exists() && !args.force {
        return Err(format!(
            "'{}' already exists (use --force to overwrite)",
            args.output.display()
        ));
    }

    ReportConfig::default()
        .save(&args.output)
        .map_err(|err| format!("Failed to write '{}': {err}", args.output.display()))?;
    println!("Wrote default configuration to '{}'.", args.output.display());
    Ok(())
}
