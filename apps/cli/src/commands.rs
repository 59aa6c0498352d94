//! CLI command definitions, routing, and tracing setup.

use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use curricula_core::{
    AssembleConfig, ProcessDirConfig, ProcessDirResult, ProgressReporter, assemble, combine,
    process_directory, write_combined,
};
use curricula_shared::{AppConfig, init_config, load_config};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// Curricula — structured data out of curriculum documents.
#[derive(Parser)]
#[command(
    name = "curricula",
    version,
    about = "Extract structured curriculum data from rendered program documents.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Extract one directory of documents and write its artifact set.
    Extract {
        /// Directory of rendered document text files.
        dir: String,

        /// Output root for artifacts (defaults to the configured output_dir).
        #[arg(short, long)]
        out: Option<String>,

        /// Directory label used in artifacts (defaults to the basename).
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Process several directories and write combined artifacts + summaries.
    Batch {
        /// Directories to process (defaults to the registered directories).
        dirs: Vec<String>,

        /// Output root for artifacts (defaults to the configured output_dir).
        #[arg(short, long)]
        out: Option<String>,
    },

    /// List registered source directories.
    List,

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "curricula=info",
        1 => "curricula=debug",
        _ => "curricula=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt().json().with_env_filter(env_filter).init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Extract { dir, out, name } => cmd_extract(&dir, out.as_deref(), name),
        Command::Batch { dirs, out } => cmd_batch(&dirs, out.as_deref()),
        Command::List => cmd_list(),
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(),
        },
    }
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

fn cmd_extract(dir: &str, out: Option<&str>, name: Option<String>) -> Result<()> {
    let config = load_config()?;
    let output_root = resolve_output_root(out, &config);

    info!(dir, out = %output_root.display(), "extracting directory");

    let start = Instant::now();
    let reporter = CliProgress::new();

    let process_config = ProcessDirConfig {
        dir: PathBuf::from(dir),
        source_ext: config.defaults.source_extension.clone(),
        label: name,
    };
    let result = process_directory(&process_config, &reporter)?;

    let assemble_config = AssembleConfig {
        output_root,
        tool_version: env!("CARGO_PKG_VERSION").to_string(),
    };
    let assembled = assemble(&assemble_config, &result)?;
    reporter.finish();

    println!();
    println!("  Curriculum artifacts written!");
    println!("  Run:       {}", assembled.manifest.id);
    println!("  Directory: {}", result.directory);
    println!("  Documents: {} ({} failed)", result.documents_processed, result.documents_failed);
    println!("  Programs:  {}", result.collection.len());
    println!("  Path:      {}", assembled.out_dir.display());
    println!("  Time:      {:.1}s", start.elapsed().as_secs_f64());
    println!();

    Ok(())
}

fn cmd_batch(dirs: &[String], out: Option<&str>) -> Result<()> {
    let config = load_config()?;
    let output_root = resolve_output_root(out, &config);

    // Explicit directories on the command line, else the config registry.
    let targets: Vec<(Option<String>, PathBuf)> = if dirs.is_empty() {
        config
            .directories
            .iter()
            .map(|d| (Some(d.name.clone()), PathBuf::from(&d.path)))
            .collect()
    } else {
        dirs.iter().map(|d| (None, PathBuf::from(d))).collect()
    };

    if targets.is_empty() {
        return Err(eyre!(
            "no directories to process: pass them on the command line or register them with `curricula config init`"
        ));
    }

    info!(count = targets.len(), "starting batch");

    let start = Instant::now();
    let tool_version = env!("CARGO_PKG_VERSION").to_string();
    let mut results: Vec<ProcessDirResult> = Vec::new();

    for (label, dir) in targets {
        let reporter = CliProgress::new();
        let process_config = ProcessDirConfig {
            dir,
            source_ext: config.defaults.source_extension.clone(),
            label,
        };
        let result = process_directory(&process_config, &reporter)?;

        let assemble_config = AssembleConfig {
            output_root: output_root.clone(),
            tool_version: tool_version.clone(),
        };
        assemble(&assemble_config, &result)?;
        reporter.finish();

        results.push(result);
    }

    let combined = combine(&results)?;
    if combined.row_count == 0 {
        println!("No course data extracted; combined artifacts skipped.");
        return Ok(());
    }
    write_combined(&output_root, &combined, &tool_version)?;

    println!();
    println!("  Batch complete!");
    println!("  Directories: {}", results.len());
    println!("  Programs:    {}", combined.program_count);
    println!("  Course rows: {}", combined.row_count);
    println!("  Path:        {}", output_root.display());
    println!("  Time:        {:.1}s", start.elapsed().as_secs_f64());
    println!();

    Ok(())
}

fn cmd_list() -> Result<()> {
    let config = load_config()?;

    if config.directories.is_empty() {
        println!("No source directories registered.");
        println!("Add [[directories]] entries to the config (see `curricula config init`).");
        return Ok(());
    }

    for entry in &config.directories {
        println!("{}\t{}", entry.name, entry.path);
    }

    Ok(())
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

/// Output root: `--out` flag, else the configured default.
fn resolve_output_root(out: Option<&str>, config: &AppConfig) -> PathBuf {
    match out {
        Some(p) => PathBuf::from(p),
        None => PathBuf::from(&config.defaults.output_dir),
    }
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap()
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }

    fn finish(&self) {
        self.spinner.finish_and_clear();
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn document_processed(&self, name: &str, current: usize, total: usize) {
        self.spinner
            .set_message(format!("Extracting [{current}/{total}] {name}"));
    }

    fn done(&self, result: &ProcessDirResult) {
        self.spinner.set_message(format!(
            "Processed {} ({} documents)",
            result.directory, result.documents_processed
        ));
    }
}
