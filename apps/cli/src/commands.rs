//! CLI definitions, routing, and tracing setup.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{CommandFactory, Parser, Subcommand};
use color_eyre::eyre::Result;
use rstgrab_shared::{
    AppConfig, Document, ExtractOptions, RstGrabError, init_config, load_config,
    load_config_from,
};
use tracing::info;

use crate::footer;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// get-rst — extract reStructuredText embedded in source comments.
#[derive(Parser)]
#[command(
    name = "get-rst",
    version,
    about = "A tool for extracting reStructuredText from a file",
    long_about = None
)]
pub(crate) struct Cli {
    /// Input file.
    #[arg(short = 'i', long = "input-file")]
    pub input_file: Option<PathBuf>,

    /// Output file. Prints to console if not specified.
    #[arg(short = 'o', long = "output-file")]
    pub output_file: Option<PathBuf>,

    /// Language tag for code blocks that don't name one.
    #[arg(short, long)]
    pub language: Option<String>,

    /// Fail on blocks that are never closed instead of dropping them.
    #[arg(long)]
    pub strict: bool,

    /// Omit the "generated by" footer.
    #[arg(long)]
    pub no_footer: bool,

    /// Config file to use instead of ~/.rstgrab/rstgrab.toml.
    #[arg(long, env = "RSTGRAB_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Subcommands. Without one, get-rst extracts from `--input-file`.
#[derive(Subcommand)]
pub(crate) enum Command {
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

/// Initialize tracing based on CLI flags. Logs go to stderr.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "rstgrab=info",
        1 => "rstgrab=debug",
        _ => "rstgrab=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Command::Config { action }) => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(cli.config.as_deref()),
        },
        None => cmd_extract(&cli),
    }
}

fn cmd_extract(cli: &Cli) -> Result<()> {
    let Some(input) = cli.input_file.as_deref() else {
        eprintln!("Error: An input file was not specified!");
        eprintln!("{}", Cli::command().render_help());
        return Err(RstGrabError::config("an input file was not specified").into());
    };

    let config = resolve_config(cli.config.as_deref())?;
    let (opts, with_footer) = resolve_settings(cli, &config);

    let output = cli
        .output_file
        .as_deref()
        .map_or_else(|| "<stdout>".to_string(), |p| p.display().to_string());
    info!(
        input = %input.display(),
        output = %output,
        default_language = %opts.default_language,
        strict = opts.strict,
        "extracting reStructuredText"
    );

    let document = rstgrab_extractor::extract_file(input, &opts)?;
    let stamp = with_footer.then(|| footer::footer(&footer::current_user(), chrono::Local::now()));
    let content = render_output(&document, stamp.as_deref());

    write_output(cli.output_file.as_deref(), &content)?;
    info!(blocks = document.blocks.len(), "done");

    Ok(())
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(explicit: Option<&Path>) -> Result<()> {
    let config = resolve_config(explicit)?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// An explicit config path must exist; the default one may be absent.
fn resolve_config(explicit: Option<&Path>) -> rstgrab_shared::Result<AppConfig> {
    match explicit {
        Some(path) => load_config_from(path),
        None => load_config(),
    }
}

/// Merge CLI flags over the loaded config.
fn resolve_settings(cli: &Cli, config: &AppConfig) -> (ExtractOptions, bool) {
    let mut opts = ExtractOptions::from(config);
    if let Some(lang) = &cli.language {
        opts.default_language = lang.clone();
    }
    opts.strict |= cli.strict;

    let with_footer = config.output.footer && !cli.no_footer;
    (opts, with_footer)
}

/// Document text, a line break, then the optional footer.
fn render_output(document: &Document, footer: Option<&str>) -> String {
    let mut out = String::with_capacity(document.text.len() + 1);
    out.push_str(&document.text);
    out.push('\n');
    if let Some(footer) = footer {
        out.push_str(footer);
    }
    out
}

fn write_output(path: Option<&Path>, content: &str) -> rstgrab_shared::Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content).map_err(|e| RstGrabError::resource(path, e))
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(content.as_bytes())
                .and_then(|()| stdout.flush())
                .map_err(|e| RstGrabError::resource("<stdout>", e))
        }
    }
}
