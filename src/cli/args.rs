//! CLI argument definitions
//!
//! All Clap derive structs for `breathpace` command-line parsing.

use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

use crate::config::DEFAULT_PRESET;
use crate::observability::LogFormat;

// ============================================================================
// Root CLI
// ============================================================================

/// Paced breathing in the terminal.
#[derive(Parser, Debug)]
#[command(name = "breathpace", author, version, about)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-error output.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output control.
    #[arg(long, default_value = "auto", global = true, env = "BREATHPACE_COLOR")]
    pub color: ColorChoice,

    /// Log output format.
    #[arg(long, default_value = "human", global = true)]
    pub log_format: LogFormat,
}

// ============================================================================
// Top-Level Commands
// ============================================================================

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a breathing session.
    Run(RunArgs),

    /// List the built-in breathing patterns.
    Patterns(PatternsArgs),

    /// Validate pattern files without running them.
    Validate(ValidateArgs),

    /// Generate shell completion scripts.
    Completions(CompletionsArgs),

    /// Display version and build information.
    Version(VersionArgs),
}

// ============================================================================
// Run Command
// ============================================================================

/// Arguments for `run`.
#[derive(Args, Debug)]
#[command(group = clap::ArgGroup::new("source").multiple(false))]
pub struct RunArgs {
    /// Built-in pattern to use.
    #[arg(
        short,
        long,
        group = "source",
        default_value = DEFAULT_PRESET,
        env = "BREATHPACE_PATTERN"
    )]
    pub pattern: String,

    /// Path to a YAML pattern file.
    #[arg(short, long, group = "source", env = "BREATHPACE_CONFIG")]
    pub config: Option<PathBuf>,

    /// How often the clock is sampled (e.g. `50ms`).
    #[arg(
        long,
        default_value = "50ms",
        value_parser = parse_cadence,
        env = "BREATHPACE_CADENCE"
    )]
    pub cadence: Duration,

    /// Stop after this many full cycles.
    #[arg(short = 'n', long, value_parser = clap::value_parser!(u64).range(1..))]
    pub cycles: Option<u64>,

    /// Wait for `start`/`stop`/`quit` commands on stdin.
    #[arg(short, long)]
    pub interactive: bool,

    /// Do not ring the terminal bell on phase changes.
    #[arg(long)]
    pub no_bell: bool,

    /// Ring the terminal bell on every displayed second.
    #[arg(long, conflicts_with = "no_bell")]
    pub tick_bell: bool,

    /// Append session events as JSON lines to this file.
    #[arg(long, env = "BREATHPACE_EVENTS_FILE")]
    pub events_file: Option<PathBuf>,
}

// ============================================================================
// Patterns / Validate
// ============================================================================

/// Arguments for `patterns`.
#[derive(Args, Debug)]
pub struct PatternsArgs {
    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

/// Arguments for `validate`.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Pattern files to validate.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,

    /// Treat warnings as errors.
    #[arg(long)]
    pub strict: bool,
}

// ============================================================================
// Completions / Version
// ============================================================================

/// Arguments for shell completion generation.
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Target shell for completion script.
    pub shell: Shell,
}

/// Arguments for version display.
#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

// ============================================================================
// CLI-Local Enums
// ============================================================================

/// Color output choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal support.
    #[default]
    Auto,
    /// Always use color.
    Always,
    /// Never use color.
    Never,
}

/// Output format for structured output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output.
    #[default]
    Human,
    /// JSON output.
    Json,
}

/// Shell type for completion generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    /// Bash shell.
    Bash,
    /// Zsh shell.
    Zsh,
    /// Fish shell.
    Fish,
    /// `PowerShell`.
    #[value(name = "powershell")]
    PowerShell,
    /// Elvish shell.
    Elvish,
}

/// Parses a sampling cadence; it must be positive and at most one second.
fn parse_cadence(s: &str) -> Result<Duration, String> {
    let d = crate::config::duration::parse_duration(s).map_err(|e| e.to_string())?;
    if d.is_zero() {
        return Err("cadence must be positive".to_string());
    }
    if d > Duration::from_secs(1) {
        return Err("cadence must be at most 1s so every displayed second is drawn".to_string());
    }
    Ok(d)
}

// ============================================================================
// Tests
// ============================================================================
