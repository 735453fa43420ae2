use crate::config::ThemeVariant;
use crate::constants::{exit_codes, verbosity};
use clap::{error::ErrorKind, CommandFactory, Parser, Subcommand};
use log::LevelFilter;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#;

/// kiln - a small static site builder.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase logging verbosity (`-v`, `-vv`, `-vvv`).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render the site into the output directory.
    Build(BuildArgs),
    /// Print the theme declaration for the CSS build.
    Theme(ThemeArgs),
}

/// Arguments for `kiln build`.
#[derive(clap::Args, Debug, Clone)]
pub struct BuildArgs {
    /// Project root holding `kiln.yaml` and `.kilnignore`.
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Source directory, overriding the configuration file.
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Output directory, overriding the configuration file.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Remove the output directory before building.
    #[arg(long)]
    pub clean: bool,

    /// Preview actions without touching the filesystem.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

/// Arguments for `kiln theme`.
#[derive(clap::Args, Debug, Clone)]
pub struct ThemeArgs {
    /// Project root, used to list the files the purge step scans.
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Theme declaration to emit; defaults to the configuration file's.
    #[arg(long, value_enum)]
    pub variant: Option<ThemeVariant>,

    /// Write the declaration to a file instead of stdout.
    #[arg(long = "out", value_name = "FILE")]
    pub out: Option<PathBuf>,
}

/// Parse command line arguments, printing help when a subcommand is missing.
pub fn parse_cli() -> Cli {
    Cli::try_parse().unwrap_or_else(|e| {
        if matches!(
            e.kind(),
            ErrorKind::MissingRequiredArgument
                | ErrorKind::MissingSubcommand
                | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
        ) {
            let mut command = Cli::command().help_template(HELP_TEMPLATE);
            if let Err(print_err) = command.print_help() {
                eprintln!("Failed to display help information: {print_err}");
            } else {
                println!();
            }
            std::process::exit(exit_codes::FAILURE);
        } else {
            e.exit();
        }
    })
}

/// Map `-v` counts to the appropriate log level.
pub fn get_log_level_from_verbose(verbose_count: u8) -> LevelFilter {
    match verbose_count {
        verbosity::OFF => LevelFilter::Error,
        verbosity::INFO => LevelFilter::Info,
        verbosity::DEBUG => LevelFilter::Debug,
        verbosity::TRACE.. => LevelFilter::Trace,
    }
}
