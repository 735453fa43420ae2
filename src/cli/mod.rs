pub mod args;
pub mod runner;

pub use args::{
    get_log_level_from_verbose, parse_cli, BuildArgs, Cli, Commands, ThemeArgs,
};
pub use runner::{run, run_theme};
