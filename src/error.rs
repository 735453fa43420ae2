use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}.")]
    IoError(#[from] std::io::Error),

    #[error("Failed to walk directory. Original error: {0}")]
    WalkDirError(#[from] walkdir::Error),

    #[error("Failed to parse ignore pattern. Original error: {0}")]
    GlobSetParseError(#[from] globset::Error),

    #[error("Failed to render. Original error: {0}")]
    MinijinjaError(#[from] minijinja::Error),

    #[error("Failed to parse JSON. Original error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Failed to parse YAML. Original error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// The configuration file was found but holds invalid values.
    #[error("Configuration error: {0}.")]
    ConfigValidation(String),

    #[error("Cannot proceed: input directory '{input_dir}' does not exist.")]
    InputDirectoryMissing { input_dir: String },

    #[error("Failed to read '{path}': {source}")]
    SourceRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid front matter in '{path}': {reason}")]
    FrontMatter { path: String, reason: String },

    #[error("Cannot paginate '{path}': {reason}")]
    Pagination { path: String, reason: String },

    #[error("Layout '{name}' not found in '{includes_dir}'.")]
    LayoutNotFound { name: String, includes_dir: String },

    #[error("Layout chain starting at '{name}' loops or is too deep.")]
    LayoutCycle { name: String },

    #[error("Output '{output}' is produced by both '{first}' and '{second}'.")]
    DuplicateOutput { output: String, first: String, second: String },
}

/// Convenience type alias for Results with kiln's Error as the error type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(crate::constants::exit_codes::FAILURE);
}
