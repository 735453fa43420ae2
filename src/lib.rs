/// Handles argument parsing and command dispatch.
pub mod cli;

/// Build configuration and theme declarations.
pub mod config;

pub mod constants;

/// Defines custom error types.
pub mod error;

/// Extension traits for standard library types.
pub mod ext;

/// Processes .kilnignore files to exclude specific paths.
pub mod ignore;

/// Directories copied into the output untouched.
pub mod passthrough;

/// Template rendering, filters and helpers.
pub mod renderer;

/// Page discovery, collections, pagination and output planning.
pub mod site;
