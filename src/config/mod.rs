//! Configuration for kiln builds
//!
//! - `loader`: build configuration file loading and validation
//! - `theme`: theme tokens and purge settings for the CSS build

pub mod loader;
pub mod theme;


pub use loader::BuildConfig;
pub use theme::{BuildMode, ThemeConfig, ThemeVariant};
