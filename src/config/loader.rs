//! Build configuration loading and validation

use crate::config::theme::ThemeVariant;
use crate::constants::{
    CONFIG_FILENAMES, DEFAULT_DATA_DIR, DEFAULT_INCLUDES_DIR, DEFAULT_INPUT_DIR,
    DEFAULT_OUTPUT_DIR, DEFAULT_PASSTHROUGH, SUPPORTED_TEMPLATE_FORMATS,
};
use crate::error::{Error, Result};
use log::debug;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Everything the site build needs to know, resolved once per process.
///
/// Directory fields other than `input` and `output` are relative to `input`,
/// so `includes = "_includes"` means `<input>/_includes`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct BuildConfig {
    #[serde(default = "get_default_input")]
    pub input: PathBuf,
    #[serde(default = "get_default_output")]
    pub output: PathBuf,
    #[serde(default = "get_default_includes")]
    pub includes: PathBuf,
    #[serde(default = "get_default_data")]
    pub data: PathBuf,
    #[serde(default = "get_default_passthrough")]
    pub passthrough: Vec<PathBuf>,
    #[serde(default = "get_default_template_formats")]
    pub template_formats: Vec<String>,
    #[serde(default)]
    pub theme: ThemeVariant,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            input: get_default_input(),
            output: get_default_output(),
            includes: get_default_includes(),
            data: get_default_data(),
            passthrough: get_default_passthrough(),
            template_formats: get_default_template_formats(),
            theme: ThemeVariant::default(),
        }
    }
}

impl BuildConfig {
    /// Loads the first configuration file found in `root`, falling back to the
    /// defaults when the project has none. Relative `input` and `output` are
    /// resolved against `root`.
    pub fn load<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref();
        let mut config = Self::read_config_file(root)?.unwrap_or_default();
        config.input = root.join(&config.input);
        config.output = root.join(&config.output);
        Ok(config)
    }

    fn read_config_file(root: &Path) -> Result<Option<Self>> {
        for config_file_name in CONFIG_FILENAMES.iter() {
            let config_file_path = root.join(config_file_name);
            if !config_file_path.exists() {
                continue;
            }

            debug!("Loading build configuration from {}", config_file_path.display());
            let content = std::fs::read_to_string(&config_file_path)?;
            let config: BuildConfig = match *config_file_name {
                "kiln.json" => serde_json::from_str(&content)?,
                "kiln.yaml" | "kiln.yml" => serde_yaml::from_str(&content)?,
                _ => unreachable!(),
            };
            return Ok(Some(config));
        }

        debug!("No configuration file in {}, using defaults", root.display());
        Ok(None)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.input.as_os_str().is_empty() {
            return Err(Error::ConfigValidation("input must not be empty".into()));
        }
        if self.output.as_os_str().is_empty() {
            return Err(Error::ConfigValidation("output must not be empty".into()));
        }
        let input = std::path::absolute(&self.input)?;
        let output = std::path::absolute(&self.output)?;
        if input.starts_with(&output) {
            return Err(Error::ConfigValidation(format!(
                "output '{}' must not contain the input '{}'",
                self.output.display(),
                self.input.display()
            )));
        }
        if output.starts_with(&input) {
            return Err(Error::ConfigValidation(format!(
                "output '{}' must not be inside the input '{}'",
                self.output.display(),
                self.input.display()
            )));
        }
        if let Some(format) = self
            .template_formats
            .iter()
            .find(|f| !SUPPORTED_TEMPLATE_FORMATS.contains(&f.as_str()))
        {
            return Err(Error::ConfigValidation(format!(
                "unsupported template format '{format}', expected one of {}",
                SUPPORTED_TEMPLATE_FORMATS.join(", ")
            )));
        }
        Ok(())
    }

    pub fn includes_dir(&self) -> PathBuf {
        self.input.join(&self.includes)
    }

    pub fn data_dir(&self) -> PathBuf {
        self.input.join(&self.data)
    }

    pub fn is_template_format(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.template_formats.iter().any(|f| f == ext))
    }
}

fn get_default_input() -> PathBuf {
    PathBuf::from(DEFAULT_INPUT_DIR)
}

fn get_default_output() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIR)
}

fn get_default_includes() -> PathBuf {
    PathBuf::from(DEFAULT_INCLUDES_DIR)
}

fn get_default_data() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn get_default_passthrough() -> Vec<PathBuf> {
    DEFAULT_PASSTHROUGH.iter().map(PathBuf::from).collect()
}

fn get_default_template_formats() -> Vec<String> {
    SUPPORTED_TEMPLATE_FORMATS.iter().map(|f| f.to_string()).collect()
}
