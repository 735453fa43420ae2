use crate::{
    cli::{BuildArgs, ThemeArgs},
    config::{BuildConfig, BuildMode, ThemeConfig},
    error::Result,
    passthrough::plan_passthrough,
    renderer::{Helpers, SiteRenderer},
    site::{check_duplicate_outputs, OutputWriter, SiteBuilder},
};
use log::{debug, info};

/// Orchestrates one `kiln build`.
pub struct Runner {
    args: BuildArgs,
}

impl Runner {
    pub fn new(args: BuildArgs) -> Self {
        Self { args }
    }

    /// Loads configuration, renders every page, copies passthrough
    /// directories and writes the result.
    ///
    /// Nothing touches the output directory until every page has rendered.
    pub fn run(self) -> Result<()> {
        let config = self.load_and_validate_config()?;
        let renderer = SiteRenderer::new(&config, Helpers::default());
        let builder = SiteBuilder::new(&self.args.root, &config, &renderer)?;

        let mut operations = builder.plan()?;
        operations.extend(plan_passthrough(&config)?);
        check_duplicate_outputs(&operations)?;
        debug!("Planned {} build operations", operations.len());

        let writer = OutputWriter::new(self.args.dry_run);
        if self.args.clean {
            writer.clean(&config.output)?;
        }
        let written = writer.apply_all(&operations)?;

        if self.args.dry_run {
            println!("[DRY RUN] Would write {written} files to {}.", config.output.display());
        } else {
            println!("Wrote {written} files to {}.", config.output.display());
        }
        Ok(())
    }

    fn load_and_validate_config(&self) -> Result<BuildConfig> {
        let root = &self.args.root;
        let mut config = BuildConfig::load(root)?;
        if let Some(input) = &self.args.input {
            config.input = root.join(input);
        }
        if let Some(output) = &self.args.output {
            config.output = root.join(output);
        }
        config.validate()?;
        debug!(
            "Building {} into {}",
            config.input.display(),
            config.output.display()
        );
        Ok(config)
    }
}

/// Entry point for `kiln build`.
pub fn run(args: BuildArgs) -> Result<()> {
    Runner::new(args).run()
}

/// Entry point for `kiln theme`: emits the theme declaration as JSON.
pub fn run_theme(args: ThemeArgs) -> Result<()> {
    let variant = match args.variant {
        Some(variant) => variant,
        None => BuildConfig::load(&args.root)?.theme,
    };
    let mode = BuildMode::from_env();
    let theme = ThemeConfig::new(variant, mode);

    let content = theme.content_files(&args.root)?;
    info!("Purge scans {} files (enabled: {})", content.len(), theme.purge.enabled);
    for path in &content {
        debug!("Purge content: {}", path.display());
    }

    let json = theme.to_json()?;
    match &args.out {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, json)?;
            println!("Theme written to {}.", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ThemeVariant;
    use std::fs;
    use std::path::PathBuf;

    fn build_args(root: &std::path::Path) -> BuildArgs {
        BuildArgs {
            root: root.to_path_buf(),
            input: None,
            output: None,
            clean: false,
            dry_run: false,
        }
    }

    #[test]
    fn overrides_take_precedence_over_config_file() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("kiln.yaml"), "input: content\noutput: public\n").unwrap();

        let mut args = build_args(tmp.path());
        args.output = Some(PathBuf::from("dist"));
        let config = Runner::new(args).load_and_validate_config().unwrap();

        assert_eq!(config.input, tmp.path().join("content"));
        assert_eq!(config.output, tmp.path().join("dist"));
    }

    #[test]
    fn invalid_override_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let mut args = build_args(tmp.path());
        args.output = Some(PathBuf::from("src"));
        assert!(Runner::new(args).load_and_validate_config().is_err());
    }

    #[test]
    fn theme_is_written_to_file() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("build/theme.json");
        run_theme(ThemeArgs {
            root: tmp.path().to_path_buf(),
            variant: Some(ThemeVariant::Default),
            out: Some(out.clone()),
        })
        .unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(out).unwrap()).unwrap();
        assert_eq!(value["darkMode"], false);
        assert!(value["theme"].get("colors").is_none());
    }
}
