//! Theme tokens for the utility CSS build.
//!
//! kiln does not generate CSS itself. It declares the palette, font stack and
//! opacity scale the CSS tool consumes, and decides whether that tool should
//! purge unused classes.

use crate::constants::theme::{DEPRECATED_COLORS, NODE_ENV, PRODUCTION, PURGE_CONTENT};
use crate::error::Result;
use crate::ext::PathExt;
use clap::ValueEnum;
use globset::{Glob, GlobSet, GlobSetBuilder};
use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Which historical theme declaration to emit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
#[value(rename_all = "lowercase")]
pub enum ThemeVariant {
    /// Custom dark palette, Trebuchet body font and extra background opacities.
    #[default]
    Classic,
    /// No overrides; the CSS framework's defaults apply.
    Default,
}

/// Whether this is a production build, derived from `NODE_ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildMode {
    Development,
    Production,
}

impl BuildMode {
    /// `Production` only when the value is exactly `production`.
    pub fn from_node_env(value: Option<&str>) -> Self {
        match value {
            Some(PRODUCTION) => BuildMode::Production,
            _ => BuildMode::Development,
        }
    }

    pub fn from_env() -> Self {
        let value = std::env::var(NODE_ENV).ok();
        Self::from_node_env(value.as_deref())
    }

    pub fn is_production(&self) -> bool {
        matches!(self, BuildMode::Production)
    }
}

/// A colour is either a single literal or a named set of shades.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ColorValue {
    Single(String),
    Shades(IndexMap<String, String>),
}

impl From<&str> for ColorValue {
    fn from(value: &str) -> Self {
        ColorValue::Single(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PurgeConfig {
    pub enabled: bool,
    pub content: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeExtend {
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub background_opacity: IndexMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeTokens {
    pub extend: ThemeExtend,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<IndexMap<String, ColorValue>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<IndexMap<String, Vec<String>>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Variants {
    pub extend: IndexMap<String, Vec<String>>,
}

/// The full declaration handed to the CSS tool.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeConfig {
    pub purge: PurgeConfig,
    pub dark_mode: bool,
    pub theme: ThemeTokens,
    pub variants: Variants,
    pub plugins: Vec<String>,
}

impl ThemeConfig {
    pub fn new(variant: ThemeVariant, mode: BuildMode) -> Self {
        let theme = match variant {
            ThemeVariant::Classic => classic_tokens(),
            ThemeVariant::Default => ThemeTokens::default(),
        };

        Self {
            purge: PurgeConfig {
                enabled: mode.is_production(),
                content: PURGE_CONTENT.iter().map(|p| p.to_string()).collect(),
            },
            dark_mode: false,
            theme,
            variants: Variants::default(),
            plugins: Vec::new(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Lists the files under `root` the purge step would scan for class names.
    pub fn content_files<P: AsRef<Path>>(&self, root: P) -> Result<Vec<PathBuf>> {
        let root = root.as_ref();
        let globset = build_content_globset(&self.purge.content)?;

        let mut files = Vec::new();
        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let rel = entry.path().relative_to(root);
            if globset.is_match(rel.to_slash_string()) {
                debug!("Purge content file: {}", rel.display());
                files.push(entry.path().to_path_buf());
            }
        }
        Ok(files)
    }
}

fn build_content_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}

fn shades(values: [(&str, &str); 10]) -> ColorValue {
    ColorValue::Shades(
        values.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
    )
}

fn sky() -> ColorValue {
    shades([
        ("50", "#f0f9ff"),
        ("100", "#e0f2fe"),
        ("200", "#bae6fd"),
        ("300", "#7dd3fc"),
        ("400", "#38bdf8"),
        ("500", "#0ea5e9"),
        ("600", "#0284c7"),
        ("700", "#0369a1"),
        ("800", "#075985"),
        ("900", "#0c4a6e"),
    ])
}

/// The framework's own colour table, as shipped.
fn framework_colors() -> IndexMap<String, ColorValue> {
    let mut colors = IndexMap::new();
    colors.insert("black".to_string(), "#000".into());
    colors.insert("white".to_string(), "#fff".into());
    colors.insert(
        "gray".to_string(),
        shades([
            ("50", "#f9fafb"),
            ("100", "#f3f4f6"),
            ("200", "#e5e7eb"),
            ("300", "#d1d5db"),
            ("400", "#9ca3af"),
            ("500", "#6b7280"),
            ("600", "#4b5563"),
            ("700", "#374151"),
            ("800", "#1f2937"),
            ("900", "#111827"),
        ]),
    );
    colors.insert("sky".to_string(), sky());
    // renamed to `sky`; still shipped under the old key
    colors.insert("lightBlue".to_string(), sky());
    colors
}

/// Framework colours with deprecated aliases removed.
pub fn framework_palette() -> IndexMap<String, ColorValue> {
    let mut colors = framework_colors();
    for key in DEPRECATED_COLORS {
        colors.shift_remove(*key);
    }
    colors
}

fn classic_tokens() -> ThemeTokens {
    let base = framework_palette();
    let pick = |name: &str| base.get(name).cloned().unwrap_or_else(|| "".into());

    let mut colors: IndexMap<String, ColorValue> = IndexMap::new();
    colors.insert("transparent".into(), "transparent".into());
    colors.insert("current".into(), "currentColor".into());
    colors.insert("white".into(), pick("white"));
    colors.insert("black".into(), pick("black"));
    colors.insert("darkerBg".into(), "#141519".into());
    colors.insert("darkBg".into(), "#16161a".into());
    colors.insert("lightBg".into(), "#242629".into());
    colors.insert("grayFont".into(), "#94a1b2".into());
    colors.insert("purple".into(), "#7f5af0".into());
    colors.insert("skyBlue".into(), "#07a7f7".into());

    let background_opacity = [("01", "0.01"), ("02", "0.02"), ("025", "0.025")]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    let mut font_family = IndexMap::new();
    font_family
        .insert("body".to_string(), vec!["Trebuchet MS, Helvetica, sans-serif".to_string()]);

    ThemeTokens {
        extend: ThemeExtend { background_opacity },
        colors: Some(colors),
        font_family: Some(font_family),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn purge_enabled_only_for_production() {
        for (node_env, expected) in [
            (Some("production"), true),
            (Some("development"), false),
            (Some("Production"), false),
            (Some(""), false),
            (None, false),
        ] {
            let config =
                ThemeConfig::new(ThemeVariant::Classic, BuildMode::from_node_env(node_env));
            assert_eq!(config.purge.enabled, expected, "NODE_ENV={node_env:?}");
        }
    }

    #[test]
    fn framework_palette_drops_deprecated_key() {
        let palette = framework_palette();
        assert!(!palette.contains_key("lightBlue"));
        assert!(palette.contains_key("sky"));
        assert!(framework_colors().contains_key("lightBlue"));
    }

    #[test]
    fn classic_variant_declares_custom_palette() {
        let config = ThemeConfig::new(ThemeVariant::Classic, BuildMode::Development);
        let colors = config.theme.colors.as_ref().unwrap();
        assert_eq!(colors.get("purple"), Some(&ColorValue::from("#7f5af0")));
        assert_eq!(colors.get("white"), Some(&ColorValue::from("#fff")));
        assert_eq!(colors.get("current"), Some(&ColorValue::from("currentColor")));
        assert_eq!(config.theme.extend.background_opacity.get("025").unwrap(), "0.025");
        assert!(!config.dark_mode);
    }

    #[test]
    fn default_variant_serializes_without_overrides() {
        let config = ThemeConfig::new(ThemeVariant::Default, BuildMode::Production);
        let json: serde_json::Value =
            serde_json::from_str(&config.to_json().unwrap()).unwrap();
        assert_eq!(json["purge"]["enabled"], true);
        assert_eq!(json["darkMode"], false);
        assert!(json["theme"].get("colors").is_none());
        assert!(json["theme"].get("fontFamily").is_none());
    }

    #[test]
    fn classic_variant_serializes_camel_case_keys() {
        let config = ThemeConfig::new(ThemeVariant::Classic, BuildMode::Development);
        let json: serde_json::Value =
            serde_json::from_str(&config.to_json().unwrap()).unwrap();
        assert_eq!(json["theme"]["extend"]["backgroundOpacity"]["01"], "0.01");
        assert_eq!(
            json["theme"]["fontFamily"]["body"][0],
            "Trebuchet MS, Helvetica, sans-serif"
        );
        assert_eq!(json["theme"]["colors"]["darkerBg"], "#141519");
    }

    #[test]
    fn content_files_match_purge_globs() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("src/_includes")).unwrap();
        fs::create_dir_all(root.join("src/assets")).unwrap();
        fs::write(root.join("src/index.njk"), "").unwrap();
        fs::write(root.join("src/_includes/base.njk"), "").unwrap();
        fs::write(root.join("src/about.html"), "").unwrap();
        fs::write(root.join("src/post.md"), "").unwrap();
        fs::write(root.join("src/assets/site.css"), "").unwrap();

        let config = ThemeConfig::new(ThemeVariant::Classic, BuildMode::Production);
        let files: Vec<String> = config
            .content_files(root)
            .unwrap()
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().to_slash_string())
            .collect();

        assert_eq!(files, vec!["src/_includes/base.njk", "src/about.html", "src/index.njk"]);
    }
}
