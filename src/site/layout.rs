use crate::constants::MAX_LAYOUT_DEPTH;
use crate::error::{Error, Result};
use crate::renderer::TemplateRenderer;
use crate::site::frontmatter::split_front_matter;
use log::debug;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Wraps rendered page content in its layout chain.
pub struct LayoutResolver<'a> {
    renderer: &'a dyn TemplateRenderer,
    includes_dir: PathBuf,
}

impl<'a> LayoutResolver<'a> {
    pub fn new(renderer: &'a dyn TemplateRenderer, includes_dir: PathBuf) -> Self {
        Self { renderer, includes_dir }
    }

    /// Applies `layout` and every layout it names in turn.
    ///
    /// A layout's own front matter fills in values the page leaves unset.
    pub fn apply(&self, layout: Option<&str>, content: String, context: &Value) -> Result<String> {
        let Some(first) = layout else {
            return Ok(content);
        };

        let mut content = content;
        let mut context = context.clone();
        let mut visited: Vec<String> = Vec::new();
        let mut next = Some(first.to_string());

        while let Some(name) = next.take() {
            if visited.contains(&name) || visited.len() >= MAX_LAYOUT_DEPTH {
                return Err(Error::LayoutCycle { name: first.to_string() });
            }

            let path = self.resolve(&name)?;
            debug!("Applying layout {}", path.display());
            let source = std::fs::read_to_string(&path)?;
            let (layout_data, body) = split_front_matter(&source, &path)?;

            if let Value::Object(ctx) = &mut context {
                for (key, value) in &layout_data {
                    if key != "layout" {
                        ctx.entry(key.clone()).or_insert_with(|| value.clone());
                    }
                }
            }

            content = self.renderer.render_layout(body, &content, &context, &name)?;
            next = layout_data.get("layout").and_then(Value::as_str).map(str::to_string);
            visited.push(name);
        }
        Ok(content)
    }

    /// Finds `name` in the include directory, trying `.njk` and `.html`
    /// when it has no extension.
    fn resolve(&self, name: &str) -> Result<PathBuf> {
        let direct = self.includes_dir.join(name);
        if direct.is_file() {
            return Ok(direct);
        }
        if Path::new(name).extension().is_none() {
            for ext in ["njk", "html"] {
                let candidate = self.includes_dir.join(format!("{name}.{ext}"));
                if candidate.is_file() {
                    return Ok(candidate);
                }
            }
        }
        Err(Error::LayoutNotFound {
            name: name.to_string(),
            includes_dir: self.includes_dir.display().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BuildConfig;
    use crate::renderer::{Helpers, SiteRenderer};
    use serde_json::json;
    use std::fs;

    fn setup(files: &[(&str, &str)]) -> (tempfile::TempDir, SiteRenderer) {
        let tmp = tempfile::tempdir().unwrap();
        let includes = tmp.path().join("_includes");
        fs::create_dir_all(&includes).unwrap();
        for (name, content) in files {
            fs::write(includes.join(name), content).unwrap();
        }
        let config = BuildConfig { input: tmp.path().to_path_buf(), ..BuildConfig::default() };
        let renderer = SiteRenderer::new(&config, Helpers::default());
        (tmp, renderer)
    }

    #[test]
    fn no_layout_returns_content() {
        let (tmp, renderer) = setup(&[]);
        let resolver = LayoutResolver::new(&renderer, tmp.path().join("_includes"));
        let out = resolver.apply(None, "<p>x</p>".into(), &json!({})).unwrap();
        assert_eq!(out, "<p>x</p>");
    }

    #[test]
    fn chains_layouts_and_merges_defaults() {
        let (tmp, renderer) = setup(&[
            ("post.njk", "---\nlayout: base\nsection: blog\n---\n<article>{{ content }}</article>"),
            ("base.njk", "<body class=\"{{ section }}\">{{ title }}|{{ content }}</body>"),
        ]);
        let resolver = LayoutResolver::new(&renderer, tmp.path().join("_includes"));
        let out = resolver
            .apply(Some("post.njk"), "<p>x</p>".into(), &json!({ "title": "T" }))
            .unwrap();
        assert_eq!(out, "<body class=\"blog\">T|<article><p>x</p></article></body>");
    }

    #[test]
    fn page_values_win_over_layout_defaults() {
        let (tmp, renderer) = setup(&[("base.njk", "---\ntitle: Default\n---\n{{ title }}")]);
        let resolver = LayoutResolver::new(&renderer, tmp.path().join("_includes"));
        let out = resolver.apply(Some("base.njk"), String::new(), &json!({ "title": "Mine" })).unwrap();
        assert_eq!(out, "Mine");
    }

    #[test]
    fn missing_layout_is_an_error() {
        let (tmp, renderer) = setup(&[]);
        let resolver = LayoutResolver::new(&renderer, tmp.path().join("_includes"));
        let err = resolver.apply(Some("nope.njk"), String::new(), &json!({})).unwrap_err();
        assert!(matches!(err, Error::LayoutNotFound { .. }));
    }

    #[test]
    fn cycles_are_detected() {
        let (tmp, renderer) = setup(&[
            ("a.njk", "---\nlayout: b.njk\n---\n{{ content }}"),
            ("b.njk", "---\nlayout: a.njk\n---\n{{ content }}"),
        ]);
        let resolver = LayoutResolver::new(&renderer, tmp.path().join("_includes"));
        let err = resolver.apply(Some("a.njk"), String::new(), &json!({})).unwrap_err();
        assert!(matches!(err, Error::LayoutCycle { .. }));
    }
}
