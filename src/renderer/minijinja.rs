use super::filters::*;
use super::helpers::Helpers;
use crate::{
    config::BuildConfig,
    constants::template_names::*,
    error::Result,
    renderer::interface::TemplateRenderer,
};
use log::debug;
use minijinja::value::ValueKind;
use minijinja::{
    context, escape_formatter, path_loader, AutoEscape, Environment, Error, ErrorKind, Output,
    State, Value,
};
use pulldown_cmark_escape::{escape_html, FmtWriter};

/// Escapes `& < > " '` in string output and leaves `/` alone, so URLs
/// printed into attributes read the same as they were written.
fn html_formatter(out: &mut Output, state: &State, value: &Value) -> Result<(), Error> {
    let escape_here = matches!(state.auto_escape(), AutoEscape::Html)
        && !value.is_safe()
        && matches!(value.kind(), ValueKind::String);
    match value.as_str() {
        Some(s) if escape_here => Ok(escape_html(FmtWriter(out), s)?),
        _ => escape_formatter(out, state, value),
    }
}

/// MiniJinja-based renderer for site pages, bound to the include directory.
pub struct SiteRenderer {
    /// MiniJinja environment instance
    env: Environment<'static>,
}

impl SiteRenderer {
    /// Creates the environment for one build.
    ///
    /// Layouts and partials resolve against `<input>/<includes>`. The filters
    /// and the `year` shortcode are always present; everything else a
    /// template may call comes from `helpers`.
    pub fn new(config: &BuildConfig, helpers: Helpers) -> Self {
        let mut env = Environment::new();
        let includes_dir = config.includes_dir();
        debug!("Template includes resolve against {}", includes_dir.display());
        env.set_loader(path_loader(includes_dir));
        env.set_auto_escape_callback(|_| AutoEscape::Html);
        env.set_formatter(html_formatter);

        env.add_filter(POST_DATE, post_date_filter);
        env.add_filter(POST_TAGS, post_tags_filter);
        env.add_filter(TOP, top_filter);
        env.add_filter(HIGHLIGHT, highlight_filter);
        env.add_function(YEAR, year);

        let Helpers { pagination, is_post_page } = helpers;
        env.add_function(RENDER_PAGINATION, move |value: Value| -> Result<Value, Error> {
            let current = usize::try_from(value.get_attr("pageNumber")?)?;
            let hrefs: Vec<String> =
                value.get_attr("hrefs")?.try_iter()?.map(|href| href.to_string()).collect();
            if current >= hrefs.len() {
                return Err(Error::new(
                    ErrorKind::InvalidOperation,
                    format!("pageNumber {current} is out of range for {} pages", hrefs.len()),
                ));
            }
            Ok(Value::from_safe_string(pagination.render(current, &hrefs)))
        });
        env.add_function(IS_POST_PAGE, move |url: &str| is_post_page(url));

        Self { env }
    }

    /// Internal helper to render templates, optionally overriding escaping
    fn render_internal(
        &self,
        template: &str,
        context: Value,
        template_name: Option<&str>,
        auto_escape_override: Option<AutoEscape>,
    ) -> Result<String> {
        let name = template_name.unwrap_or("<page>");
        match auto_escape_override {
            Some(auto_escape) => {
                let mut env = self.env.clone();
                env.set_auto_escape_callback(move |_| auto_escape);
                Ok(env.render_named_str(name, template, context)?)
            }
            None => Ok(self.env.render_named_str(name, template, context)?),
        }
    }
}

impl TemplateRenderer for SiteRenderer {
    fn render(
        &self,
        template: &str,
        context: &serde_json::Value,
        template_name: Option<&str>,
    ) -> Result<String> {
        self.render_internal(template, Value::from_serialize(context), template_name, None)
    }

    fn render_layout(
        &self,
        template: &str,
        content: &str,
        context: &serde_json::Value,
        template_name: &str,
    ) -> Result<String> {
        let ctx = context! {
            content => Value::from_safe_string(content.to_string()),
            ..Value::from_serialize(context)
        };
        self.render_internal(template, ctx, Some(template_name), None)
    }

    fn render_text(&self, template: &str, context: &serde_json::Value) -> Result<String> {
        self.render_internal(
            template,
            Value::from_serialize(context),
            Some("<permalink>"),
            Some(AutoEscape::None),
        )
    }
}
