use crate::error::Result;

/// What the site build needs from a template engine.
///
/// Page bodies, layouts and permalinks all go through this trait, so the
/// build can be exercised with any engine that honours the three modes.
pub trait TemplateRenderer {
    /// Renders a page body with HTML auto-escaping.
    ///
    /// # Arguments
    /// * `template` - Page source with front matter already removed
    /// * `context` - Global data, front matter, `page` and `collections`
    /// * `template_name` - Source path reported in render errors
    fn render(
        &self,
        template: &str,
        context: &serde_json::Value,
        template_name: Option<&str>,
    ) -> Result<String>;

    /// Renders a layout around already rendered page content.
    ///
    /// `content` is exposed to the layout as a safe string, so it is not
    /// escaped a second time.
    fn render_layout(
        &self,
        template: &str,
        content: &str,
        context: &serde_json::Value,
        template_name: &str,
    ) -> Result<String>;

    /// Renders a template that produces a URL or path rather than markup.
    fn render_text(&self, template: &str, context: &serde_json::Value) -> Result<String>;
}
