//! Helpers handed to the template environment as an explicit capability set.

use crate::constants::POST_PAGE_MARKER;
use pulldown_cmark_escape::escape_html;
use std::sync::Arc;

/// True when `url` points into the paginated post listing.
pub fn is_post_page(url: &str) -> bool {
    url.contains(POST_PAGE_MARKER)
}

/// Renders navigation between the pages of a paginated template.
pub trait PaginationRenderer: Send + Sync {
    /// # Arguments
    /// * `current` - Zero-based index of the page being rendered
    /// * `hrefs` - URL of every page, in order
    fn render(&self, current: usize, hrefs: &[String]) -> String;
}

/// Previous/next links around a numbered list of pages.
#[derive(Debug, Default, Clone)]
pub struct NumberedPagination;

impl PaginationRenderer for NumberedPagination {
    fn render(&self, current: usize, hrefs: &[String]) -> String {
        if hrefs.len() < 2 {
            return String::new();
        }

        let mut html = String::from("<nav class=\"pagination\" aria-label=\"Pagination\"><ul>");
        if let Some(previous) = current.checked_sub(1).and_then(|i| hrefs.get(i)) {
            push_link(&mut html, previous, " rel=\"prev\"", "Previous");
        }
        for (index, href) in hrefs.iter().enumerate() {
            let attrs = if index == current { " aria-current=\"page\"" } else { "" };
            push_link(&mut html, href, attrs, &(index + 1).to_string());
        }
        if let Some(next) = current.checked_add(1).and_then(|i| hrefs.get(i)) {
            push_link(&mut html, next, " rel=\"next\"", "Next");
        }
        html.push_str("</ul></nav>");
        html
    }
}

fn push_link(html: &mut String, href: &str, attrs: &str, label: &str) {
    html.push_str("<li><a href=\"");
    let _ = escape_html(&mut *html, href);
    html.push('"');
    html.push_str(attrs);
    html.push('>');
    html.push_str(label);
    html.push_str("</a></li>");
}

/// What templates may call besides the built-in filters.
#[derive(Clone)]
pub struct Helpers {
    pub pagination: Arc<dyn PaginationRenderer>,
    pub is_post_page: fn(&str) -> bool,
}

impl Default for Helpers {
    fn default() -> Self {
        Self { pagination: Arc::new(NumberedPagination), is_post_page }
    }
}

impl std::fmt::Debug for Helpers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Helpers").finish_non_exhaustive()
    }
}
