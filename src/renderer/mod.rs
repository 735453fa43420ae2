//! Template rendering for kiln
//!
//! - `interface`: the renderer trait pages are rendered through
//! - `minijinja`: the MiniJinja environment bound to the include directory
//! - `filters`: filters and the `year` shortcode
//! - `helpers`: the capability set passed into the environment
//! - `markdown`: markdown conversion with highlighted code blocks

pub mod filters;
pub mod helpers;
pub mod interface;
pub mod markdown;
pub mod minijinja;

pub use helpers::{is_post_page, Helpers, NumberedPagination, PaginationRenderer};
pub use interface::TemplateRenderer;
pub use markdown::render_markdown;
pub use self::minijinja::SiteRenderer;
