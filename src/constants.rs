//! Constants used throughout kiln

/// Configuration file names in order of preference
pub const CONFIG_FILENAMES: &[&str] = &["kiln.json", "kiln.yaml", "kiln.yml"];

/// Default source directory, relative to the project root
pub const DEFAULT_INPUT_DIR: &str = "src";

/// Default build output directory, relative to the project root
pub const DEFAULT_OUTPUT_DIR: &str = "_site";

/// Default include directory for layouts and partials, relative to the input
pub const DEFAULT_INCLUDES_DIR: &str = "_includes";

/// Default global data directory, relative to the input
pub const DEFAULT_DATA_DIR: &str = "_data";

/// Directories copied verbatim into the output
pub const DEFAULT_PASSTHROUGH: &[&str] = &["assets", "admin"];

/// Template formats kiln knows how to render
pub const SUPPORTED_TEMPLATE_FORMATS: &[&str] = &["njk", "html", "md"];

/// Ignore file name
pub const IGNORE_FILE: &str = ".kilnignore";

/// Front matter fence
pub const FRONT_MATTER_FENCE: &str = "---";

/// Tags hidden from the per-post tag list
pub const RESERVED_TAGS: &[&str] = &["post", "featured", "pages"];

/// URL fragment identifying a paginated post listing
pub const POST_PAGE_MARKER: &str = "/posts/page/";

/// Deepest layout chain followed before giving up
pub const MAX_LAYOUT_DEPTH: usize = 16;

/// Names exposed to templates
pub mod template_names {
    pub const POST_DATE: &str = "postDate";
    pub const POST_TAGS: &str = "postTags";
    pub const TOP: &str = "top";
    pub const HIGHLIGHT: &str = "highlight";
    pub const YEAR: &str = "year";
    pub const RENDER_PAGINATION: &str = "renderPagination";
    pub const IS_POST_PAGE: &str = "isPostPage";
}

/// Theme build settings
pub mod theme {
    pub const NODE_ENV: &str = "NODE_ENV";
    pub const PRODUCTION: &str = "production";
    pub const PURGE_CONTENT: &[&str] = &["src/**/*.{html,njk}"];
    pub const DEPRECATED_COLORS: &[&str] = &["lightBlue"];
}

/// Exit codes
pub mod exit_codes {
    pub const FAILURE: i32 = 1;
}

/// Verbosity levels
pub mod verbosity {
    pub const OFF: u8 = 0;
    pub const INFO: u8 = 1;
    pub const DEBUG: u8 = 2;
    pub const TRACE: u8 = 3;
}
