use std::path::Path;

/// Path helpers for turning filesystem locations into site-relative names.
pub trait PathExt {
    /// Converts a relative path to a forward-slash string, the form used in
    /// URLs, glob matching and template names regardless of platform.
    ///
    /// # Examples
    /// ```
    /// use kiln::ext::PathExt;
    /// use std::path::Path;
    ///
    /// assert_eq!(Path::new("posts/hello.md").to_slash_string(), "posts/hello.md");
    /// ```
    fn to_slash_string(&self) -> String;

    /// The part of the path below `base`, or the path unchanged when it does
    /// not live under `base`.
    fn relative_to(&self, base: &Path) -> &Path;
}

impl PathExt for Path {
    fn to_slash_string(&self) -> String {
        self.components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }

    fn relative_to(&self, base: &Path) -> &Path {
        self.strip_prefix(base).unwrap_or(self)
    }
}
