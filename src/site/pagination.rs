//! Splitting a template over a data sequence.

use crate::error::{Error, Result};
use crate::site::data::lookup_path;
use serde::Deserialize;
use serde_json::{json, Value};
use std::path::Path;

/// The `pagination` block of a template's front matter.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PaginationConfig {
    /// Dotted path into the template context, e.g. `collections.post`
    pub data: String,
    #[serde(default = "get_default_size")]
    pub size: usize,
    /// Extra variable name bound to the page's items
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub reverse: bool,
}

fn get_default_size() -> usize {
    1
}

impl PaginationConfig {
    pub fn from_front_matter(value: &Value, path: &Path) -> Result<Self> {
        let paging: PaginationConfig =
            serde_json::from_value(value.clone()).map_err(|e| Error::Pagination {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        if paging.size == 0 {
            return Err(Error::Pagination {
                path: path.display().to_string(),
                reason: "size must be at least 1".into(),
            });
        }
        Ok(paging)
    }

    /// Resolves `data` against `context` and cuts it into pages.
    ///
    /// Objects paginate over their keys. An empty sequence still produces a
    /// single, empty page so listing templates always render.
    pub fn chunks(&self, context: &Value, path: &Path) -> Result<Vec<Vec<Value>>> {
        let mut items: Vec<Value> = match lookup_path(context, &self.data) {
            Some(Value::Array(items)) => items.clone(),
            Some(Value::Object(map)) => map.keys().map(|k| Value::String(k.clone())).collect(),
            Some(other) => {
                return Err(Error::Pagination {
                    path: path.display().to_string(),
                    reason: format!("'{}' is not a sequence: {other}", self.data),
                })
            }
            None => {
                return Err(Error::Pagination {
                    path: path.display().to_string(),
                    reason: format!("'{}' is not defined", self.data),
                })
            }
        };
        if self.reverse {
            items.reverse();
        }
        if items.is_empty() {
            return Ok(vec![Vec::new()]);
        }
        Ok(items.chunks(self.size).map(<[Value]>::to_vec).collect())
    }

    /// Value bound to `alias`: the item itself when `size` is 1.
    pub fn alias_value(&self, items: &[Value]) -> Value {
        if self.size == 1 {
            items.first().cloned().unwrap_or(Value::Null)
        } else {
            Value::Array(items.to_vec())
        }
    }
}

/// URL of page `page_number` when the template sets no permalink.
pub fn default_page_url(base_url: &str, page_number: usize) -> String {
    if page_number == 0 {
        base_url.to_string()
    } else {
        format!("{base_url}{}/", page_number + 1)
    }
}

/// The `pagination` variable for one generated page.
///
/// `hrefs` is empty while permalinks are still being resolved.
pub fn pagination_value(
    items: &[Value],
    page_number: usize,
    size: usize,
    hrefs: &[String],
) -> Value {
    let pages = hrefs.len();
    let previous = page_number.checked_sub(1).and_then(|i| hrefs.get(i));
    let next = hrefs.get(page_number + 1);
    json!({
        "items": items,
        "pageNumber": page_number,
        "size": size,
        "pages": pages,
        "hrefs": hrefs,
        "href": {
            "previous": previous,
            "next": next,
            "first": hrefs.first(),
            "last": hrefs.last(),
        },
    })
}
