use crate::error::{Error, Result};
use crate::ext::PathExt;
use crate::renderer::filters::parse_date;
use crate::site::frontmatter::split_front_matter;
use chrono::{DateTime, Local, NaiveDateTime};
use log::warn;
use serde_json::{json, Map, Value};
use std::path::{Path, PathBuf};

const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// A source file that renders to (at most) one output document.
#[derive(Debug, Clone)]
pub struct Page {
    /// Path relative to the input directory
    pub rel_path: PathBuf,
    /// Front matter
    pub data: Map<String, Value>,
    /// Source after the front matter block
    pub body: String,
    pub date: NaiveDateTime,
}

impl Page {
    /// Reads a page from `input_dir/rel_path`.
    pub fn load(input_dir: &Path, rel_path: &Path) -> Result<Self> {
        let path = input_dir.join(rel_path);
        let source = std::fs::read_to_string(&path).map_err(|source| Error::SourceRead {
            path: rel_path.display().to_string(),
            source,
        })?;
        let (data, body) = split_front_matter(&source, rel_path)?;

        let date = match data.get("date").and_then(Value::as_str) {
            Some(raw) => match parse_date(raw) {
                Some(date) => date,
                None => {
                    warn!("Unrecognized date '{raw}' in {}, using file time", rel_path.display());
                    modified_time(&path)?
                }
            },
            None => modified_time(&path)?,
        };

        Ok(Self { rel_path: rel_path.to_path_buf(), data, body: body.to_string(), date })
    }

    pub fn is_markdown(&self) -> bool {
        self.rel_path.extension().is_some_and(|ext| ext == "md")
    }

    /// Tags from front matter; a single string counts as one tag.
    pub fn tags(&self) -> Vec<String> {
        match self.data.get("tags") {
            Some(Value::String(tag)) => vec![tag.clone()],
            Some(Value::Array(tags)) => {
                tags.iter().filter_map(|t| t.as_str().map(str::to_string)).collect()
            }
            _ => Vec::new(),
        }
    }

    pub fn layout(&self) -> Option<&str> {
        self.data.get("layout").and_then(Value::as_str)
    }

    pub fn is_paginated(&self) -> bool {
        self.data.contains_key("pagination")
    }

    pub fn excluded_from_collections(&self) -> bool {
        self.data
            .get("excludeFromCollections")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// `None` when no permalink is set, `Some(None)` for `permalink: false`.
    pub fn permalink(&self) -> Option<Option<&str>> {
        match self.data.get("permalink") {
            Some(Value::Bool(false)) => Some(None),
            Some(Value::String(p)) => Some(Some(p.as_str())),
            _ => None,
        }
    }

    /// The URL the page gets when front matter does not override it.
    pub fn default_url(&self) -> String {
        default_url(&self.rel_path)
    }

    /// Index pages take their directory's name.
    pub fn file_slug(&self) -> String {
        let stem = self.rel_path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
        if stem != "index" {
            return stem.to_string();
        }
        self.rel_path
            .parent()
            .and_then(|p| p.file_name())
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string()
    }

    /// The `page` variable templates see.
    pub fn page_object(&self, url: Option<&str>) -> Value {
        json!({
            "url": url,
            "inputPath": self.rel_path.to_slash_string(),
            "fileSlug": self.file_slug(),
            "date": self.date.format(DATE_FORMAT).to_string(),
            "outputPath": url.map(|u| url_to_output(u).to_slash_string()),
        })
    }

    /// The entry this page contributes to a collection.
    pub fn collection_item(&self, url: Option<&str>) -> Value {
        let mut item = self.page_object(url);
        item["data"] = Value::Object(self.data.clone());
        item
    }
}

/// `index.*` maps to its directory; anything else to `/<dir>/<stem>/`.
pub fn default_url(rel_path: &Path) -> String {
    let parent = rel_path.parent().map(|p| p.to_slash_string()).unwrap_or_default();
    let stem = rel_path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();

    let mut url = String::from("/");
    if !parent.is_empty() {
        url.push_str(&parent);
        url.push('/');
    }
    if stem != "index" {
        url.push_str(stem);
        url.push('/');
    }
    url
}

/// Ensures the URL is rooted.
pub fn normalize_url(url: &str) -> String {
    let trimmed = url.trim();
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

/// Directory-style URLs (`/a/b/`) write `a/b/index.html`; others are files.
pub fn url_to_output(url: &str) -> PathBuf {
    let rel = url.trim_start_matches('/');
    if rel.is_empty() || rel.ends_with('/') {
        PathBuf::from(rel).join("index.html")
    } else {
        PathBuf::from(rel)
    }
}

fn modified_time(path: &Path) -> Result<NaiveDateTime> {
    let modified = std::fs::metadata(path)?.modified()?;
    Ok(DateTime::<Local>::from(modified).naive_local())
}
