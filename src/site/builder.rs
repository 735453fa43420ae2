use crate::config::BuildConfig;
use crate::error::{Error, Result};
use crate::ext::PathExt;
use crate::ignore::{is_ignored, parse_ignore_file};
use crate::renderer::{render_markdown, TemplateRenderer};
use crate::site::collections::Collections;
use crate::site::data::load_global_data;
use crate::site::layout::LayoutResolver;
use crate::site::operation::BuildOperation;
use crate::site::page::{normalize_url, url_to_output, Page};
use crate::site::pagination::{default_page_url, pagination_value, PaginationConfig};
use globset::GlobSet;
use log::{debug, info};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One document to render: a page, or one slice of a paginated page.
struct RenderUnit {
    page: usize,
    url: Option<String>,
    pagination: Option<Value>,
    alias: Option<(String, Value)>,
}

/// Turns the input directory into a list of build operations.
pub struct SiteBuilder<'a> {
    root: PathBuf,
    config: &'a BuildConfig,
    renderer: &'a dyn TemplateRenderer,
    ignore: GlobSet,
}

impl<'a> SiteBuilder<'a> {
    pub fn new<P: Into<PathBuf>>(
        root: P,
        config: &'a BuildConfig,
        renderer: &'a dyn TemplateRenderer,
    ) -> Result<Self> {
        let root = root.into();
        let ignore = parse_ignore_file(&root)?;
        Ok(Self { root, config, renderer, ignore })
    }

    /// Finds every page under the input directory.
    ///
    /// The include and data directories, passthrough directories, ignored
    /// paths and files that are not a template format are left out.
    pub fn discover(&self) -> Result<Vec<Page>> {
        let input = &self.config.input;
        if !input.is_dir() {
            return Err(Error::InputDirectoryMissing { input_dir: input.display().to_string() });
        }

        let mut skipped: Vec<PathBuf> = vec![
            self.config.includes_dir(),
            self.config.data_dir(),
            self.config.output.clone(),
        ];
        skipped.extend(self.config.passthrough.iter().map(|dir| input.join(dir)));

        let walker = WalkDir::new(input).sort_by_file_name().into_iter().filter_entry(|entry| {
            let path = entry.path();
            !skipped.iter().any(|dir| path.starts_with(dir))
                && !is_ignored(&self.ignore, &self.root, path)
        });

        let mut pages = Vec::new();
        for entry in walker {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            if !self.config.is_template_format(entry.path()) {
                debug!("Ignoring non-template file {}", entry.path().display());
                continue;
            }
            let rel = entry.path().relative_to(input);
            pages.push(Page::load(input, rel)?);
        }
        info!("Discovered {} pages in {}", pages.len(), input.display());
        Ok(pages)
    }

    /// Renders every page and returns the writes the build would perform.
    pub fn plan(&self) -> Result<Vec<BuildOperation>> {
        let global = load_global_data(&self.config.data_dir())?;
        let pages = self.discover()?;

        let urls = pages
            .iter()
            .map(|page| if page.is_paginated() { Ok(None) } else { self.page_url(&global, page) })
            .collect::<Result<Vec<_>>>()?;

        let members: Vec<bool> = pages
            .iter()
            .map(|page| !page.is_paginated() && !page.excluded_from_collections())
            .collect();
        let collections = Collections::build(&pages, &members);
        for tag in collections.tags() {
            debug!("Collection '{tag}' holds {} pages", collections.members(tag).len());
        }

        let mut items: Vec<Value> = pages
            .iter()
            .zip(&urls)
            .map(|(page, url)| page.collection_item(url.as_deref()))
            .collect();

        // First pass: render collection members so listings can embed them.
        let partial = collections.to_value(&items);
        for (index, page) in pages.iter().enumerate().filter(|(i, _)| members[*i]) {
            let mut context = self.base_context(&global, page, urls[index].as_deref());
            context.insert("collections".into(), partial.clone());
            let content = self.render_body(page, &Value::Object(context))?;
            items[index]["templateContent"] = Value::String(content);
        }
        let collections = collections.to_value(&items);

        let mut units = Vec::new();
        for (index, page) in pages.iter().enumerate() {
            if page.is_paginated() {
                units.extend(self.paginate(index, page, &global, &collections)?);
            } else {
                units.push(RenderUnit {
                    page: index,
                    url: urls[index].clone(),
                    pagination: None,
                    alias: None,
                });
            }
        }

        let layouts = LayoutResolver::new(self.renderer, self.config.includes_dir());
        let mut operations = Vec::with_capacity(units.len());
        for unit in units {
            let page = &pages[unit.page];
            let source = self.config.input.join(&page.rel_path);
            let Some(url) = unit.url.as_deref() else {
                operations.push(BuildOperation::Skip { source });
                continue;
            };

            let mut context = self.base_context(&global, page, Some(url));
            context.insert("collections".into(), collections.clone());
            if let Some(pagination) = unit.pagination {
                context.insert("pagination".into(), pagination);
            }
            if let Some((alias, value)) = unit.alias {
                context.insert(alias, value);
            }
            let context = Value::Object(context);

            let body = self.render_body(page, &context)?;
            let content = layouts.apply(page.layout(), body, &context)?;
            operations.push(BuildOperation::Write {
                source,
                target: self.config.output.join(url_to_output(url)),
                content,
            });
        }
        Ok(operations)
    }

    /// Global data, then front matter, then `page`.
    fn base_context(
        &self,
        global: &Map<String, Value>,
        page: &Page,
        url: Option<&str>,
    ) -> Map<String, Value> {
        let mut context = global.clone();
        context.extend(page.data.clone());
        context.insert("page".into(), page.page_object(url));
        context
    }

    fn page_url(&self, global: &Map<String, Value>, page: &Page) -> Result<Option<String>> {
        match page.permalink() {
            None => Ok(Some(page.default_url())),
            Some(None) => Ok(None),
            Some(Some(template)) => {
                let context = Value::Object(self.base_context(global, page, None));
                let rendered = self.renderer.render_text(template, &context)?;
                Ok(Some(normalize_url(&rendered)))
            }
        }
    }

    fn paginate(
        &self,
        index: usize,
        page: &Page,
        global: &Map<String, Value>,
        collections: &Value,
    ) -> Result<Vec<RenderUnit>> {
        let paging =
            PaginationConfig::from_front_matter(&page.data["pagination"], &page.rel_path)?;
        let mut context = self.base_context(global, page, None);
        context.insert("collections".into(), collections.clone());
        let context = Value::Object(context);

        let chunks = paging.chunks(&context, &page.rel_path)?;
        debug!("Paginating {} into {} pages", page.rel_path.display(), chunks.len());

        let mut urls = Vec::with_capacity(chunks.len());
        for (page_number, items) in chunks.iter().enumerate() {
            let url = match page.permalink() {
                None => Some(default_page_url(&page.default_url(), page_number)),
                Some(None) => None,
                Some(Some(template)) => {
                    let mut ctx = context.clone();
                    ctx["pagination"] = pagination_value(items, page_number, paging.size, &[]);
                    let rendered = self.renderer.render_text(template, &ctx)?;
                    Some(normalize_url(&rendered))
                }
            };
            urls.push(url);
        }

        let hrefs: Vec<String> = urls.iter().map(|u| u.clone().unwrap_or_default()).collect();
        Ok(chunks
            .iter()
            .zip(urls)
            .enumerate()
            .map(|(page_number, (items, url))| RenderUnit {
                page: index,
                url,
                pagination: Some(pagination_value(items, page_number, paging.size, &hrefs)),
                alias: paging.alias.clone().map(|alias| (alias, paging.alias_value(items))),
            })
            .collect())
    }

    /// Renders the page's own template, then markdown for `.md` sources.
    fn render_body(&self, page: &Page, context: &Value) -> Result<String> {
        let name = page.rel_path.to_slash_string();
        let rendered = self.renderer.render(&page.body, context, Some(&name))?;
        if page.is_markdown() {
            Ok(render_markdown(&rendered))
        } else {
            Ok(rendered)
        }
    }
}

/// Fails when two operations write the same file.
pub fn check_duplicate_outputs(operations: &[BuildOperation]) -> Result<()> {
    let mut seen: std::collections::HashMap<&Path, &Path> = std::collections::HashMap::new();
    for op in operations {
        let Some(target) = op.target_path() else {
            continue;
        };
        if let Some(first) = seen.insert(target.as_path(), op.source_path().as_path()) {
            return Err(Error::DuplicateOutput {
                output: target.display().to_string(),
                first: first.display().to_string(),
                second: op.source_path().display().to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{Helpers, SiteRenderer};
    use std::fs;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn config_for(root: &Path) -> BuildConfig {
        BuildConfig {
            input: root.join("src"),
            output: root.join("_site"),
            ..BuildConfig::default()
        }
    }

    fn find<'o>(ops: &'o [BuildOperation], target: &Path) -> &'o str {
        ops.iter()
            .find_map(|op| match op {
                BuildOperation::Write { target: t, content, .. } if t == target => {
                    Some(content.as_str())
                }
                _ => None,
            })
            .unwrap_or_else(|| panic!("no write to {}", target.display()))
    }

    #[test]
    fn discovery_skips_includes_data_passthrough_and_ignored() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        write(root, "src/index.njk", "home");
        write(root, "src/_includes/base.njk", "{{ content }}");
        write(root, "src/_data/site.json", "{}");
        write(root, "src/assets/page.html", "asset");
        write(root, "src/notes.txt", "not a template");
        write(root, "src/drafts/wip.md", "draft");
        write(root, ".kilnignore", "src/drafts\n");

        let config = config_for(root);
        let renderer = SiteRenderer::new(&config, Helpers::default());
        let builder = SiteBuilder::new(root, &config, &renderer).unwrap();
        let pages = builder.discover().unwrap();

        let paths: Vec<String> = pages.iter().map(|p| p.rel_path.to_slash_string()).collect();
        assert_eq!(paths, vec!["index.njk"]);
    }

    #[test]
    fn discovery_skips_output_nested_in_input() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        write(root, "src/index.njk", "home");
        write(root, "src/_site/index.html", "generated");

        let config = BuildConfig { output: root.join("src/_site"), ..config_for(root) };
        let renderer = SiteRenderer::new(&config, Helpers::default());
        let builder = SiteBuilder::new(root, &config, &renderer).unwrap();
        let pages = builder.discover().unwrap();

        let paths: Vec<String> = pages.iter().map(|p| p.rel_path.to_slash_string()).collect();
        assert_eq!(paths, vec!["index.njk"]);
    }

    #[test]
    fn missing_input_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let config = config_for(tmp.path());
        let renderer = SiteRenderer::new(&config, Helpers::default());
        let builder = SiteBuilder::new(tmp.path(), &config, &renderer).unwrap();
        assert!(matches!(builder.discover(), Err(Error::InputDirectoryMissing { .. })));
    }

    #[test]
    fn renders_markdown_in_layout_with_collections() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        write(root, "src/_data/site.json", r#"{"title": "Blog"}"#);
        write(root, "src/_includes/base.njk", "<title>{{ site.title }}</title>{{ content }}");
        write(
            root,
            "src/posts/first.md",
            "---\ntitle: First\ndate: 2021-01-02\ntags: [post, rust]\nlayout: base.njk\n---\n# {{ title }}\n",
        );
        write(
            root,
            "src/index.njk",
            "{% for p in collections.post %}{{ p.data.title }}:{{ p.url }}:{{ p.templateContent | safe }}{% endfor %}",
        );

        let config = config_for(root);
        let renderer = SiteRenderer::new(&config, Helpers::default());
        let ops = SiteBuilder::new(root, &config, &renderer).unwrap().plan().unwrap();

        assert_eq!(
            find(&ops, &root.join("_site/posts/first/index.html")),
            "<title>Blog</title><h1>First</h1>\n"
        );
        assert_eq!(find(&ops, &root.join("_site/index.html")), "First:/posts/first/:<h1>First</h1>\n");
    }

    #[test]
    fn paginates_posts_with_permalinks() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        for (name, date) in [("a", "2021-01-01"), ("b", "2021-01-02"), ("c", "2021-01-03")] {
            write(
                root,
                &format!("src/posts/{name}.md"),
                &format!("---\ntitle: {name}\ndate: {date}\ntags: post\n---\n{name}"),
            );
        }
        write(
            root,
            "src/blog.njk",
            "---\npagination:\n  data: collections.post\n  size: 2\n  alias: posts\n  reverse: true\npermalink: \"{% if pagination.pageNumber > 0 %}posts/page/{{ pagination.pageNumber + 1 }}/{% else %}posts/{% endif %}\"\n---\n{% for p in posts %}{{ p.data.title }}{% endfor %}|{{ isPostPage(page.url) }}|{{ pagination.hrefs | join(',') }}",
        );

        let config = config_for(root);
        let renderer = SiteRenderer::new(&config, Helpers::default());
        let ops = SiteBuilder::new(root, &config, &renderer).unwrap().plan().unwrap();

        assert_eq!(
            find(&ops, &root.join("_site/posts/index.html")),
            "cb|false|/posts/,/posts/page/2/"
        );
        assert_eq!(
            find(&ops, &root.join("_site/posts/page/2/index.html")),
            "a|true|/posts/,/posts/page/2/"
        );
    }

    #[test]
    fn permalink_false_is_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        write(root, "src/draft.md", "---\npermalink: false\n---\nhidden");

        let config = config_for(root);
        let renderer = SiteRenderer::new(&config, Helpers::default());
        let ops = SiteBuilder::new(root, &config, &renderer).unwrap().plan().unwrap();
        assert_eq!(ops, vec![BuildOperation::Skip { source: root.join("src/draft.md") }]);
    }

    #[test]
    fn duplicate_outputs_are_rejected() {
        let ops = vec![
            BuildOperation::Write {
                source: PathBuf::from("src/about.md"),
                target: PathBuf::from("_site/about/index.html"),
                content: String::new(),
            },
            BuildOperation::Write {
                source: PathBuf::from("src/about/index.njk"),
                target: PathBuf::from("_site/about/index.html"),
                content: String::new(),
            },
        ];
        let err = check_duplicate_outputs(&ops).unwrap_err();
        assert!(matches!(err, Error::DuplicateOutput { .. }));
        assert!(check_duplicate_outputs(&ops[..1]).is_ok());
    }
}
