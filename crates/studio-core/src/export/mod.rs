//! Static site export
//!
//! Renders every page in export mode and writes the results, a component
//! catalog and optionally a zip archive to the output directory. A page that
//! references an unresolvable component is reported and skipped; the rest of
//! the batch is still exported.

pub mod archive;
pub mod catalog;

use crate::component::escape_html;
use crate::config::StudioConfig;
use crate::document::PageDocument;
use crate::registry::ComponentRegistry;
use crate::render::{NodeError, PageRenderer, RenderMode};
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use tokio::fs;

pub use catalog::{build_catalog, Catalog, CatalogEntry};

/// File name of the generated catalog
pub const CATALOG_FILE: &str = "catalog.yaml";

#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub out_dir: PathBuf,
    pub site_name: String,
    pub archive: bool,
    /// Applied to pages without a page type
    pub default_page_type: Option<String>,
}

impl ExportOptions {
    pub fn from_config(config: &StudioConfig) -> Self {
        Self {
            out_dir: config.output_dir.clone(),
            site_name: config.site_name.clone(),
            archive: config.archive,
            default_page_type: config.default_page_type.clone(),
        }
    }
}

/// A page that was not exported
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageFailure {
    pub page: String,
    pub error: NodeError,
}

impl fmt::Display for PageFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "page '{}' at {}", self.page, self.error)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ExportReport {
    /// Page files written, in input order
    pub pages: Vec<PathBuf>,
    pub failures: Vec<PageFailure>,
    pub catalog: PathBuf,
    pub archive: Option<PathBuf>,
}

impl ExportReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Wrap a rendered body into a standalone HTML document
pub fn html_document(title: &str, body: &str) -> String {
    format!(
        "<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n</head>\n<body>\n{}\n</body>\n</html>\n",
        escape_html(title),
        body
    )
}

/// Reject names that would escape the output directory when used as a file stem
fn check_file_stem(kind: &str, name: &str) -> Result<()> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !valid {
        anyhow::bail!(
            "Invalid {} '{}': use letters, digits, '-' and '_' only",
            kind,
            name
        );
    }
    Ok(())
}

/// Output file name for a page
fn page_file_name(name: &str) -> Result<String> {
    check_file_stem("page name", name)?;
    Ok(format!("{}.html", name))
}

/// Export `pages` into `options.out_dir`
pub async fn export_site(
    registry: &ComponentRegistry,
    pages: &[PageDocument],
    options: &ExportOptions,
) -> Result<ExportReport> {
    let renderer = PageRenderer::new(registry, RenderMode::Export)?;
    check_file_stem("site name", &options.site_name)?;

    let mut seen = HashSet::new();
    for page in pages {
        page_file_name(&page.name)?;
        if !seen.insert(page.name.as_str()) {
            anyhow::bail!("Duplicate page name '{}'", page.name);
        }
    }

    fs::create_dir_all(&options.out_dir)
        .await
        .with_context(|| format!("Failed to create directory: {}", options.out_dir.display()))?;

    let mut report = ExportReport::default();
    let mut bundle: Vec<(String, Vec<u8>)> = Vec::new();

    for page in pages {
        let mut page = page.clone();
        if page.page_type.is_none() {
            page.page_type = options.default_page_type.clone();
        }

        let rendered = match renderer.render_page(&page) {
            Ok(rendered) => rendered,
            Err(error) => {
                tracing::warn!(page = %page.name, %error, "page not exported");
                report.failures.push(PageFailure {
                    page: page.name.clone(),
                    error,
                });
                continue;
            }
        };

        let file_name = page_file_name(&page.name)?;
        let html = html_document(&rendered.title, &rendered.body);
        let target = options.out_dir.join(&file_name);
        write_file(&target, html.as_bytes()).await?;
        tracing::debug!(page = %page.name, path = %target.display(), "exported page");

        report.pages.push(target);
        bundle.push((file_name, html.into_bytes()));
    }

    let catalog = build_catalog(&registry.snapshot()).to_yaml()?;
    report.catalog = options.out_dir.join(CATALOG_FILE);
    write_file(&report.catalog, catalog.as_bytes()).await?;
    bundle.push((CATALOG_FILE.to_string(), catalog.into_bytes()));

    if options.archive {
        let zip_bytes = archive::build_zip(&options.site_name, &bundle)?;
        let zip_path = options.out_dir.join(format!("{}.zip", options.site_name));
        write_file(&zip_path, &zip_bytes).await?;
        report.archive = Some(zip_path);
    }

    Ok(report)
}

async fn write_file(path: &Path, content: &[u8]) -> Result<()> {
    fs::write(path, content)
        .await
        .with_context(|| format!("Failed to write file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::initialize;
    use crate::document::ConfigNode;
    use crate::error::ResolutionError;

    fn registry() -> ComponentRegistry {
        let registry = ComponentRegistry::new();
        initialize(&registry).unwrap();
        registry
    }

    fn options(dir: &Path, archive: bool) -> ExportOptions {
        ExportOptions {
            out_dir: dir.join("dist"),
            site_name: "acme".to_string(),
            archive,
            default_page_type: Some("landing-page".to_string()),
        }
    }

    fn page(name: &str, component: &str) -> PageDocument {
        let mut doc = PageDocument::new(name);
        doc.nodes.push(ConfigNode::new(component));
        doc
    }

    #[tokio::test]
    async fn test_export_writes_pages_and_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let opts = options(dir.path(), false);

        let report = export_site(&registry(), &[page("index", "hero")], &opts)
            .await
            .unwrap();

        assert!(report.is_success());
        assert_eq!(report.pages, vec![opts.out_dir.join("index.html")]);
        let html = std::fs::read_to_string(&report.pages[0]).unwrap();
        assert!(html.starts_with("<!doctype html>"));
        assert!(html.contains("<title>index</title>"));
        assert!(html.contains("hero--centered"));
        assert!(opts.out_dir.join(CATALOG_FILE).exists());
        assert!(report.archive.is_none());
    }

    #[tokio::test]
    async fn test_failing_page_does_not_abort_batch() {
        let dir = tempfile::tempdir().unwrap();
        let opts = options(dir.path(), false);
        let mut blog = page("blog", "hero");
        blog.page_type = Some("blog-post".to_string());

        let report = export_site(
            &registry(),
            &[page("index", "hero"), blog, page("about", "footer")],
            &opts,
        )
        .await
        .unwrap();

        assert!(!report.is_success());
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].page, "blog");
        assert_eq!(
            report.failures[0].error.source,
            ResolutionError::IncompatibleContext("hero".to_string(), "blog-post".to_string())
        );
        assert_eq!(
            report.failures[0].to_string(),
            "page 'blog' at nodes[0] (hero, variant <default>): component 'hero' is not compatible with 'blog-post' pages"
        );
        assert_eq!(report.pages.len(), 2);
        assert!(!opts.out_dir.join("blog.html").exists());
    }

    #[tokio::test]
    async fn test_archive_bundles_written_files() {
        let dir = tempfile::tempdir().unwrap();
        let opts = options(dir.path(), true);

        let report = export_site(&registry(), &[page("index", "cta")], &opts)
            .await
            .unwrap();

        let zip_path = report.archive.unwrap();
        assert_eq!(zip_path, opts.out_dir.join("acme.zip"));
        let bytes = std::fs::read(&zip_path).unwrap();
        let archive = zip::ZipArchive::new(std::io::Cursor::new(bytes)).unwrap();
        let mut names: Vec<&str> = archive.file_names().collect();
        names.sort();
        assert_eq!(names, vec!["acme/catalog.yaml", "acme/index.html"]);
    }

    #[tokio::test]
    async fn test_rejects_bad_page_names() {
        let dir = tempfile::tempdir().unwrap();
        let opts = options(dir.path(), false);
        let registry = registry();

        let err = export_site(&registry, &[page("../escape", "hero")], &opts)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Invalid page name"));

        let err = export_site(&registry, &[page("a", "hero"), page("a", "cta")], &opts)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Duplicate page name 'a'"));
        assert!(!opts.out_dir.exists());
    }

    #[tokio::test]
    async fn test_rejects_bad_site_name() {
        let dir = tempfile::tempdir().unwrap();
        let mut opts = options(dir.path(), true);
        opts.site_name = "../escape".to_string();

        let err = export_site(&registry(), &[page("index", "hero")], &opts)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Invalid site name '../escape'"));
        assert!(!opts.out_dir.exists());
        assert!(!dir.path().join("escape.zip").exists());
    }

    #[tokio::test]
    async fn test_requires_initialized_registry() {
        let dir = tempfile::tempdir().unwrap();
        let result = export_site(
            &ComponentRegistry::new(),
            &[page("index", "hero")],
            &options(dir.path(), false),
        )
        .await;
        assert!(result.is_err());
    }
}
