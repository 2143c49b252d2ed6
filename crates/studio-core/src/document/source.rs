//! Page document loading from remote URLs or the local filesystem

use super::PageDocument;
use anyhow::{Context, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use url::Url;
use walkdir::WalkDir;

/// Where a page document lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    Remote(Url),
    Local(PathBuf),
}

impl DocumentSource {
    /// Interpret a command-line argument: `http(s)://` URLs are remote, anything else is a path
    pub fn parse(input: &str) -> Self {
        match Url::parse(input) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Self::Remote(url),
            _ => Self::Local(PathBuf::from(input)),
        }
    }

    /// Create a local document source from a path
    pub fn local(path: PathBuf) -> Self {
        Self::Local(path)
    }
}

impl fmt::Display for DocumentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentSource::Remote(url) => write!(f, "{}", url),
            DocumentSource::Local(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Document fetcher - handles retrieving page documents from remote or local sources
pub struct DocumentFetcher {
    client: reqwest::Client,
}

impl DocumentFetcher {
    /// Create a new fetcher with a custom user agent
    pub fn new(user_agent: &str) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent(user_agent)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }

    /// Fetch and parse one page document
    pub async fn fetch(&self, source: &DocumentSource) -> Result<PageDocument> {
        match source {
            DocumentSource::Remote(url) => {
                let response = self
                    .client
                    .get(url.clone())
                    .send()
                    .await
                    .with_context(|| format!("Failed to fetch page document from {}", url))?;

                if !response.status().is_success() {
                    anyhow::bail!(
                        "Failed to fetch page document from {}: HTTP {}",
                        url,
                        response.status()
                    );
                }

                let content = response.text().await?;
                PageDocument::from_yaml(&content)
                    .with_context(|| format!("Invalid page document {}", url))
            }
            DocumentSource::Local(path) => PageDocument::load(path).await,
        }
    }

    /// Expand directories into the documents they contain, then fetch everything in order
    pub async fn fetch_all(&self, sources: &[DocumentSource]) -> Result<Vec<PageDocument>> {
        let mut documents = Vec::new();
        for source in sources {
            match source {
                DocumentSource::Local(path) if path.is_dir() => {
                    for file in discover_documents(path)? {
                        documents.push(PageDocument::load(&file).await?);
                    }
                }
                _ => documents.push(self.fetch(source).await?),
            }
        }
        Ok(documents)
    }
}

fn is_document(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

/// All `*.yaml`/`*.yml` files below `dir`, sorted by path
pub fn discover_documents(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        anyhow::bail!("Document directory not found: {}", dir.display());
    }

    let mut found = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry =
            entry.with_context(|| format!("Failed to read directory {}", dir.display()))?;
        if entry.file_type().is_file() && is_document(entry.path()) {
            found.push(entry.into_path());
        }
    }
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_remote_and_local() {
        assert_eq!(
            DocumentSource::parse("https://example.com/pages/home.yaml"),
            DocumentSource::Remote(Url::parse("https://example.com/pages/home.yaml").unwrap())
        );
        assert_eq!(
            DocumentSource::parse("pages/home.yaml"),
            DocumentSource::Local(PathBuf::from("pages/home.yaml"))
        );
        // Windows drive letters parse as URL schemes
        assert_eq!(
            DocumentSource::parse("C:/pages/home.yaml"),
            DocumentSource::Local(PathBuf::from("C:/pages/home.yaml"))
        );
    }

    #[test]
    fn test_discover_documents_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("blog")).unwrap();
        std::fs::write(dir.path().join("pricing.yml"), "name: pricing\n").unwrap();
        std::fs::write(dir.path().join("about.yaml"), "name: about\n").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        std::fs::write(dir.path().join("blog/post.yaml"), "name: post\n").unwrap();

        let found: Vec<String> = discover_documents(dir.path())
            .unwrap()
            .iter()
            .map(|p| {
                p.strip_prefix(dir.path())
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect();
        assert_eq!(found, vec!["about.yaml", "blog/post.yaml", "pricing.yml"]);
    }

    #[test]
    fn test_discover_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(discover_documents(&dir.path().join("missing")).is_err());
    }

    #[tokio::test]
    async fn test_fetch_all_expands_directories() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.yaml"), "name: b\n").unwrap();
        std::fs::write(dir.path().join("a.yaml"), "name: a\n").unwrap();

        let fetcher = DocumentFetcher::new("site-studio-test");
        let docs = fetcher
            .fetch_all(&[DocumentSource::local(dir.path().to_path_buf())])
            .await
            .unwrap();
        let names: Vec<&str> = docs.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }
}
