//! Page configuration documents
//!
//! This module provides:
//! - The persisted page tree (`PageDocument`, `ConfigNode`)
//! - Loading documents from remote URLs or local files
//! - Builder version compatibility checking

pub mod source;
pub mod version;

use crate::component::Props;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub use source::{discover_documents, DocumentFetcher, DocumentSource};
pub use version::check_compatibility;

/// One node of a page tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigNode {
    /// Registry name of the component
    #[serde(alias = "componentName")]
    pub component: String,

    /// Variant id; the component's default variant when absent
    #[serde(default, alias = "variantId", skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,

    /// Passed verbatim to the resolved implementation
    #[serde(default, skip_serializing_if = "Props::is_empty")]
    pub props: Props,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ConfigNode>,
}

impl ConfigNode {
    pub fn new(component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            variant: None,
            props: Props::new(),
            children: Vec::new(),
        }
    }

    pub fn variant(mut self, variant: impl Into<String>) -> Self {
        self.variant = Some(variant.into());
        self
    }

    pub fn props(mut self, props: Props) -> Self {
        self.props = props;
        self
    }

    pub fn child(mut self, child: ConfigNode) -> Self {
        self.children.push(child);
        self
    }
}

/// A persisted page: metadata plus the root nodes in document order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDocument {
    /// Page slug, also the exported file stem
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Context tag every node of this page is resolved with
    #[serde(default, alias = "page_type", skip_serializing_if = "Option::is_none")]
    pub page_type: Option<String>,

    /// Version of the builder that saved this document
    #[serde(default, alias = "builder_version", skip_serializing_if = "Option::is_none")]
    pub builder_version: Option<String>,

    #[serde(default)]
    pub nodes: Vec<ConfigNode>,
}

impl PageDocument {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: None,
            page_type: None,
            builder_version: None,
            nodes: Vec::new(),
        }
    }

    /// Parse a document from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        let document: PageDocument =
            serde_yaml::from_str(content).context("Failed to parse page document")?;
        if document.name.trim().is_empty() {
            anyhow::bail!("Page document has an empty name");
        }
        Ok(document)
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize page document")
    }

    /// Read a document from a local file
    pub async fn load(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_yaml(&content).with_context(|| format!("Invalid page document {}", path.display()))
    }

    /// Total number of nodes in the tree
    pub fn node_count(&self) -> usize {
        fn count(nodes: &[ConfigNode]) -> usize {
            nodes.iter().map(|n| 1 + count(&n.children)).sum()
        }
        count(&self.nodes)
    }
}
