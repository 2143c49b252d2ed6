//! Page rendering over a registry snapshot
//!
//! Both the studio preview and the exporter walk a page tree the same way and
//! resolve every node through the registry. They differ only in what happens
//! to a node that does not resolve: preview renders a visible placeholder,
//! export fails the page with the node's path.

use crate::component::{escape_html, Implementation};
use crate::document::{ConfigNode, PageDocument};
use crate::error::ResolutionError;
use crate::registry::{ComponentRegistry, RegistrySnapshot};
use anyhow::Result;
use std::sync::Arc;
use thiserror::Error;

/// How unresolvable nodes are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Replace the node with a placeholder and keep going
    Preview,
    /// Fail the page
    Export,
}

/// A resolution failure attributed to one node of a page
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{path} ({component}, variant {}): {source}", .variant.as_deref().unwrap_or("<default>"))]
pub struct NodeError {
    /// Location in the tree, e.g. `nodes[1].children[0]`
    pub path: String,
    pub component: String,
    pub variant: Option<String>,
    pub source: ResolutionError,
}

/// Output of rendering one page
#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub name: String,
    pub title: String,
    pub body: String,
    /// Nodes replaced by placeholders (preview mode only)
    pub placeholders: Vec<NodeError>,
}

pub struct PageRenderer {
    snapshot: Arc<RegistrySnapshot>,
    mode: RenderMode,
}

impl PageRenderer {
    /// Create a renderer bound to the registry's current snapshot.
    /// Fails if discovery has not completed.
    pub fn new(registry: &ComponentRegistry, mode: RenderMode) -> Result<Self> {
        if !registry.is_sealed() {
            anyhow::bail!("Component registry has not been initialized");
        }
        Ok(Self {
            snapshot: registry.snapshot(),
            mode,
        })
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    pub fn render_page(&self, page: &PageDocument) -> Result<RenderedPage, NodeError> {
        let context = page.page_type.as_deref();
        let mut placeholders = Vec::new();
        let mut body = String::new();

        for (index, node) in page.nodes.iter().enumerate() {
            let path = format!("nodes[{}]", index);
            body.push_str(&self.render_node(node, &path, context, &mut placeholders)?);
        }

        Ok(RenderedPage {
            name: page.name.clone(),
            title: page.title.clone().unwrap_or_else(|| page.name.clone()),
            body,
            placeholders,
        })
    }

    fn render_node(
        &self,
        node: &ConfigNode,
        path: &str,
        context: Option<&str>,
        placeholders: &mut Vec<NodeError>,
    ) -> Result<String, NodeError> {
        let resolved = match resolve_node(&self.snapshot, node, path, context) {
            Err(err) if self.mode == RenderMode::Export => return Err(err),
            other => other,
        };

        let mut children = Vec::with_capacity(node.children.len());
        for (index, child) in node.children.iter().enumerate() {
            let child_path = format!("{}.children[{}]", path, index);
            children.push(self.render_node(child, &child_path, context, placeholders)?);
        }

        match resolved {
            Ok(implementation) => Ok(implementation.render(&node.props, &children)),
            Err(err) => {
                tracing::warn!(path = %err.path, error = %err.source, "rendering placeholder");
                let html = placeholder(&err, &children);
                placeholders.push(err);
                Ok(html)
            }
        }
    }
}

fn resolve_node(
    snapshot: &RegistrySnapshot,
    node: &ConfigNode,
    path: &str,
    context: Option<&str>,
) -> Result<Implementation, NodeError> {
    snapshot
        .resolve(&node.component, node.variant.as_deref(), context)
        .map_err(|source| NodeError {
            path: path.to_string(),
            component: node.component.clone(),
            variant: node.variant.clone(),
            source,
        })
}

fn placeholder(err: &NodeError, children: &[String]) -> String {
    format!(
        r#"<div class="studio-placeholder" data-component="{}" data-variant="{}"><p>{}</p>{}</div>"#,
        escape_html(&err.component),
        escape_html(err.variant.as_deref().unwrap_or("")),
        escape_html(&err.source.to_string()),
        children.concat()
    )
}

/// Every node of `page` that would fail to resolve, in document order
pub fn check_document(snapshot: &RegistrySnapshot, page: &PageDocument) -> Vec<NodeError> {
    fn walk(
        snapshot: &RegistrySnapshot,
        nodes: &[ConfigNode],
        prefix: &str,
        context: Option<&str>,
        errors: &mut Vec<NodeError>,
    ) {
        for (index, node) in nodes.iter().enumerate() {
            let path = if prefix.is_empty() {
                format!("nodes[{}]", index)
            } else {
                format!("{}.children[{}]", prefix, index)
            };
            if let Err(err) = resolve_node(snapshot, node, &path, context) {
                errors.push(err);
            }
            walk(snapshot, &node.children, &path, context, errors);
        }
    }

    let mut errors = Vec::new();
    walk(snapshot, &page.nodes, "", page.page_type.as_deref(), &mut errors);
    errors
}
