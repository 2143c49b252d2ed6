//! Renderable component implementations
//!
//! The engine treats implementations as opaque: it stores, hands out and
//! compares them by identity, but never calls into them. Callers (the page
//! renderer, the exporter) invoke `render` with a node's props.

use std::sync::Arc;

/// Arbitrary props attached to a configuration node. Never interpreted by the registry.
pub type Props = serde_yaml::Mapping;

/// A single renderable unit, e.g. one variant of a button
pub trait Component: Send + Sync {
    /// Render this component with the given props and already-rendered children
    fn render(&self, props: &Props, children: &[String]) -> String;
}

impl<F> Component for F
where
    F: Fn(&Props, &[String]) -> String + Send + Sync,
{
    fn render(&self, props: &Props, children: &[String]) -> String {
        self(props, children)
    }
}

/// Shared reference to a component implementation
pub type Implementation = Arc<dyn Component>;

/// Wrap a component value into an [`Implementation`]
pub fn implementation<C: Component + 'static>(component: C) -> Implementation {
    Arc::new(component)
}

/// Whether two implementation references point at the same component
pub fn same_implementation(a: &Implementation, b: &Implementation) -> bool {
    Arc::ptr_eq(a, b)
}

/// Read a string prop, falling back to `default` when absent or not a string
pub fn prop_str<'a>(props: &'a Props, key: &str, default: &'a str) -> &'a str {
    props
        .get(key)
        .and_then(serde_yaml::Value::as_str)
        .unwrap_or(default)
}

/// Escape text for inclusion in HTML element content or attribute values
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
