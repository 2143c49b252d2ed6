//! Component metadata types
//!
//! Metadata is plain data: it describes a component type and the variants it
//! offers. It is validated once, when the component is registered, and never
//! changes afterwards.

pub mod validate;

use crate::component::Props;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

pub use validate::{validate, MetadataError};

/// Context tag that makes a component compatible with every page type
pub const COMPATIBLE_WITH_ALL: &str = "all";

/// Coarse category of a component, used for filtering the palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentType {
    Element,
    Section,
    Template,
    Layout,
}

impl ComponentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentType::Element => "element",
            ComponentType::Section => "section",
            ComponentType::Template => "template",
            ComponentType::Layout => "layout",
        }
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ComponentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "element" | "elements" => Ok(ComponentType::Element),
            "section" | "sections" => Ok(ComponentType::Section),
            "template" | "templates" => Ok(ComponentType::Template),
            "layout" | "layouts" => Ok(ComponentType::Layout),
            other => Err(format!(
                "unknown component type '{}' (expected element, section, template or layout)",
                other
            )),
        }
    }
}

/// One selectable implementation of a component type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantDescriptor {
    /// Unique within the owning component
    pub id: String,

    /// Human-readable name
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Search/filter tags (e.g. "cta", "compact")
    #[serde(default)]
    pub tags: BTreeSet<String>,

    /// Opaque path or URL to a preview image
    #[serde(default)]
    pub thumbnail: Option<String>,
}

impl VariantDescriptor {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            tags: BTreeSet::new(),
            thumbnail: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    pub fn thumbnail(mut self, thumbnail: impl Into<String>) -> Self {
        self.thumbnail = Some(thumbnail.into());
        self
    }
}

fn default_compatible_with() -> Vec<String> {
    vec![COMPATIBLE_WITH_ALL.to_string()]
}

/// Metadata describing one component type and its variants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentMetadata {
    /// Coarse category; `None` only for documents that omitted it (rejected by validation)
    #[serde(rename = "type", default)]
    pub component_type: Option<ComponentType>,

    /// Globally unique registry key
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Must equal the id of one entry in `variants`
    #[serde(default)]
    pub default_variant: String,

    /// Page types this component may be placed into, or "all"
    #[serde(default = "default_compatible_with")]
    pub compatible_with: Vec<String>,

    /// Ordered variant list, must be non-empty
    #[serde(default)]
    pub variants: Vec<VariantDescriptor>,

    /// Sample prop sets used to seed previews and documentation
    #[serde(default)]
    pub examples: Vec<Props>,
}

impl ComponentMetadata {
    pub fn new(
        component_type: ComponentType,
        name: impl Into<String>,
        default_variant: impl Into<String>,
    ) -> Self {
        Self {
            component_type: Some(component_type),
            name: name.into(),
            description: String::new(),
            default_variant: default_variant.into(),
            compatible_with: default_compatible_with(),
            variants: Vec::new(),
            examples: Vec::new(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn variant(mut self, variant: VariantDescriptor) -> Self {
        self.variants.push(variant);
        self
    }

    /// Replace the compatibility list
    pub fn compatible_with<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.compatible_with = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn example(mut self, props: Props) -> Self {
        self.examples.push(props);
        self
    }

    /// Whether a component with this metadata may be placed in a `tag` context
    pub fn is_compatible_with(&self, tag: &str) -> bool {
        self.compatible_with
            .iter()
            .any(|t| t == COMPATIBLE_WITH_ALL || t == tag)
    }

    /// Variant ids in declaration order
    pub fn variant_ids(&self) -> impl Iterator<Item = &str> {
        self.variants.iter().map(|v| v.id.as_str())
    }

    pub fn find_variant(&self, id: &str) -> Option<&VariantDescriptor> {
        self.variants.iter().find(|v| v.id == id)
    }
}
