//! Static component catalog generated from the registry

use crate::metadata::{ComponentType, VariantDescriptor};
use crate::registry::{ListFilter, RegistrySnapshot};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// One registered component as written to `catalog.yaml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub component_type: Option<ComponentType>,
    pub description: String,
    pub default_variant: String,
    pub compatible_with: Vec<String>,
    pub variants: Vec<VariantDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub components: Vec<CatalogEntry>,
}

impl Catalog {
    /// Whether `name` (and `variant`, if given) is part of this catalog
    pub fn contains(&self, name: &str, variant: Option<&str>) -> bool {
        self.components.iter().any(|entry| {
            entry.name == name
                && variant.map_or(true, |id| entry.variants.iter().any(|v| v.id == id))
        })
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize component catalog")
    }
}

/// Every registered component and its variants, in registration order
pub fn build_catalog(snapshot: &RegistrySnapshot) -> Catalog {
    let components = snapshot
        .list(&ListFilter::all())
        .iter()
        .map(|entry| {
            let metadata = entry.metadata();
            CatalogEntry {
                name: entry.name().to_string(),
                component_type: metadata.component_type,
                description: metadata.description.clone(),
                default_variant: metadata.default_variant.clone(),
                compatible_with: metadata.compatible_with.clone(),
                variants: metadata.variants.clone(),
            }
        })
        .collect();
    Catalog { components }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::BUILTIN_MODULES;
    use crate::discovery::initialize;
    use crate::registry::ComponentRegistry;

    #[test]
    fn test_catalog_lists_every_component() {
        let registry = ComponentRegistry::new();
        initialize(&registry).unwrap();
        let catalog = build_catalog(&registry.snapshot());

        assert_eq!(catalog.components.len(), BUILTIN_MODULES.len());
        assert_eq!(catalog.components[0].name, "button");
        assert!(catalog.contains("button", None));
        assert!(catalog.contains("button", Some("outline")));
        assert!(!catalog.contains("button", Some("ghost")));
        assert!(!catalog.contains("carousel", None));
    }

    #[test]
    fn test_catalog_yaml_shape() {
        let registry = ComponentRegistry::new();
        initialize(&registry).unwrap();
        let yaml = build_catalog(&registry.snapshot()).to_yaml().unwrap();

        assert!(yaml.contains("- name: hero"));
        assert!(yaml.contains("type: section"));
        assert!(yaml.contains("defaultVariant: centered"));
        let parsed: Catalog = serde_yaml::from_str(&yaml).unwrap();
        assert!(parsed.contains("landing", Some("standard")));
    }
}
