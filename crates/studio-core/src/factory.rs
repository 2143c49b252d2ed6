//! Variant factory
//!
//! Bundles a component's metadata, its default implementation and one
//! implementation per declared variant into a single [`PolymorphicComponent`].
//! Component modules build one of these at definition time and hand it to the
//! registry; code that knows a variant at compile time can bind to it directly
//! through [`PolymorphicComponent::variant`].

use crate::component::{Component, Implementation, Props};
use crate::error::RegistryError;
use crate::metadata::ComponentMetadata;
use std::collections::HashMap;
use std::fmt;

/// Variant id -> implementation
pub type VariantMap = HashMap<String, Implementation>;

/// Compare a variant map against the ids declared in `metadata`.
/// Returns `(missing, extra)`, both in a stable order.
pub(crate) fn diff_variant_map(
    metadata: &ComponentMetadata,
    variants: &VariantMap,
) -> (Vec<String>, Vec<String>) {
    let missing: Vec<String> = metadata
        .variant_ids()
        .filter(|id| !variants.contains_key(*id))
        .map(str::to_string)
        .collect();

    let mut extra: Vec<String> = variants
        .keys()
        .filter(|id| metadata.find_variant(id).is_none())
        .cloned()
        .collect();
    extra.sort();

    (missing, extra)
}

/// Builder for a [`PolymorphicComponent`]
pub struct VariantFactory {
    metadata: ComponentMetadata,
    default_implementation: Option<Implementation>,
    variants: VariantMap,
}

impl VariantFactory {
    pub fn new(metadata: ComponentMetadata) -> Self {
        Self {
            metadata,
            default_implementation: None,
            variants: VariantMap::new(),
        }
    }

    /// Implementation used when the component is invoked without a variant.
    /// Defaults to the implementation of `metadata.default_variant`.
    pub fn default_implementation(mut self, implementation: Implementation) -> Self {
        self.default_implementation = Some(implementation);
        self
    }

    pub fn variant(mut self, id: impl Into<String>, implementation: Implementation) -> Self {
        self.variants.insert(id.into(), implementation);
        self
    }

    /// Fails fast if a declared variant has no implementation, or if an
    /// implementation is supplied for a variant the metadata never declared.
    pub fn build(self) -> Result<PolymorphicComponent, RegistryError> {
        let (missing, extra) = diff_variant_map(&self.metadata, &self.variants);

        if !missing.is_empty() {
            return Err(RegistryError::IncompleteVariantMap {
                name: self.metadata.name.clone(),
                missing,
            });
        }
        if !extra.is_empty() {
            return Err(RegistryError::VariantMapMismatch {
                name: self.metadata.name.clone(),
                missing,
                extra,
            });
        }

        let implementation = match self.default_implementation {
            Some(implementation) => implementation,
            None => self
                .variants
                .get(&self.metadata.default_variant)
                .cloned()
                .ok_or_else(|| RegistryError::IncompleteVariantMap {
                    name: self.metadata.name.clone(),
                    missing: vec![self.metadata.default_variant.clone()],
                })?,
        };

        Ok(PolymorphicComponent {
            metadata: self.metadata,
            implementation,
            variants: self.variants,
        })
    }
}

/// Create a polymorphic component from its parts in one call
pub fn create_variant_component(
    default_implementation: Implementation,
    metadata: ComponentMetadata,
    variants: VariantMap,
) -> Result<PolymorphicComponent, RegistryError> {
    VariantFactory {
        metadata,
        default_implementation: Some(default_implementation),
        variants,
    }
    .build()
}

/// A component value carrying its metadata and every variant implementation
#[derive(Clone)]
pub struct PolymorphicComponent {
    metadata: ComponentMetadata,
    implementation: Implementation,
    variants: VariantMap,
}

impl PolymorphicComponent {
    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    pub fn metadata(&self) -> &ComponentMetadata {
        &self.metadata
    }

    /// Implementation used when no variant is selected
    pub fn implementation(&self) -> &Implementation {
        &self.implementation
    }

    /// Direct accessor for a declared variant
    pub fn variant(&self, id: &str) -> Option<&Implementation> {
        self.variants.get(id)
    }

    /// Variants in declaration order
    pub fn variants(&self) -> impl Iterator<Item = (&str, &Implementation)> {
        self.metadata
            .variant_ids()
            .filter_map(|id| self.variants.get(id).map(|imp| (id, imp)))
    }

    pub fn into_parts(self) -> (ComponentMetadata, Implementation, VariantMap) {
        (self.metadata, self.implementation, self.variants)
    }
}

impl Component for PolymorphicComponent {
    fn render(&self, props: &Props, children: &[String]) -> String {
        self.implementation.render(props, children)
    }
}

impl fmt::Debug for PolymorphicComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PolymorphicComponent")
            .field("name", &self.metadata.name)
            .field("variants", &self.metadata.variant_ids().collect::<Vec<_>>())
            .finish()
    }
}
