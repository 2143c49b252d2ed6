use crate::component::Implementation;
use crate::factory::VariantMap;
use crate::metadata::ComponentMetadata;
use std::fmt;

/// A registered component: metadata plus its implementations. Immutable.
pub struct RegistryEntry {
    name: String,
    metadata: ComponentMetadata,
    implementation: Implementation,
    variants: VariantMap,
}

impl RegistryEntry {
    pub(super) fn new(
        name: String,
        metadata: ComponentMetadata,
        implementation: Implementation,
        variants: VariantMap,
    ) -> Self {
        Self {
            name,
            metadata,
            implementation,
            variants,
        }
    }

    /// Key the entry was registered under
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn metadata(&self) -> &ComponentMetadata {
        &self.metadata
    }

    /// Implementation used when the component is called without a variant
    pub fn implementation(&self) -> &Implementation {
        &self.implementation
    }

    pub fn variant(&self, id: &str) -> Option<&Implementation> {
        self.variants.get(id)
    }

    /// Variant ids in declaration order
    pub fn variant_ids(&self) -> impl Iterator<Item = &str> {
        self.metadata.variant_ids()
    }
}

impl fmt::Debug for RegistryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryEntry")
            .field("name", &self.name)
            .field("type", &self.metadata.component_type)
            .field("default_variant", &self.metadata.default_variant)
            .field("variants", &self.variant_ids().collect::<Vec<_>>())
            .finish()
    }
}
