//! Resolution protocol
//!
//! Turns a `(component name, variant id?, context tag?)` request from a page
//! document into a concrete implementation. Preview and export use the same
//! path, so the exported page always contains what the author previewed.

use crate::component::Implementation;
use crate::error::ResolutionError;
use crate::registry::RegistrySnapshot;

impl RegistrySnapshot {
    /// Resolve a component request against this snapshot.
    ///
    /// Without a `variant_id` the metadata's default variant is used. A
    /// `context_tag` must be listed in the component's `compatible_with`
    /// (or the component must be compatible with "all").
    pub fn resolve(
        &self,
        name: &str,
        variant_id: Option<&str>,
        context_tag: Option<&str>,
    ) -> Result<Implementation, ResolutionError> {
        let entry = self
            .lookup(name)
            .ok_or_else(|| ResolutionError::UnknownComponent(name.to_string()))?;

        if let Some(tag) = context_tag {
            if !entry.metadata().is_compatible_with(tag) {
                return Err(ResolutionError::IncompatibleContext(
                    name.to_string(),
                    tag.to_string(),
                ));
            }
        }

        let effective = variant_id.unwrap_or(&entry.metadata().default_variant);

        entry
            .variant(effective)
            .cloned()
            .ok_or_else(|| ResolutionError::UnknownVariant(name.to_string(), effective.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use crate::component::{implementation, same_implementation, Implementation, Props};
    use crate::error::ResolutionError;
    use crate::factory::VariantFactory;
    use crate::metadata::{ComponentMetadata, ComponentType, VariantDescriptor};
    use crate::registry::ComponentRegistry;

    fn label(text: &'static str) -> Implementation {
        implementation(move |_: &Props, _: &[String]| text.to_string())
    }

    fn registry_with_button() -> ComponentRegistry {
        let registry = ComponentRegistry::new();
        let button = VariantFactory::new(
            ComponentMetadata::new(ComponentType::Element, "button", "primary")
                .variant(VariantDescriptor::new("primary", "Primary"))
                .variant(VariantDescriptor::new("outline", "Outline")),
        )
        .variant("primary", label("primary"))
        .variant("outline", label("outline"))
        .build()
        .unwrap();
        registry.register_component(button).unwrap();
        registry
    }

    #[test]
    fn test_button_scenario() {
        let registry = registry_with_button();

        let implicit = registry.resolve("button", None, None).unwrap();
        let explicit = registry.resolve("button", Some("primary"), None).unwrap();
        assert!(same_implementation(&implicit, &explicit));
        assert_eq!(implicit.render(&Props::new(), &[]), "primary");

        let outline = registry.resolve("button", Some("outline"), None).unwrap();
        assert!(!same_implementation(&outline, &implicit));

        assert_eq!(
            registry.resolve("button", Some("ghost"), None).err(),
            Some(ResolutionError::UnknownVariant(
                "button".to_string(),
                "ghost".to_string()
            ))
        );
    }

    #[test]
    fn test_unknown_component() {
        let registry = registry_with_button();
        assert_eq!(
            registry.resolve("carousel", None, None).err(),
            Some(ResolutionError::UnknownComponent("carousel".to_string()))
        );
    }

    #[test]
    fn test_incompatible_context() {
        let registry = ComponentRegistry::new();
        let hero = VariantFactory::new(
            ComponentMetadata::new(ComponentType::Section, "hero", "centered")
                .compatible_with(["product-page"])
                .variant(VariantDescriptor::new("centered", "Centered")),
        )
        .variant("centered", label("hero"))
        .build()
        .unwrap();
        registry.register_component(hero).unwrap();

        assert_eq!(
            registry.resolve("hero", None, Some("landing-page")).err(),
            Some(ResolutionError::IncompatibleContext(
                "hero".to_string(),
                "landing-page".to_string()
            ))
        );
        assert!(registry.resolve("hero", None, Some("product-page")).is_ok());
        assert!(registry.resolve("hero", None, None).is_ok());
    }

    #[test]
    fn test_compatible_with_all_accepts_any_context() {
        let registry = registry_with_button();
        assert!(registry
            .resolve("button", Some("outline"), Some("landing-page"))
            .is_ok());
    }

    #[test]
    fn test_resolution_is_repeatable() {
        let registry = registry_with_button();
        let snapshot = registry.snapshot();

        for request in [None, Some("primary"), Some("outline")] {
            let first = snapshot.resolve("button", request, None).unwrap();
            let second = snapshot.resolve("button", request, None).unwrap();
            assert!(same_implementation(&first, &second));
        }
        let first = snapshot.resolve("button", Some("ghost"), None);
        let second = snapshot.resolve("button", Some("ghost"), None);
        assert_eq!(first.err(), second.err());
    }

    #[test]
    fn test_resolution_does_not_touch_registry() {
        let registry = registry_with_button();
        let before = registry.elements_info();
        let _ = registry.resolve("button", Some("ghost"), None);
        let _ = registry.resolve("missing", None, None);
        assert_eq!(registry.elements_info(), before);
    }
}
