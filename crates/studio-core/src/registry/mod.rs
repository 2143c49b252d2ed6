//! Component registry
//!
//! The registry is an owned store with a lifecycle:
//! `Uninitialized -> Populating -> Sealed`. Writers (registration during
//! bootstrap) serialize on a mutex and publish a new immutable
//! [`RegistrySnapshot`]; readers load the current snapshot without locking.
//! After [`ComponentRegistry::seal`] no further registration is accepted.

mod entry;

use crate::component::Implementation;
use crate::error::{RegistryError, ResolutionError};
use crate::factory::{diff_variant_map, PolymorphicComponent, VariantMap};
use crate::metadata::{validate, ComponentMetadata, ComponentType, COMPATIBLE_WITH_ALL};
use arc_swap::ArcSwap;
use indexmap::IndexMap;
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;

pub use entry::RegistryEntry;

/// Lifecycle of a registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryState {
    /// Nothing registered yet
    Uninitialized,
    /// At least one component registered, still accepting registrations
    Populating,
    /// Read-only
    Sealed,
}

/// Filter for [`ComponentRegistry::list`]. Both criteria must match when set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilter {
    pub component_type: Option<ComponentType>,
    pub compatible_tag: Option<String>,
}

impl ListFilter {
    /// Matches every entry
    pub fn all() -> Self {
        Self::default()
    }

    pub fn of_type(mut self, component_type: ComponentType) -> Self {
        self.component_type = Some(component_type);
        self
    }

    pub fn compatible_with(mut self, tag: impl Into<String>) -> Self {
        self.compatible_tag = Some(tag.into());
        self
    }

    pub fn matches(&self, metadata: &ComponentMetadata) -> bool {
        let type_ok = self
            .component_type
            .map_or(true, |t| metadata.component_type == Some(t));
        let tag_ok = self
            .compatible_tag
            .as_deref()
            .map_or(true, |tag| metadata.is_compatible_with(tag));
        type_ok && tag_ok
    }
}

/// Diagnostic summary of one registered component
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElementInfo {
    pub name: String,
    pub variants: Vec<String>,
}

/// Immutable view of the registry at one point in time
#[derive(Debug, Clone)]
pub struct RegistrySnapshot {
    state: RegistryState,
    entries: IndexMap<String, Arc<RegistryEntry>>,
}

impl RegistrySnapshot {
    fn empty() -> Self {
        Self {
            state: RegistryState::Uninitialized,
            entries: IndexMap::new(),
        }
    }

    pub fn state(&self) -> RegistryState {
        self.state
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn lookup(&self, name: &str) -> Option<Arc<RegistryEntry>> {
        self.entries.get(name).cloned()
    }

    /// Entries matching `filter`, in registration order
    pub fn list(&self, filter: &ListFilter) -> Vec<Arc<RegistryEntry>> {
        self.entries
            .values()
            .filter(|entry| filter.matches(entry.metadata()))
            .cloned()
            .collect()
    }

    pub fn elements_info(&self) -> Vec<ElementInfo> {
        self.entries
            .values()
            .map(|entry| ElementInfo {
                name: entry.name().to_string(),
                variants: entry.variant_ids().map(str::to_string).collect(),
            })
            .collect()
    }

    /// Names whose entry differs from `base`: added, replaced or removed
    fn changed_since(&self, base: &RegistrySnapshot) -> Vec<String> {
        let mut names: Vec<String> = self
            .entries
            .iter()
            .filter(|(name, entry)| {
                base.entries
                    .get(name.as_str())
                    .map_or(true, |old| !Arc::ptr_eq(old, entry))
            })
            .map(|(name, _)| name.clone())
            .collect();
        names.extend(
            base.entries
                .keys()
                .filter(|name| !self.entries.contains_key(name.as_str()))
                .cloned(),
        );
        names
    }

    /// Every context tag named by a registered component, excluding "all", sorted
    pub fn context_tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = self
            .entries
            .values()
            .flat_map(|entry| entry.metadata().compatible_with.iter())
            .filter(|tag| tag.as_str() != COMPATIBLE_WITH_ALL)
            .cloned()
            .collect();
        tags.sort();
        tags.dedup();
        tags
    }
}

/// Process-wide component catalog, passed by reference to its collaborators
pub struct ComponentRegistry {
    snap: ArcSwap<RegistrySnapshot>,
    write_lock: Mutex<()>,
}

impl Default for ComponentRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ComponentRegistry {
    /// Create an empty, uninitialized registry
    pub fn new() -> Self {
        Self {
            snap: ArcSwap::from_pointee(RegistrySnapshot::empty()),
            write_lock: Mutex::new(()),
        }
    }

    /// Current snapshot. Holding it keeps a consistent view even across a reset.
    pub fn snapshot(&self) -> Arc<RegistrySnapshot> {
        self.snap.load_full()
    }

    pub fn state(&self) -> RegistryState {
        self.snap.load().state
    }

    pub fn is_sealed(&self) -> bool {
        self.state() == RegistryState::Sealed
    }

    /// Register a component under `name`.
    ///
    /// `name` must equal `metadata.name`. Validates `metadata`, refuses to
    /// overwrite an existing name and requires the key set of `variants` to
    /// equal the declared variant ids exactly.
    pub fn register(
        &self,
        name: &str,
        metadata: ComponentMetadata,
        implementation: Implementation,
        variants: VariantMap,
    ) -> Result<(), RegistryError> {
        let _guard = self.write_lock.lock();
        let current = self.snap.load_full();

        if current.state == RegistryState::Sealed {
            return Err(RegistryError::Sealed {
                name: name.to_string(),
            });
        }

        validate(&metadata)?;

        if metadata.name != name {
            return Err(RegistryError::NameMismatch {
                name: name.to_string(),
                metadata_name: metadata.name,
            });
        }

        if current.entries.contains_key(name) {
            return Err(RegistryError::NameAlreadyRegistered {
                name: name.to_string(),
            });
        }

        let (missing, extra) = diff_variant_map(&metadata, &variants);
        if !missing.is_empty() || !extra.is_empty() {
            return Err(RegistryError::VariantMapMismatch {
                name: name.to_string(),
                missing,
                extra,
            });
        }

        let mut next = (*current).clone();
        next.entries.insert(
            name.to_string(),
            Arc::new(RegistryEntry::new(
                name.to_string(),
                metadata,
                implementation,
                variants,
            )),
        );
        next.state = RegistryState::Populating;
        self.snap.store(Arc::new(next));

        tracing::debug!(component = name, "registered component");
        Ok(())
    }

    /// Register a factory-built component under its metadata name
    pub fn register_component(&self, component: PolymorphicComponent) -> Result<(), RegistryError> {
        let (metadata, implementation, variants) = component.into_parts();
        let name = metadata.name.clone();
        self.register(&name, metadata, implementation, variants)
    }

    pub fn lookup(&self, name: &str) -> Option<Arc<RegistryEntry>> {
        self.snap.load().lookup(name)
    }

    pub fn list(&self, filter: &ListFilter) -> Vec<Arc<RegistryEntry>> {
        self.snap.load().list(filter)
    }

    pub fn elements_info(&self) -> Vec<ElementInfo> {
        self.snap.load().elements_info()
    }

    /// Resolve against the current snapshot. Lock-free.
    pub fn resolve(
        &self,
        name: &str,
        variant_id: Option<&str>,
        context_tag: Option<&str>,
    ) -> Result<Implementation, ResolutionError> {
        self.snap.load().resolve(name, variant_id, context_tag)
    }

    /// Make the registry read-only
    pub fn seal(&self) {
        let _guard = self.write_lock.lock();
        let current = self.snap.load_full();
        if current.state == RegistryState::Sealed {
            return;
        }
        let mut next = (*current).clone();
        next.state = RegistryState::Sealed;
        self.snap.store(Arc::new(next));
    }

    /// Detached copy of the current contents, used as a bootstrap staging area,
    /// together with the snapshot it was taken from
    pub(crate) fn fork(&self) -> (ComponentRegistry, Arc<RegistrySnapshot>) {
        let base = self.snap.load_full();
        let staging = Self {
            snap: ArcSwap::new(base.clone()),
            write_lock: Mutex::new(()),
        };
        (staging, base)
    }

    /// Replace the registry contents with a fully populated snapshot and seal it.
    ///
    /// Returns `Ok(false)` if the registry was already sealed. If entries were
    /// added, replaced or removed since `base` was forked, nothing is published
    /// and the affected names are returned.
    pub(crate) fn publish(
        &self,
        base: &RegistrySnapshot,
        staged: &RegistrySnapshot,
    ) -> Result<bool, Vec<String>> {
        let _guard = self.write_lock.lock();
        let current = self.snap.load_full();
        if current.state == RegistryState::Sealed {
            return Ok(false);
        }
        let changed = current.changed_since(base);
        if !changed.is_empty() {
            return Err(changed);
        }
        let mut next = staged.clone();
        next.state = RegistryState::Sealed;
        self.snap.store(Arc::new(next));
        Ok(true)
    }

    /// Clear every entry and return to `Uninitialized`.
    ///
    /// Test/reset hook only; must not run while a resolution is in flight.
    pub fn unregister_all(&self) {
        let _guard = self.write_lock.lock();
        self.snap.store(Arc::new(RegistrySnapshot::empty()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{implementation, same_implementation, Props};
    use crate::factory::VariantFactory;
    use crate::metadata::{MetadataError, VariantDescriptor};

    fn label(text: &'static str) -> Implementation {
        implementation(move |_: &Props, _: &[String]| text.to_string())
    }

    fn button_metadata(description: &str) -> ComponentMetadata {
        ComponentMetadata::new(ComponentType::Element, "button", "primary")
            .description(description)
            .variant(VariantDescriptor::new("primary", "Primary"))
            .variant(VariantDescriptor::new("outline", "Outline"))
    }

    fn button_variants() -> VariantMap {
        let mut variants = VariantMap::new();
        variants.insert("primary".to_string(), label("primary"));
        variants.insert("outline".to_string(), label("outline"));
        variants
    }

    fn simple(name: &str, component_type: ComponentType, tags: &[&str]) -> PolymorphicComponent {
        let metadata = ComponentMetadata::new(component_type, name, "default")
            .compatible_with(tags.iter().copied())
            .variant(VariantDescriptor::new("default", "Default"));
        VariantFactory::new(metadata)
            .variant("default", label("default"))
            .build()
            .unwrap()
    }

    #[test]
    fn test_register_and_lookup() {
        let registry = ComponentRegistry::new();
        assert_eq!(registry.state(), RegistryState::Uninitialized);

        registry
            .register("button", button_metadata("first"), label("default"), button_variants())
            .unwrap();

        let entry = registry.lookup("button").unwrap();
        assert_eq!(entry.metadata().description, "first");
        assert_eq!(registry.state(), RegistryState::Populating);
        assert!(registry.lookup("hero").is_none());
    }

    #[test]
    fn test_duplicate_name_keeps_first_entry() {
        let registry = ComponentRegistry::new();
        let first_impl = label("first");
        registry
            .register("button", button_metadata("first"), first_impl.clone(), button_variants())
            .unwrap();

        let err = registry
            .register("button", button_metadata("second"), label("second"), button_variants())
            .unwrap_err();
        assert_eq!(
            err,
            RegistryError::NameAlreadyRegistered {
                name: "button".to_string()
            }
        );

        let entry = registry.lookup("button").unwrap();
        assert_eq!(entry.metadata().description, "first");
        assert!(same_implementation(entry.implementation(), &first_impl));
        assert_eq!(registry.list(&ListFilter::all()).len(), 1);
    }

    #[test]
    fn test_invalid_metadata_stores_nothing() {
        let registry = ComponentRegistry::new();
        let mut metadata = button_metadata("broken");
        metadata.default_variant = "x".to_string();

        let err = registry
            .register("button", metadata, label("default"), button_variants())
            .unwrap_err();
        assert_eq!(
            err,
            RegistryError::Metadata(MetadataError::UnknownDefaultVariant {
                component: "button".to_string(),
                default: "x".to_string(),
            })
        );
        assert!(registry.lookup("button").is_none());
        assert_eq!(registry.state(), RegistryState::Uninitialized);
    }

    #[test]
    fn test_variant_map_must_match_exactly() {
        let registry = ComponentRegistry::new();

        let mut missing = button_variants();
        missing.remove("outline");
        let err = registry
            .register("button", button_metadata("x"), label("default"), missing)
            .unwrap_err();
        assert_eq!(
            err,
            RegistryError::VariantMapMismatch {
                name: "button".to_string(),
                missing: vec!["outline".to_string()],
                extra: vec![],
            }
        );

        let mut extra = button_variants();
        extra.insert("ghost".to_string(), label("ghost"));
        let err = registry
            .register("button", button_metadata("x"), label("default"), extra)
            .unwrap_err();
        assert_eq!(
            err,
            RegistryError::VariantMapMismatch {
                name: "button".to_string(),
                missing: vec![],
                extra: vec!["ghost".to_string()],
            }
        );
        assert!(registry.lookup("button").is_none());
    }

    #[test]
    fn test_list_filters_and_order() {
        let registry = ComponentRegistry::new();
        registry
            .register_component(simple("heading", ComponentType::Element, &["all"]))
            .unwrap();
        registry
            .register_component(simple("hero", ComponentType::Section, &["landing-page"]))
            .unwrap();
        registry
            .register_component(simple("button", ComponentType::Element, &["product-page"]))
            .unwrap();
        registry
            .register_component(simple("footer", ComponentType::Section, &["all"]))
            .unwrap();

        let names = |entries: Vec<Arc<RegistryEntry>>| -> Vec<String> {
            entries.iter().map(|e| e.name().to_string()).collect()
        };

        let elements = ListFilter::all().of_type(ComponentType::Element);
        assert_eq!(names(registry.list(&elements)), vec!["heading", "button"]);
        assert_eq!(names(registry.list(&elements)), names(registry.list(&elements)));

        let landing = ListFilter::all().compatible_with("landing-page");
        assert_eq!(names(registry.list(&landing)), vec!["heading", "hero", "footer"]);

        let both = ListFilter::all()
            .of_type(ComponentType::Section)
            .compatible_with("product-page");
        assert_eq!(names(registry.list(&both)), vec!["footer"]);

        assert_eq!(
            names(registry.list(&ListFilter::all())),
            vec!["heading", "hero", "button", "footer"]
        );
        assert_eq!(
            registry.snapshot().context_tags(),
            vec!["landing-page".to_string(), "product-page".to_string()]
        );
    }

    #[test]
    fn test_sealed_registry_rejects_registration() {
        let registry = ComponentRegistry::new();
        registry
            .register_component(simple("hero", ComponentType::Section, &["all"]))
            .unwrap();
        registry.seal();
        assert!(registry.is_sealed());

        let err = registry
            .register_component(simple("footer", ComponentType::Section, &["all"]))
            .unwrap_err();
        assert_eq!(
            err,
            RegistryError::Sealed {
                name: "footer".to_string()
            }
        );
        assert!(registry.lookup("hero").is_some());
    }

    #[test]
    fn test_unregister_all_resets() {
        let registry = ComponentRegistry::new();
        registry
            .register_component(simple("hero", ComponentType::Section, &["all"]))
            .unwrap();
        registry.seal();

        let held = registry.snapshot();
        registry.unregister_all();

        assert_eq!(registry.state(), RegistryState::Uninitialized);
        assert!(registry.lookup("hero").is_none());
        // Snapshots taken before the reset stay intact
        assert!(held.lookup("hero").is_some());

        registry
            .register_component(simple("hero", ComponentType::Section, &["all"]))
            .unwrap();
    }

    #[test]
    fn test_name_must_match_metadata() {
        let registry = ComponentRegistry::new();
        let err = registry
            .register("hero", button_metadata("x"), label("default"), button_variants())
            .unwrap_err();
        assert_eq!(
            err,
            RegistryError::NameMismatch {
                name: "hero".to_string(),
                metadata_name: "button".to_string(),
            }
        );
        assert!(registry.lookup("hero").is_none());

        registry
            .register("button", button_metadata("x"), label("default"), button_variants())
            .unwrap();
        assert_eq!(registry.lookup("button").unwrap().metadata().name, "button");
    }

    #[test]
    fn test_publish_refuses_stale_base() {
        let registry = ComponentRegistry::new();
        let (staging, base) = registry.fork();
        staging
            .register_component(simple("hero", ComponentType::Section, &["all"]))
            .unwrap();
        registry
            .register_component(simple("footer", ComponentType::Section, &["all"]))
            .unwrap();

        assert_eq!(
            registry.publish(&base, &staging.snapshot()),
            Err(vec!["footer".to_string()])
        );
        assert!(registry.lookup("footer").is_some());
        assert!(registry.lookup("hero").is_none());
        assert!(!registry.is_sealed());

        let (staging, base) = registry.fork();
        staging
            .register_component(simple("hero", ComponentType::Section, &["all"]))
            .unwrap();
        assert_eq!(registry.publish(&base, &staging.snapshot()), Ok(true));
        assert!(registry.lookup("footer").is_some());
        assert!(registry.lookup("hero").is_some());
        assert!(registry.is_sealed());
    }

    #[test]
    fn test_elements_info() {
        let registry = ComponentRegistry::new();
        registry
            .register("button", button_metadata("x"), label("default"), button_variants())
            .unwrap();

        assert_eq!(
            registry.elements_info(),
            vec![ElementInfo {
                name: "button".to_string(),
                variants: vec!["primary".to_string(), "outline".to_string()],
            }]
        );
    }
}
