//! Studio Core - component registry and variant resolution for the site studio
//!
//! Pages are described as data: a tree of nodes naming a component, an
//! optional variant and arbitrary props. This library owns the indirection
//! from that data to concrete implementations, so the studio preview and the
//! exporter always agree on what a node means.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Engine** - metadata schema, variant factory, registry, discovery, resolution
//! - **Layer 2: Pages** - configuration documents, rendering in preview/export mode, export
//! - **Layer 3: CLI/TUI Interface** - `StudioProfile` and optional cliclack composer (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based page composer
//!
//! # Example Usage
//!
//! ```ignore
//! use studio_core::{discovery, ComponentRegistry};
//!
//! let registry = ComponentRegistry::new();
//! discovery::initialize(&registry)?;
//!
//! let button = registry.resolve("button", Some("outline"), Some("landing-page"))?;
//! let html = button.render(&props, &[]);
//! ```

pub mod component;
pub mod components;
pub mod config;
pub mod discovery;
pub mod document;
pub mod error;
pub mod export;
pub mod factory;
pub mod metadata;
pub mod profile;
pub mod registry;
pub mod render;
pub mod resolve;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use component::{Component, Implementation, Props};
pub use config::StudioConfig;
pub use document::{ConfigNode, DocumentFetcher, DocumentSource, PageDocument};
pub use error::{BootstrapError, RegistryError, ResolutionError};
pub use factory::{PolymorphicComponent, VariantFactory, VariantMap};
pub use metadata::{ComponentMetadata, ComponentType, MetadataError, VariantDescriptor};
pub use profile::StudioProfile;
pub use registry::{ComponentRegistry, ElementInfo, ListFilter, RegistryEntry, RegistryState};
pub use render::{NodeError, PageRenderer, RenderMode};

#[cfg(feature = "tui")]
pub use tui::run_compose;

#[cfg(test)]
mod tests {
    use super::*;

    // A registry shared across threads resolves without coordination once sealed
    #[test]
    fn test_concurrent_resolution() {
        let registry = std::sync::Arc::new(ComponentRegistry::new());
        discovery::initialize(&registry).unwrap();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let registry = registry.clone();
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        let a = registry.resolve("button", None, None).unwrap();
                        let b = registry.resolve("button", Some("primary"), None).unwrap();
                        assert!(component::same_implementation(&a, &b));
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
    }
}
