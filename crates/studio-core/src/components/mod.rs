//! Built-in component modules
//!
//! Each module defines its component through the variant factory and exposes a
//! `register` helper. [`BUILTIN_MODULES`] is the static list discovery walks.

pub mod button;
pub mod cta;
pub mod features;
pub mod footer;
pub mod heading;
pub mod hero;
pub mod image;
pub mod landing;

use crate::component::{escape_html, prop_str, Props};
use crate::error::RegistryError;
use crate::registry::ComponentRegistry;

/// A component module as seen by discovery
#[derive(Clone, Copy)]
pub struct ComponentModule {
    /// Name the module registers, used to attribute failures
    pub name: &'static str,
    pub register: fn(&ComponentRegistry) -> Result<(), RegistryError>,
}

/// Every built-in component, elements first, in palette order
pub const BUILTIN_MODULES: &[ComponentModule] = &[
    ComponentModule {
        name: button::NAME,
        register: button::register,
    },
    ComponentModule {
        name: heading::NAME,
        register: heading::register,
    },
    ComponentModule {
        name: image::NAME,
        register: image::register,
    },
    ComponentModule {
        name: hero::NAME,
        register: hero::register,
    },
    ComponentModule {
        name: features::NAME,
        register: features::register,
    },
    ComponentModule {
        name: cta::NAME,
        register: cta::register,
    },
    ComponentModule {
        name: footer::NAME,
        register: footer::register,
    },
    ComponentModule {
        name: landing::NAME,
        register: landing::register,
    },
];

/// Escaped string prop
fn text(props: &Props, key: &str, default: &str) -> String {
    escape_html(prop_str(props, key, default))
}

/// Build an example prop set from string pairs
fn example(pairs: &[(&str, &str)]) -> Props {
    let mut props = Props::new();
    for (key, value) in pairs {
        props.insert((*key).into(), (*value).into());
    }
    props
}
