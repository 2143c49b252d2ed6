//! Landing page template

use super::{example, text};
use crate::component::{implementation, Props};
use crate::error::RegistryError;
use crate::factory::{PolymorphicComponent, VariantFactory};
use crate::metadata::{ComponentMetadata, ComponentType, VariantDescriptor};
use crate::registry::ComponentRegistry;

pub const NAME: &str = "landing";

fn standard(props: &Props, children: &[String]) -> String {
    format!(
        r#"<main class="landing" aria-label="{}">{}</main>"#,
        text(props, "label", "Landing page"),
        children.concat()
    )
}

pub fn definition() -> Result<PolymorphicComponent, RegistryError> {
    let metadata = ComponentMetadata::new(ComponentType::Template, NAME, "standard")
        .description("Wraps landing page sections in a main landmark")
        .compatible_with(["landing-page"])
        .variant(VariantDescriptor::new("standard", "Standard"))
        .example(example(&[("label", "Product launch")]));

    VariantFactory::new(metadata)
        .variant("standard", implementation(standard))
        .build()
}

pub fn register(registry: &ComponentRegistry) -> Result<(), RegistryError> {
    registry.register_component(definition()?)
}
