//! Heading element

use super::{example, text};
use crate::component::{implementation, Props};
use crate::error::RegistryError;
use crate::factory::{PolymorphicComponent, VariantFactory};
use crate::metadata::{ComponentMetadata, ComponentType, VariantDescriptor};
use crate::registry::ComponentRegistry;

pub const NAME: &str = "heading";

pub fn definition() -> Result<PolymorphicComponent, RegistryError> {
    let metadata = ComponentMetadata::new(ComponentType::Element, NAME, "h2")
        .description("Section or page heading")
        .variant(VariantDescriptor::new("h1", "Page title").tags(["title"]))
        .variant(VariantDescriptor::new("h2", "Section title").tags(["title"]))
        .variant(
            VariantDescriptor::new("eyebrow", "Eyebrow")
                .description("Small label above a title")
                .tags(["compact"]),
        )
        .example(example(&[("text", "Everything you need")]));

    VariantFactory::new(metadata)
        .variant(
            "h1",
            implementation(|props: &Props, _: &[String]| {
                format!("<h1>{}</h1>", text(props, "text", ""))
            }),
        )
        .variant(
            "h2",
            implementation(|props: &Props, _: &[String]| {
                format!("<h2>{}</h2>", text(props, "text", ""))
            }),
        )
        .variant(
            "eyebrow",
            implementation(|props: &Props, _: &[String]| {
                format!(r#"<p class="eyebrow">{}</p>"#, text(props, "text", ""))
            }),
        )
        .build()
}

pub fn register(registry: &ComponentRegistry) -> Result<(), RegistryError> {
    registry.register_component(definition()?)
}
