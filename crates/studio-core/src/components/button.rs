//! Button element

use super::{example, text};
use crate::component::{implementation, Props};
use crate::error::RegistryError;
use crate::factory::{PolymorphicComponent, VariantFactory};
use crate::metadata::{ComponentMetadata, ComponentType, VariantDescriptor};
use crate::registry::ComponentRegistry;

pub const NAME: &str = "button";

fn render(class: &'static str) -> impl Fn(&Props, &[String]) -> String + Send + Sync {
    move |props: &Props, _children: &[String]| {
        format!(
            r#"<a class="button {}" href="{}">{}</a>"#,
            class,
            text(props, "href", "#"),
            text(props, "label", "Click me")
        )
    }
}

pub fn definition() -> Result<PolymorphicComponent, RegistryError> {
    let metadata = ComponentMetadata::new(ComponentType::Element, NAME, "primary")
        .description("Call-to-action link styled as a button")
        .variant(
            VariantDescriptor::new("primary", "Primary")
                .description("Solid, high-emphasis button")
                .tags(["cta"]),
        )
        .variant(
            VariantDescriptor::new("outline", "Outline")
                .description("Bordered, medium-emphasis button")
                .tags(["cta", "secondary"]),
        )
        .variant(
            VariantDescriptor::new("link", "Link")
                .description("Text-only, low-emphasis button")
                .tags(["compact"]),
        )
        .example(example(&[("label", "Get started"), ("href", "/signup")]));

    VariantFactory::new(metadata)
        .variant("primary", implementation(render("button--primary")))
        .variant("outline", implementation(render("button--outline")))
        .variant("link", implementation(render("button--link")))
        .build()
}

pub fn register(registry: &ComponentRegistry) -> Result<(), RegistryError> {
    registry.register_component(definition()?)
}
