//! Footer section

use super::{example, text};
use crate::component::{implementation, Props};
use crate::error::RegistryError;
use crate::factory::{PolymorphicComponent, VariantFactory};
use crate::metadata::{ComponentMetadata, ComponentType, VariantDescriptor};
use crate::registry::ComponentRegistry;

pub const NAME: &str = "footer";

fn simple(props: &Props, children: &[String]) -> String {
    format!(
        r#"<footer class="footer footer--simple"><p>{}</p>{}</footer>"#,
        text(props, "text", ""),
        children.concat()
    )
}

fn columns(props: &Props, children: &[String]) -> String {
    let cols: String = children
        .iter()
        .map(|child| format!(r#"<div class="footer__column">{}</div>"#, child))
        .collect();
    format!(
        r#"<footer class="footer footer--columns">{}<p>{}</p></footer>"#,
        cols,
        text(props, "text", "")
    )
}

pub fn definition() -> Result<PolymorphicComponent, RegistryError> {
    let metadata = ComponentMetadata::new(ComponentType::Section, NAME, "simple")
        .description("Page footer")
        .variant(VariantDescriptor::new("simple", "Simple").tags(["compact"]))
        .variant(
            VariantDescriptor::new("columns", "Columns")
                .description("One column per child element")
                .tags(["navigation"]),
        )
        .example(example(&[("text", "© Example Inc.")]));

    VariantFactory::new(metadata)
        .variant("simple", implementation(simple))
        .variant("columns", implementation(columns))
        .build()
}

pub fn register(registry: &ComponentRegistry) -> Result<(), RegistryError> {
    registry.register_component(definition()?)
}
