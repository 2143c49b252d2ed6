//! Hero section

use super::{example, text};
use crate::component::{implementation, Props};
use crate::error::RegistryError;
use crate::factory::{PolymorphicComponent, VariantFactory};
use crate::metadata::{ComponentMetadata, ComponentType, VariantDescriptor};
use crate::registry::ComponentRegistry;

pub const NAME: &str = "hero";

fn centered(props: &Props, children: &[String]) -> String {
    format!(
        r#"<section class="hero hero--centered"><h1>{}</h1><p>{}</p><div class="hero__actions">{}</div></section>"#,
        text(props, "title", ""),
        text(props, "subtitle", ""),
        children.concat()
    )
}

fn split(props: &Props, children: &[String]) -> String {
    format!(
        r#"<section class="hero hero--split"><div class="hero__copy"><h1>{}</h1><p>{}</p>{}</div><img class="hero__media" src="{}" alt=""></section>"#,
        text(props, "title", ""),
        text(props, "subtitle", ""),
        children.concat(),
        text(props, "image", "")
    )
}

pub fn definition() -> Result<PolymorphicComponent, RegistryError> {
    let metadata = ComponentMetadata::new(ComponentType::Section, NAME, "centered")
        .description("Large introductory block at the top of a page")
        .compatible_with(["landing-page", "product-page"])
        .variant(VariantDescriptor::new("centered", "Centered").tags(["header", "large"]))
        .variant(
            VariantDescriptor::new("split", "Split")
                .description("Copy on the left, media on the right")
                .tags(["header", "media"]),
        )
        .example(example(&[
            ("title", "Ship your site today"),
            ("subtitle", "Compose pages from ready-made sections."),
        ]));

    VariantFactory::new(metadata)
        .variant("centered", implementation(centered))
        .variant("split", implementation(split))
        .build()
}

pub fn register(registry: &ComponentRegistry) -> Result<(), RegistryError> {
    registry.register_component(definition()?)
}
