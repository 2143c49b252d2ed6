//! Image element

use super::{example, text};
use crate::component::{implementation, Props};
use crate::error::RegistryError;
use crate::factory::{PolymorphicComponent, VariantFactory};
use crate::metadata::{ComponentMetadata, ComponentType, VariantDescriptor};
use crate::registry::ComponentRegistry;

pub const NAME: &str = "image";

fn render(class: &'static str) -> impl Fn(&Props, &[String]) -> String + Send + Sync {
    move |props: &Props, _children: &[String]| {
        format!(
            r#"<figure class="{}"><img src="{}" alt="{}"></figure>"#,
            class,
            text(props, "src", ""),
            text(props, "alt", "")
        )
    }
}

pub fn definition() -> Result<PolymorphicComponent, RegistryError> {
    let metadata = ComponentMetadata::new(ComponentType::Element, NAME, "contained")
        .description("Responsive image")
        .variant(VariantDescriptor::new("contained", "Contained").tags(["media"]))
        .variant(
            VariantDescriptor::new("full-bleed", "Full bleed")
                .description("Spans the full viewport width")
                .tags(["media", "wide"]),
        )
        .example(example(&[("src", "/images/product.png"), ("alt", "Product screenshot")]));

    VariantFactory::new(metadata)
        .variant("contained", implementation(render("image")))
        .variant("full-bleed", implementation(render("image image--full-bleed")))
        .build()
}

pub fn register(registry: &ComponentRegistry) -> Result<(), RegistryError> {
    registry.register_component(definition()?)
}
