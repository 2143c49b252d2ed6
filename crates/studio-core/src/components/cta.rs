//! Call-to-action section

use super::{example, text};
use crate::component::{implementation, Props};
use crate::error::RegistryError;
use crate::factory::{PolymorphicComponent, VariantFactory};
use crate::metadata::{ComponentMetadata, ComponentType, VariantDescriptor};
use crate::registry::ComponentRegistry;

pub const NAME: &str = "cta";

fn render(class: &'static str) -> impl Fn(&Props, &[String]) -> String + Send + Sync {
    move |props: &Props, children: &[String]| {
        format!(
            r#"<section class="cta {}"><h2>{}</h2><p>{}</p><div class="cta__actions">{}</div></section>"#,
            class,
            text(props, "title", ""),
            text(props, "body", ""),
            children.concat()
        )
    }
}

pub fn definition() -> Result<PolymorphicComponent, RegistryError> {
    let metadata = ComponentMetadata::new(ComponentType::Section, NAME, "banner")
        .description("Closing prompt that drives a conversion")
        .variant(VariantDescriptor::new("banner", "Banner").tags(["cta", "wide"]))
        .variant(VariantDescriptor::new("card", "Card").tags(["cta", "compact"]))
        .example(example(&[
            ("title", "Ready to launch?"),
            ("body", "Export your site in one click."),
        ]));

    VariantFactory::new(metadata)
        .variant("banner", implementation(render("cta--banner")))
        .variant("card", implementation(render("cta--card")))
        .build()
}

pub fn register(registry: &ComponentRegistry) -> Result<(), RegistryError> {
    registry.register_component(definition()?)
}
