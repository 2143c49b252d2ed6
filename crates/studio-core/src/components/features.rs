//! Feature list section

use super::{example, text};
use crate::component::{escape_html, implementation, prop_str, Props};
use crate::error::RegistryError;
use crate::factory::{PolymorphicComponent, VariantFactory};
use crate::metadata::{ComponentMetadata, ComponentType, VariantDescriptor};
use crate::registry::ComponentRegistry;
use serde_yaml::Value;

pub const NAME: &str = "features";

/// Items are either plain strings or `{title, body}` mappings
fn items(props: &Props) -> Vec<String> {
    let Some(Value::Sequence(items)) = props.get("items") else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| match item {
            Value::String(title) => Some(format!("<h3>{}</h3>", escape_html(title))),
            Value::Mapping(map) => Some(format!(
                "<h3>{}</h3><p>{}</p>",
                escape_html(prop_str(map, "title", "")),
                escape_html(prop_str(map, "body", ""))
            )),
            _ => None,
        })
        .collect()
}

fn grid(props: &Props, _children: &[String]) -> String {
    let cells: String = items(props)
        .into_iter()
        .map(|item| format!(r#"<div class="features__cell">{}</div>"#, item))
        .collect();
    format!(
        r#"<section class="features features--grid"><h2>{}</h2><div class="features__grid">{}</div></section>"#,
        text(props, "title", ""),
        cells
    )
}

fn list(props: &Props, _children: &[String]) -> String {
    let rows: String = items(props)
        .into_iter()
        .map(|item| format!("<li>{}</li>", item))
        .collect();
    format!(
        r#"<section class="features features--list"><h2>{}</h2><ul>{}</ul></section>"#,
        text(props, "title", ""),
        rows
    )
}

pub fn definition() -> Result<PolymorphicComponent, RegistryError> {
    let mut sample = example(&[("title", "Why teams switch")]);
    sample.insert(
        "items".into(),
        Value::Sequence(vec!["Fast".into(), "Typed".into(), "Portable".into()]),
    );

    let metadata = ComponentMetadata::new(ComponentType::Section, NAME, "grid")
        .description("Highlights of a product or service")
        .compatible_with(["landing-page", "product-page"])
        .variant(VariantDescriptor::new("grid", "Grid").tags(["columns"]))
        .variant(VariantDescriptor::new("list", "List").tags(["compact"]))
        .example(sample);

    VariantFactory::new(metadata)
        .variant("grid", implementation(grid))
        .variant("list", implementation(list))
        .build()
}

pub fn register(registry: &ComponentRegistry) -> Result<(), RegistryError> {
    registry.register_component(definition()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_items_accept_strings_and_mappings() {
        let props: Props = serde_yaml::from_str(
            "title: T\nitems:\n  - Plain\n  - {title: Rich, body: Details}\n  - 42\n",
        )
        .unwrap();

        assert_eq!(
            items(&props),
            vec![
                "<h3>Plain</h3>".to_string(),
                "<h3>Rich</h3><p>Details</p>".to_string()
            ]
        );
        assert!(list(&props, &[]).contains("<li><h3>Plain</h3></li>"));
    }

    #[test]
    fn test_missing_items_render_empty_grid() {
        let html = grid(&Props::new(), &[]);
        assert!(html.contains(r#"<div class="features__grid"></div>"#));
    }
}
