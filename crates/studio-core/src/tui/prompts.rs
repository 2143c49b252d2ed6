//! Charm-style page composer using cliclack

use crate::config::StudioConfig;
use crate::document::{ConfigNode, PageDocument};
use crate::profile::StudioProfile;
use crate::registry::{ComponentRegistry, ListFilter, RegistryEntry, RegistrySnapshot};
use crate::render::check_document;
use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// CLI arguments for the compose command
#[derive(Debug, Clone, Default)]
pub struct ComposeArgs {
    /// Page name (file stem of the exported page)
    pub name: Option<String>,

    /// Page type used as the context tag for every component
    pub page_type: Option<String>,

    /// Components to place, as `name` or `name:variant`, skipping the palette prompt
    pub components: Option<Vec<String>>,

    /// Where to write the page document
    pub output: Option<PathBuf>,

    /// Auto-confirm all prompts (non-interactive mode)
    pub yes: bool,
}

/// Split a `name[:variant]` component reference
pub fn parse_component_ref(input: &str) -> (String, Option<String>) {
    match input.split_once(':') {
        Some((name, variant)) if !variant.trim().is_empty() => {
            (name.trim().to_string(), Some(variant.trim().to_string()))
        }
        Some((name, _)) => (name.trim().to_string(), None),
        None => (input.trim().to_string(), None),
    }
}

/// Run the composer and return the path of the written page document
pub async fn run_compose<P: StudioProfile>(
    profile: &P,
    registry: &ComponentRegistry,
    config: &StudioConfig,
    args: ComposeArgs,
    builder_version: &str,
) -> Result<PathBuf> {
    cliclack::intro(format!("{} composer", profile.display_name()))?;

    let snapshot = registry.snapshot();
    if snapshot.is_empty() {
        anyhow::bail!("No components registered.");
    }

    // Step 1: Page name
    let name = select_name(&args)?;

    // Step 2: Page type (context tag)
    let page_type = select_page_type(&snapshot, config, &args)?;

    // Step 3: Components
    let nodes = match &args.components {
        Some(refs) => nodes_from_refs(&snapshot, refs, page_type.as_deref())?,
        None if args.yes => {
            anyhow::bail!("No components given; pass --component in non-interactive mode.")
        }
        None => select_components(&snapshot, page_type.as_deref())?,
    };

    let mut document = PageDocument::new(name.clone());
    document.title = Some(name.clone());
    document.page_type = page_type;
    document.builder_version = Some(builder_version.to_string());
    document.nodes = nodes;

    let problems = check_document(&snapshot, &document);
    if !problems.is_empty() {
        for problem in &problems {
            cliclack::log::error(problem.to_string())?;
        }
        anyhow::bail!("Composed page does not resolve.");
    }

    // Step 4: Write
    let path = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from("pages").join(format!("{}.yaml", name)));
    write_document(&document, &path, args.yes).await?;

    println!();
    println!("  Next steps");
    println!();
    println!("  1.  {} preview {}", profile.name(), path.display());
    println!("  2.  {} export {}", profile.name(), path.display());

    cliclack::outro("Happy building!")?;

    Ok(path)
}

fn valid_page_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn select_name(args: &ComposeArgs) -> Result<String> {
    let name = match &args.name {
        Some(name) => name.clone(),
        None if args.yes => "index".to_string(),
        None => cliclack::input("Page name")
            .placeholder("index")
            .default_input("index")
            .validate(|input: &String| {
                if valid_page_name(input) {
                    Ok(())
                } else {
                    Err("Use letters, digits, '-' and '_' only")
                }
            })
            .interact()?,
    };

    if !valid_page_name(&name) {
        anyhow::bail!("Invalid page name '{}'", name);
    }
    Ok(name)
}

fn select_page_type(
    snapshot: &RegistrySnapshot,
    config: &StudioConfig,
    args: &ComposeArgs,
) -> Result<Option<String>> {
    if let Some(page_type) = &args.page_type {
        cliclack::log::info(format!("Page type: {}", page_type))?;
        return Ok(Some(page_type.clone()));
    }
    if args.yes {
        return Ok(config.default_page_type.clone());
    }

    let tags = snapshot.context_tags();
    if tags.is_empty() {
        return Ok(config.default_page_type.clone());
    }

    let initial = config
        .default_page_type
        .as_ref()
        .and_then(|t| tags.iter().position(|tag| tag == t))
        .map_or(0, |idx| idx + 1);

    let mut select = cliclack::select("Page type").item(0usize, "Any", "every component is offered");
    for (idx, tag) in tags.iter().enumerate() {
        select = select.item(idx + 1, tag, "");
    }
    let selected: usize = select.initial_value(initial).interact()?;

    Ok(match selected {
        0 => None,
        idx => tags.get(idx - 1).cloned(),
    })
}

fn seeded_node(entry: &RegistryEntry, variant: Option<String>) -> ConfigNode {
    let mut node = ConfigNode::new(entry.name());
    node.variant = variant;
    if let Some(example) = entry.metadata().examples.first() {
        node.props = example.clone();
    }
    node
}

fn nodes_from_refs(
    snapshot: &RegistrySnapshot,
    refs: &[String],
    page_type: Option<&str>,
) -> Result<Vec<ConfigNode>> {
    let mut nodes = Vec::with_capacity(refs.len());
    for reference in refs {
        let (name, variant) = parse_component_ref(reference);
        snapshot.resolve(&name, variant.as_deref(), page_type)?;
        // resolve succeeded, so the entry exists
        if let Some(entry) = snapshot.lookup(&name) {
            cliclack::log::step(format!(
                "{} ({})",
                name,
                variant.as_deref().unwrap_or(&entry.metadata().default_variant)
            ))?;
            nodes.push(seeded_node(&entry, variant));
        }
    }
    Ok(nodes)
}

fn select_components(
    snapshot: &RegistrySnapshot,
    page_type: Option<&str>,
) -> Result<Vec<ConfigNode>> {
    let filter = match page_type {
        Some(tag) => ListFilter::all().compatible_with(tag),
        None => ListFilter::all(),
    };
    let palette: Vec<Arc<RegistryEntry>> = snapshot.list(&filter);
    if palette.is_empty() {
        anyhow::bail!("No components are compatible with this page type.");
    }

    let mut nodes = Vec::new();
    loop {
        // Build select prompt - use indices to avoid borrow issues; 0 finishes
        let done_label = if nodes.is_empty() { "Cancel" } else { "Done" };
        let mut select = cliclack::select(format!("Add component #{}", nodes.len() + 1))
            .item(0usize, done_label, "");
        for (idx, entry) in palette.iter().enumerate() {
            let hint = match entry.metadata().component_type {
                Some(t) => format!("{} - {}", t, entry.metadata().description),
                None => entry.metadata().description.clone(),
            };
            select = select.item(idx + 1, entry.name(), hint);
        }
        let selected: usize = select.initial_value(1).interact()?;

        if selected == 0 {
            break;
        }
        let entry = &palette[selected - 1];
        let variant = select_variant(entry)?;
        nodes.push(seeded_node(entry, variant));
    }

    if nodes.is_empty() {
        anyhow::bail!("Composition cancelled.");
    }
    cliclack::log::success(format!("{} component(s) placed", nodes.len()))?;
    Ok(nodes)
}

/// `None` keeps the component's default variant
fn select_variant(entry: &RegistryEntry) -> Result<Option<String>> {
    let metadata = entry.metadata();
    if metadata.variants.len() == 1 {
        return Ok(None);
    }

    let mut select = cliclack::select(format!("Variant of {}", entry.name()));
    for variant in &metadata.variants {
        let tags: Vec<&str> = variant.tags.iter().map(String::as_str).collect();
        select = select.item(variant.id.clone(), &variant.name, tags.join(", "));
    }
    let selected: String = select
        .initial_value(metadata.default_variant.clone())
        .interact()?;

    Ok(if selected == metadata.default_variant {
        None
    } else {
        Some(selected)
    })
}

async fn write_document(document: &PageDocument, path: &Path, yes: bool) -> Result<()> {
    if path.exists() {
        cliclack::log::warning(format!("{} already exists", path.display()))?;
        let confirm = if yes {
            true
        } else {
            cliclack::confirm("Overwrite it?")
                .initial_value(false)
                .interact()?
        };
        if !confirm {
            anyhow::bail!("Composition cancelled.");
        }
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, document.to_yaml()?).await?;
    cliclack::log::success(format!(
        "Wrote {} ({} nodes)",
        path.display(),
        document.node_count()
    ))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::initialize;

    #[test]
    fn test_parse_component_ref() {
        assert_eq!(parse_component_ref("hero"), ("hero".to_string(), None));
        assert_eq!(
            parse_component_ref(" hero : split "),
            ("hero".to_string(), Some("split".to_string()))
        );
        assert_eq!(parse_component_ref("hero:"), ("hero".to_string(), None));
    }

    #[test]
    fn test_valid_page_name() {
        assert!(valid_page_name("about-us_2"));
        assert!(!valid_page_name(""));
        assert!(!valid_page_name("a/b"));
    }

    #[test]
    fn test_seeded_node_uses_first_example() {
        let registry = ComponentRegistry::new();
        initialize(&registry).unwrap();
        let entry = registry.lookup("hero").unwrap();

        let node = seeded_node(&entry, Some("split".to_string()));
        assert_eq!(node.component, "hero");
        assert_eq!(node.variant.as_deref(), Some("split"));
        assert_eq!(&node.props, &entry.metadata().examples[0]);
    }
}
