//! Site Studio CLI - compose, preview and export component-driven sites

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::path::{Path, PathBuf};
use studio_core::document::check_compatibility;
use studio_core::export::{build_catalog, export_site, ExportOptions};
use studio_core::render::check_document;
use studio_core::tui::ComposeArgs;
use studio_core::{
    discovery, ComponentRegistry, ComponentType, DocumentFetcher, DocumentSource, ListFilter,
    PageDocument, PageRenderer, RenderMode, StudioConfig, StudioProfile,
};
use tracing_subscriber::EnvFilter;

/// CLI version
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Site Studio product profile
#[derive(Clone)]
pub struct SiteStudioProfile;

impl StudioProfile for SiteStudioProfile {
    fn name(&self) -> &'static str {
        "site-studio"
    }

    fn display_name(&self) -> &'static str {
        "Site Studio"
    }

    fn config_env(&self) -> &'static str {
        "SITE_STUDIO_CONFIG"
    }

    fn docs_url(&self) -> &'static str {
        "https://github.com/site-studio/site-studio#readme"
    }

    fn upgrade_command(&self) -> &'static str {
        "cargo install site-studio --force"
    }

    fn next_steps(&self, out_dir: &Path) -> Vec<String> {
        vec![
            format!("cd {}", out_dir.display()),
            "Serve the folder with any static file server, e.g. python3 -m http.server".to_string(),
            "Upload the folder (or the zip archive) to your hosting provider".to_string(),
        ]
    }
}

#[derive(Parser, Debug)]
#[command(name = "site-studio")]
#[command(about = "CLI for composing, previewing and exporting component-driven sites")]
#[command(version)]
pub struct Args {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List registered components and their variants
    Catalog(CatalogArgs),
    /// Show component names and variant ids (diagnostics)
    Info,
    /// Render a page document, replacing unknown components with placeholders
    Preview(PreviewArgs),
    /// Check that page documents only reference known, compatible components
    Validate(DocumentsArgs),
    /// Export page documents to a static site
    Export(ExportArgs),
    /// Interactively compose a new page document
    Compose(CliComposeArgs),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum CatalogFormat {
    Text,
    Yaml,
}

#[derive(Parser, Debug)]
pub struct CatalogArgs {
    /// Only components of this type (element, section, template, layout)
    #[arg(long = "type")]
    pub component_type: Option<ComponentType>,

    /// Only components usable on this page type
    #[arg(long)]
    pub tag: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = CatalogFormat::Text)]
    pub format: CatalogFormat,
}

#[derive(Parser, Debug)]
pub struct PreviewArgs {
    /// Page document path or http(s) URL
    pub document: String,

    /// Write the HTML here instead of stdout
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct DocumentsArgs {
    /// Page document paths, directories or http(s) URLs
    #[arg(required = true)]
    pub documents: Vec<String>,
}

#[derive(Parser, Debug)]
pub struct ExportArgs {
    /// Page document paths, directories or http(s) URLs
    #[arg(required = true)]
    pub documents: Vec<String>,

    /// Output directory (defaults to the config's output_dir)
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Also write a zip archive of the export
    #[arg(long)]
    pub archive: bool,

    /// Open the first exported page in the browser
    #[arg(long)]
    pub open: bool,
}

#[derive(Parser, Debug)]
pub struct CliComposeArgs {
    /// Page name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Page type (context tag)
    #[arg(short = 't', long = "page-type")]
    pub page_type: Option<String>,

    /// Components to place, as name or name:variant (repeatable or comma-separated)
    #[arg(short, long = "component", value_delimiter = ',')]
    pub components: Option<Vec<String>>,

    /// Output file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Auto-confirm all prompts (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,
}

impl From<CliComposeArgs> for ComposeArgs {
    fn from(args: CliComposeArgs) -> Self {
        ComposeArgs {
            name: args.name,
            page_type: args.page_type,
            components: args.components,
            output: args.output,
            yes: args.yes,
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn sources(documents: &[String]) -> Vec<DocumentSource> {
    documents.iter().map(|d| DocumentSource::parse(d)).collect()
}

/// Print a warning for every document saved by a newer builder
fn warn_versions<P: StudioProfile>(profile: &P, documents: &[PageDocument]) {
    for document in documents {
        if let Some(version) = &document.builder_version {
            if let Some(warning) =
                check_compatibility(CLI_VERSION, version, profile.upgrade_command())
            {
                eprintln!("{} {}", format!("[{}]", document.name).yellow(), warning);
            }
        }
    }
}

fn apply_default_page_type(documents: &mut [PageDocument], config: &StudioConfig) {
    for document in documents {
        if document.page_type.is_none() {
            document.page_type = config.default_page_type.clone();
        }
    }
}

fn print_catalog(registry: &ComponentRegistry, args: &CatalogArgs) -> Result<()> {
    let filter = ListFilter {
        component_type: args.component_type,
        compatible_tag: args.tag.clone(),
    };
    let entries = registry.list(&filter);

    if args.format == CatalogFormat::Yaml {
        let mut catalog = build_catalog(&registry.snapshot());
        catalog
            .components
            .retain(|c| entries.iter().any(|e| e.name() == c.name));
        print!("{}", catalog.to_yaml()?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("{}", "No matching components.".yellow());
        return Ok(());
    }

    for entry in entries {
        let metadata = entry.metadata();
        let kind = metadata
            .component_type
            .map(|t| t.to_string())
            .unwrap_or_default();
        println!(
            "{} {} {}",
            entry.name().cyan().bold(),
            format!("[{}]", kind).dimmed(),
            metadata.description
        );
        for variant in &metadata.variants {
            let marker = if variant.id == metadata.default_variant {
                "*".green()
            } else {
                " ".normal()
            };
            println!("  {} {:<12} {}", marker, variant.id, variant.name);
        }
        println!("    {} {}", "pages:".dimmed(), metadata.compatible_with.join(", "));
    }
    Ok(())
}

async fn preview(
    registry: &ComponentRegistry,
    fetcher: &DocumentFetcher,
    config: &StudioConfig,
    args: PreviewArgs,
) -> Result<()> {
    let profile = SiteStudioProfile;
    let source = DocumentSource::parse(&args.document);
    let mut documents = vec![fetcher.fetch(&source).await?];
    apply_default_page_type(&mut documents, config);
    warn_versions(&profile, &documents);

    let renderer = PageRenderer::new(registry, RenderMode::Preview)?;
    let rendered = renderer
        .render_page(&documents[0])
        .context("Preview rendering failed")?;

    for placeholder in &rendered.placeholders {
        eprintln!("{} {}", "Placeholder:".yellow(), placeholder);
    }

    let html = studio_core::export::html_document(&rendered.title, &rendered.body);
    match args.out {
        Some(path) => {
            tokio::fs::write(&path, html)
                .await
                .with_context(|| format!("Failed to write file: {}", path.display()))?;
            eprintln!("{} {}", "Wrote".green().bold(), path.display());
        }
        None => print!("{}", html),
    }
    Ok(())
}

async fn validate(
    registry: &ComponentRegistry,
    fetcher: &DocumentFetcher,
    config: &StudioConfig,
    args: DocumentsArgs,
) -> Result<()> {
    let mut documents = fetcher.fetch_all(&sources(&args.documents)).await?;
    apply_default_page_type(&mut documents, config);
    warn_versions(&SiteStudioProfile, &documents);

    let snapshot = registry.snapshot();
    let mut problems = 0;
    for document in &documents {
        let errors = check_document(&snapshot, document);
        if errors.is_empty() {
            println!("  {} {}", "ok".green(), document.name);
        } else {
            println!("  {} {}", "failed".red(), document.name);
            for error in &errors {
                println!("    - {}", error);
            }
            problems += errors.len();
        }
    }

    if problems > 0 {
        anyhow::bail!("{} unresolvable node(s) found", problems);
    }
    Ok(())
}

async fn export(
    registry: &ComponentRegistry,
    fetcher: &DocumentFetcher,
    config: &StudioConfig,
    args: ExportArgs,
) -> Result<()> {
    let profile = SiteStudioProfile;
    let documents = fetcher.fetch_all(&sources(&args.documents)).await?;
    warn_versions(&profile, &documents);

    let mut options = ExportOptions::from_config(config);
    if let Some(out) = args.out {
        options.out_dir = out;
    }
    options.archive |= args.archive;

    println!(
        "{}",
        format!("Exporting {} page(s)...", documents.len())
            .cyan()
            .bold()
    );
    println!();

    let report = export_site(registry, &documents, &options).await?;

    for page in &report.pages {
        println!("  {} {}", "->".blue(), page.display());
    }
    for failure in &report.failures {
        eprintln!("  {} {}", "failed".red(), failure);
    }
    if let Some(archive) = &report.archive {
        println!("  {} {}", "->".blue(), archive.display());
    }

    println!();
    println!(
        "{} {} page(s) in {}",
        "Exported".green().bold(),
        report.pages.len(),
        options.out_dir.display()
    );

    if args.open {
        if let Some(first) = report.pages.first() {
            open::that(first)?;
        }
    }

    if !report.is_success() {
        anyhow::bail!("{} page(s) failed to export", report.failures.len());
    }

    println!();
    println!("  Next steps");
    println!();
    for (i, step) in profile.next_steps(&options.out_dir).iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }
    println!();
    println!("  Docs: {}", profile.docs_url().cyan());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    init_logging(args.verbose);

    let profile = SiteStudioProfile;
    let config = StudioConfig::load(&profile)?;

    // Every component must be registered before the first resolution
    let registry = ComponentRegistry::new();
    discovery::initialize(&registry)?;
    tracing::debug!(components = registry.snapshot().len(), "component registry sealed");

    let fetcher = DocumentFetcher::new(profile.user_agent());

    match args.command {
        Some(Command::Catalog(catalog_args)) => print_catalog(&registry, &catalog_args),
        Some(Command::Info) => {
            for info in registry.elements_info() {
                println!("{}: {}", info.name, info.variants.join(", "));
            }
            Ok(())
        }
        Some(Command::Preview(preview_args)) => {
            preview(&registry, &fetcher, &config, preview_args).await
        }
        Some(Command::Validate(validate_args)) => {
            validate(&registry, &fetcher, &config, validate_args).await
        }
        Some(Command::Export(export_args)) => {
            export(&registry, &fetcher, &config, export_args).await
        }
        Some(Command::Compose(compose_args)) => {
            let result = studio_core::run_compose(
                &profile,
                &registry,
                &config,
                compose_args.into(),
                CLI_VERSION,
            )
            .await
            .map(|_| ());

            // Ensure cursor is visible on normal exit
            let _ = console::Term::stderr().show_cursor();

            result
        }
        None => {
            // No subcommand provided, default to compose behavior (interactive mode)
            let result = studio_core::run_compose(
                &profile,
                &registry,
                &config,
                ComposeArgs::default(),
                CLI_VERSION,
            )
            .await
            .map(|_| ());

            // Ensure cursor is visible on normal exit
            let _ = console::Term::stderr().show_cursor();

            result
        }
    }
}
