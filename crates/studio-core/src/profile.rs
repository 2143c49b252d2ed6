//! Product profile trait for CLI binaries
//!
//! This trait defines the identity and defaults a studio binary provides to
//! the library: naming, where its configuration lives, and what to tell the
//! user after an export.

use std::path::Path;

/// Configuration trait for studio front ends
pub trait StudioProfile: Clone + Send + Sync + 'static {
    /// Internal product name (used for CLI command, env vars)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Environment variable name for overriding the config file path
    fn config_env(&self) -> &'static str;

    /// Config file looked up in the working directory when the env var is unset
    fn default_config_file(&self) -> &'static str {
        "studio.yaml"
    }

    /// URL for product documentation
    fn docs_url(&self) -> &'static str;

    /// Upgrade/install command shown in version warnings
    fn upgrade_command(&self) -> &'static str;

    /// Generate the "next steps" instructions after an export
    fn next_steps(&self, out_dir: &Path) -> Vec<String>;

    /// User agent string for HTTP requests
    fn user_agent(&self) -> &'static str {
        self.name()
    }
}
