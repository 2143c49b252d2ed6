//! Version comparison between the running builder and saved documents

use anyhow::Result;
use semver::Version;

/// Compare the builder version against the version that saved a document.
/// Returns a warning message if the document was saved by a newer builder.
pub fn check_compatibility(
    builder_version: &str,
    document_version: &str,
    upgrade_command: &str,
) -> Option<String> {
    let builder = parse_version(builder_version).ok()?;
    let document = parse_version(document_version).ok()?;

    if builder < document {
        Some(format!(
            "Warning: This page was saved by builder version {}.\n\
             You are running version {}; newer components or variants may be unknown.\n\
             Consider updating: {}",
            document_version, builder_version, upgrade_command
        ))
    } else {
        None
    }
}

/// Parse version string, tolerating a leading 'v'
pub fn parse_version(version_str: &str) -> Result<Version> {
    let cleaned = version_str.strip_prefix('v').unwrap_or(version_str);
    Version::parse(cleaned).map_err(|e| anyhow::anyhow!("Invalid version '{}': {}", version_str, e))
}
