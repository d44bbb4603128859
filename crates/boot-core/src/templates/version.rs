//! Version comparison between the CLI and the template catalog

use anyhow::Result;
use semver::Version;

/// Returns a warning when the templates expect a newer CLI than the one running
pub fn check_compatibility(
    cli_version: &str,
    catalog_version: &str,
    upgrade_command: &str,
) -> Option<String> {
    // Unparseable versions are not worth blocking on
    let cli_ver = parse_version(cli_version).ok()?;
    let catalog_ver = parse_version(catalog_version).ok()?;

    if cli_ver < catalog_ver {
        Some(format!(
            "Warning: These templates were written for CLI version {} or newer.\n\
             You are running version {}.\n\
             Consider updating: {}",
            catalog_version, cli_version, upgrade_command
        ))
    } else {
        None
    }
}

/// Parse a version string, accepting a leading `v`
pub fn parse_version(version_str: &str) -> Result<Version> {
    let cleaned = version_str.trim().strip_prefix('v').unwrap_or(version_str.trim());
    Version::parse(cleaned).map_err(|e| anyhow::anyhow!("Invalid version '{}': {}", version_str, e))
}
