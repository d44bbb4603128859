//! Product configuration trait for CLI binaries
//!
//! The core never hardcodes the binary's identity; the binary supplies it
//! through this trait.

use crate::config::Configuration;
use std::path::Path;

/// Identity and wording of the CLI built on top of this library
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Environment variable pointing at a local templates directory
    fn template_dir_env(&self) -> &'static str;

    /// URL for product documentation
    fn docs_url(&self) -> &'static str;

    /// Upgrade/install command shown in version warnings
    fn upgrade_command(&self) -> &'static str;

    /// Instructions printed after the project has been generated
    fn next_steps(&self, dir: &Path, config: &Configuration) -> Vec<String>;
}
