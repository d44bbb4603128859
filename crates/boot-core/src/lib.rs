//! Boot Core - generates VTEX IO application skeletons
//!
//! A run collects a [`Configuration`] (app name, vendor, builders), then the
//! [`ProjectAssembler`] renders the `main` template set into the project
//! root, patches its `manifest.json`, and renders the template set of each
//! enabled builder into its subdirectories.
//!
//! # Architecture
//!
//! - **Core operations** - builder tables, slugs, template rendering, manifest patching
//! - **Orchestration** - `ProjectAssembler` and the `ProductConfig` trait
//! - **CLI interface** - optional cliclack prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use boot_core::{Builder, Configuration, ConfigurationInput, ProjectAssembler, TemplateSource};
//!
//! let config = Configuration::resolve(ConfigurationInput {
//!     name: Some("My App".into()),
//!     vendor: Some("acme".into()),
//!     builders: [Builder::Node].into_iter().collect(),
//! })?;
//! let report = ProjectAssembler::new(TemplateSource::Embedded)?
//!     .assemble(Path::new("my-app"), &config)
//!     .await?;
//! ```

pub mod assembler;
pub mod builders;
pub mod config;
pub mod error;
pub mod manifest;
pub mod product;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use assembler::{AppliedSet, AssemblyReport, ProjectAssembler};
pub use builders::Builder;
pub use config::{destination_dir_name, slugify, Configuration, ConfigurationInput};
pub use error::BootError;
pub use product::ProductConfig;
pub use templates::{TemplateCatalog, TemplateSource};

#[cfg(feature = "tui")]
pub use tui::run;
