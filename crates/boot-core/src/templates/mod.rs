//! Template sets: where they come from and how they are rendered
//!
//! This module provides:
//! - The template catalog (`template.yaml`) listing shipped sets
//! - Embedded or local template sources walked depth first
//! - Placeholder rendering into a destination directory
//! - Version compatibility checking between CLI and catalog

pub mod catalog;
pub mod renderer;
pub mod source;
pub mod version;

pub use catalog::TemplateCatalog;
pub use renderer::{output_name, TemplateRenderer, TEMPLATE_SUFFIX};
pub use source::{TemplateEntry, TemplateSource};
pub use version::check_compatibility;
