//! Template catalog (templates/template.yaml)

use crate::builders::Builder;
use crate::error::{BootError, Result};
use serde::Deserialize;

pub const CATALOG_FILE: &str = "template.yaml";

/// Template set applied to every project
pub const MAIN_SET: &str = "main";

/// Lists the template sets shipped in a templates directory
#[derive(Debug, Clone, Deserialize)]
pub struct TemplateCatalog {
    /// Oldest CLI version that understands these sets
    pub version: String,

    /// Template set directory names
    pub templates: Vec<String>,
}

impl TemplateCatalog {
    pub fn parse(content: &str) -> Result<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| BootError::Catalog(format!("failed to parse {}: {}", CATALOG_FILE, e)))
    }

    /// Sets the assembler may apply: `main` plus one per builder that has templates
    pub fn required_sets() -> Vec<&'static str> {
        std::iter::once(MAIN_SET)
            .chain(Builder::ASSEMBLY_ORDER.iter().filter_map(|b| b.template_set()))
            .collect()
    }

    pub fn contains(&self, set: &str) -> bool {
        self.templates.iter().any(|t| t == set)
    }

    /// Fail when a set the assembler needs is not listed
    pub fn validate(&self) -> Result<()> {
        let missing: Vec<&str> = Self::required_sets()
            .into_iter()
            .filter(|set| !self.contains(set))
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(BootError::Catalog(format!(
                "missing template sets: {}",
                missing.join(", ")
            )))
        }
    }
}
