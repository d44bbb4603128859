//! Configuration resolution
//!
//! The collection layer (CLI flags plus prompts) produces a
//! [`ConfigurationInput`]; [`Configuration::resolve`] validates it once and
//! freezes it for the rest of the run.

pub mod slug;

use crate::builders::Builder;
use crate::error::{BootError, Result};
use serde::Serialize;
use std::collections::BTreeSet;

pub use slug::slugify;

/// App name used when none is supplied
pub const DEFAULT_APP_NAME: &str = "my-app";

/// Shown when no builder was selected
pub const NO_BUILDERS_MESSAGE: &str = "You must select at least one of the builders.";

/// Answers gathered from flags and prompts, possibly incomplete
#[derive(Debug, Clone, Default)]
pub struct ConfigurationInput {
    pub name: Option<String>,
    pub vendor: Option<String>,
    pub builders: BTreeSet<Builder>,
}

/// Immutable configuration for one generation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    app_name: String,
    app_slug: String,
    vendor: String,
    builders: BTreeSet<Builder>,
}

impl Configuration {
    /// Validate the collected answers and derive the slug
    pub fn resolve(input: ConfigurationInput) -> Result<Self> {
        let app_name = input
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| DEFAULT_APP_NAME.to_string());

        let app_slug = slugify(&app_name);
        if app_slug.is_empty() {
            return Err(BootError::validation(format!(
                "Application name '{}' must contain at least one letter or digit",
                app_name
            )));
        }

        let vendor = input
            .vendor
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| BootError::validation("The application vendor is required."))?;

        if input.builders.is_empty() {
            return Err(BootError::validation(NO_BUILDERS_MESSAGE));
        }

        Ok(Self {
            app_name,
            app_slug,
            vendor,
            builders: input.builders,
        })
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    pub fn app_slug(&self) -> &str {
        &self.app_slug
    }

    pub fn vendor(&self) -> &str {
        &self.vendor
    }

    pub fn is_enabled(&self, builder: Builder) -> bool {
        self.builders.contains(&builder)
    }

    /// Enabled builders in selection order
    pub fn builders(&self) -> impl Iterator<Item = Builder> + '_ {
        self.builders.iter().copied()
    }

    /// Values exposed to template placeholders
    pub fn template_context(&self) -> TemplateContext<'_> {
        TemplateContext {
            app_name: &self.app_name,
            app_slug: &self.app_slug,
            vendor: &self.vendor,
            node: self.is_enabled(Builder::Node),
            react: self.is_enabled(Builder::React),
            admin: self.is_enabled(Builder::Admin),
            graphql: self.is_enabled(Builder::Graphql),
            messages: self.is_enabled(Builder::Messages),
            masterdata: self.is_enabled(Builder::Masterdata),
            pixel: self.is_enabled(Builder::Pixel),
            store: self.is_enabled(Builder::Store),
        }
    }
}

/// Placeholder namespace: `<%= appName %>`, `[% if graphql %]`, ...
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateContext<'a> {
    pub app_name: &'a str,
    pub app_slug: &'a str,
    pub vendor: &'a str,
    pub node: bool,
    pub react: bool,
    pub admin: bool,
    pub graphql: bool,
    pub messages: bool,
    pub masterdata: bool,
    pub pixel: bool,
    pub store: bool,
}

/// Name of the project directory: the slugged positional argument when it
/// yields a usable slug, otherwise the app slug. The manifest keeps the app
/// slug either way.
pub fn destination_dir_name(positional: Option<&str>, config: &Configuration) -> String {
    positional
        .map(slugify)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| config.app_slug().to_string())
}
