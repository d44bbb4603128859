//! Builder kinds and their fixed expansion tables
//!
//! Each builder contributes manifest entries and, except `store`, a template
//! set rendered into one or more subdirectories of the project. Both rules are
//! static tables so they can be audited and tested without touching disk.

use std::fmt;
use std::str::FromStr;

/// A VTEX IO builder that can be enabled for the generated app
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Builder {
    Node,
    React,
    Admin,
    Graphql,
    Messages,
    Masterdata,
    Pixel,
    Store,
}

/// A template-set subdirectory and the project subdirectory it renders into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Target {
    /// Subdirectory inside the builder's template set ("" for the set root)
    pub source: &'static str,
    /// Subdirectory of the project that receives the rendered files
    pub dest: &'static str,
}

impl Builder {
    /// Order used for prompts and CLI flags
    pub const ALL: [Builder; 8] = [
        Builder::Node,
        Builder::React,
        Builder::Admin,
        Builder::Graphql,
        Builder::Messages,
        Builder::Masterdata,
        Builder::Pixel,
        Builder::Store,
    ];

    /// Order in which manifest entries are merged (later wins on shared keys)
    pub const MANIFEST_ORDER: [Builder; 8] = [
        Builder::Node,
        Builder::React,
        Builder::Admin,
        Builder::Messages,
        Builder::Store,
        Builder::Masterdata,
        Builder::Graphql,
        Builder::Pixel,
    ];

    /// Order in which template sets are applied; `store` has no set of its own
    pub const ASSEMBLY_ORDER: [Builder; 7] = [
        Builder::Node,
        Builder::React,
        Builder::Admin,
        Builder::Graphql,
        Builder::Messages,
        Builder::Masterdata,
        Builder::Pixel,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Builder::Node => "node",
            Builder::React => "react",
            Builder::Admin => "admin",
            Builder::Graphql => "graphql",
            Builder::Messages => "messages",
            Builder::Masterdata => "masterdata",
            Builder::Pixel => "pixel",
            Builder::Store => "store",
        }
    }

    /// Shown next to the builder in the multi-select prompt
    pub fn description(&self) -> &'static str {
        match self {
            Builder::Node => "Node application builder with sample route",
            Builder::React => "React application builder",
            Builder::Admin => "Admin application builder with sample admin page",
            Builder::Graphql => "GraphQL application builder with sample resolvers",
            Builder::Messages => "Messages application builder for translations",
            Builder::Masterdata => "Masterdata application builder with sample data entity",
            Builder::Pixel => "Pixel application builder",
            Builder::Store => "Store application builder",
        }
    }

    /// Manifest `builders` entries introduced when this builder is enabled
    pub fn manifest_entries(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            Builder::Node => &[("node", "7.x")],
            Builder::React => &[("react", "3.x")],
            Builder::Admin => &[("admin", "0.x"), ("react", "3.x")],
            Builder::Messages => &[("messages", "1.x")],
            Builder::Store => &[("store", "0.x"), ("react", "3.x")],
            Builder::Masterdata => &[("masterdata", "1.x")],
            Builder::Graphql => &[("graphql", "1.x")],
            Builder::Pixel => &[("pixel", "0.x"), ("react", "3.x"), ("store", "0.x")],
        }
    }

    /// Template set directory under the templates root
    pub fn template_set(&self) -> Option<&'static str> {
        match self {
            Builder::Store => None,
            other => Some(other.name()),
        }
    }

    /// Where this builder's template set lands in the project
    pub fn targets(&self) -> &'static [Target] {
        match self {
            Builder::Node => &[Target { source: "", dest: "node" }],
            Builder::React => &[Target { source: "", dest: "react" }],
            Builder::Admin => &[
                Target { source: "admin", dest: "admin" },
                Target { source: "react", dest: "react" },
            ],
            Builder::Graphql => &[
                Target { source: "graphql", dest: "graphql" },
                Target { source: "node", dest: "node" },
                Target { source: "react", dest: "react" },
            ],
            Builder::Messages => &[Target { source: "", dest: "messages" }],
            Builder::Masterdata => &[Target { source: "", dest: "masterdata" }],
            Builder::Pixel => &[
                Target { source: "react", dest: "react" },
                Target { source: "store", dest: "store" },
            ],
            Builder::Store => &[],
        }
    }
}

impl fmt::Display for Builder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Builder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Builder::ALL
            .into_iter()
            .find(|b| b.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown builder: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_builder_in_manifest_order() {
        let mut ordered = Builder::MANIFEST_ORDER.to_vec();
        ordered.sort();
        assert_eq!(ordered, Builder::ALL.to_vec());
    }

    #[test]
    fn test_store_has_no_template_set() {
        assert_eq!(Builder::Store.template_set(), None);
        assert!(Builder::Store.targets().is_empty());
        assert!(!Builder::ASSEMBLY_ORDER.contains(&Builder::Store));
    }

    #[test]
    fn test_multi_key_expansions() {
        let keys = |b: Builder| -> Vec<&'static str> {
            b.manifest_entries().iter().map(|(k, _)| *k).collect()
        };
        assert_eq!(keys(Builder::Admin), vec!["admin", "react"]);
        assert_eq!(keys(Builder::Pixel), vec!["pixel", "react", "store"]);
        assert_eq!(keys(Builder::Store), vec!["store", "react"]);
    }

    #[test]
    fn test_shared_keys_agree_on_version() {
        let mut seen: std::collections::HashMap<&str, &str> = std::collections::HashMap::new();
        for builder in Builder::ALL {
            for &(key, version) in builder.manifest_entries() {
                if let Some(previous) = seen.insert(key, version) {
                    assert_eq!(previous, version, "conflicting versions for {}", key);
                }
            }
        }
    }

    #[test]
    fn test_pixel_targets_react_and_store() {
        let dests: Vec<&str> = Builder::Pixel.targets().iter().map(|t| t.dest).collect();
        assert_eq!(dests, vec!["react", "store"]);
    }

    #[test]
    fn test_parse_builder_names() {
        assert_eq!("GraphQL".parse::<Builder>(), Ok(Builder::Graphql));
        assert_eq!(" masterdata ".parse::<Builder>(), Ok(Builder::Masterdata));
        assert!("vue".parse::<Builder>().is_err());
    }
}
