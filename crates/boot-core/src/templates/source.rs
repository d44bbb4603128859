//! Template sets embedded in the binary or read from a local directory
//!
//! Both sources yield the same depth-first, name-sorted listing so a local
//! checkout of `templates/` renders exactly like the embedded copy.

use super::catalog::{TemplateCatalog, CATALOG_FILE};
use crate::error::{BootError, Result};
use crate::product::ProductConfig;
use include_dir::{include_dir, Dir, DirEntry};
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use walkdir::WalkDir;

static EMBEDDED_TEMPLATES: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/../../templates");

/// Where template sets are read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    /// Template sets compiled into the binary
    Embedded,
    /// A `templates/` directory on disk
    Local(PathBuf),
}

/// One node of a template set, path relative to the walked root
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateEntry {
    Dir(PathBuf),
    File { path: PathBuf, contents: Vec<u8> },
}

impl TemplateSource {
    /// Pick the source: explicit directory, then the product's environment
    /// variable, then the embedded sets
    pub fn resolve<C: ProductConfig>(config: &C, template_dir: Option<PathBuf>) -> Self {
        template_dir
            .or_else(|| {
                std::env::var_os(config.template_dir_env())
                    .filter(|v| !v.is_empty())
                    .map(PathBuf::from)
            })
            .map(Self::Local)
            .unwrap_or(Self::Embedded)
    }

    pub fn describe(&self) -> String {
        match self {
            TemplateSource::Embedded => "built-in templates".to_string(),
            TemplateSource::Local(path) => format!("local templates from {}", path.display()),
        }
    }

    /// Load and parse `template.yaml`
    pub async fn catalog(&self) -> Result<TemplateCatalog> {
        let content = match self {
            TemplateSource::Embedded => EMBEDDED_TEMPLATES
                .get_file(CATALOG_FILE)
                .and_then(|f| f.contents_utf8())
                .map(str::to_string)
                .ok_or_else(|| {
                    BootError::Catalog(format!("embedded templates are missing {}", CATALOG_FILE))
                })?,
            TemplateSource::Local(root) => {
                let path = root.join(CATALOG_FILE);
                fs::read_to_string(&path)
                    .await
                    .map_err(|e| BootError::io("Failed to read", path, e))?
            }
        };

        TemplateCatalog::parse(&content)
    }

    /// List `set/subdir` depth first, siblings sorted by name.
    /// An empty `subdir` lists the whole set.
    pub async fn entries(&self, set: &str, subdir: &str) -> Result<Vec<TemplateEntry>> {
        let relative = if subdir.is_empty() {
            PathBuf::from(set)
        } else {
            Path::new(set).join(subdir)
        };

        match self {
            TemplateSource::Embedded => {
                let dir = EMBEDDED_TEMPLATES.get_dir(&relative).ok_or_else(|| {
                    BootError::io(
                        "Template set not found",
                        &relative,
                        io::Error::from(io::ErrorKind::NotFound),
                    )
                })?;
                let mut entries = Vec::new();
                collect_embedded(dir, dir.path(), &mut entries);
                Ok(entries)
            }
            TemplateSource::Local(root) => collect_local(&root.join(&relative)).await,
        }
    }
}

fn collect_embedded(dir: &Dir<'static>, base: &Path, entries: &mut Vec<TemplateEntry>) {
    let mut children: Vec<&DirEntry<'static>> = dir.entries().iter().collect();
    children.sort_by(|a, b| a.path().cmp(b.path()));

    for child in children {
        let relative = child
            .path()
            .strip_prefix(base)
            .unwrap_or(child.path())
            .to_path_buf();
        match child {
            DirEntry::Dir(subdir) => {
                entries.push(TemplateEntry::Dir(relative));
                collect_embedded(subdir, base, entries);
            }
            DirEntry::File(file) => entries.push(TemplateEntry::File {
                path: relative,
                contents: file.contents().to_vec(),
            }),
        }
    }
}

async fn collect_local(base: &Path) -> Result<Vec<TemplateEntry>> {
    if !base.is_dir() {
        return Err(BootError::io(
            "Template set not found",
            base,
            io::Error::from(io::ErrorKind::NotFound),
        ));
    }

    let mut entries = Vec::new();
    for entry in WalkDir::new(base).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(base).to_path_buf();
            BootError::io("Failed to read", path, io::Error::from(e))
        })?;
        let relative = entry
            .path()
            .strip_prefix(base)
            .unwrap_or(entry.path())
            .to_path_buf();

        if entry.file_type().is_dir() {
            entries.push(TemplateEntry::Dir(relative));
        } else {
            let contents = fs::read(entry.path())
                .await
                .map_err(|e| BootError::io("Failed to read", entry.path(), e))?;
            entries.push(TemplateEntry::File {
                path: relative,
                contents,
            });
        }
    }

    Ok(entries)
}
