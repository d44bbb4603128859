//! Project assembly: main template set, manifest patch, then builder sets

use crate::builders::Builder;
use crate::config::Configuration;
use crate::error::{BootError, Result};
use crate::manifest::{self, MANIFEST_FILE};
use crate::templates::catalog::MAIN_SET;
use crate::templates::{TemplateRenderer, TemplateSource};
use std::path::{Path, PathBuf};
use tokio::fs;

type ProgressFn = Box<dyn Fn(&str) + Send + Sync>;

/// One template set (or a subdirectory of one) rendered into the project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedSet {
    pub template_set: &'static str,
    /// Project-relative directory the files landed in ("" for the root)
    pub dest: &'static str,
    /// Written files, relative to `dest`
    pub files: Vec<PathBuf>,
}

/// What a successful assembly wrote
#[derive(Debug, Clone)]
pub struct AssemblyReport {
    pub root: PathBuf,
    pub applied: Vec<AppliedSet>,
}

impl AssemblyReport {
    pub fn file_count(&self) -> usize {
        self.applied.iter().map(|a| a.files.len()).sum()
    }
}

/// Materializes a project from template sets
pub struct ProjectAssembler {
    source: TemplateSource,
    renderer: TemplateRenderer,
    progress: Option<ProgressFn>,
}

impl ProjectAssembler {
    pub fn new(source: TemplateSource) -> Result<Self> {
        Ok(Self {
            source,
            renderer: TemplateRenderer::new()?,
            progress: None,
        })
    }

    /// Receive a short message before each step
    pub fn with_progress(mut self, progress: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.progress = Some(Box::new(progress));
        self
    }

    fn report(&self, message: &str) {
        if let Some(progress) = &self.progress {
            progress(message);
        }
    }

    /// Generate the project under `root`.
    ///
    /// Steps run strictly in order and the first failure aborts the run;
    /// files already written stay on disk.
    pub async fn assemble(&self, root: &Path, config: &Configuration) -> Result<AssemblyReport> {
        self.source.catalog().await?.validate()?;

        fs::create_dir_all(root)
            .await
            .map_err(|e| BootError::io("Failed to create directory", root, e))?;

        let mut applied = Vec::new();

        self.report("Copying main files");
        let files = self
            .renderer
            .render_set(&self.source, MAIN_SET, "", root, config)
            .await?;
        applied.push(AppliedSet {
            template_set: MAIN_SET,
            dest: "",
            files,
        });

        self.report("Updating manifest.json");
        manifest::patch_manifest(&root.join(MANIFEST_FILE), config).await?;

        for builder in Builder::ASSEMBLY_ORDER {
            if !config.is_enabled(builder) {
                continue;
            }
            let Some(set) = builder.template_set() else {
                continue;
            };

            self.report(&format!("Adding {} builder", builder));
            for target in builder.targets() {
                let dest = root.join(target.dest);
                let files = self
                    .renderer
                    .render_set(&self.source, set, target.source, &dest, config)
                    .await?;
                applied.push(AppliedSet {
                    template_set: set,
                    dest: target.dest,
                    files,
                });
            }
        }

        Ok(AssemblyReport {
            root: root.to_path_buf(),
            applied,
        })
    }
}
