//! Template set rendering into a project directory

use super::source::{TemplateEntry, TemplateSource};
use crate::config::Configuration;
use crate::error::{BootError, Result};
use minijinja::syntax::SyntaxConfig;
use minijinja::{Environment, UndefinedBehavior, Value};
use std::path::{Component, Path, PathBuf};
use tokio::fs;

/// Suffix stripped from template file names on output
pub const TEMPLATE_SUFFIX: &str = ".tmpl";

/// Renders template text with `<%= value %>`, `[% block %]` and `[# comment #]`
/// placeholders. Plain `{{ }}` is left alone so JSX survives untouched.
pub struct TemplateRenderer {
    env: Environment<'static>,
}

impl TemplateRenderer {
    pub fn new() -> Result<Self> {
        let syntax = SyntaxConfig::builder()
            .block_delimiters("[%", "%]")
            .variable_delimiters("<%=", "%>")
            .comment_delimiters("[#", "#]")
            .build()
            .map_err(|e| BootError::render("<syntax>", e))?;

        let mut env = Environment::new();
        env.set_syntax(syntax);
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_keep_trailing_newline(true);
        env.set_trim_blocks(true);

        Ok(Self { env })
    }

    /// Render one template; `path` only labels errors
    pub fn render_str(&self, path: &Path, source: &str, context: &Value) -> Result<String> {
        self.env
            .render_str(source, context)
            .map_err(|e| BootError::render(path, format!("{:#}", e)))
    }

    /// Render every file of `set/subdir` into `dest`, mirroring its directories.
    ///
    /// Existing files are overwritten, so when several template sets target the
    /// same directory the one applied last wins for a shared path while files
    /// unique to each set sit side by side. Nothing is rolled back on error.
    ///
    /// Returns the written paths relative to `dest`.
    pub async fn render_set(
        &self,
        source: &TemplateSource,
        set: &str,
        subdir: &str,
        dest: &Path,
        config: &Configuration,
    ) -> Result<Vec<PathBuf>> {
        let context = Value::from_serialize(config.template_context());
        let entries = source.entries(set, subdir).await?;

        fs::create_dir_all(dest)
            .await
            .map_err(|e| BootError::io("Failed to create directory", dest, e))?;

        let mut written = Vec::new();
        for entry in entries {
            match entry {
                TemplateEntry::Dir(path) => {
                    let target = dest.join(output_path(&path));
                    fs::create_dir_all(&target)
                        .await
                        .map_err(|e| BootError::io("Failed to create directory", &target, e))?;
                }
                TemplateEntry::File { path, contents } => {
                    let origin = Path::new(set).join(subdir).join(&path);
                    let text = String::from_utf8(contents)
                        .map_err(|_| BootError::render(&origin, "file is not valid UTF-8"))?;
                    let rendered = self.render_str(&origin, &text, &context)?;

                    let relative = output_path(&path);
                    let target = dest.join(&relative);
                    if let Some(parent) = target.parent() {
                        fs::create_dir_all(parent)
                            .await
                            .map_err(|e| BootError::io("Failed to create directory", parent, e))?;
                    }
                    fs::write(&target, rendered)
                        .await
                        .map_err(|e| BootError::io("Failed to write", &target, e))?;

                    written.push(relative);
                }
            }
        }

        Ok(written)
    }
}

/// Strip the template suffix from a file or directory name
pub fn output_name(name: &str) -> &str {
    name.strip_suffix(TEMPLATE_SUFFIX)
        .filter(|stem| !stem.is_empty())
        .unwrap_or(name)
}

/// Apply [`output_name`] to every component of a relative path
pub fn output_path(path: &Path) -> PathBuf {
    path.components()
        .map(|c| match c {
            Component::Normal(name) => match name.to_str() {
                Some(s) => PathBuf::from(output_name(s)),
                None => PathBuf::from(name),
            },
            other => PathBuf::from(other.as_os_str()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::Builder;
    use crate::config::ConfigurationInput;

    fn config(builders: &[Builder]) -> Configuration {
        Configuration::resolve(ConfigurationInput {
            name: Some("My App".to_string()),
            vendor: Some("acme".to_string()),
            builders: builders.iter().copied().collect(),
        })
        .unwrap()
    }

    fn render(source: &str) -> Result<String> {
        let renderer = TemplateRenderer::new()?;
        let context = Value::from_serialize(config(&[Builder::Node]).template_context());
        renderer.render_str(Path::new("test"), source, &context)
    }

    #[test]
    fn test_output_name_strips_suffix() {
        assert_eq!(output_name("index.ts.tmpl"), "index.ts");
        assert_eq!(output_name("index.ts"), "index.ts");
        assert_eq!(output_name(".tmpl"), ".tmpl");
    }

    #[test]
    fn test_output_path_strips_every_component() {
        let path = Path::new("nested.tmpl").join("file.json.tmpl");
        assert_eq!(output_path(&path), Path::new("nested").join("file.json"));
    }

    #[test]
    fn test_renders_configuration_fields() {
        let out = render("<%= appName %> by <%= vendor %> (<%= appSlug %>)").unwrap();
        assert_eq!(out, "My App by acme (my-app)");
    }

    #[test]
    fn test_blocks_and_comments() {
        let out = render("[# hidden #][% if node %]node\n[% endif %][% if react %]react\n[% endif %]")
            .unwrap();
        assert_eq!(out, "node\n");
    }

    #[test]
    fn test_jsx_braces_pass_through() {
        let source = "<h1 style={{ margin: 0 }}>{title}</h1>\n";
        assert_eq!(render(source).unwrap(), source);
    }

    #[test]
    fn test_undefined_placeholder_fails() {
        let err = render("<%= appVersion %>").unwrap_err();
        assert!(matches!(err, BootError::Render { .. }));
    }

    #[test]
    fn test_malformed_syntax_fails() {
        let err = render("[% if node %]never closed").unwrap_err();
        assert!(matches!(err, BootError::Render { .. }));
    }

    #[tokio::test]
    async fn test_render_set_overwrites_and_is_idempotent() {
        let templates = tempfile::tempdir().unwrap();
        let first = templates.path().join("first");
        let second = templates.path().join("second");
        std::fs::create_dir_all(first.join("deep")).unwrap();
        std::fs::create_dir_all(&second).unwrap();
        std::fs::write(first.join("shared.txt.tmpl"), "first <%= appSlug %>\n").unwrap();
        std::fs::write(first.join("deep").join("only-first.txt"), "one\n").unwrap();
        std::fs::write(second.join("shared.txt"), "second <%= vendor %>\n").unwrap();

        let out = tempfile::tempdir().unwrap();
        let source = TemplateSource::Local(templates.path().to_path_buf());
        let renderer = TemplateRenderer::new().unwrap();
        let cfg = config(&[Builder::React]);

        let written = renderer
            .render_set(&source, "first", "", out.path(), &cfg)
            .await
            .unwrap();
        assert_eq!(
            written,
            vec![Path::new("deep").join("only-first.txt"), PathBuf::from("shared.txt")]
        );
        let shared = out.path().join("shared.txt");
        assert_eq!(std::fs::read_to_string(&shared).unwrap(), "first my-app\n");

        renderer
            .render_set(&source, "first", "", out.path(), &cfg)
            .await
            .unwrap();
        assert_eq!(std::fs::read_to_string(&shared).unwrap(), "first my-app\n");

        renderer
            .render_set(&source, "second", "", out.path(), &cfg)
            .await
            .unwrap();
        assert_eq!(std::fs::read_to_string(&shared).unwrap(), "second acme\n");
        assert!(out.path().join("deep").join("only-first.txt").exists());
    }

    #[tokio::test]
    async fn test_missing_set_leaves_no_directory() {
        let templates = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let dest = out.path().join("node");

        let err = TemplateRenderer::new()
            .unwrap()
            .render_set(
                &TemplateSource::Local(templates.path().to_path_buf()),
                "node",
                "",
                &dest,
                &config(&[Builder::Node]),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, BootError::Io { .. }));
        assert!(!dest.exists());
    }

    #[tokio::test]
    async fn test_non_utf8_template_fails() {
        let templates = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(templates.path().join("bin")).unwrap();
        std::fs::write(templates.path().join("bin").join("logo.png"), [0xffu8, 0xfe, 0x00]).unwrap();

        let out = tempfile::tempdir().unwrap();
        let source = TemplateSource::Local(templates.path().to_path_buf());
        let err = TemplateRenderer::new()
            .unwrap()
            .render_set(&source, "bin", "", out.path(), &config(&[Builder::Node]))
            .await
            .unwrap_err();
        assert!(matches!(err, BootError::Render { .. }));
    }
}
