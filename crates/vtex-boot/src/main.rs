//! vtex-boot - Boot file generator for VTEX IO applications

use anyhow::Result;
use boot_core::tui::CreateArgs;
use boot_core::{Builder, Configuration, ProductConfig};
use clap::Parser;
use std::path::{Path, PathBuf};

/// CLI version
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

/// vtex-boot product configuration
#[derive(Clone)]
pub struct VtexBootConfig;

impl ProductConfig for VtexBootConfig {
    fn display_name(&self) -> &'static str {
        "VTEX IO Boot"
    }

    fn template_dir_env(&self) -> &'static str {
        "VTEX_BOOT_TEMPLATE_DIR"
    }

    fn docs_url(&self) -> &'static str {
        "https://developers.vtex.com/docs/guides/vtex-io-documentation-what-is-vtex-io"
    }

    fn upgrade_command(&self) -> &'static str {
        "cargo install vtex-boot --force"
    }

    fn next_steps(&self, dir: &Path, config: &Configuration) -> Vec<String> {
        let mut steps = Vec::new();
        let current = std::env::current_dir().ok();

        if current.as_deref() != Some(dir) {
            steps.push(format!("cd {}", dir.display()));
        }

        if config.is_enabled(Builder::Node) || config.is_enabled(Builder::React) {
            steps.push("Install typings in node/ and react/: yarn install".to_string());
        }

        steps.push(format!("vtex login {}", config.vendor()));
        steps.push("vtex link".to_string());

        steps
    }
}

#[derive(Parser, Debug)]
#[command(name = "vtex-boot")]
#[command(about = "Boot file generator for VTEX IO applications")]
#[command(version)]
pub struct Args {
    /// Path to the application (slugified into the directory name)
    pub path: Option<String>,

    /// Name of the application
    #[arg(long)]
    pub name: Option<String>,

    /// Name of vendor
    #[arg(long)]
    pub vendor: Option<String>,

    /// Use the node builder
    #[arg(long)]
    pub node: bool,

    /// Use the react builder
    #[arg(long)]
    pub react: bool,

    /// Use the admin builder
    #[arg(long)]
    pub admin: bool,

    /// Use the graphql builder
    #[arg(long)]
    pub graphql: bool,

    /// Use the messages builder
    #[arg(long)]
    pub messages: bool,

    /// Use the store builder
    #[arg(long)]
    pub store: bool,

    /// Use the pixel builder
    #[arg(long)]
    pub pixel: bool,

    /// Use the masterdata builder
    #[arg(long)]
    pub masterdata: bool,

    /// Local directory to use for templates instead of the built-in ones (for development use)
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,

    /// Skip prompts; builder flags and --vendor must be given
    #[arg(short, long)]
    pub yes: bool,
}

impl Args {
    fn builders(&self) -> Vec<Builder> {
        let flags = [
            (self.node, Builder::Node),
            (self.react, Builder::React),
            (self.admin, Builder::Admin),
            (self.graphql, Builder::Graphql),
            (self.messages, Builder::Messages),
            (self.masterdata, Builder::Masterdata),
            (self.pixel, Builder::Pixel),
            (self.store, Builder::Store),
        ];
        flags
            .into_iter()
            .filter_map(|(on, builder)| on.then_some(builder))
            .collect()
    }
}

impl From<Args> for CreateArgs {
    fn from(args: Args) -> Self {
        CreateArgs {
            builders: args.builders(),
            path: args.path,
            name: args.name,
            vendor: args.vendor,
            template_dir: args.template_dir,
            yes: args.yes,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    let config = VtexBootConfig;

    let result = boot_core::run(&config, args.into(), CLI_VERSION).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    result
}
