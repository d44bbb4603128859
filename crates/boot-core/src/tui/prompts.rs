//! Charm-style CLI prompts using cliclack

use crate::builders::Builder;
use crate::config::{
    destination_dir_name, slugify, Configuration, ConfigurationInput, DEFAULT_APP_NAME,
    NO_BUILDERS_MESSAGE,
};
use crate::product::ProductConfig;
use crate::templates::{version, TemplateSource};
use crate::ProjectAssembler;
use anyhow::Result;
use colored::Colorize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// CLI arguments for the create command
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Positional path; its slug names the project directory
    pub path: Option<String>,

    /// Application name
    pub name: Option<String>,

    /// Application vendor
    pub vendor: Option<String>,

    /// Builders requested with flags (pre-checked in the prompt)
    pub builders: Vec<Builder>,

    /// Local directory to use for templates instead of the built-in ones
    pub template_dir: Option<PathBuf>,

    /// Auto-confirm all prompts (non-interactive mode)
    pub yes: bool,
}

/// Run the CLI with interactive prompts
pub async fn run<C: ProductConfig>(config: &C, args: CreateArgs, cli_version: &str) -> Result<()> {
    cliclack::intro(config.display_name())?;

    // Step 1: Pick the template source and check it is usable
    let source = setup_source(config, args.template_dir.clone())?;
    check_catalog(config, &source, cli_version).await?;

    // Step 2: Gather name, vendor and builders
    let configuration = collect_configuration(&args)?;

    // Step 3: Resolve and confirm the project directory
    let project_dir = select_directory(&args, &configuration)?;

    // Step 4: Generate
    create_project(source, &project_dir, &configuration).await?;

    // Step 5: Show next steps
    print_next_steps(config, &project_dir, &configuration)?;

    Ok(())
}

fn setup_source<C: ProductConfig>(
    config: &C,
    template_dir: Option<PathBuf>,
) -> Result<TemplateSource> {
    let source = TemplateSource::resolve(config, template_dir);
    cliclack::log::info(format!("Using {}", source.describe()))?;
    Ok(source)
}

async fn check_catalog<C: ProductConfig>(
    config: &C,
    source: &TemplateSource,
    cli_version: &str,
) -> Result<()> {
    let catalog = source.catalog().await?;
    catalog.validate()?;

    if let Some(warning) =
        version::check_compatibility(cli_version, &catalog.version, config.upgrade_command())
    {
        cliclack::log::warning(format!(
            "Version warning: {}",
            warning.lines().next().unwrap_or(&warning)
        ))?;
    }

    Ok(())
}

fn collect_configuration(args: &CreateArgs) -> Result<Configuration> {
    let name = match &args.name {
        Some(name) => Some(name.clone()),
        None if args.yes => None,
        None => Some(prompt_name()?),
    };

    let vendor = match args.vendor.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
        Some(vendor) => Some(vendor.to_string()),
        None if args.yes => None,
        None => Some(prompt_vendor()?),
    };

    let builders: BTreeSet<Builder> = if args.yes {
        args.builders.iter().copied().collect()
    } else {
        select_builders(&args.builders)?
    };

    let configuration = Configuration::resolve(ConfigurationInput {
        name,
        vendor,
        builders,
    })?;

    let names: Vec<&str> = configuration.builders().map(|b| b.name()).collect();
    cliclack::log::success(format!(
        "{}.{} with builders: {}",
        configuration.vendor(),
        configuration.app_slug(),
        names.join(", ")
    ))?;

    Ok(configuration)
}

fn prompt_name() -> Result<String> {
    let name: String = cliclack::input("Enter the name of the application")
        .placeholder(DEFAULT_APP_NAME)
        .default_input(DEFAULT_APP_NAME)
        .validate(|input: &String| {
            if slugify(input).is_empty() {
                Err("The name must contain at least one letter or digit.")
            } else {
                Ok(())
            }
        })
        .interact()?;
    Ok(name)
}

fn prompt_vendor() -> Result<String> {
    let vendor: String = cliclack::input("Enter the name of the application vendor")
        .validate(|input: &String| {
            if input.trim().is_empty() {
                Err("The application vendor is required.")
            } else {
                Ok(())
            }
        })
        .interact()?;
    Ok(vendor)
}

fn select_builders(preselected: &[Builder]) -> Result<BTreeSet<Builder>> {
    loop {
        let mut multi = cliclack::multiselect("Select the application builders you want to use");
        for builder in Builder::ALL {
            multi = multi.item(builder, builder.name(), builder.description());
        }
        if !preselected.is_empty() {
            multi = multi.initial_values(preselected.to_vec());
        }

        let selected: Vec<Builder> = multi.required(false).interact()?;
        if !selected.is_empty() {
            return Ok(selected.into_iter().collect());
        }

        cliclack::log::warning(NO_BUILDERS_MESSAGE)?;
    }
}

fn select_directory(args: &CreateArgs, configuration: &Configuration) -> Result<PathBuf> {
    let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let path = current_dir.join(destination_dir_name(args.path.as_deref(), configuration));
    cliclack::log::info(format!("Project directory: {}", path.display()))?;

    // Warn if directory exists and has files
    if path.is_dir() {
        if let Ok(entries) = std::fs::read_dir(&path) {
            let count = entries.count();
            if count > 0 {
                cliclack::log::warning(format!(
                    "Directory has {} existing items; generated files will overwrite them",
                    count
                ))?;

                // Auto-confirm with --yes flag
                let confirm = if args.yes {
                    true
                } else {
                    cliclack::confirm("Continue anyway?")
                        .initial_value(true)
                        .interact()?
                };

                if !confirm {
                    anyhow::bail!("Setup cancelled.");
                }
            }
        }
    }

    Ok(path)
}

async fn create_project(
    source: TemplateSource,
    project_dir: &Path,
    configuration: &Configuration,
) -> Result<()> {
    let assembler = ProjectAssembler::new(source)?.with_progress(|message| {
        let _ = cliclack::log::step(message);
    });

    match assembler.assemble(project_dir, configuration).await {
        Ok(report) => {
            cliclack::log::success(format!(
                "Created {} files in {}",
                report.file_count(),
                report.root.display()
            ))?;
            println!("{}", "Project generated successfully!".green());
            Ok(())
        }
        Err(e) => {
            cliclack::log::error(format!("Error while generating the project: {}", e))?;
            anyhow::bail!("Project generation failed.");
        }
    }
}

fn print_next_steps<C: ProductConfig>(
    config: &C,
    project_dir: &Path,
    configuration: &Configuration,
) -> Result<()> {
    let steps = config.next_steps(project_dir, configuration);

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    cliclack::outro(format!("Docs: {}", config.docs_url()))?;

    Ok(())
}
