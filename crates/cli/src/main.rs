use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use guideflow_bpmn::{CompileOptions, TracingSink, compile_with_options};
use guideflow_types::Workflow;
use tracing::debug;

/// Compile BPMN 2.0 diagrams into guideflow workflows.
#[derive(Parser, Debug)]
#[command(name = "guideflow", version, about)]
struct Cli {
    /// Only log errors
    #[arg(long, short, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compile a diagram and write the workflow
    Compile {
        /// Path to the BPMN XML file
        input: PathBuf,

        /// Workflow name, defaults to the input file stem
        #[arg(long, short)]
        name: Option<String>,

        /// Write to this file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Output encoding
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Fail when the diagram produces any warning
        #[arg(long)]
        strict: bool,
    },
    /// Compile a diagram and list every warning it produces
    Check {
        /// Path to the BPMN XML file
        input: PathBuf,

        /// Workflow name, defaults to the input file stem
        #[arg(long, short)]
        name: Option<String>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Json,
    Yaml,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.quiet);

    match cli.command {
        Command::Compile {
            input,
            name,
            output,
            format,
            strict,
        } => {
            let xml = read_input(&input)?;
            let options = CompileOptions::new(workflow_name(&input, name)).with_strict(strict);
            let workflow = compile_with_options(&xml, &options, &mut TracingSink)
                .with_context(|| format!("compile {}", input.display()))?;
            let rendered = render(&workflow, format)?;
            match output {
                Some(path) => write_output(&path, &rendered)?,
                None => println!("{rendered}"),
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Check { input, name } => {
            let xml = read_input(&input)?;
            let options = CompileOptions::new(workflow_name(&input, name));
            let mut warnings: Vec<String> = Vec::new();
            let workflow = compile_with_options(&xml, &options, &mut warnings)
                .with_context(|| format!("compile {}", input.display()))?;
            for warning in &warnings {
                println!("warning: {warning}");
            }
            println!(
                "{}: {} step(s), entry point {}, {} warning(s)",
                workflow.name,
                workflow.steps.len(),
                workflow.entry_point,
                warnings.len()
            );
            Ok(if warnings.is_empty() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}

fn init_tracing(quiet: bool) {
    let default_level = if quiet { "error" } else { "info" };
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| default_level.into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn read_input(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("read {}", path.display()))
}

/// Uses the explicit name, or the file stem when none was given.
fn workflow_name(input: &Path, name: Option<String>) -> String {
    name.unwrap_or_else(|| {
        input
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default()
    })
}

fn render(workflow: &Workflow, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(workflow).context("serialize workflow as JSON"),
        OutputFormat::Yaml => serde_yaml::to_string(workflow).context("serialize workflow as YAML"),
    }
}

fn write_output(path: &Path, rendered: &str) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    fs::write(path, rendered).with_context(|| format!("write {}", path.display()))?;
    debug!(path = %path.display(), "wrote workflow");
    Ok(())
}
