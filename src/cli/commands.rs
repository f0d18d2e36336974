use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::FrameworkDefinition;
use crate::diagnostics::{print_diagnostics, DiagnosticCollector, Severity};
use crate::generator::{compile_framework, project::build_framework, TargetRepository};
use crate::intermediate::{ComponentGroup, ComponentNode};

/// Command-line interface for the framework generation toolbox.
#[derive(Parser)]
#[command(name = "frameforge-gen")]
#[command(about = "Compile framework templates into generated artifacts", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Compile a framework and write its artifacts into the repository
    Generate {
        /// Path to the framework definition file (YAML)
        #[arg(short, long)]
        config: PathBuf,

        /// Root of the repository the artifacts are written into
        #[arg(short, long)]
        repository: PathBuf,
    },
    /// Build the IR and report diagnostics without writing anything
    Lint {
        /// Path to the framework definition file (YAML)
        #[arg(short, long)]
        config: PathBuf,

        /// Exit with an error code if any error-level diagnostic was found
        #[arg(long, default_value_t = false)]
        fail_on_error: bool,
    },
    /// Print the intermediate representation of a framework
    Inspect {
        /// Path to the framework definition file (YAML)
        #[arg(short, long)]
        config: PathBuf,
    },
}

/// Execute the parsed CLI command.
pub fn run_cli(cli: Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Generate { config, repository } => {
            let definition = FrameworkDefinition::from_file(config)?;
            let repository = TargetRepository::new(repository);
            let compiled = compile_framework(&definition, &repository)?;
            println!(
                "✅ Compiled framework '{}' ({} files)",
                compiled.identifier,
                compiled.written_files.len()
            );
            Ok(())
        }
        Commands::Lint {
            config,
            fail_on_error,
        } => {
            let definition = FrameworkDefinition::from_file(config)?;
            let mut diagnostics = DiagnosticCollector::new();
            for id in &definition.suppressed_diagnostics {
                diagnostics.suppress(id);
            }
            build_framework(&definition, &mut diagnostics)?;
            print_diagnostics(diagnostics.messages());
            let errors = diagnostics
                .messages()
                .iter()
                .filter(|d| d.severity == Severity::Error)
                .count();
            if *fail_on_error && errors > 0 {
                anyhow::bail!("{errors} error diagnostics found");
            }
            Ok(())
        }
        Commands::Inspect { config } => {
            let definition = FrameworkDefinition::from_file(config)?;
            let mut diagnostics = DiagnosticCollector::new();
            for id in &definition.suppressed_diagnostics {
                diagnostics.suppress(id);
            }
            let framework = build_framework(&definition, &mut diagnostics)?;
            println!("{} ({})", framework.identifier, framework.label);
            print!("{}", render_tree(&framework.root, 1));
            Ok(())
        }
    }
}

/// Render a group subtree as an indented outline.
pub fn render_tree(group: &ComponentGroup, indent: usize) -> String {
    let pad = "  ".repeat(indent);
    let mut out = String::new();
    for child in group.children() {
        match child {
            ComponentNode::Group(sub) => {
                out.push_str(&format!("{pad}{}/ ({})\n", sub.identifier, sub.label));
                out.push_str(&render_tree(sub, indent + 1));
            }
            ComponentNode::Field(component) => {
                let required = if component.is_required() {
                    ", required"
                } else {
                    ""
                };
                let conditional = if component.available_if.is_always_true() {
                    String::new()
                } else {
                    let targets = component
                        .available_if
                        .referenced_paths()
                        .iter()
                        .map(|p| p.to_string())
                        .collect::<Vec<_>>()
                        .join(", ");
                    format!(", depends on {targets}")
                };
                out.push_str(&format!(
                    "{pad}{} [{}{}{}]\n",
                    component.identifier,
                    component.kind.variant_name(),
                    required,
                    conditional
                ));
            }
        }
    }
    out
}
