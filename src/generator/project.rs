//! Compilation pipeline and artifact placement.
//!
//! [`compile_framework`] is the build-time entry point: template → IR →
//! diagnostics checkpoint → three generator passes → diagnostics checkpoint
//! → file writes → registry update. Its only side effects are diagnostic
//! emission and file writes below the [`TargetRepository`] root.
//!
//! Artifacts are staged in memory and only written after the second
//! diagnostics checkpoint passes, so an aborted compilation never leaves a
//! partial artifact tree behind.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;

use super::data_model::build_data_model;
use super::fixture::build_fixture_model;
use super::templates::{
    render_data_model, render_fixture, render_registry_mod, render_view_config,
};
use super::view_config::{build_view_config, into_review_config};
use crate::config::FrameworkDefinition;
use crate::diagnostics::DiagnosticCollector;
use crate::intermediate::Framework;
use crate::naming::snake_case_from_identifier;
use crate::template::{self, FactoryRegistry, TemplateComponentBuilder, UnknownRowPolicy};

/// Directory layout of the repository the generated artifacts land in.
///
/// Each artifact tree is owned by a downstream consumer: the backend data
/// models by the persistence/REST services, the view configurations by the
/// frontend, the fixture generators by the test suites.
#[derive(Debug, Clone)]
pub struct TargetRepository {
    root: PathBuf,
}

impl TargetRepository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        TargetRepository { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Rust data-model modules, one file per framework plus `mod.rs`.
    pub fn backend_frameworks_dir(&self) -> PathBuf {
        self.root.join("backend").join("src").join("frameworks")
    }

    /// TypeScript view and review configurations.
    pub fn frontend_frameworks_dir(&self) -> PathBuf {
        self.root.join("frontend").join("src").join("frameworks")
    }

    /// TypeScript fixture generators.
    pub fn fixture_frameworks_dir(&self) -> PathBuf {
        self.root.join("testing").join("fixtures")
    }
}

/// Result of one successful framework compilation.
#[derive(Debug, Clone)]
pub struct CompiledFramework {
    pub identifier: String,
    /// Every file the compilation wrote, in write order
    pub written_files: Vec<PathBuf>,
}

/// Build the IR for a framework definition without generating anything.
///
/// Shared by [`compile_framework`] and the CLI's `lint`/`inspect` commands,
/// which want the IR (and the collected diagnostics) but no artifacts.
pub fn build_framework(
    definition: &FrameworkDefinition,
    diagnostics: &mut DiagnosticCollector,
) -> anyhow::Result<Framework> {
    let template_path = definition.template_path();
    let template = template::from_csv_path(&template_path)
        .with_context(|| format!("failed to load template {template_path:?}"))?;

    let policy = if definition.in_development {
        UnknownRowPolicy::Warn
    } else {
        UnknownRowPolicy::Error
    };
    let builder = TemplateComponentBuilder::new(
        FactoryRegistry::standard(),
        definition.naming.generation_utils(),
        policy,
    );

    let mut framework = Framework::new(
        &definition.identifier,
        &definition.label,
        &definition.explanation,
        definition.order,
    );
    builder
        .build(&template, &mut framework.root, diagnostics)
        .with_context(|| format!("failed to build IR for framework '{}'", definition.identifier))?;

    for path in &definition.expand_on_page_load {
        framework
            .root
            .group_at_mut(path)
            .with_context(|| format!("expand_on_page_load path '{path}' does not exist"))?
            .view_page_expand_on_load = true;
    }

    Ok(framework)
}

/// Compile one framework into the target repository.
pub fn compile_framework(
    definition: &FrameworkDefinition,
    repository: &TargetRepository,
) -> anyhow::Result<CompiledFramework> {
    tracing::info!(framework = %definition.identifier, "compiling framework");

    let mut diagnostics = DiagnosticCollector::new();
    for id in &definition.suppressed_diagnostics {
        diagnostics.suppress(id);
    }

    let framework = build_framework(definition, &mut diagnostics)?;
    diagnostics
        .finalize()
        .context("diagnostics checkpoint after IR construction failed")?;

    let mut staged: Vec<(PathBuf, String)> = Vec::new();

    let module_name = snake_case_from_identifier(&framework.identifier);
    let data_model = build_data_model(&framework);
    staged.push((
        repository
            .backend_frameworks_dir()
            .join(format!("{module_name}.rs")),
        render_data_model(&framework, &data_model)?,
    ));

    let view_nodes = build_view_config(&framework);
    staged.push((
        repository
            .frontend_frameworks_dir()
            .join(format!("{}ViewConfiguration.ts", framework.identifier)),
        render_view_config(
            &framework,
            &format!("{}ViewConfiguration", framework.identifier),
            &view_nodes,
        )?,
    ));
    let review_nodes = into_review_config(view_nodes);
    staged.push((
        repository
            .frontend_frameworks_dir()
            .join(format!("{}ReviewConfiguration.ts", framework.identifier)),
        render_view_config(
            &framework,
            &format!("{}ReviewConfiguration", framework.identifier),
            &review_nodes,
        )?,
    ));

    let fixture_model = build_fixture_model(&framework);
    staged.push((
        repository
            .fixture_frameworks_dir()
            .join(format!("{}FixtureGenerator.ts", framework.identifier)),
        render_fixture(&framework, &fixture_model, definition.null_probability)?,
    ));

    diagnostics
        .finalize()
        .context("diagnostics checkpoint after generation failed")?;
    diagnostics.assert_suppressions_used()?;

    let mut written_files = Vec::new();
    for (path, content) in &staged {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {parent:?}"))?;
        }
        fs::write(path, content).with_context(|| format!("failed to write {path:?}"))?;
        println!("✅ Generated {path:?}");
        written_files.push(path.clone());
    }

    let registry_path = update_framework_registry(&repository.backend_frameworks_dir())?;
    written_files.push(registry_path);

    tracing::info!(framework = %definition.identifier, "framework compiled");
    Ok(CompiledFramework {
        identifier: definition.identifier.clone(),
        written_files,
    })
}

/// Rewrite the backend registry module so it declares every generated
/// framework, sorted by module name. Idempotent: rerunning on an unchanged
/// directory produces identical bytes.
pub fn update_framework_registry(backend_dir: &Path) -> anyhow::Result<PathBuf> {
    let mut modules: Vec<String> = Vec::new();
    for entry in fs::read_dir(backend_dir)
        .with_context(|| format!("failed to read backend directory {backend_dir:?}"))?
    {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if let Some(module) = name.strip_suffix(".rs") {
            if module != "mod" {
                modules.push(module.to_string());
            }
        }
    }
    modules.sort();

    let registry_path = backend_dir.join("mod.rs");
    fs::write(&registry_path, render_registry_mod(&modules)?)
        .with_context(|| format!("failed to write {registry_path:?}"))?;
    println!("✅ Updated framework registry {registry_path:?}");
    Ok(registry_path)
}
