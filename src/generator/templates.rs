//! Askama templates turning generator output into source files.
//!
//! Templates live in the crate's `templates/` directory. Rendering is kept
//! separate from file placement: everything here returns strings, and the
//! orchestration in [`super::project`] decides when (and whether) the
//! filesystem is touched.

use askama::Template;

use super::data_model::{DataEnumDef, DataModel, DataStructDef};
use super::fixture::{render_fixture_entries, FixtureModel};
use super::view_config::{render_view_nodes, ts_number, ViewNode};
use crate::intermediate::Framework;
use crate::naming::type_name_from_identifier;

/// Template data for the backend data-model source file.
#[derive(Template)]
#[template(path = "data_model.rs.txt", escape = "none")]
struct DataModelTemplateData {
    framework_label: String,
    has_yes_no: bool,
    enums: Vec<DataEnumDef>,
    structs: Vec<DataStructDef>,
}

/// Template data for a view- or review-configuration TypeScript file.
#[derive(Template)]
#[template(path = "view_config.ts.txt", escape = "none")]
struct ViewConfigTemplateData {
    framework_label: String,
    const_name: String,
    body: String,
}

/// Template data for the fixture-generator TypeScript file.
#[derive(Template)]
#[template(path = "fixture.ts.txt", escape = "none")]
struct FixtureTemplateData {
    framework_label: String,
    type_name: String,
    null_probability: String,
    body: String,
}

/// Template data for the backend framework registry (`mod.rs`).
#[derive(Template)]
#[template(path = "registry_mod.rs.txt", escape = "none")]
struct RegistryModTemplateData {
    modules: Vec<String>,
}

/// Render the Rust data-model file for a framework.
pub fn render_data_model(framework: &Framework, model: &DataModel) -> anyhow::Result<String> {
    let rendered = DataModelTemplateData {
        framework_label: framework.label.clone(),
        has_yes_no: model.has_yes_no,
        enums: model.enums.clone(),
        structs: model.structs.clone(),
    }
    .render()?;
    Ok(rendered)
}

/// Render a view-configuration file. `const_name` distinguishes the regular
/// configuration from the review variant.
pub fn render_view_config(
    framework: &Framework,
    const_name: &str,
    nodes: &[ViewNode],
) -> anyhow::Result<String> {
    let rendered = ViewConfigTemplateData {
        framework_label: framework.label.clone(),
        const_name: const_name.to_string(),
        body: render_view_nodes(nodes, 1),
    }
    .render()?;
    Ok(rendered)
}

/// Render the fixture-generator file.
pub fn render_fixture(
    framework: &Framework,
    model: &FixtureModel,
    null_probability: f64,
) -> anyhow::Result<String> {
    let rendered = FixtureTemplateData {
        framework_label: framework.label.clone(),
        type_name: type_name_from_identifier(&framework.identifier),
        null_probability: ts_number(null_probability),
        body: render_fixture_entries(&model.entries, 2),
    }
    .render()?;
    Ok(rendered)
}

/// Render the backend registry module listing every generated framework.
pub fn render_registry_mod(modules: &[String]) -> anyhow::Result<String> {
    let rendered = RegistryModTemplateData {
        modules: modules.to_vec(),
    }
    .render()?;
    Ok(rendered)
}
