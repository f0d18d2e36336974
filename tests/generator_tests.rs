#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use frameforge::generator::{compile_framework, project::update_framework_registry};

#[test]
fn test_compile_writes_all_artifact_trees() {
    let dir = tempfile::tempdir().unwrap();
    let definition = common::definition_with_template(dir.path(), common::two_row_template(), "");
    let repository = common::repository(dir.path());
    let compiled = compile_framework(&definition, &repository).unwrap();

    assert_eq!(compiled.identifier, "demo");
    let names: Vec<String> = compiled
        .written_files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        vec![
            "demo.rs",
            "demoViewConfiguration.ts",
            "demoReviewConfiguration.ts",
            "demoFixtureGenerator.ts",
            "mod.rs",
        ]
    );
    for path in &compiled.written_files {
        assert!(path.exists(), "missing artifact {path:?}");
    }
}

#[test]
fn test_compilation_is_byte_for_byte_reproducible() {
    let dir = tempfile::tempdir().unwrap();
    let definition = common::definition_with_template(dir.path(), common::two_row_template(), "");
    let repository = common::repository(dir.path());

    let first = compile_framework(&definition, &repository).unwrap();
    let snapshots: Vec<String> = first.written_files.iter().map(common::read).collect();

    let second = compile_framework(&definition, &repository).unwrap();
    assert_eq!(first.written_files, second.written_files);
    for (path, snapshot) in second.written_files.iter().zip(&snapshots) {
        assert_eq!(&common::read(path), snapshot, "artifact changed: {path:?}");
    }
}

#[test]
fn test_data_model_has_nullable_fields_in_template_order() {
    let dir = tempfile::tempdir().unwrap();
    let definition = common::definition_with_template(dir.path(), common::two_row_template(), "");
    let repository = common::repository(dir.path());
    let compiled = compile_framework(&definition, &repository).unwrap();

    let data_model = common::read(&compiled.written_files[0]);
    assert!(data_model.contains("pub struct DemoData {"));
    assert!(data_model.contains("pub struct DemoGeneral {"));
    assert!(data_model.contains("pub struct DemoGeneralBasics {"));
    assert!(data_model.contains("pub enum DemoGeneralBasicsCurrencyOptions {"));

    // both fields nullable, revenue before currency
    let revenue_pos = data_model.find("pub revenue: Option<f64>,").unwrap();
    let currency_pos = data_model
        .find("pub currency: Option<DemoGeneralBasicsCurrencyOptions>,")
        .unwrap();
    assert!(revenue_pos < currency_pos);
    assert!(data_model.contains("skip_serializing_if = \"Option::is_none\""));
}

#[test]
fn test_view_config_contains_sections_and_formatters() {
    let dir = tempfile::tempdir().unwrap();
    let definition = common::definition_with_template(dir.path(), common::two_row_template(), "");
    let repository = common::repository(dir.path());
    let compiled = compile_framework(&definition, &repository).unwrap();

    let view = common::read(&compiled.written_files[1]);
    assert!(view.contains("export const demoViewConfiguration"));
    assert!(view.contains("label: \"General\","));
    assert!(view.contains("formatter: \"formatNumberValue\","));
    assert!(view.contains("formatter: \"formatSelectValue\","));
    assert!(view.contains("valueGetter: (dataset) => dataset.general?.basics?.revenue,"));
}

#[test]
fn test_fixture_generator_wraps_nullable_values() {
    let dir = tempfile::tempdir().unwrap();
    let definition = common::definition_with_template(
        dir.path(),
        common::two_row_template(),
        "null_probability: 0.5\n",
    );
    let repository = common::repository(dir.path());
    let compiled = compile_framework(&definition, &repository).unwrap();

    let fixture = common::read(&compiled.written_files[3]);
    assert!(fixture.contains("const NULL_PROBABILITY = 0.5;"));
    assert!(fixture.contains("export function generateDemoFixture"));
    assert!(fixture.contains(
        "revenue: dataGenerator.valueOrNull(dataGenerator.randomDecimal(0, 1000000))"
    ));
    assert!(fixture.contains(
        "currency: dataGenerator.valueOrNull(dataGenerator.pickOneElement([\"eur\", \"usd\"]))"
    ));
}

#[test]
fn test_registry_lists_frameworks_sorted_and_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let repository = common::repository(dir.path());
    let backend_dir = repository.backend_frameworks_dir();
    std::fs::create_dir_all(&backend_dir).unwrap();
    std::fs::write(backend_dir.join("zeta.rs"), "// generated\n").unwrap();
    std::fs::write(backend_dir.join("alpha.rs"), "// generated\n").unwrap();

    let registry_path = update_framework_registry(&backend_dir).unwrap();
    let registry = common::read(&registry_path);
    let alpha = registry.find("pub mod alpha;").unwrap();
    let zeta = registry.find("pub mod zeta;").unwrap();
    assert!(alpha < zeta);
    assert!(!registry.contains("pub mod mod;"));

    let again = update_framework_registry(&backend_dir).unwrap();
    assert_eq!(common::read(&again), registry);
}

#[test]
fn test_mandatory_field_is_not_optional_in_data_model() {
    let dir = tempfile::tempdir().unwrap();
    let csv = "category,subcategory,fieldname,component,mandatory\n\
               General,Basics,Reporting date,date,yes\n";
    let definition = common::definition_with_template(dir.path(), csv, "");
    let repository = common::repository(dir.path());
    let compiled = compile_framework(&definition, &repository).unwrap();
    let data_model = common::read(&compiled.written_files[0]);
    assert!(data_model.contains("pub reporting_date: String,"));
    assert!(!data_model.contains("pub reporting_date: Option<String>,"));
}
