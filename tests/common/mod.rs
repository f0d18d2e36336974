#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

use std::path::{Path, PathBuf};

use frameforge::config::FrameworkDefinition;
use frameforge::generator::TargetRepository;

/// Write a template CSV and a matching framework definition into `dir` and
/// load the definition. `extra_yaml` is appended verbatim to the definition
/// file for per-test configuration.
pub fn definition_with_template(dir: &Path, csv: &str, extra_yaml: &str) -> FrameworkDefinition {
    let template_path = dir.join("template.csv");
    std::fs::write(&template_path, csv).unwrap();
    let definition_path = dir.join("framework.yaml");
    let yaml = format!(
        "identifier: demo\n\
         label: Demo\n\
         explanation: Demonstration framework\n\
         template: template.csv\n\
         {extra_yaml}"
    );
    std::fs::write(&definition_path, yaml).unwrap();
    FrameworkDefinition::from_file(&definition_path).unwrap()
}

/// A fresh target repository under `dir`.
pub fn repository(dir: &Path) -> TargetRepository {
    TargetRepository::new(dir.join("repo"))
}

/// The §8-style two-row example template: one decimal and one single-select
/// field under General/Basics.
pub fn two_row_template() -> &'static str {
    "category,subcategory,fieldname,component,options\n\
     General,Basics,Revenue,decimal,\n\
     General,Basics,Currency,singleSelect,\"EUR,USD\"\n"
}

/// Read a generated file to a string.
pub fn read(path: &PathBuf) -> String {
    std::fs::read_to_string(path).unwrap()
}
