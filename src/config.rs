//! Per-framework configuration.
//!
//! Each framework is described by a small YAML definition file next to its
//! template. The definition carries everything the pipeline needs that is
//! not in the template itself: identity, suppression list, naming strategy,
//! fixture tuning. Example:
//!
//! ```yaml
//! identifier: gdv
//! label: GDV/VÖB
//! explanation: ESG questionnaire for insurers
//! template: data_dictionary.csv
//! order: 7
//! in_development: true
//! naming: german_transliterating
//! suppressed_diagnostics:
//!   - "template:unused-column:reviewernotes"
//! null_probability: 0.2
//! expand_on_page_load:
//!   - general
//!   - general.masterData
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

use crate::template::{CamelCaseGenerationUtils, GenerationUtils, TransliteratingGenerationUtils};

/// Which [`GenerationUtils`] implementation a framework compiles with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamingStrategy {
    #[default]
    CamelCase,
    GermanTransliterating,
}

impl NamingStrategy {
    pub fn generation_utils(&self) -> Box<dyn GenerationUtils> {
        match self {
            NamingStrategy::CamelCase => Box::new(CamelCaseGenerationUtils),
            NamingStrategy::GermanTransliterating => Box::new(TransliteratingGenerationUtils),
        }
    }
}

fn default_null_probability() -> f64 {
    0.2
}

/// One framework's definition file, deserialized from YAML.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FrameworkDefinition {
    pub identifier: String,
    pub label: String,
    pub explanation: String,
    /// Template CSV path, relative to the definition file
    pub template: PathBuf,
    #[serde(default)]
    pub order: u32,
    /// Downgrades unknown rows and identifier collisions to warnings
    #[serde(default)]
    pub in_development: bool,
    #[serde(default)]
    pub naming: NamingStrategy,
    /// Diagnostic IDs suppressed for this framework
    #[serde(default)]
    pub suppressed_diagnostics: Vec<String>,
    /// Probability that a nullable fixture value is absent, 0..=1
    #[serde(default = "default_null_probability")]
    pub null_probability: f64,
    /// Dot-separated group paths rendered expanded on page load
    #[serde(default)]
    pub expand_on_page_load: Vec<String>,
    #[serde(skip)]
    base_dir: PathBuf,
}

impl FrameworkDefinition {
    /// Load and validate a definition file.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read framework definition {path:?}"))?;
        let mut definition: FrameworkDefinition = serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse framework definition {path:?}"))?;
        definition.base_dir = path.parent().unwrap_or(Path::new(".")).to_path_buf();
        definition.validate()?;
        Ok(definition)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.identifier.trim().is_empty() {
            anyhow::bail!("framework identifier must not be empty");
        }
        if !(0.0..=1.0).contains(&self.null_probability) {
            anyhow::bail!(
                "null_probability must be within 0..=1, got {}",
                self.null_probability
            );
        }
        Ok(())
    }

    /// Absolute (or cwd-relative) path of the template CSV.
    pub fn template_path(&self) -> PathBuf {
        if self.template.is_absolute() {
            self.template.clone()
        } else {
            self.base_dir.join(&self.template)
        }
    }
}
