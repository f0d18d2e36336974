use super::TemplateRow;
use crate::naming::{identifier_from_label, transliterate_german};

/// Placeholder a field label may contain; replaced with the text of the
/// row's dependency cell before the identifier is derived.
const DEPENDENCY_PLACEHOLDER: &str = "{{dependency}}";

/// Naming strategy used while building the IR from template rows.
///
/// Frameworks may supply their own implementation to control how section,
/// subsection and field identifiers are derived from template text. The
/// default turns labels into identifier-safe camelCase.
pub trait GenerationUtils {
    /// Derive an identifier from arbitrary label text.
    fn identifier_from_label(&self, label: &str) -> String {
        identifier_from_label(label)
    }

    /// Display label for the field built from `row`.
    fn field_label(&self, row: &TemplateRow) -> String {
        row.field_name.clone()
    }

    fn section_identifier(&self, row: &TemplateRow) -> String {
        self.identifier_from_label(&row.category)
    }

    fn sub_section_identifier(&self, row: &TemplateRow) -> String {
        self.identifier_from_label(&row.sub_category)
    }

    fn field_identifier(&self, row: &TemplateRow) -> String {
        self.identifier_from_label(&self.field_label(row))
    }
}

/// Default naming: camelCase identifiers straight from the label text.
#[derive(Debug, Clone, Copy, Default)]
pub struct CamelCaseGenerationUtils;

impl GenerationUtils for CamelCaseGenerationUtils {}

/// Naming for German-language templates.
///
/// Transliterates umlauts and ß before camelizing, and supports label
/// patterns that embed the referenced dependency's field name, e.g.
/// `Wenn {{dependency}} Nein, bitte begründen`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransliteratingGenerationUtils;

impl GenerationUtils for TransliteratingGenerationUtils {
    fn identifier_from_label(&self, label: &str) -> String {
        identifier_from_label(&transliterate_german(label))
    }

    fn field_label(&self, row: &TemplateRow) -> String {
        if row.field_name.contains(DEPENDENCY_PLACEHOLDER) && row.has_dependency() {
            row.field_name
                .replace(DEPENDENCY_PLACEHOLDER, row.dependency.trim())
        } else {
            row.field_name.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn row(field_name: &str, dependency: &str) -> TemplateRow {
        TemplateRow {
            row_index: 1,
            category: "Umwelt".to_string(),
            sub_category: "Klima".to_string(),
            field_name: field_name.to_string(),
            component: String::new(),
            dependency: dependency.to_string(),
            dependency_value: String::new(),
            options: String::new(),
            unit: String::new(),
            min: String::new(),
            max: String::new(),
            mandatory: false,
            documents: String::new(),
            explanation: String::new(),
            extra: BTreeMap::new(),
        }
    }

    #[test]
    fn test_default_field_identifier() {
        let utils = CamelCaseGenerationUtils;
        let r = row("Report Obligation", "");
        assert_eq!(utils.field_identifier(&r), "reportObligation");
        assert_eq!(utils.section_identifier(&r), "umwelt");
    }

    #[test]
    fn test_transliterating_identifier() {
        let utils = TransliteratingGenerationUtils;
        let r = row("Begründung der Maßnahme", "");
        assert_eq!(utils.field_identifier(&r), "begruendungDerMassnahme");
    }

    #[test]
    fn test_dependency_label_injection() {
        let utils = TransliteratingGenerationUtils;
        let r = row("Wenn {{dependency}} Nein, bitte begründen", "Berichtspflicht");
        assert_eq!(
            utils.field_label(&r),
            "Wenn Berichtspflicht Nein, bitte begründen"
        );
        assert_eq!(
            utils.field_identifier(&r),
            "wennBerichtspflichtNeinBitteBegruenden"
        );
    }

    #[test]
    fn test_placeholder_without_dependency_kept_verbatim() {
        let utils = TransliteratingGenerationUtils;
        let r = row("Wenn {{dependency}} Nein", "");
        assert_eq!(utils.field_label(&r), "Wenn {{dependency}} Nein");
    }
}
