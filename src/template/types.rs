use std::collections::BTreeMap;

/// Header names the loader recognizes after normalization.
///
/// Anything else in the header lands in [`TemplateRow::extra`] and is
/// reported as an unused column when the IR is built.
pub const RECOGNIZED_COLUMNS: &[&str] = &[
    "category",
    "subcategory",
    "fieldname",
    "component",
    "dependency",
    "dependencyvalue",
    "options",
    "unit",
    "min",
    "max",
    "mandatory",
    "documents",
    "explanation",
];

/// One parsed row of the input template.
///
/// Rows are immutable once parsed; they are the read-only source of truth
/// the IR is built from. `row_index` is 1-based and counts data rows (the
/// header is row 0), matching what template authors see in a spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateRow {
    pub row_index: usize,
    pub category: String,
    /// May be blank; the field then attaches directly to the category group
    pub sub_category: String,
    pub field_name: String,
    /// Raw component-type tag, e.g. `Single Select`
    pub component: String,
    /// Identifier or field name of the component this row depends on
    pub dependency: String,
    /// Value the dependency must resolve to; blank means `Yes`
    pub dependency_value: String,
    /// Raw option list for selection fields, e.g. `EUR, USD`
    pub options: String,
    pub unit: String,
    pub min: String,
    pub max: String,
    pub mandatory: bool,
    /// Raw document-support tag: blank, `simple` or `extended`
    pub documents: String,
    pub explanation: String,
    /// Values of unrecognized columns, keyed by normalized header name
    pub extra: BTreeMap<String, String>,
}

impl TemplateRow {
    /// The component tag reduced to lowercase alphanumerics, the form the
    /// factories match on ("Single Select" → "singleselect").
    pub fn normalized_component(&self) -> String {
        self.component
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_lowercase()
    }

    pub fn has_dependency(&self) -> bool {
        !self.dependency.trim().is_empty()
    }

    /// Location string used in diagnostics.
    pub fn location(&self) -> String {
        format!("row {}", self.row_index)
    }
}

/// An ordered template, the parser's output.
#[derive(Debug, Clone, Default)]
pub struct TemplateFile {
    rows: Vec<TemplateRow>,
    /// Normalized names of header columns nothing recognizes, in header order
    pub extra_columns: Vec<String>,
}

impl TemplateFile {
    pub fn new(rows: Vec<TemplateRow>, extra_columns: Vec<String>) -> Self {
        TemplateFile {
            rows,
            extra_columns,
        }
    }

    pub fn rows(&self) -> &[TemplateRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
