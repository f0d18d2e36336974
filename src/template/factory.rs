use super::{GenerationUtils, TemplateRow};
use crate::diagnostics::DiagnosticCollector;
use crate::intermediate::{
    Component, ComponentGroup, ComponentKind, DocumentSupport, IntermediateError, RecordColumn,
    SelectOption,
};

/// What happens to a row no factory recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownRowPolicy {
    /// Raise an error diagnostic; the compilation fails at the next
    /// checkpoint unless suppressed.
    #[default]
    Error,
    /// Downgrade to a warning and skip the row. Used for frameworks still
    /// in development, where the template runs ahead of the toolbox.
    Warn,
}

/// Recognizer/builder pair for one shape of template row.
///
/// Factories are consulted in the fixed order of the [`FactoryRegistry`];
/// the first one whose `can_handle` returns true builds the row. Dispatch
/// is a plain ordered scan over this list; nothing is inferred from types
/// at runtime, so selection is deterministic and testable in isolation.
pub trait ComponentFactory {
    /// Name used in logs and tests.
    fn name(&self) -> &'static str;

    fn can_handle(&self, row: &TemplateRow) -> bool;

    /// Build the row into a component attached to `group` and return its
    /// identifier.
    fn build(
        &self,
        row: &TemplateRow,
        generation: &dyn GenerationUtils,
        group: &mut ComponentGroup,
        diagnostics: &mut DiagnosticCollector,
    ) -> Result<String, IntermediateError>;
}

/// Apply the attributes every component shares, regardless of variant.
fn new_component(
    row: &TemplateRow,
    generation: &dyn GenerationUtils,
    kind: ComponentKind,
    diagnostics: &mut DiagnosticCollector,
) -> Component {
    let label = generation.field_label(row);
    let identifier = generation.identifier_from_label(&label);
    let mut component = Component::new(identifier, label, kind);
    component.is_nullable = !row.mandatory;
    if !row.explanation.trim().is_empty() {
        component.upload_page_explanation = Some(row.explanation.trim().to_string());
    }
    component.document_support = match row.documents.trim().to_lowercase().as_str() {
        "" | "none" => DocumentSupport::None,
        "simple" => DocumentSupport::Simple,
        "extended" => DocumentSupport::Extended,
        other => {
            diagnostics.warning(
                format!("template:unknown-document-support:row-{}", row.row_index),
                format!(
                    "unknown document support '{}' for field '{}', falling back to none",
                    other, row.field_name
                ),
            );
            DocumentSupport::None
        }
    };
    component
}

fn attach(group: &mut ComponentGroup, component: Component) -> Result<String, IntermediateError> {
    let identifier = component.identifier.clone();
    group.create_field(component)?;
    Ok(identifier)
}

/// Parse an option list cell ("EUR, USD") into select options with stable
/// identifiers. Duplicate identifiers are dropped with a warning.
fn parse_options(
    row: &TemplateRow,
    generation: &dyn GenerationUtils,
    diagnostics: &mut DiagnosticCollector,
) -> Vec<SelectOption> {
    let mut options: Vec<SelectOption> = Vec::new();
    for label in row
        .options
        .split([',', ';'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        let identifier = generation.identifier_from_label(label);
        if options.iter().any(|o| o.identifier == identifier) {
            diagnostics.warning(
                format!(
                    "template:duplicate-option:row-{}:{}",
                    row.row_index, identifier
                ),
                format!(
                    "option '{}' of field '{}' collides with an earlier option, dropped",
                    label, row.field_name
                ),
            );
            continue;
        }
        options.push(SelectOption::new(identifier, label));
    }
    options
}

fn parse_bound(
    raw: &str,
    which: &str,
    row: &TemplateRow,
    diagnostics: &mut DiagnosticCollector,
) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match raw.parse::<f64>() {
        Ok(v) => Some(v),
        Err(_) => {
            diagnostics.warning(
                format!("template:invalid-{}:row-{}", which, row.row_index),
                format!(
                    "'{}' is not a valid {} bound for field '{}', ignored",
                    raw, which, row.field_name
                ),
            );
            None
        }
    }
}

/// Builds [`ComponentKind::Date`] components from rows tagged `date`.
pub struct DateComponentFactory;

impl ComponentFactory for DateComponentFactory {
    fn name(&self) -> &'static str {
        "DateComponentFactory"
    }

    fn can_handle(&self, row: &TemplateRow) -> bool {
        row.normalized_component() == "date"
    }

    fn build(
        &self,
        row: &TemplateRow,
        generation: &dyn GenerationUtils,
        group: &mut ComponentGroup,
        diagnostics: &mut DiagnosticCollector,
    ) -> Result<String, IntermediateError> {
        attach(
            group,
            new_component(row, generation, ComponentKind::Date, diagnostics),
        )
    }
}

/// Builds [`ComponentKind::Decimal`] components from rows tagged `decimal`,
/// `number` or `percentage`. Percentages default to bounds 0..=100 and a
/// `%` unit.
pub struct DecimalComponentFactory;

impl ComponentFactory for DecimalComponentFactory {
    fn name(&self) -> &'static str {
        "DecimalComponentFactory"
    }

    fn can_handle(&self, row: &TemplateRow) -> bool {
        matches!(
            row.normalized_component().as_str(),
            "decimal" | "number" | "percentage"
        )
    }

    fn build(
        &self,
        row: &TemplateRow,
        generation: &dyn GenerationUtils,
        group: &mut ComponentGroup,
        diagnostics: &mut DiagnosticCollector,
    ) -> Result<String, IntermediateError> {
        let is_percentage = row.normalized_component() == "percentage";
        let mut min = parse_bound(&row.min, "min", row, diagnostics);
        let mut max = parse_bound(&row.max, "max", row, diagnostics);
        let mut unit = if row.unit.trim().is_empty() {
            None
        } else {
            Some(row.unit.trim().to_string())
        };
        if is_percentage {
            min = min.or(Some(0.0));
            max = max.or(Some(100.0));
            unit = unit.or_else(|| Some("%".to_string()));
        }
        attach(
            group,
            new_component(
                row,
                generation,
                ComponentKind::Decimal { min, max, unit },
                diagnostics,
            ),
        )
    }
}

/// Builds [`ComponentKind::YesNo`] components from rows tagged `yesno`.
pub struct YesNoComponentFactory;

impl ComponentFactory for YesNoComponentFactory {
    fn name(&self) -> &'static str {
        "YesNoComponentFactory"
    }

    fn can_handle(&self, row: &TemplateRow) -> bool {
        row.normalized_component() == "yesno"
    }

    fn build(
        &self,
        row: &TemplateRow,
        generation: &dyn GenerationUtils,
        group: &mut ComponentGroup,
        diagnostics: &mut DiagnosticCollector,
    ) -> Result<String, IntermediateError> {
        attach(
            group,
            new_component(row, generation, ComponentKind::YesNo, diagnostics),
        )
    }
}

/// Builds [`ComponentKind::SingleSelect`] components from rows tagged
/// `singleselect` or `select`. An empty option set is an error diagnostic:
/// the field would be impossible to answer.
pub struct SingleSelectComponentFactory;

impl ComponentFactory for SingleSelectComponentFactory {
    fn name(&self) -> &'static str {
        "SingleSelectComponentFactory"
    }

    fn can_handle(&self, row: &TemplateRow) -> bool {
        matches!(
            row.normalized_component().as_str(),
            "singleselect" | "select"
        )
    }

    fn build(
        &self,
        row: &TemplateRow,
        generation: &dyn GenerationUtils,
        group: &mut ComponentGroup,
        diagnostics: &mut DiagnosticCollector,
    ) -> Result<String, IntermediateError> {
        let options = parse_options(row, generation, diagnostics);
        if options.is_empty() {
            diagnostics.error(
                format!("template:empty-options:row-{}", row.row_index),
                format!(
                    "single-select field '{}' declares no options",
                    row.field_name
                ),
            );
        }
        attach(
            group,
            new_component(
                row,
                generation,
                ComponentKind::SingleSelect { options },
                diagnostics,
            ),
        )
    }
}

/// Builds [`ComponentKind::MultiSelect`] components from rows tagged
/// `multiselect`.
pub struct MultiSelectComponentFactory;

impl ComponentFactory for MultiSelectComponentFactory {
    fn name(&self) -> &'static str {
        "MultiSelectComponentFactory"
    }

    fn can_handle(&self, row: &TemplateRow) -> bool {
        row.normalized_component() == "multiselect"
    }

    fn build(
        &self,
        row: &TemplateRow,
        generation: &dyn GenerationUtils,
        group: &mut ComponentGroup,
        diagnostics: &mut DiagnosticCollector,
    ) -> Result<String, IntermediateError> {
        let options = parse_options(row, generation, diagnostics);
        if options.is_empty() {
            diagnostics.error(
                format!("template:empty-options:row-{}", row.row_index),
                format!(
                    "multi-select field '{}' declares no options",
                    row.field_name
                ),
            );
        }
        attach(
            group,
            new_component(
                row,
                generation,
                ComponentKind::MultiSelect { options },
                diagnostics,
            ),
        )
    }
}

/// Builds [`ComponentKind::RecordList`] components from rows tagged
/// `recordlist` or `list`. The option cell names the sub-record columns;
/// without it the original's description/document pair is used.
pub struct RecordListComponentFactory;

impl ComponentFactory for RecordListComponentFactory {
    fn name(&self) -> &'static str {
        "RecordListComponentFactory"
    }

    fn can_handle(&self, row: &TemplateRow) -> bool {
        matches!(row.normalized_component().as_str(), "recordlist" | "list")
    }

    fn build(
        &self,
        row: &TemplateRow,
        generation: &dyn GenerationUtils,
        group: &mut ComponentGroup,
        diagnostics: &mut DiagnosticCollector,
    ) -> Result<String, IntermediateError> {
        let mut columns: Vec<RecordColumn> = parse_options(row, generation, diagnostics)
            .into_iter()
            .map(|o| RecordColumn {
                identifier: o.identifier,
                label: o.label,
            })
            .collect();
        if columns.is_empty() {
            columns = vec![
                RecordColumn {
                    identifier: "description".to_string(),
                    label: "Description".to_string(),
                },
                RecordColumn {
                    identifier: "document".to_string(),
                    label: "Document".to_string(),
                },
            ];
        }
        attach(
            group,
            new_component(
                row,
                generation,
                ComponentKind::RecordList { columns },
                diagnostics,
            ),
        )
    }
}

/// The fixed, ordered set of factories a framework compiles with.
///
/// The first factory in the list whose `can_handle` accepts a row wins.
/// Framework-specific factories can be pushed to the front to take
/// precedence over the standard set.
pub struct FactoryRegistry {
    factories: Vec<Box<dyn ComponentFactory>>,
}

impl FactoryRegistry {
    /// The standard priority order: Date, Decimal, YesNo, SingleSelect,
    /// MultiSelect, RecordList.
    pub fn standard() -> Self {
        FactoryRegistry {
            factories: vec![
                Box::new(DateComponentFactory),
                Box::new(DecimalComponentFactory),
                Box::new(YesNoComponentFactory),
                Box::new(SingleSelectComponentFactory),
                Box::new(MultiSelectComponentFactory),
                Box::new(RecordListComponentFactory),
            ],
        }
    }

    /// Insert a factory at the head of the priority list.
    pub fn prepend(&mut self, factory: Box<dyn ComponentFactory>) {
        self.factories.insert(0, factory);
    }

    /// First factory claiming the row, in priority order.
    pub fn dispatch(&self, row: &TemplateRow) -> Option<&dyn ComponentFactory> {
        self.factories
            .iter()
            .find(|f| f.can_handle(row))
            .map(|f| f.as_ref())
    }
}

impl Default for FactoryRegistry {
    fn default() -> Self {
        Self::standard()
    }
}
