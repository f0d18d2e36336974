use super::FrameworkConditional;

/// Which kind of evidence attachment a component supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentSupport {
    /// Plain value, no attached evidence.
    #[default]
    None,
    /// Value plus an optional document reference.
    Simple,
    /// Value plus document reference, page and quality metadata.
    Extended,
}

/// One selectable option of a single- or multi-select component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    /// Stable identifier derived from the label
    pub identifier: String,
    /// Human-readable label as written in the template
    pub label: String,
}

impl SelectOption {
    pub fn new(identifier: impl Into<String>, label: impl Into<String>) -> Self {
        SelectOption {
            identifier: identifier.into(),
            label: label.into(),
        }
    }
}

/// One string-typed column of a [`ComponentKind::RecordList`] sub-record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordColumn {
    pub identifier: String,
    pub label: String,
}

/// The closed set of leaf component variants.
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentKind {
    /// Calendar date (ISO-8601 in all artifacts).
    Date,
    /// Decimal number with optional bounds and display unit.
    Decimal {
        min: Option<f64>,
        max: Option<f64>,
        unit: Option<String>,
    },
    /// Yes/No answer; the most common dependency target.
    YesNo,
    /// Exactly one of a fixed option set.
    SingleSelect { options: Vec<SelectOption> },
    /// Any subset of a fixed option set.
    MultiSelect { options: Vec<SelectOption> },
    /// Ordered list of sub-records with string columns.
    RecordList { columns: Vec<RecordColumn> },
}

impl ComponentKind {
    /// Variant name used in error messages and type-mismatch reports.
    pub fn variant_name(&self) -> &'static str {
        match self {
            ComponentKind::Date => "DateComponent",
            ComponentKind::Decimal { .. } => "DecimalComponent",
            ComponentKind::YesNo => "YesNoComponent",
            ComponentKind::SingleSelect { .. } => "SingleSelectComponent",
            ComponentKind::MultiSelect { .. } => "MultiSelectComponent",
            ComponentKind::RecordList { .. } => "RecordListComponent",
        }
    }
}

/// A leaf field of the IR tree, typically one question of a questionnaire.
///
/// Components live inside exactly one [`super::ComponentGroup`]; the group
/// owns them, and they are destroyed with their parent subtree. `identifier`
/// is unique among the siblings under that parent.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    pub identifier: String,
    /// Short human-readable title
    pub label: String,
    /// Longer description shown on the upload page
    pub upload_page_explanation: Option<String>,
    /// Overrides the explanation on the view page; falls back to the upload
    /// page explanation when unset
    pub view_page_explanation: Option<String>,
    /// True iff the component accepts an absent value
    pub is_nullable: bool,
    pub document_support: DocumentSupport,
    /// Display predicate; [`FrameworkConditional::AlwaysTrue`] by default
    pub available_if: FrameworkConditional,
    pub kind: ComponentKind,
}

impl Component {
    pub fn new(
        identifier: impl Into<String>,
        label: impl Into<String>,
        kind: ComponentKind,
    ) -> Self {
        Component {
            identifier: identifier.into(),
            label: label.into(),
            upload_page_explanation: None,
            view_page_explanation: None,
            is_nullable: true,
            document_support: DocumentSupport::None,
            available_if: FrameworkConditional::AlwaysTrue,
            kind,
        }
    }

    pub fn is_required(&self) -> bool {
        !self.is_nullable
    }

    /// The explanation shown on the view page, falling back to the upload
    /// page explanation.
    pub fn view_explanation(&self) -> Option<&str> {
        self.view_page_explanation
            .as_deref()
            .or(self.upload_page_explanation.as_deref())
    }
}
