use super::ComponentGroup;

/// The top-level aggregate: one compiled template.
///
/// Created once per compilation, filled by the template builder and the
/// configuration-driven customizations, then only read by the generators.
#[derive(Debug, Clone)]
pub struct Framework {
    /// Short machine identifier, e.g. `gdv`
    pub identifier: String,
    /// Display label, e.g. `GDV/VÖB`
    pub label: String,
    /// Longer description shown in framework listings
    pub explanation: String,
    /// Position among all frameworks in the registry
    pub order: u32,
    /// Top-level container for all sections
    pub root: ComponentGroup,
}

impl Framework {
    pub fn new(
        identifier: impl Into<String>,
        label: impl Into<String>,
        explanation: impl Into<String>,
        order: u32,
    ) -> Self {
        let identifier = identifier.into();
        let root = ComponentGroup::new("root", "Root");
        Framework {
            identifier,
            label: label.into(),
            explanation: explanation.into(),
            order,
            root,
        }
    }
}
