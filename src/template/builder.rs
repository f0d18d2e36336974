use super::{FactoryRegistry, GenerationUtils, TemplateFile, TemplateRow, UnknownRowPolicy};
use crate::diagnostics::{Diagnostic, DiagnosticCollector, Severity};
use crate::intermediate::{
    ComponentGroup, ComponentPath, FrameworkConditional, IntermediateError,
};

/// Builds the intermediate representation from an ordered template.
///
/// Rows are walked once, in file order. Each row is attached to its
/// category/subcategory group chain (groups are created on first reference
/// and found by identifier afterwards) and handed to the first factory that
/// claims it. Dependencies are resolved inline against the partially built
/// tree, so a row can only ever reference components that precede it: the
/// build-order invariant holds by construction, not by a later check.
pub struct TemplateComponentBuilder {
    registry: FactoryRegistry,
    generation: Box<dyn GenerationUtils>,
    policy: UnknownRowPolicy,
}

impl TemplateComponentBuilder {
    pub fn new(
        registry: FactoryRegistry,
        generation: Box<dyn GenerationUtils>,
        policy: UnknownRowPolicy,
    ) -> Self {
        TemplateComponentBuilder {
            registry,
            generation,
            policy,
        }
    }

    /// Build every template row into `into`.
    ///
    /// Recoverable anomalies go through `diagnostics`; structural problems
    /// (identifier collisions outside in-development mode, unresolved
    /// dependencies) abort with an [`IntermediateError`].
    pub fn build(
        &self,
        template: &TemplateFile,
        into: &mut ComponentGroup,
        diagnostics: &mut DiagnosticCollector,
    ) -> Result<(), IntermediateError> {
        for row in template.rows() {
            self.build_row(row, into, diagnostics)?;
        }

        for column in &template.extra_columns {
            diagnostics.info(
                format!("template:unused-column:{column}"),
                format!("template column '{column}' is not used by any factory"),
            );
        }
        Ok(())
    }

    fn build_row(
        &self,
        row: &TemplateRow,
        into: &mut ComponentGroup,
        diagnostics: &mut DiagnosticCollector,
    ) -> Result<(), IntermediateError> {
        let factory = match self.registry.dispatch(row) {
            Some(factory) => factory,
            None => {
                self.report_unknown_row(row, diagnostics);
                return Ok(());
            }
        };

        let section_identifier = self.generation.section_identifier(row);
        let sub_section_identifier = if row.sub_category.trim().is_empty() {
            None
        } else {
            Some(self.generation.sub_section_identifier(row))
        };

        let mut group_path: Vec<String> = vec![section_identifier.clone()];
        let built = {
            let section = into.get_or_create_group(&section_identifier, row.category.trim())?;
            let target = match &sub_section_identifier {
                Some(sub_identifier) => {
                    group_path.push(sub_identifier.clone());
                    section.get_or_create_group(sub_identifier, row.sub_category.trim())?
                }
                None => section,
            };
            factory.build(row, self.generation.as_ref(), target, diagnostics)
        };

        let identifier = match built {
            Ok(identifier) => identifier,
            Err(IntermediateError::IdentifierAlreadyInUse { identifier })
                if self.policy == UnknownRowPolicy::Warn =>
            {
                diagnostics.report(
                    Diagnostic::new(
                        Severity::Warning,
                        format!("template:identifier-collision:row-{}", row.row_index),
                        format!(
                            "field '{}' derives identifier '{}', which is already taken; row skipped",
                            row.field_name, identifier
                        ),
                    )
                    .with_location(row.location()),
                );
                return Ok(());
            }
            Err(err) => return Err(err),
        };

        if row.has_dependency() {
            group_path.push(identifier.clone());
            let own_path = ComponentPath::new(group_path);
            self.wire_dependency(row, &identifier, &own_path, into)?;
        }
        Ok(())
    }

    /// Compile the row's dependency declaration into a conditional on the
    /// component that was just built.
    ///
    /// The referenced identifier is looked up among components already in
    /// the tree, first verbatim, then through the naming transform (the
    /// template may reference a field by its label). The component itself
    /// never counts as a match: depending on yourself means the template
    /// points forward or nowhere.
    fn wire_dependency(
        &self,
        row: &TemplateRow,
        identifier: &str,
        own_path: &ComponentPath,
        into: &mut ComponentGroup,
    ) -> Result<(), IntermediateError> {
        let referenced = row.dependency.trim();
        let target = into
            .find_field_path(referenced)
            .or_else(|| into.find_field_path(&self.generation.identifier_from_label(referenced)))
            .filter(|path| path != own_path)
            .ok_or_else(|| IntermediateError::UnresolvedDependency {
                referencing: identifier.to_string(),
                referenced: referenced.to_string(),
            })?;

        let value = if row.dependency_value.trim().is_empty() {
            "Yes".to_string()
        } else {
            row.dependency_value.trim().to_string()
        };

        let component = into.field_at_mut(own_path)?;
        component.available_if = FrameworkConditional::DependsOnComponentValue { target, value };
        Ok(())
    }

    fn report_unknown_row(&self, row: &TemplateRow, diagnostics: &mut DiagnosticCollector) {
        let id = format!("template:unknown-component:row-{}", row.row_index);
        let message = format!(
            "no factory recognizes component '{}' of field '{}'",
            row.component, row.field_name
        );
        let diagnostic = Diagnostic::new(
            match self.policy {
                UnknownRowPolicy::Error => Severity::Error,
                UnknownRowPolicy::Warn => Severity::Warning,
            },
            id,
            message,
        )
        .with_location(row.location());
        diagnostics.report(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::{from_reader, CamelCaseGenerationUtils};

    fn build_csv(csv: &str, policy: UnknownRowPolicy) -> (ComponentGroup, DiagnosticCollector) {
        let template = from_reader(csv.as_bytes()).unwrap();
        let builder = TemplateComponentBuilder::new(
            FactoryRegistry::standard(),
            Box::new(CamelCaseGenerationUtils),
            policy,
        );
        let mut root = ComponentGroup::new("root", "Root");
        let mut diagnostics = DiagnosticCollector::new();
        builder
            .build(&template, &mut root, &mut diagnostics)
            .unwrap();
        (root, diagnostics)
    }

    #[test]
    fn test_groups_are_created_once() {
        let csv = "category,subcategory,fieldname,component\n\
                   General,Basics,Revenue,decimal\n\
                   General,Basics,Reporting date,date\n";
        let (root, mut diagnostics) = build_csv(csv, UnknownRowPolicy::Error);
        assert_eq!(root.children().len(), 1);
        let general = root.group("general").unwrap();
        assert_eq!(general.children().len(), 1);
        let basics = general.group("basics").unwrap();
        assert_eq!(basics.children().len(), 2);
        assert!(diagnostics.finalize().is_ok());
    }

    #[test]
    fn test_blank_subcategory_attaches_to_section() {
        let csv = "category,subcategory,fieldname,component\n\
                   General,,Revenue,decimal\n";
        let (root, _) = build_csv(csv, UnknownRowPolicy::Error);
        assert!(root.group("general").unwrap().field("revenue").is_ok());
    }

    #[test]
    fn test_dependency_resolves_to_prior_row() {
        let csv = "category,subcategory,fieldname,component,dependency\n\
                   General,Basics,Report obligation,yesNo,\n\
                   General,Basics,Reporting date,date,reportObligation\n";
        let (root, _) = build_csv(csv, UnknownRowPolicy::Error);
        let component = root
            .group("general")
            .unwrap()
            .group("basics")
            .unwrap()
            .field("reportingDate")
            .unwrap();
        match &component.available_if {
            FrameworkConditional::DependsOnComponentValue { target, value } => {
                assert_eq!(target.to_string(), "general.basics.reportObligation");
                assert_eq!(value, "Yes");
            }
            other => panic!("unexpected conditional: {other:?}"),
        }
    }

    #[test]
    fn test_dependency_by_label_text() {
        let csv = "category,subcategory,fieldname,component,dependency,dependencyvalue\n\
                   General,Basics,Report obligation,yesNo,,\n\
                   General,Basics,Reason,date,Report obligation,No\n";
        let (root, _) = build_csv(csv, UnknownRowPolicy::Error);
        let component = root
            .group("general")
            .unwrap()
            .group("basics")
            .unwrap()
            .field("reason")
            .unwrap();
        match &component.available_if {
            FrameworkConditional::DependsOnComponentValue { value, .. } => {
                assert_eq!(value, "No");
            }
            other => panic!("unexpected conditional: {other:?}"),
        }
    }

    #[test]
    fn test_forward_dependency_is_fatal() {
        let csv = "category,subcategory,fieldname,component,dependency\n\
                   General,Basics,Reason,date,reportObligation\n\
                   General,Basics,Report obligation,yesNo,\n";
        let template = from_reader(csv.as_bytes()).unwrap();
        let builder = TemplateComponentBuilder::new(
            FactoryRegistry::standard(),
            Box::new(CamelCaseGenerationUtils),
            UnknownRowPolicy::Error,
        );
        let mut root = ComponentGroup::new("root", "Root");
        let mut diagnostics = DiagnosticCollector::new();
        let err = builder
            .build(&template, &mut root, &mut diagnostics)
            .unwrap_err();
        match err {
            IntermediateError::UnresolvedDependency {
                referencing,
                referenced,
            } => {
                assert_eq!(referencing, "reason");
                assert_eq!(referenced, "reportObligation");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_self_dependency_is_fatal() {
        let csv = "category,subcategory,fieldname,component,dependency\n\
                   General,Basics,Reason,date,reason\n";
        let template = from_reader(csv.as_bytes()).unwrap();
        let builder = TemplateComponentBuilder::new(
            FactoryRegistry::standard(),
            Box::new(CamelCaseGenerationUtils),
            UnknownRowPolicy::Error,
        );
        let mut root = ComponentGroup::new("root", "Root");
        let mut diagnostics = DiagnosticCollector::new();
        assert!(matches!(
            builder
                .build(&template, &mut root, &mut diagnostics)
                .unwrap_err(),
            IntermediateError::UnresolvedDependency { .. }
        ));
    }

    #[test]
    fn test_duplicate_identifier_is_fatal_in_strict_mode() {
        let csv = "category,subcategory,fieldname,component\n\
                   General,Basics,Revenue,decimal\n\
                   General,Basics,Revenue,decimal\n";
        let template = from_reader(csv.as_bytes()).unwrap();
        let builder = TemplateComponentBuilder::new(
            FactoryRegistry::standard(),
            Box::new(CamelCaseGenerationUtils),
            UnknownRowPolicy::Error,
        );
        let mut root = ComponentGroup::new("root", "Root");
        let mut diagnostics = DiagnosticCollector::new();
        let err = builder
            .build(&template, &mut root, &mut diagnostics)
            .unwrap_err();
        assert!(err.to_string().contains("'revenue'"));
    }

    #[test]
    fn test_duplicate_identifier_downgrades_in_development() {
        let csv = "category,subcategory,fieldname,component\n\
                   General,Basics,Revenue,decimal\n\
                   General,Basics,Revenue,decimal\n";
        let (root, mut diagnostics) = build_csv(csv, UnknownRowPolicy::Warn);
        let basics = root.group("general").unwrap().group("basics").unwrap();
        assert_eq!(basics.children().len(), 1);
        assert!(diagnostics.finalize().is_ok());
    }

    #[test]
    fn test_unknown_component_policy() {
        let csv = "category,subcategory,fieldname,component\n\
                   General,Basics,Odd,telepathy\n";
        let (_, mut strict) = build_csv(csv, UnknownRowPolicy::Error);
        assert!(strict.finalize().is_err());

        let (_, mut lenient) = build_csv(csv, UnknownRowPolicy::Warn);
        assert!(lenient.finalize().is_ok());
    }

    #[test]
    fn test_unused_columns_reported_as_info() {
        let csv = "category,subcategory,fieldname,component,reviewer notes\n\
                   General,Basics,Revenue,decimal,fine\n";
        let (_, diagnostics) = build_csv(csv, UnknownRowPolicy::Error);
        assert!(diagnostics
            .messages()
            .iter()
            .any(|d| d.id == "template:unused-column:reviewernotes"));
    }
}
