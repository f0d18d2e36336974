//! Fixture-generator generation.
//!
//! Walks the IR and emits TypeScript code that produces synthetic datasets
//! matching the framework's shape. Every leaf gets a generator expression
//! appropriate to its variant; nullable leaves are wrapped in the
//! `valueOrNull` combinator, which yields `null` with the configured
//! probability so downstream tests exercise the absent case too.

use crate::intermediate::{ComponentGroup, ComponentKind, ComponentNode, Framework};

use super::view_config::{ts_number, ts_string};

/// One node of the fixture tree.
#[derive(Debug, Clone, PartialEq)]
pub enum FixtureEntry {
    Section {
        identifier: String,
        entries: Vec<FixtureEntry>,
        /// Whether the whole section is sometimes generated as absent
        nullable: bool,
    },
    Atomic {
        identifier: String,
        /// TypeScript expression producing the value
        expression: String,
    },
}

/// The complete fixture generator of one framework.
#[derive(Debug, Clone, PartialEq)]
pub struct FixtureModel {
    pub entries: Vec<FixtureEntry>,
}

fn option_array(options: &[crate::intermediate::SelectOption]) -> String {
    let items = options
        .iter()
        .map(|o| ts_string(&o.identifier))
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{items}]")
}

/// The generator expression for one leaf component, before null-wrapping.
fn atomic_expression(kind: &ComponentKind) -> String {
    match kind {
        ComponentKind::Date => "dataGenerator.randomPastDate()".to_string(),
        ComponentKind::Decimal { min, max, .. } => {
            let lower = min.unwrap_or(0.0);
            let upper = max.unwrap_or(1_000_000.0);
            format!(
                "dataGenerator.randomDecimal({}, {})",
                ts_number(lower),
                ts_number(upper)
            )
        }
        ComponentKind::YesNo => "dataGenerator.randomYesNo()".to_string(),
        ComponentKind::SingleSelect { options } => {
            format!("dataGenerator.pickOneElement({})", option_array(options))
        }
        ComponentKind::MultiSelect { options } => {
            format!("dataGenerator.pickSubsetOfElements({})", option_array(options))
        }
        ComponentKind::RecordList { columns } => {
            let fields = columns
                .iter()
                .map(|c| {
                    format!(
                        "{}: dataGenerator.valueOrNull(dataGenerator.randomShortString())",
                        c.identifier
                    )
                })
                .collect::<Vec<_>>()
                .join(", ");
            format!("dataGenerator.randomArrayOf(() => ({{ {fields} }}))")
        }
    }
}

/// Build the fixture tree for a framework.
pub fn build_fixture_model(framework: &Framework) -> FixtureModel {
    FixtureModel {
        entries: build_entries(&framework.root),
    }
}

fn build_entries(group: &ComponentGroup) -> Vec<FixtureEntry> {
    group
        .children()
        .iter()
        .map(|child| match child {
            ComponentNode::Group(sub) => FixtureEntry::Section {
                identifier: sub.identifier.clone(),
                entries: build_entries(sub),
                nullable: sub.is_nullable,
            },
            ComponentNode::Field(component) => {
                let expression = atomic_expression(&component.kind);
                let expression = if component.is_nullable {
                    format!("dataGenerator.valueOrNull({expression})")
                } else {
                    expression
                };
                FixtureEntry::Atomic {
                    identifier: component.identifier.clone(),
                    expression,
                }
            }
        })
        .collect()
}

/// Render fixture entries as a TypeScript object-literal body.
pub fn render_fixture_entries(entries: &[FixtureEntry], indent: usize) -> String {
    let pad = "  ".repeat(indent);
    let mut out = String::new();
    for entry in entries {
        match entry {
            FixtureEntry::Atomic {
                identifier,
                expression,
            } => {
                out.push_str(&format!("{pad}{identifier}: {expression},\n"));
            }
            FixtureEntry::Section {
                identifier,
                entries,
                nullable,
            } => {
                let opener = if *nullable {
                    format!("{pad}{identifier}: dataGenerator.valueOrNull({{\n")
                } else {
                    format!("{pad}{identifier}: {{\n")
                };
                out.push_str(&opener);
                out.push_str(&render_fixture_entries(entries, indent + 1));
                if *nullable {
                    out.push_str(&format!("{pad}}}),\n"));
                } else {
                    out.push_str(&format!("{pad}}},\n"));
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intermediate::{Component, ComponentKind, Framework, SelectOption};

    fn framework() -> Framework {
        let mut framework = Framework::new("demo", "Demo", "x", 1);
        let general = framework
            .root
            .get_or_create_group("general", "General")
            .unwrap();
        let mut required = Component::new(
            "currency",
            "Currency",
            ComponentKind::SingleSelect {
                options: vec![
                    SelectOption::new("eur", "EUR"),
                    SelectOption::new("usd", "USD"),
                ],
            },
        );
        required.is_nullable = false;
        general.create_field(required).unwrap();
        general
            .create_field(Component::new(
                "revenue",
                "Revenue",
                ComponentKind::Decimal {
                    min: Some(0.0),
                    max: Some(100.0),
                    unit: None,
                },
            ))
            .unwrap();
        framework
    }

    #[test]
    fn test_nullable_leaf_is_wrapped() {
        let model = build_fixture_model(&framework());
        let FixtureEntry::Section { entries, .. } = &model.entries[0] else {
            panic!("expected section");
        };
        match &entries[1] {
            FixtureEntry::Atomic { expression, .. } => {
                assert_eq!(
                    expression,
                    "dataGenerator.valueOrNull(dataGenerator.randomDecimal(0, 100))"
                );
            }
            other => panic!("unexpected entry: {other:?}"),
        }
    }

    #[test]
    fn test_required_leaf_is_not_wrapped() {
        let model = build_fixture_model(&framework());
        let FixtureEntry::Section { entries, .. } = &model.entries[0] else {
            panic!("expected section");
        };
        match &entries[0] {
            FixtureEntry::Atomic { expression, .. } => {
                assert_eq!(
                    expression,
                    "dataGenerator.pickOneElement([\"eur\", \"usd\"])"
                );
            }
            other => panic!("unexpected entry: {other:?}"),
        }
    }

    #[test]
    fn test_nullable_section_wraps_object() {
        let model = build_fixture_model(&framework());
        let rendered = render_fixture_entries(&model.entries, 1);
        assert!(rendered.contains("general: dataGenerator.valueOrNull({"));
        assert!(rendered.contains("}),\n"));
    }

    #[test]
    fn test_record_list_expression() {
        let expr = atomic_expression(&ComponentKind::RecordList {
            columns: vec![crate::intermediate::RecordColumn {
                identifier: "description".to_string(),
                label: "Description".to_string(),
            }],
        });
        assert_eq!(
            expr,
            "dataGenerator.randomArrayOf(() => ({ description: dataGenerator.valueOrNull(dataGenerator.randomShortString()) }))"
        );
    }
}
