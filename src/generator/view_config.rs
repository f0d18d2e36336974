//! View-configuration generation.
//!
//! Transforms the IR into a nested section/cell display tree for the
//! frontend. Each [`ComponentGroup`] becomes a section with a label,
//! expand-on-load flag and compiled `shouldDisplay`; each leaf component
//! becomes a cell with a null-safe `valueGetter` accessor, a formatter
//! name from a fixed set, and its own compiled display predicate. The tree
//! is built once per generation run and rendered to TypeScript.
//!
//! The review variant ([`into_review_config`]) rewrites visibility for the
//! quality-assurance tooling: every node displays unconditionally, and the
//! original ancestor-chain predicate moves into the cell's `highlightIf`
//! so normally-hidden answers are shown but flagged.

use crate::intermediate::{
    ComponentGroup, ComponentKind, ComponentNode, ComponentPath, Framework, FrameworkConditional,
};

/// A section of the view page, mirroring one [`ComponentGroup`].
#[derive(Debug, Clone, PartialEq)]
pub struct SectionConfig {
    pub label: String,
    pub expand_on_page_load: bool,
    /// TypeScript boolean expression over `dataset`
    pub should_display: String,
    pub children: Vec<ViewNode>,
}

/// A single display cell, mirroring one leaf component.
#[derive(Debug, Clone, PartialEq)]
pub struct CellConfig {
    pub label: String,
    pub explanation: Option<String>,
    /// TypeScript boolean expression over `dataset`
    pub should_display: String,
    /// Original predicate chain, set only by the review transform
    pub highlight_if: Option<String>,
    /// Null-safe TypeScript accessor, e.g. `dataset.general?.basics?.revenue`
    pub value_getter: String,
    pub formatter: &'static str,
    pub label_badge_color: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewNode {
    Section(SectionConfig),
    Cell(CellConfig),
}

/// Render a string as a TypeScript string literal (JSON escaping is valid
/// TS source).
pub(crate) fn ts_string(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "\"\"".to_string())
}

/// Render an f64 so that re-runs are byte-identical.
pub(crate) fn ts_number(value: f64) -> String {
    format!("{value}")
}

/// Build the null-safe accessor for a component path.
///
/// The chain starts at the always-present `dataset` root and short-circuits
/// with `?.` after every nullable ancestor group, so an absent ancestor
/// yields `undefined` instead of a runtime error.
pub fn accessor_for_path(root: &ComponentGroup, path: &ComponentPath) -> String {
    let mut expr = String::from("dataset");
    let mut previous_nullable = false;
    let mut group = root;
    for (i, segment) in path.segments().iter().enumerate() {
        expr.push_str(if previous_nullable { "?." } else { "." });
        expr.push_str(segment);
        if i + 1 < path.segments().len() {
            if let Some(ComponentNode::Group(sub)) = group.get(segment) {
                previous_nullable = sub.is_nullable;
                group = sub;
            } else {
                previous_nullable = false;
            }
        }
    }
    expr
}

/// Compile a conditional into a TypeScript boolean expression.
///
/// An absent dependency value compares unequal to every declared value, so
/// a component that depends on `A == "Yes"` stays hidden while `A` is
/// unanswered.
pub fn compile_conditional(root: &ComponentGroup, conditional: &FrameworkConditional) -> String {
    match conditional {
        FrameworkConditional::AlwaysTrue => "true".to_string(),
        FrameworkConditional::DependsOnComponentValue { target, value } => {
            format!(
                "{} === {}",
                accessor_for_path(root, target),
                ts_string(value)
            )
        }
        FrameworkConditional::EitherValueAtLeast {
            first,
            second,
            threshold,
        } => {
            format!(
                "({} ?? 0) >= {} || ({} ?? 0) >= {}",
                accessor_for_path(root, first),
                ts_number(*threshold),
                accessor_for_path(root, second),
                ts_number(*threshold)
            )
        }
    }
}

fn formatter_for(kind: &ComponentKind) -> &'static str {
    match kind {
        ComponentKind::Date => "formatDateValue",
        ComponentKind::Decimal { .. } => "formatNumberValue",
        ComponentKind::YesNo => "formatYesNoValue",
        ComponentKind::SingleSelect { .. } => "formatSelectValue",
        ComponentKind::MultiSelect { .. } => "formatMultiSelectValue",
        ComponentKind::RecordList { .. } => "formatRecordListValue",
    }
}

/// Build the view configuration tree for a framework.
pub fn build_view_config(framework: &Framework) -> Vec<ViewNode> {
    build_nodes(&framework.root, &framework.root, &mut Vec::new())
}

fn build_nodes(
    root: &ComponentGroup,
    group: &ComponentGroup,
    path: &mut Vec<String>,
) -> Vec<ViewNode> {
    let mut nodes = Vec::new();
    for child in group.children() {
        match child {
            ComponentNode::Group(sub) => {
                path.push(sub.identifier.clone());
                let children = build_nodes(root, sub, path);
                path.pop();
                nodes.push(ViewNode::Section(SectionConfig {
                    label: sub.label.clone(),
                    expand_on_page_load: sub.view_page_expand_on_load,
                    should_display: compile_conditional(root, &sub.available_if),
                    children,
                }));
            }
            ComponentNode::Field(component) => {
                let mut full_path = path.clone();
                full_path.push(component.identifier.clone());
                let value_getter =
                    accessor_for_path(root, &ComponentPath::new(full_path));
                let label_badge_color = match component.document_support {
                    crate::intermediate::DocumentSupport::None => None,
                    _ => Some("green".to_string()),
                };
                nodes.push(ViewNode::Cell(CellConfig {
                    label: component.label.clone(),
                    explanation: component.view_explanation().map(str::to_string),
                    should_display: compile_conditional(root, &component.available_if),
                    highlight_if: None,
                    value_getter,
                    formatter: formatter_for(&component.kind),
                    label_badge_color,
                }));
            }
        }
    }
    nodes
}

/// Combine predicates with `&&`, dropping redundant `true` terms.
fn combine_predicates(predicates: &[String]) -> String {
    let meaningful: Vec<&String> = predicates.iter().filter(|p| p.as_str() != "true").collect();
    match meaningful.len() {
        0 => "true".to_string(),
        1 => meaningful[0].clone(),
        _ => meaningful
            .iter()
            .map(|p| format!("({p})"))
            .collect::<Vec<_>>()
            .join(" && "),
    }
}

/// Rewrite a view tree for quality-assurance review.
///
/// Every node becomes unconditionally visible; each cell's `highlightIf`
/// receives the conjunction of the predicates that originally governed it
/// (its own and its whole ancestor chain), so the review page can flag
/// answers that a regular user would not have seen.
pub fn into_review_config(nodes: Vec<ViewNode>) -> Vec<ViewNode> {
    fn rewrite(nodes: Vec<ViewNode>, ancestors: &mut Vec<String>) -> Vec<ViewNode> {
        nodes
            .into_iter()
            .map(|node| match node {
                ViewNode::Section(mut section) => {
                    ancestors.push(section.should_display.clone());
                    section.children = rewrite(std::mem::take(&mut section.children), ancestors);
                    ancestors.pop();
                    section.should_display = "true".to_string();
                    ViewNode::Section(section)
                }
                ViewNode::Cell(mut cell) => {
                    let mut chain = ancestors.clone();
                    chain.push(cell.should_display.clone());
                    let combined = combine_predicates(&chain);
                    cell.highlight_if = if combined == "true" {
                        None
                    } else {
                        Some(combined)
                    };
                    cell.should_display = "true".to_string();
                    ViewNode::Cell(cell)
                }
            })
            .collect()
    }
    rewrite(nodes, &mut Vec::new())
}

/// Render view nodes as a TypeScript array body.
pub fn render_view_nodes(nodes: &[ViewNode], indent: usize) -> String {
    let pad = "  ".repeat(indent);
    let inner = "  ".repeat(indent + 1);
    let mut out = String::new();
    for node in nodes {
        match node {
            ViewNode::Section(section) => {
                out.push_str(&format!("{pad}{{\n"));
                out.push_str(&format!("{inner}type: \"section\",\n"));
                out.push_str(&format!("{inner}label: {},\n", ts_string(&section.label)));
                out.push_str(&format!(
                    "{inner}expandOnPageLoad: {},\n",
                    section.expand_on_page_load
                ));
                out.push_str(&format!(
                    "{inner}shouldDisplay: (dataset) => {},\n",
                    section.should_display
                ));
                out.push_str(&format!("{inner}children: [\n"));
                out.push_str(&render_view_nodes(&section.children, indent + 2));
                out.push_str(&format!("{inner}],\n"));
                out.push_str(&format!("{pad}}},\n"));
            }
            ViewNode::Cell(cell) => {
                out.push_str(&format!("{pad}{{\n"));
                out.push_str(&format!("{inner}type: \"cell\",\n"));
                out.push_str(&format!("{inner}label: {},\n", ts_string(&cell.label)));
                if let Some(explanation) = &cell.explanation {
                    out.push_str(&format!(
                        "{inner}explanation: {},\n",
                        ts_string(explanation)
                    ));
                }
                out.push_str(&format!(
                    "{inner}shouldDisplay: (dataset) => {},\n",
                    cell.should_display
                ));
                if let Some(highlight) = &cell.highlight_if {
                    out.push_str(&format!(
                        "{inner}highlightIf: (dataset) => {},\n",
                        highlight
                    ));
                }
                out.push_str(&format!(
                    "{inner}valueGetter: (dataset) => {},\n",
                    cell.value_getter
                ));
                out.push_str(&format!(
                    "{inner}formatter: \"{}\",\n",
                    cell.formatter
                ));
                if let Some(color) = &cell.label_badge_color {
                    out.push_str(&format!("{inner}labelBadgeColor: {},\n", ts_string(color)));
                }
                out.push_str(&format!("{pad}}},\n"));
            }
        }
    }
    out
}
