//! Backend data-model generation.
//!
//! Mirrors the IR's group/field nesting into a tree of Rust structs: one
//! struct per [`ComponentGroup`] with one field per child in insertion
//! order, plus one enum per select option set. Nullable fields become
//! `Option<T>` and are omitted from serialized output when absent, which
//! is the contract of the consuming persistence layer.

use crate::intermediate::{
    Component, ComponentGroup, ComponentKind, ComponentNode, Framework,
};
use crate::naming::{sanitize_rust_identifier, snake_case_from_identifier, type_name_from_identifier};

/// A generated struct field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataFieldDef {
    /// Rust field name (snake_case, keyword-escaped)
    pub name: String,
    /// Wire name for serde rename (the IR identifier, camelCase)
    pub rename: String,
    /// Rust type without the `Option` wrapper
    pub ty: String,
    pub optional: bool,
    /// Doc line, e.g. the field label plus unit
    pub doc: String,
}

/// A generated struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataStructDef {
    pub name: String,
    pub doc: String,
    pub fields: Vec<DataFieldDef>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataEnumVariant {
    /// Rust variant name (PascalCase)
    pub name: String,
    /// Wire name for serde rename (the option identifier)
    pub rename: String,
}

/// A generated enum for one select option set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataEnumDef {
    pub name: String,
    pub doc: String,
    pub variants: Vec<DataEnumVariant>,
}

/// The complete generated data model of one framework.
#[derive(Debug, Clone, Default)]
pub struct DataModel {
    /// Name of the root struct, e.g. `GdvData`
    pub root_type: String,
    pub structs: Vec<DataStructDef>,
    pub enums: Vec<DataEnumDef>,
    /// Whether the shared `YesNo` enum is referenced anywhere
    pub has_yes_no: bool,
}

/// Build the data model from the IR.
///
/// Struct and field order follows the IR's insertion order; enums appear in
/// the order their components were built. The output is deterministic.
pub fn build_data_model(framework: &Framework) -> DataModel {
    let prefix = type_name_from_identifier(&framework.identifier);
    let mut model = DataModel {
        root_type: format!("{prefix}Data"),
        ..DataModel::default()
    };
    let root_doc = format!("Complete dataset of the {} framework.", framework.label);
    build_struct(
        &framework.root,
        model.root_type.clone(),
        prefix,
        root_doc,
        &mut model,
    );
    model
}

/// `name` is the struct's own type name; `prefix` is what child type names
/// grow from (the root struct `GdvData` contributes `Gdv`, everything else
/// contributes its full name).
fn build_struct(
    group: &ComponentGroup,
    name: String,
    prefix: String,
    doc: String,
    model: &mut DataModel,
) {
    let mut fields = Vec::new();
    let mut pending_children: Vec<(&ComponentGroup, String, String)> = Vec::new();

    for child in group.children() {
        match child {
            ComponentNode::Group(sub) => {
                let child_name =
                    format!("{}{}", prefix, type_name_from_identifier(&sub.identifier));
                fields.push(DataFieldDef {
                    name: sanitize_rust_identifier(&snake_case_from_identifier(&sub.identifier)),
                    rename: sub.identifier.clone(),
                    ty: child_name.clone(),
                    optional: sub.is_nullable,
                    doc: sub.label.clone(),
                });
                pending_children.push((sub, child_name, format!("Section '{}'.", sub.label)));
            }
            ComponentNode::Field(component) => {
                fields.push(leaf_field(component, &prefix, model));
            }
        }
    }

    model.structs.push(DataStructDef { name, doc, fields });

    for (sub, child_name, child_doc) in pending_children {
        build_struct(sub, child_name.clone(), child_name, child_doc, model);
    }
}

fn leaf_field(component: &Component, prefix: &str, model: &mut DataModel) -> DataFieldDef {
    let type_stub = format!(
        "{}{}",
        prefix,
        type_name_from_identifier(&component.identifier)
    );
    let ty = match &component.kind {
        ComponentKind::Date => "String".to_string(),
        ComponentKind::Decimal { .. } => "f64".to_string(),
        ComponentKind::YesNo => {
            model.has_yes_no = true;
            "YesNo".to_string()
        }
        ComponentKind::SingleSelect { options } => {
            let enum_name = format!("{type_stub}Options");
            push_enum(model, &enum_name, component, options);
            enum_name
        }
        ComponentKind::MultiSelect { options } => {
            let enum_name = format!("{type_stub}Options");
            push_enum(model, &enum_name, component, options);
            format!("Vec<{enum_name}>")
        }
        ComponentKind::RecordList { columns } => {
            let entry_name = format!("{type_stub}Entry");
            let entry_fields = columns
                .iter()
                .map(|column| DataFieldDef {
                    name: sanitize_rust_identifier(&snake_case_from_identifier(&column.identifier)),
                    rename: column.identifier.clone(),
                    ty: "String".to_string(),
                    optional: true,
                    doc: column.label.clone(),
                })
                .collect();
            model.structs.push(DataStructDef {
                name: entry_name.clone(),
                doc: format!("One entry of '{}'.", component.label),
                fields: entry_fields,
            });
            format!("Vec<{entry_name}>")
        }
    };

    let doc = match &component.kind {
        ComponentKind::Decimal { unit: Some(unit), .. } => {
            format!("{} (in {})", component.label, unit)
        }
        _ => component.label.clone(),
    };

    DataFieldDef {
        name: sanitize_rust_identifier(&snake_case_from_identifier(&component.identifier)),
        rename: component.identifier.clone(),
        ty,
        optional: component.is_nullable,
        doc,
    }
}

fn push_enum(
    model: &mut DataModel,
    enum_name: &str,
    component: &Component,
    options: &[crate::intermediate::SelectOption],
) {
    let variants = options
        .iter()
        .map(|option| DataEnumVariant {
            name: type_name_from_identifier(&option.identifier),
            rename: option.identifier.clone(),
        })
        .collect();
    model.enums.push(DataEnumDef {
        name: enum_name.to_string(),
        doc: format!("Option set of '{}'.", component.label),
        variants,
    });
}
