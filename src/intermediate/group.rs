use super::{Component, ComponentPath, FrameworkConditional, IntermediateError};

/// A node of the IR tree: either a nested group or a leaf component.
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentNode {
    Group(ComponentGroup),
    Field(Component),
}

impl ComponentNode {
    pub fn identifier(&self) -> &str {
        match self {
            ComponentNode::Group(g) => &g.identifier,
            ComponentNode::Field(c) => &c.identifier,
        }
    }

    /// Variant name used in type-mismatch error messages.
    pub fn variant_name(&self) -> &'static str {
        match self {
            ComponentNode::Group(_) => "ComponentGroup",
            ComponentNode::Field(c) => c.kind.variant_name(),
        }
    }
}

/// A section or subsection owning an ordered set of children.
///
/// Children are appended in build order and that order is preserved all the
/// way into the generated artifacts. Identifiers are unique among the
/// children of one group; `create` fails on a collision, and `edit`/`delete`
/// fail on an unknown identifier, each with a named error.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentGroup {
    pub identifier: String,
    pub label: String,
    /// A nullable group makes every accessor path through it null-safe.
    pub is_nullable: bool,
    /// Whether the view page renders this section expanded initially.
    pub view_page_expand_on_load: bool,
    pub available_if: FrameworkConditional,
    children: Vec<ComponentNode>,
}

impl ComponentGroup {
    pub fn new(identifier: impl Into<String>, label: impl Into<String>) -> Self {
        ComponentGroup {
            identifier: identifier.into(),
            label: label.into(),
            is_nullable: true,
            view_page_expand_on_load: false,
            available_if: FrameworkConditional::AlwaysTrue,
            children: Vec::new(),
        }
    }

    pub fn children(&self) -> &[ComponentNode] {
        &self.children
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn get(&self, identifier: &str) -> Option<&ComponentNode> {
        self.children.iter().find(|c| c.identifier() == identifier)
    }

    fn assert_identifier_free(&self, identifier: &str) -> Result<(), IntermediateError> {
        if self.get(identifier).is_some() {
            return Err(IntermediateError::IdentifierAlreadyInUse {
                identifier: identifier.to_string(),
            });
        }
        Ok(())
    }

    /// Append a leaf component. Fails if the identifier is taken.
    pub fn create_field(&mut self, component: Component) -> Result<(), IntermediateError> {
        self.assert_identifier_free(&component.identifier)?;
        self.children.push(ComponentNode::Field(component));
        Ok(())
    }

    /// Append a nested group. Fails if the identifier is taken.
    pub fn create_group(&mut self, group: ComponentGroup) -> Result<(), IntermediateError> {
        self.assert_identifier_free(&group.identifier)?;
        self.children.push(ComponentNode::Group(group));
        Ok(())
    }

    /// Find a child group by identifier, creating it on first reference.
    ///
    /// Fails with `IdentifierAlreadyInUse` if a leaf component already
    /// claims the identifier.
    pub fn get_or_create_group(
        &mut self,
        identifier: &str,
        label: &str,
    ) -> Result<&mut ComponentGroup, IntermediateError> {
        match self.children.iter().position(|c| c.identifier() == identifier) {
            Some(pos) => match &mut self.children[pos] {
                ComponentNode::Group(g) => Ok(g),
                ComponentNode::Field(_) => Err(IntermediateError::IdentifierAlreadyInUse {
                    identifier: identifier.to_string(),
                }),
            },
            None => {
                self.children
                    .push(ComponentNode::Group(ComponentGroup::new(identifier, label)));
                match self.children.last_mut() {
                    Some(ComponentNode::Group(g)) => Ok(g),
                    _ => unreachable!("group was just pushed"),
                }
            }
        }
    }

    /// Typed leaf accessor. Fails on unknown identifiers and on groups.
    pub fn field(&self, identifier: &str) -> Result<&Component, IntermediateError> {
        match self.get(identifier) {
            Some(ComponentNode::Field(c)) => Ok(c),
            Some(node) => Err(IntermediateError::ComponentTypeMismatch {
                identifier: identifier.to_string(),
                actual: node.variant_name().to_string(),
                expected: "leaf component".to_string(),
            }),
            None => Err(IntermediateError::UnknownIdentifier {
                identifier: identifier.to_string(),
            }),
        }
    }

    /// Typed group accessor. Fails on unknown identifiers and on leaves.
    pub fn group(&self, identifier: &str) -> Result<&ComponentGroup, IntermediateError> {
        match self.get(identifier) {
            Some(ComponentNode::Group(g)) => Ok(g),
            Some(node) => Err(IntermediateError::ComponentTypeMismatch {
                identifier: identifier.to_string(),
                actual: node.variant_name().to_string(),
                expected: "ComponentGroup".to_string(),
            }),
            None => Err(IntermediateError::UnknownIdentifier {
                identifier: identifier.to_string(),
            }),
        }
    }

    /// Edit a leaf component in place.
    pub fn edit_field(
        &mut self,
        identifier: &str,
        edit: impl FnOnce(&mut Component),
    ) -> Result<(), IntermediateError> {
        match self.children.iter_mut().find(|c| c.identifier() == identifier) {
            Some(ComponentNode::Field(c)) => {
                edit(c);
                Ok(())
            }
            Some(node) => Err(IntermediateError::ComponentTypeMismatch {
                identifier: identifier.to_string(),
                actual: node.variant_name().to_string(),
                expected: "leaf component".to_string(),
            }),
            None => Err(IntermediateError::UnknownIdentifier {
                identifier: identifier.to_string(),
            }),
        }
    }

    /// Edit a nested group in place.
    pub fn edit_group(
        &mut self,
        identifier: &str,
        edit: impl FnOnce(&mut ComponentGroup),
    ) -> Result<(), IntermediateError> {
        match self.children.iter_mut().find(|c| c.identifier() == identifier) {
            Some(ComponentNode::Group(g)) => {
                edit(g);
                Ok(())
            }
            Some(node) => Err(IntermediateError::ComponentTypeMismatch {
                identifier: identifier.to_string(),
                actual: node.variant_name().to_string(),
                expected: "ComponentGroup".to_string(),
            }),
            None => Err(IntermediateError::UnknownIdentifier {
                identifier: identifier.to_string(),
            }),
        }
    }

    /// Remove and return a child by identifier.
    pub fn delete(&mut self, identifier: &str) -> Result<ComponentNode, IntermediateError> {
        match self.children.iter().position(|c| c.identifier() == identifier) {
            Some(pos) => Ok(self.children.remove(pos)),
            None => Err(IntermediateError::UnknownIdentifier {
                identifier: identifier.to_string(),
            }),
        }
    }

    /// Pre-order search for a leaf component with the given identifier in
    /// this subtree. Returns its path relative to this group.
    pub fn find_field_path(&self, identifier: &str) -> Option<ComponentPath> {
        fn walk(group: &ComponentGroup, identifier: &str, prefix: &mut Vec<String>) -> bool {
            for child in group.children() {
                match child {
                    ComponentNode::Field(c) => {
                        if c.identifier == identifier {
                            prefix.push(c.identifier.clone());
                            return true;
                        }
                    }
                    ComponentNode::Group(g) => {
                        prefix.push(g.identifier.clone());
                        if walk(g, identifier, prefix) {
                            return true;
                        }
                        prefix.pop();
                    }
                }
            }
            false
        }
        let mut prefix = Vec::new();
        if walk(self, identifier, &mut prefix) {
            Some(ComponentPath::new(prefix))
        } else {
            None
        }
    }

    /// Resolve a path to the node it points at, relative to this group.
    pub fn node_at(&self, path: &ComponentPath) -> Option<&ComponentNode> {
        let mut group = self;
        let segments = path.segments();
        for (i, segment) in segments.iter().enumerate() {
            let node = group.get(segment)?;
            if i + 1 == segments.len() {
                return Some(node);
            }
            match node {
                ComponentNode::Group(g) => group = g,
                ComponentNode::Field(_) => return None,
            }
        }
        None
    }

    /// Resolve a path to a leaf component, mutably.
    pub fn field_at_mut(
        &mut self,
        path: &ComponentPath,
    ) -> Result<&mut Component, IntermediateError> {
        let segments = path.segments();
        let (leaf, groups) = match segments.split_last() {
            Some(split) => split,
            None => {
                return Err(IntermediateError::UnknownIdentifier {
                    identifier: String::new(),
                })
            }
        };
        let mut group = self;
        for segment in groups {
            group = match group
                .children
                .iter_mut()
                .find(|c| c.identifier() == segment.as_str())
            {
                Some(ComponentNode::Group(g)) => g,
                _ => {
                    return Err(IntermediateError::UnknownIdentifier {
                        identifier: segment.clone(),
                    })
                }
            };
        }
        match group
            .children
            .iter_mut()
            .find(|c| c.identifier() == leaf.as_str())
        {
            Some(ComponentNode::Field(c)) => Ok(c),
            Some(node) => Err(IntermediateError::ComponentTypeMismatch {
                identifier: leaf.clone(),
                actual: node.variant_name().to_string(),
                expected: "leaf component".to_string(),
            }),
            None => Err(IntermediateError::UnknownIdentifier {
                identifier: leaf.clone(),
            }),
        }
    }

    /// Resolve a dot-separated path ("general.masterData") to a nested
    /// group, mutably. Used by configuration-driven group edits.
    pub fn group_at_mut(&mut self, path: &str) -> Result<&mut ComponentGroup, IntermediateError> {
        let mut group = self;
        for segment in path.split('.').filter(|s| !s.is_empty()) {
            group = match group
                .children
                .iter_mut()
                .find(|c| c.identifier() == segment)
            {
                Some(ComponentNode::Group(g)) => g,
                Some(node) => {
                    return Err(IntermediateError::ComponentTypeMismatch {
                        identifier: segment.to_string(),
                        actual: node.variant_name().to_string(),
                        expected: "ComponentGroup".to_string(),
                    })
                }
                None => {
                    return Err(IntermediateError::UnknownIdentifier {
                        identifier: segment.to_string(),
                    })
                }
            };
        }
        Ok(group)
    }

    /// All leaf components of this subtree with their relative paths, in
    /// build order.
    pub fn nested_fields(&self) -> Vec<(ComponentPath, &Component)> {
        fn walk<'a>(
            group: &'a ComponentGroup,
            prefix: &mut Vec<String>,
            out: &mut Vec<(ComponentPath, &'a Component)>,
        ) {
            for child in group.children() {
                match child {
                    ComponentNode::Field(c) => {
                        let mut path = prefix.clone();
                        path.push(c.identifier.clone());
                        out.push((ComponentPath::new(path), c));
                    }
                    ComponentNode::Group(g) => {
                        prefix.push(g.identifier.clone());
                        walk(g, prefix, out);
                        prefix.pop();
                    }
                }
            }
        }
        let mut out = Vec::new();
        walk(self, &mut Vec::new(), &mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intermediate::ComponentKind;

    fn field(id: &str) -> Component {
        Component::new(id, id, ComponentKind::Date)
    }

    #[test]
    fn test_duplicate_identifier_rejected() {
        let mut group = ComponentGroup::new("root", "Root");
        group.create_field(field("a")).unwrap();
        let err = group.create_field(field("a")).unwrap_err();
        assert_eq!(
            err,
            IntermediateError::IdentifierAlreadyInUse {
                identifier: "a".to_string()
            }
        );
        assert!(err.to_string().contains("'a'"));
    }

    #[test]
    fn test_get_or_create_group_caches() {
        let mut group = ComponentGroup::new("root", "Root");
        group.get_or_create_group("general", "General").unwrap();
        group.get_or_create_group("general", "General").unwrap();
        assert_eq!(group.children().len(), 1);
    }

    #[test]
    fn test_group_identifier_collides_with_field() {
        let mut group = ComponentGroup::new("root", "Root");
        group.create_field(field("general")).unwrap();
        let err = group.get_or_create_group("general", "General").unwrap_err();
        assert!(matches!(
            err,
            IntermediateError::IdentifierAlreadyInUse { .. }
        ));
    }

    #[test]
    fn test_edit_unknown_identifier() {
        let mut group = ComponentGroup::new("root", "Root");
        let err = group.edit_field("missing", |_| {}).unwrap_err();
        assert_eq!(
            err,
            IntermediateError::UnknownIdentifier {
                identifier: "missing".to_string()
            }
        );
    }

    #[test]
    fn test_edit_type_mismatch_names_both_variants() {
        let mut group = ComponentGroup::new("root", "Root");
        group
            .create_group(ComponentGroup::new("general", "General"))
            .unwrap();
        let err = group.edit_field("general", |_| {}).unwrap_err();
        match err {
            IntermediateError::ComponentTypeMismatch {
                identifier,
                actual,
                expected,
            } => {
                assert_eq!(identifier, "general");
                assert_eq!(actual, "ComponentGroup");
                assert_eq!(expected, "leaf component");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_delete() {
        let mut group = ComponentGroup::new("root", "Root");
        group.create_field(field("a")).unwrap();
        assert!(group.delete("a").is_ok());
        assert!(group.delete("a").is_err());
        assert!(group.is_empty());
    }

    #[test]
    fn test_find_field_path() {
        let mut root = ComponentGroup::new("root", "Root");
        let general = root.get_or_create_group("general", "General").unwrap();
        let basics = general.get_or_create_group("basics", "Basics").unwrap();
        basics.create_field(field("revenue")).unwrap();

        let path = root.find_field_path("revenue").unwrap();
        assert_eq!(path.to_string(), "general.basics.revenue");
        assert!(root.find_field_path("missing").is_none());
        assert!(root.node_at(&path).is_some());
    }

    #[test]
    fn test_group_at_mut() {
        let mut root = ComponentGroup::new("root", "Root");
        root.get_or_create_group("general", "General")
            .unwrap()
            .get_or_create_group("masterData", "Master Data")
            .unwrap();
        assert!(root.group_at_mut("general.masterData").is_ok());
        assert!(root.group_at_mut("general.missing").is_err());
    }

    #[test]
    fn test_nested_fields_build_order() {
        let mut root = ComponentGroup::new("root", "Root");
        let general = root.get_or_create_group("general", "General").unwrap();
        general.create_field(field("first")).unwrap();
        general.create_field(field("second")).unwrap();
        let fields = root.nested_fields();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].1.identifier, "first");
        assert_eq!(fields[1].1.identifier, "second");
    }
}
