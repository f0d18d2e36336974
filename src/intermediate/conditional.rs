use std::fmt;

/// Identifier path of a component, from the framework root down to the
/// component itself (root excluded).
///
/// Paths are the only way nodes refer to each other: the tree owns its
/// children exclusively, and cross-references are resolved by walking the
/// path, so no reference cycles can form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentPath(Vec<String>);

impl ComponentPath {
    pub fn new(segments: Vec<String>) -> Self {
        ComponentPath(segments)
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Identifier of the component the path points at.
    pub fn leaf(&self) -> &str {
        self.0.last().map(String::as_str).unwrap_or("")
    }
}

impl fmt::Display for ComponentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}

/// A portable boolean expression deciding whether a component is shown.
///
/// Conditionals are attached to IR nodes during the build and compiled
/// lazily by each generator into its own executable form (the view-config
/// generator renders TypeScript, for example). A conditional may only
/// reference components that were already present in the tree when it was
/// resolved: the builder wires dependencies during its single forward row
/// walk, so a forward reference cannot be constructed in the first place.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameworkConditional {
    /// The component is always shown.
    AlwaysTrue,
    /// Shown iff the referenced component's resolved value equals `value`.
    /// An absent value never equals anything.
    DependsOnComponentValue {
        target: ComponentPath,
        value: String,
    },
    /// Shown iff either referenced numeric value is at least `threshold`.
    ///
    /// Fixed special case, not a general comparison grammar; only
    /// constructible programmatically.
    EitherValueAtLeast {
        first: ComponentPath,
        second: ComponentPath,
        threshold: f64,
    },
}

impl FrameworkConditional {
    pub fn is_always_true(&self) -> bool {
        matches!(self, FrameworkConditional::AlwaysTrue)
    }

    /// Paths of all components this conditional reads.
    pub fn referenced_paths(&self) -> Vec<&ComponentPath> {
        match self {
            FrameworkConditional::AlwaysTrue => vec![],
            FrameworkConditional::DependsOnComponentValue { target, .. } => vec![target],
            FrameworkConditional::EitherValueAtLeast { first, second, .. } => {
                vec![first, second]
            }
        }
    }
}

impl Default for FrameworkConditional {
    fn default() -> Self {
        FrameworkConditional::AlwaysTrue
    }
}
