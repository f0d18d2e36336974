use std::fmt;

/// Fatal structural error while building or editing the intermediate
/// representation.
///
/// These unwind the whole compilation of the current framework: they
/// indicate a malformed template or a broken programmatic customization,
/// not a recoverable anomaly (those go through the diagnostics collector).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntermediateError {
    /// A second node with the same identifier was created under one parent.
    IdentifierAlreadyInUse {
        /// The colliding identifier
        identifier: String,
    },
    /// An edit/delete/get referenced an identifier that does not exist.
    UnknownIdentifier {
        /// The identifier that was looked up
        identifier: String,
    },
    /// A typed accessor found a node of the wrong variant.
    ComponentTypeMismatch {
        /// The identifier that was looked up
        identifier: String,
        /// Variant name of the node actually found
        actual: String,
        /// Variant name the caller expected
        expected: String,
    },
    /// A dependency declaration referenced a component that is not present
    /// in the already-built part of the tree.
    UnresolvedDependency {
        /// Identifier of the component declaring the dependency
        referencing: String,
        /// Identifier the declaration pointed at
        referenced: String,
    },
}

impl fmt::Display for IntermediateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntermediateError::IdentifierAlreadyInUse { identifier } => {
                write!(f, "identifier already in use: '{}'", identifier)
            }
            IntermediateError::UnknownIdentifier { identifier } => {
                write!(f, "unknown identifier: '{}'", identifier)
            }
            IntermediateError::ComponentTypeMismatch {
                identifier,
                actual,
                expected,
            } => {
                write!(
                    f,
                    "component '{}' is a {}, expected a {}",
                    identifier, actual, expected
                )
            }
            IntermediateError::UnresolvedDependency {
                referencing,
                referenced,
            } => {
                write!(
                    f,
                    "component '{}' depends on '{}', which does not exist in the already-built tree",
                    referencing, referenced
                )
            }
        }
    }
}

impl std::error::Error for IntermediateError {}
