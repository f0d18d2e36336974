//! The intermediate representation shared by all generators.
//!
//! A compiled template becomes one [`Framework`]: a tree of
//! [`ComponentGroup`] nodes (sections and subsections) whose leaves are
//! [`Component`]s (single questions/fields). The tree is built once by
//! `template::builder`, optionally customized through the group editing
//! API, and then read (never mutated) by the three generators.
//!
//! Component kinds are a closed enum ([`ComponentKind`]); there is no
//! runtime type discovery anywhere. Dependencies between components are
//! stored as identifier paths ([`ComponentPath`]) and resolved by lookup,
//! which keeps ownership a strict tree.

mod component;
mod conditional;
mod error;
mod framework;
mod group;

pub use component::*;
pub use conditional::*;
pub use error::*;
pub use framework::*;
pub use group::*;
