//! Template loading and IR construction.
//!
//! A framework template is a tabular file, one logical row per field. The
//! loader ([`load`]) turns the raw CSV into an ordered sequence of
//! [`TemplateRow`] records and performs structural validation only; all
//! semantic decisions happen later, in the factory dispatch
//! ([`factory`]) and the row-walking builder ([`builder`]) that assemble
//! the intermediate representation.

mod builder;
mod factory;
mod generation;
mod load;
mod types;

pub use builder::*;
pub use factory::*;
pub use generation::*;
pub use load::*;
pub use types::*;
