//! # frameforge
//!
//! **frameforge** is a template-driven, multi-target code generator: it
//! compiles a declarative, spreadsheet-style description of a business data
//! schema (a "framework template") into several generated artifacts, all
//! derived from one shared intermediate representation.
//!
//! ## Architecture
//!
//! The pipeline is a single-threaded, synchronous compiler per framework:
//!
//! ```text
//! template CSV → TemplateRow sequence → Framework IR → ┬→ Rust data model
//!                                                      ├→ TS view configuration
//!                                                      └→ TS fixture generators
//! ```
//!
//! - **[`template`]** - CSV loading, the ordered component-factory
//!   registry, and the row-walking IR builder
//! - **[`intermediate`]** - the shared IR: `Framework`, `ComponentGroup`,
//!   `Component`, `FrameworkConditional`
//! - **[`diagnostics`]** - per-compilation collector of suppressible
//!   warnings/errors, asserted at checkpoints
//! - **[`generator`]** - the three artifact backends, Askama-based
//!   rendering, and the `compile_framework` orchestration
//! - **[`config`]** - per-framework YAML definition files
//! - **[`naming`]** - label-to-identifier transforms
//! - **[`cli`]** - the `frameforge-gen` command line
//!
//! Data flows strictly forward and the output is deterministic: compiling
//! the same template twice yields byte-identical artifacts. Multiple
//! frameworks can be compiled concurrently as long as each compilation owns
//! its own `Framework` and `DiagnosticCollector`; nothing in this crate is
//! shared mutable state.
//!
//! ## Example
//!
//! ```no_run
//! use frameforge::config::FrameworkDefinition;
//! use frameforge::generator::{compile_framework, TargetRepository};
//!
//! # fn main() -> anyhow::Result<()> {
//! let definition = FrameworkDefinition::from_file("inputs/demo/framework.yaml".as_ref())?;
//! let repository = TargetRepository::new("target-repo");
//! let compiled = compile_framework(&definition, &repository)?;
//! println!("wrote {} files", compiled.written_files.len());
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod generator;
pub mod intermediate;
pub mod naming;
pub mod template;

pub use config::FrameworkDefinition;
pub use diagnostics::{Diagnostic, DiagnosticCollector, Severity};
pub use generator::{compile_framework, CompiledFramework, TargetRepository};
pub use intermediate::{
    Component, ComponentGroup, ComponentKind, ComponentNode, ComponentPath, DocumentSupport,
    Framework, FrameworkConditional, IntermediateError,
};
pub use template::{
    ComponentFactory, FactoryRegistry, GenerationUtils, TemplateComponentBuilder, TemplateFile,
    TemplateRow, UnknownRowPolicy,
};
