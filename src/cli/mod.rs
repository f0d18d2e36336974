//! Command-line interface for the `frameforge-gen` binary.
//!
//! Commands:
//!
//! - `generate` - compile a framework definition into the target repository
//! - `lint` - build the IR and print collected diagnostics, writing nothing
//! - `inspect` - print the IR tree of a framework definition
//!
//! ```bash
//! frameforge-gen generate --config inputs/gdv/framework.yaml --repository .
//! frameforge-gen lint --config inputs/gdv/framework.yaml --fail-on-error
//! frameforge-gen inspect --config inputs/gdv/framework.yaml
//! ```

mod commands;


pub use commands::{run_cli, Cli, Commands};
