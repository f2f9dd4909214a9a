//! ## Crate layout
//! - `base`: builtin base attribute schemas for the stock rendering kinds.
//! - `core`: the cascade engine, layout repair, formatter validation, and
//!   the list/form/view page builders.
//! - `schema`: attribute schema store, nodes, and validation.
//!
//! The `prelude` module mirrors the surface a host application wires up at
//! startup: register schemas, point the engine at config sources, build
//! pages.

pub use crudkit_core as core;
pub use crudkit_schema as schema;

pub mod base;

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Prelude
///

pub mod prelude {
    pub use crate::base;
    pub use crate::core::prelude::*;
    pub use crate::schema::build::{get_store, store_write};
}
