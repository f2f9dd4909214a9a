pub mod build;
pub mod error;
pub mod node;
pub mod types;
pub mod validate;
pub mod visit;

/// Maximum length for attribute schema identifiers.
pub const MAX_ATTR_NAME_LEN: usize = 64;

/// Maximum length for field identifiers referenced from configuration.
pub const MAX_FIELD_NAME_LEN: usize = 64;

use crate::build::BuildError;
use thiserror::Error as ThisError;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        err,
        error::ErrorTree,
        node::*,
        types::{AttrType, Facet, RenderKind},
        visit::Visitor,
    };
    pub use serde::{Deserialize, Serialize};
}

///
/// Error
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    BuildError(#[from] BuildError),
}
