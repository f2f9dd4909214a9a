//! ## Crate layout
//! - `config`: raw definition model and the scope-keyed loader boundary.
//! - `resolve`: the scope-cascade engine producing field descriptors.
//! - `layout`: declared-layout consistency repair.
//! - `formatter`: formatter invocations and chain safety validation.
//! - `builder`: list/form/view page builders consuming the core.
//! - `obs`: injected warning sink and process-local counters.
//! - `strict`: process-wide formatter strictness.

pub mod builder;
pub mod config;
pub mod formatter;
pub mod layout;
pub mod obs;
pub mod resolve;
pub mod strict;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        builder::{PageBuilder, PageDef, PageError, UiField, UiPage},
        config::{AttrValue, ConfigSet, ConfigSource, InMemorySource, RawFieldDef, ScopeConfig},
        formatter::{
            ChainError, ChainOutcome, ChainWarning, FormatterCatalog, FormatterCategory,
            FormatterInvocation, validate_chain,
        },
        layout::{LayoutSection, repair},
        obs::{StripReason, WarnEvent, WarnSink, with_warn_sink},
        resolve::{
            CachedResolver, FieldDescriptor, OptionsProvider, ProviderRegistry, ResolutionContext,
            ResolveError, Resolver,
        },
        strict::{StrictMode, set_strict_mode, strict_mode},
    };
    pub use crudkit_schema::prelude::*;
}
