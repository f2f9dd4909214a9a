//! The scope-cascade engine.
//!
//! `resolve` merges a field's definition across three sources in ascending
//! precedence: kind-schema defaults (the floor), the entity-scope raw
//! definition, then the page-scope raw definition. Merging is per facet and
//! per attribute key; `formatters` is the one list that replaces wholesale
//! because its order is load-bearing.

mod cache;
mod merge;
mod provider;

pub use cache::CachedResolver;
pub use provider::{OptionsProvider, ProviderRegistry};

use crate::{config::ConfigSet, formatter::FormatterInvocation};
use crudkit_schema::{
    node::SchemaStore,
    types::{Facet, RenderKind},
};
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error as ThisError;

///
/// ResolutionContext
///
/// Immutable `(page_key, entity_name)` pair identifying where a field is
/// being resolved. Passed explicitly to every call; carries no behavior.
///

#[derive(Clone, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub struct ResolutionContext {
    pub page_key: String,
    pub entity_name: String,
}

impl ResolutionContext {
    #[must_use]
    pub fn new(page_key: impl Into<String>, entity_name: impl Into<String>) -> Self {
        Self {
            page_key: page_key.into(),
            entity_name: entity_name.into(),
        }
    }
}

///
/// FieldDescriptor
///
/// The fully merged, scope-resolved result for one field within one
/// resolution context. Every facet attribute present here is applicable for
/// `kind` per the schema store.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FieldDescriptor {
    pub name: String,
    pub kind: RenderKind,
    pub facets: BTreeMap<Facet, BTreeMap<String, Value>>,
    pub formatters: Vec<FormatterInvocation>,
    pub validators: BTreeMap<String, Value>,
}

impl FieldDescriptor {
    /// The merged attributes for one facet; empty if none resolved.
    #[must_use]
    pub fn facet_attrs(&self, facet: Facet) -> BTreeMap<String, Value> {
        self.facets.get(&facet).cloned().unwrap_or_default()
    }
}

///
/// ResolveError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ResolveError {
    #[error(
        "field `{field}` has no definition in any scope (page `{page_key}`, entity `{entity_name}`)"
    )]
    NotFound {
        field: String,
        page_key: String,
        entity_name: String,
    },
}

///
/// Resolver
///
/// Pure cascade resolution over read-only inputs; safe to call repeatedly
/// for the same `(field, context)` without memoization. See
/// [`CachedResolver`] for the per-request memo.
///

pub struct Resolver<'a> {
    schema: &'a SchemaStore,
    config: &'a ConfigSet,
    providers: Option<&'a ProviderRegistry>,
}

impl<'a> Resolver<'a> {
    #[must_use]
    pub const fn new(schema: &'a SchemaStore, config: &'a ConfigSet) -> Self {
        Self {
            schema,
            config,
            providers: None,
        }
    }

    #[must_use]
    pub const fn with_providers(mut self, providers: &'a ProviderRegistry) -> Self {
        self.providers = Some(providers);
        self
    }

    /// Resolve one field within `ctx`, or fail with `NotFound` if no scope
    /// declares it. The caller is expected to log and skip on `NotFound`;
    /// substituting a default shape would hide real misconfiguration.
    pub fn resolve(
        &self,
        field: &str,
        ctx: &ResolutionContext,
    ) -> Result<FieldDescriptor, ResolveError> {
        let entity = self.config.entity_def(&ctx.entity_name, field);
        let page = self.config.page_def(&ctx.page_key, field);

        if entity.is_none() && page.is_none() {
            return Err(ResolveError::NotFound {
                field: field.to_string(),
                page_key: ctx.page_key.clone(),
                entity_name: ctx.entity_name.clone(),
            });
        }

        Ok(merge::merge_field(
            self.schema,
            self.providers,
            field,
            ctx,
            entity,
            page,
        ))
    }
}
