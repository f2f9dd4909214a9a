//! List/form/view page builders: the consumer surface of the core.
//!
//! A builder walks a page's declared field names, resolves each, extracts
//! its own facet plus the formatter chain, validates the chain, and repairs
//! the declared layout against the names that actually resolved. One
//! malformed field is skipped with a warning; only a strict-mode unsafe
//! formatter chain fails the whole page build.

use crate::{
    formatter::{ChainError, ChainWarning, FormatterCatalog, FormatterInvocation, validate_chain},
    layout::{LayoutSection, repair},
    obs::{self, WarnEvent},
    resolve::{CachedResolver, ResolutionContext, Resolver},
    strict::StrictMode,
};
use crudkit_schema::types::{Facet, RenderKind};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error as ThisError;

///
/// PageDef
///
/// Declarative description of one page: which fields to render, in which
/// order, and (optionally) how to group them.
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct PageDef {
    pub page_key: String,
    pub entity_name: String,
    pub fields: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<Vec<LayoutSection>>,
}

///
/// UiField
///
/// One renderable field: the builder's facet attributes plus the formatter
/// chain, with any lenient-mode chain warning attached.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UiField {
    pub name: String,
    pub kind: RenderKind,
    pub attrs: BTreeMap<String, Value>,
    pub formatters: Vec<FormatterInvocation>,
    pub validators: BTreeMap<String, Value>,
    pub chain_warning: Option<ChainWarning>,
}

///
/// UiPage
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UiPage {
    pub page_key: String,
    pub entity_name: String,
    pub fields: Vec<UiField>,
    pub layout: Option<Vec<LayoutSection>>,
}

///
/// PageError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum PageError {
    #[error(transparent)]
    Chain(#[from] ChainError),
}

///
/// PageBuilder
///

pub struct PageBuilder<'a> {
    facet: Facet,
    resolver: Resolver<'a>,
    catalog: &'a FormatterCatalog,
    mode: StrictMode,
}

impl<'a> PageBuilder<'a> {
    #[must_use]
    pub const fn new(
        facet: Facet,
        resolver: Resolver<'a>,
        catalog: &'a FormatterCatalog,
        mode: StrictMode,
    ) -> Self {
        Self {
            facet,
            resolver,
            catalog,
            mode,
        }
    }

    #[must_use]
    pub const fn list(
        resolver: Resolver<'a>,
        catalog: &'a FormatterCatalog,
        mode: StrictMode,
    ) -> Self {
        Self::new(Facet::List, resolver, catalog, mode)
    }

    #[must_use]
    pub const fn form(
        resolver: Resolver<'a>,
        catalog: &'a FormatterCatalog,
        mode: StrictMode,
    ) -> Self {
        Self::new(Facet::Form, resolver, catalog, mode)
    }

    #[must_use]
    pub const fn view(
        resolver: Resolver<'a>,
        catalog: &'a FormatterCatalog,
        mode: StrictMode,
    ) -> Self {
        Self::new(Facet::View, resolver, catalog, mode)
    }

    /// Assemble the final descriptor set for `page`.
    pub fn build(self, page: &PageDef) -> Result<UiPage, PageError> {
        let ctx = ResolutionContext::new(page.page_key.clone(), page.entity_name.clone());
        let resolver = CachedResolver::new(self.resolver, ctx);

        let mut resolved_names = BTreeSet::new();
        let mut fields = Vec::with_capacity(page.fields.len());

        for name in &page.fields {
            let descriptor = match resolver.resolve(name) {
                Ok(descriptor) => descriptor,
                Err(_) => {
                    // Field-scoped failure: skip, warn, keep building.
                    obs::record(&WarnEvent::FieldNotFound {
                        field: name.clone(),
                        page_key: page.page_key.clone(),
                        entity_name: page.entity_name.clone(),
                    });
                    continue;
                }
            };

            // Strict-mode unsafe chains are the one page-fatal error.
            let outcome = validate_chain(name, &descriptor.formatters, self.mode, self.catalog)?;

            resolved_names.insert(name.clone());
            fields.push(UiField {
                name: name.clone(),
                kind: descriptor.kind,
                attrs: descriptor.facet_attrs(self.facet),
                formatters: descriptor.formatters,
                validators: descriptor.validators,
                chain_warning: outcome.warning().cloned(),
            });
        }

        let layout = page
            .layout
            .as_ref()
            .map(|sections| repair(sections, &resolved_names));

        Ok(UiPage {
            page_key: page.page_key.clone(),
            entity_name: page.entity_name.clone(),
            fields,
            layout,
        })
    }
}
