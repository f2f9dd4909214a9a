//! Merge staging: floor, cascade, provider expansion, schema check.

use crate::{
    config::{AttrValue, RawFieldDef},
    obs::{self, StripReason, WarnEvent},
    resolve::{FieldDescriptor, ResolutionContext, provider::ProviderRegistry},
};
use crudkit_schema::{
    node::{KindSchema, SchemaStore},
    types::{Facet, RenderKind},
};
use serde_json::Value;
use std::collections::BTreeMap;

const FACETS: [Facet; 3] = [Facet::List, Facet::Form, Facet::View];

pub(crate) fn merge_field(
    schema: &SchemaStore,
    providers: Option<&ProviderRegistry>,
    field: &str,
    ctx: &ResolutionContext,
    entity: Option<&RawFieldDef>,
    page: Option<&RawFieldDef>,
) -> FieldDescriptor {
    // Highest scope that declares a kind wins; every renderer supports Text.
    let kind = page
        .and_then(|def| def.kind)
        .or_else(|| entity.and_then(|def| def.kind))
        .unwrap_or(RenderKind::Text);

    let kind_schema = schema.get(kind);

    let mut facets = BTreeMap::new();
    for facet in FACETS {
        // Floor: applicable kind defaults, then entity and page overrides in
        // ascending precedence.
        let mut attrs = kind_schema.map(KindSchema::defaults).unwrap_or_default();
        for def in [entity, page].into_iter().flatten() {
            if let Some(overrides) = def.facets.get(&facet) {
                apply_overrides(&mut attrs, overrides);
            }
        }

        expand_providers(&mut attrs, providers, field, facet, ctx);
        enforce_schema(&mut attrs, kind_schema, field, facet);

        if !attrs.is_empty() {
            facets.insert(facet, attrs);
        }
    }

    // Formatter order is load-bearing: the highest scope that declares a
    // list replaces it wholesale, never a key-wise union.
    let formatters = page
        .and_then(|def| def.formatters.clone())
        .or_else(|| entity.and_then(|def| def.formatters.clone()))
        .unwrap_or_default();

    let mut validators = BTreeMap::new();
    for def in [entity, page].into_iter().flatten() {
        apply_overrides(&mut validators, &def.validators);
    }

    FieldDescriptor {
        name: field.to_string(),
        kind,
        facets,
        formatters,
        validators,
    }
}

// Per-key deep merge: a later source's explicit key replaces the earlier
// value; absent keys inherit; an explicit clear removes the key.
fn apply_overrides(attrs: &mut BTreeMap<String, Value>, overrides: &BTreeMap<String, AttrValue>) {
    for (name, value) in overrides {
        match value {
            AttrValue::Set(value) => {
                attrs.insert(name.clone(), value.clone());
            }
            AttrValue::Inapplicable => {
                attrs.remove(name);
            }
            AttrValue::Inherit => {}
        }
    }
}

// Replace `{"$provider": name}` references with the registered provider's
// output; strip references no provider answers for.
fn expand_providers(
    attrs: &mut BTreeMap<String, Value>,
    providers: Option<&ProviderRegistry>,
    field: &str,
    facet: Facet,
    ctx: &ResolutionContext,
) {
    let refs: Vec<(String, String)> = attrs
        .iter()
        .filter_map(|(name, value)| {
            provider_ref(value).map(|provider| (name.clone(), provider.to_string()))
        })
        .collect();

    for (name, provider_name) in refs {
        match providers.and_then(|registry| registry.get(&provider_name)) {
            Some(provider) => {
                attrs.insert(name, provider.provide(ctx));
            }
            None => {
                attrs.remove(&name);
                obs::record(&WarnEvent::ProviderMissing {
                    field: field.to_string(),
                    facet,
                    attribute: name,
                    provider: provider_name,
                });
            }
        }
    }
}

/// A `{"$provider": "<name>"}` single-key object is a provider reference.
fn provider_ref(value: &Value) -> Option<&str> {
    let map = value.as_object()?;
    if map.len() != 1 {
        return None;
    }
    map.get("$provider")?.as_str()
}

// Strip attributes the kind schema does not mark applicable, warning per
// strip; a descriptor must never carry an attribute its kind disallows.
fn enforce_schema(
    attrs: &mut BTreeMap<String, Value>,
    kind_schema: Option<&KindSchema>,
    field: &str,
    facet: Facet,
) {
    attrs.retain(|name, value| {
        let reason = match kind_schema.and_then(|schema| schema.get(name)) {
            None => StripReason::Unknown,
            Some(spec) if !spec.is_applicable() => StripReason::Inapplicable,
            Some(spec) if !spec.allowed.accepts(value) => StripReason::ValueRejected,
            Some(_) => return true,
        };

        obs::record(&WarnEvent::AttributeStripped {
            field: field.to_string(),
            facet,
            attribute: name.clone(),
            reason,
        });
        false
    });
}
