//! Raw, unmerged field definitions and the scope-keyed loader boundary.
//!
//! Three logical scopes feed resolution: the base kind schema
//! (`crudkit_schema::SchemaStore`), entity-scope definitions keyed by entity
//! name, and page-scope definitions keyed by page key. The concrete storage
//! backing an entity/page scope is the collaborator's concern; this module
//! only requires [`ConfigSource::load`].

mod in_memory;

pub use in_memory::InMemorySource;

use crate::formatter::FormatterInvocation;
use crudkit_schema::types::{Facet, RenderKind};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;

///
/// AttrValue
///
/// Tagged merge-source value. `Inherit` never appears in a loaded map (it is
/// represented by key absence); JSON `null` loads as `Inapplicable`, an
/// explicit clear that removes the key from lower scopes during merge.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AttrValue {
    Set(Value),
    Inherit,
    Inapplicable,
}

impl Serialize for AttrValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Set(value) => value.serialize(serializer),
            Self::Inherit | Self::Inapplicable => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for AttrValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(if value.is_null() {
            Self::Inapplicable
        } else {
            Self::Set(value)
        })
    }
}

///
/// RawFieldDef
///
/// Scope-local, partial definition of one field. Immutable once loaded.
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RawFieldDef {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<RenderKind>,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub facets: BTreeMap<Facet, BTreeMap<String, AttrValue>>,

    /// `None` inherits the lower scope's list; `Some` replaces it wholesale.
    /// Formatter order is load-bearing, so partial merges are not offered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatters: Option<Vec<FormatterInvocation>>,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub validators: BTreeMap<String, AttrValue>,
}

/// All raw definitions declared for one scope, keyed by field name.
pub type ScopeConfig = BTreeMap<String, RawFieldDef>;

///
/// ConfigSource
///

pub trait ConfigSource {
    /// The raw definitions declared for `scope_key`, or `None` if the scope
    /// declares nothing.
    fn load(&self, scope_key: &str) -> Option<&ScopeConfig>;
}

///
/// ConfigSet
///
/// The entity- and page-scope sources resolution draws from.
///

pub struct ConfigSet {
    entity: Box<dyn ConfigSource>,
    page: Box<dyn ConfigSource>,
}

impl ConfigSet {
    #[must_use]
    pub fn new(entity: impl ConfigSource + 'static, page: impl ConfigSource + 'static) -> Self {
        Self {
            entity: Box::new(entity),
            page: Box::new(page),
        }
    }

    #[must_use]
    pub fn entity_def(&self, entity_name: &str, field: &str) -> Option<&RawFieldDef> {
        self.entity.load(entity_name)?.get(field)
    }

    #[must_use]
    pub fn page_def(&self, page_key: &str, field: &str) -> Option<&RawFieldDef> {
        self.page.load(page_key)?.get(field)
    }
}
