use derive_more::{Display, FromStr};
use serde::{Deserialize, Serialize};
use serde_json::Value;

///
/// RenderKind
///
/// Closed set of field rendering kinds a UI surface knows how to paint.
///

#[derive(
    Clone, Copy, Debug, Default, Deserialize, Display, Eq, FromStr, Ord, PartialEq, PartialOrd,
    Serialize,
)]
#[serde(rename_all = "snake_case")]
#[remain::sorted]
pub enum RenderKind {
    Checkbox,
    Date,
    File,
    Hidden,
    Number,
    Select,
    #[default]
    Text,
    Textarea,
}

///
/// Facet
///
/// Per-surface attribute group on a field definition. Formatters and
/// validators are not facets; they merge with different rules.
///

#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, FromStr, Ord, PartialEq, PartialOrd, Serialize,
)]
#[serde(rename_all = "snake_case")]
#[remain::sorted]
pub enum Facet {
    Form,
    List,
    View,
}

///
/// AttrType
///
/// Type tag constraining the JSON shape of an attribute value.
///

#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, FromStr, Ord, PartialEq, PartialOrd, Serialize,
)]
#[serde(rename_all = "snake_case")]
#[remain::sorted]
pub enum AttrType {
    Bool,
    Int,
    List,
    Map,
    Number,
    Text,
}

impl AttrType {
    /// Whether `value` satisfies this type tag.
    #[must_use]
    pub fn matches(self, value: &Value) -> bool {
        match self {
            Self::Bool => value.is_boolean(),
            Self::Int => value.is_i64() || value.is_u64(),
            Self::List => value.is_array(),
            Self::Map => value.is_object(),
            Self::Number => value.is_number(),
            Self::Text => value.is_string(),
        }
    }
}
