use crate::{MAX_ATTR_NAME_LEN, prelude::*};
use serde_json::Value;

///
/// Allowed
///
/// Legal value space for one attribute on one rendering kind.
/// `Inapplicable` means the attribute is explicitly illegal for the kind,
/// not merely unset; it must never survive into a resolved descriptor.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Allowed {
    Enumerated(Vec<Value>),
    Typed(AttrType),
    Inapplicable,
}

impl Allowed {
    /// Whether `value` is acceptable under this constraint.
    #[must_use]
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            Self::Enumerated(values) => values.contains(value),
            Self::Typed(ty) => ty.matches(value),
            Self::Inapplicable => false,
        }
    }
}

///
/// AttributeSpec
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct AttributeSpec {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,

    pub allowed: Allowed,
}

impl AttributeSpec {
    #[must_use]
    pub fn new(name: impl Into<String>, allowed: Allowed) -> Self {
        Self {
            name: name.into(),
            default: None,
            allowed,
        }
    }

    #[must_use]
    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    #[must_use]
    pub const fn is_applicable(&self) -> bool {
        !matches!(self.allowed, Allowed::Inapplicable)
    }
}

impl ValidateNode for AttributeSpec {
    fn validate(&self) -> Result<(), ErrorTree> {
        let mut errs = ErrorTree::new();

        if self.name.is_empty() {
            err!(errs, "attribute name must not be empty");
        } else if self.name.len() > MAX_ATTR_NAME_LEN {
            err!(
                errs,
                "attribute name `{}` exceeds {} characters",
                self.name,
                MAX_ATTR_NAME_LEN
            );
        }

        match (&self.allowed, &self.default) {
            (Allowed::Inapplicable, Some(_)) => {
                err!(
                    errs,
                    "attribute `{}` is inapplicable and cannot carry a default",
                    self.name
                );
            }
            (allowed, Some(default)) if !allowed.accepts(default) => {
                err!(
                    errs,
                    "default {} for attribute `{}` violates its allowed values",
                    default,
                    self.name
                );
            }
            _ => {}
        }

        errs.result()
    }
}

impl VisitableNode for AttributeSpec {
    fn route_key(&self) -> String {
        self.name.clone()
    }
}
