use crate::prelude::*;
use serde_json::Value;
use std::collections::BTreeMap;

///
/// KindSchema
///
/// The legal attribute set for one rendering kind. Attribute order is
/// declaration order; lookups go by name.
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct KindSchema {
    pub kind: RenderKind,
    pub attributes: Vec<AttributeSpec>,
}

impl KindSchema {
    #[must_use]
    pub const fn new(kind: RenderKind) -> Self {
        Self {
            kind,
            attributes: Vec::new(),
        }
    }

    #[must_use]
    pub fn attr(mut self, spec: AttributeSpec) -> Self {
        self.attributes.push(spec);
        self
    }

    // get
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&AttributeSpec> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Defaults declared for applicable attributes, keyed by name.
    #[must_use]
    pub fn defaults(&self) -> BTreeMap<String, Value> {
        self.attributes
            .iter()
            .filter(|a| a.is_applicable())
            .filter_map(|a| a.default.clone().map(|d| (a.name.clone(), d)))
            .collect()
    }
}

impl ValidateNode for KindSchema {
    fn validate(&self) -> Result<(), ErrorTree> {
        let mut errs = ErrorTree::new();
        let mut seen = BTreeMap::<&str, usize>::new();

        for (index, spec) in self.attributes.iter().enumerate() {
            if let Some(prev) = seen.insert(spec.name.as_str(), index) {
                err!(
                    errs,
                    "duplicate attribute `{}` for kind `{}` at positions {} and {}",
                    spec.name,
                    self.kind,
                    prev,
                    index
                );
            }
        }

        errs.result()
    }
}

impl VisitableNode for KindSchema {
    fn route_key(&self) -> String {
        self.kind.to_string()
    }

    fn drive<V: Visitor>(&self, v: &mut V) {
        for node in &self.attributes {
            node.accept(v);
        }
    }
}
