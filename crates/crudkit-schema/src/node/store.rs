use crate::prelude::*;
use std::collections::BTreeMap;

///
/// SchemaStore
///
/// The global/base attribute schema: one [`KindSchema`] per rendering kind
/// that declares attributes. Loaded once at startup, read-only thereafter.
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct SchemaStore {
    pub kinds: Vec<KindSchema>,
}

impl SchemaStore {
    #[must_use]
    pub const fn new() -> Self {
        Self { kinds: Vec::new() }
    }

    /// Register a kind schema, replacing any existing entry for the kind.
    pub fn insert(&mut self, schema: KindSchema) {
        if let Some(existing) = self.kinds.iter_mut().find(|k| k.kind == schema.kind) {
            *existing = schema;
        } else {
            self.kinds.push(schema);
        }
    }

    // get
    #[must_use]
    pub fn get(&self, kind: RenderKind) -> Option<&KindSchema> {
        self.kinds.iter().find(|k| k.kind == kind)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

impl ValidateNode for SchemaStore {
    fn validate(&self) -> Result<(), ErrorTree> {
        let mut errs = ErrorTree::new();
        let mut seen = BTreeMap::<RenderKind, usize>::new();

        for (index, schema) in self.kinds.iter().enumerate() {
            if let Some(prev) = seen.insert(schema.kind, index) {
                err!(
                    errs,
                    "kind `{}` declared twice, at positions {} and {}",
                    schema.kind,
                    prev,
                    index
                );
            }
        }

        errs.result()
    }
}

impl VisitableNode for SchemaStore {
    fn drive<V: Visitor>(&self, v: &mut V) {
        for node in &self.kinds {
            node.accept(v);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_replaces_existing_kind() {
        let mut store = SchemaStore::new();
        store.insert(KindSchema::new(RenderKind::Text).attr(AttributeSpec::new(
            "maxlength",
            Allowed::Typed(AttrType::Int),
        )));
        store.insert(KindSchema::new(RenderKind::Text).attr(AttributeSpec::new(
            "placeholder",
            Allowed::Typed(AttrType::Text),
        )));

        assert_eq!(store.kinds.len(), 1);
        let text = store.get(RenderKind::Text).expect("text kind");
        assert!(text.get("maxlength").is_none());
        assert!(text.get("placeholder").is_some());
    }

    #[test]
    fn validate_rejects_duplicate_kinds() {
        let store = SchemaStore {
            kinds: vec![
                KindSchema::new(RenderKind::Select),
                KindSchema::new(RenderKind::Select),
            ],
        };

        let err = store.validate().expect_err("duplicate kinds must fail");
        assert!(err.to_string().contains("`Select` declared twice"));
    }
}
