use crate::{
    node::{Allowed, SchemaStore},
    prelude::*,
};
use std::collections::BTreeMap;

/// An attribute name declared under multiple kinds must carry one type tag.
/// A `maxlength` that is Int on `text` but Text on `textarea` is an
/// authoring bug that would make cascade results depend on the field's kind.
pub fn validate_attribute_typing(store: &SchemaStore, errs: &mut ErrorTree) {
    let mut by_name: BTreeMap<&str, (AttrType, RenderKind)> = BTreeMap::new();

    for schema in &store.kinds {
        for spec in &schema.attributes {
            let Allowed::Typed(ty) = spec.allowed else {
                continue;
            };

            match by_name.get(spec.name.as_str()) {
                Some(&(prev_ty, prev_kind)) if prev_ty != ty => {
                    err!(
                        errs,
                        "attribute `{}` has conflicting types: `{}` on kind `{}` and `{}` on kind `{}`",
                        spec.name,
                        prev_ty,
                        prev_kind,
                        ty,
                        schema.kind
                    );
                }
                Some(_) => {}
                None => {
                    by_name.insert(spec.name.as_str(), (ty, schema.kind));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_type_across_kinds_passes() {
        let mut store = SchemaStore::new();
        store.insert(KindSchema::new(RenderKind::Text).attr(AttributeSpec::new(
            "maxlength",
            Allowed::Typed(AttrType::Int),
        )));
        store.insert(KindSchema::new(RenderKind::Textarea).attr(AttributeSpec::new(
            "maxlength",
            Allowed::Typed(AttrType::Int),
        )));

        let mut errs = ErrorTree::new();
        validate_attribute_typing(&store, &mut errs);
        assert!(errs.is_empty());
    }

    #[test]
    fn conflicting_types_across_kinds_fail() {
        let mut store = SchemaStore::new();
        store.insert(KindSchema::new(RenderKind::Text).attr(AttributeSpec::new(
            "maxlength",
            Allowed::Typed(AttrType::Int),
        )));
        store.insert(KindSchema::new(RenderKind::Textarea).attr(AttributeSpec::new(
            "maxlength",
            Allowed::Typed(AttrType::Text),
        )));

        let mut errs = ErrorTree::new();
        validate_attribute_typing(&store, &mut errs);
        assert_eq!(errs.len(), 1);
        assert!(errs.to_string().contains("conflicting types"));
    }

    #[test]
    fn enumerated_attributes_are_exempt() {
        let mut store = SchemaStore::new();
        store.insert(KindSchema::new(RenderKind::Text).attr(AttributeSpec::new(
            "autocomplete",
            Allowed::Enumerated(vec![serde_json::json!("on")]),
        )));
        store.insert(KindSchema::new(RenderKind::Number).attr(AttributeSpec::new(
            "autocomplete",
            Allowed::Typed(AttrType::Text),
        )));

        let mut errs = ErrorTree::new();
        validate_attribute_typing(&store, &mut errs);
        assert!(errs.is_empty());
    }
}
