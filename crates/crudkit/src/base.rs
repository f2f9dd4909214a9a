//! Builtin base attribute schemas for the stock rendering kinds.
//!
//! Hosts typically seed the global store with [`default_schema_store`] and
//! then layer their own adjustments; everything here passes store
//! validation.

use crudkit_schema::{
    node::{Allowed, AttributeSpec, KindSchema, SchemaStore},
    types::{AttrType, RenderKind},
};
use serde_json::json;

/// The stock schema store: one [`KindSchema`] per rendering kind.
#[must_use]
pub fn default_schema_store() -> SchemaStore {
    let mut store = SchemaStore::new();

    store.insert(
        KindSchema::new(RenderKind::Text)
            .attr(AttributeSpec::new(
                "maxlength",
                Allowed::Typed(AttrType::Int),
            ))
            .attr(AttributeSpec::new(
                "minlength",
                Allowed::Typed(AttrType::Int),
            ))
            .attr(AttributeSpec::new(
                "placeholder",
                Allowed::Typed(AttrType::Text),
            ))
            .attr(
                AttributeSpec::new("readonly", Allowed::Typed(AttrType::Bool))
                    .with_default(json!(false)),
            ),
    );

    store.insert(
        KindSchema::new(RenderKind::Textarea)
            .attr(AttributeSpec::new(
                "maxlength",
                Allowed::Typed(AttrType::Int),
            ))
            .attr(AttributeSpec::new("rows", Allowed::Typed(AttrType::Int)).with_default(json!(4)))
            .attr(AttributeSpec::new("cols", Allowed::Typed(AttrType::Int)))
            .attr(AttributeSpec::new(
                "placeholder",
                Allowed::Typed(AttrType::Text),
            )),
    );

    store.insert(
        KindSchema::new(RenderKind::Select)
            .attr(AttributeSpec::new("options", Allowed::Typed(AttrType::List)))
            .attr(
                AttributeSpec::new("multiple", Allowed::Typed(AttrType::Bool))
                    .with_default(json!(false)),
            )
            .attr(AttributeSpec::new(
                "empty_label",
                Allowed::Typed(AttrType::Text),
            )),
    );

    store.insert(
        KindSchema::new(RenderKind::Number)
            .attr(AttributeSpec::new("min", Allowed::Typed(AttrType::Number)))
            .attr(AttributeSpec::new("max", Allowed::Typed(AttrType::Number)))
            .attr(AttributeSpec::new("step", Allowed::Typed(AttrType::Number))),
    );

    store.insert(
        KindSchema::new(RenderKind::Checkbox).attr(
            AttributeSpec::new("checked", Allowed::Typed(AttrType::Bool))
                .with_default(json!(false)),
        ),
    );

    store.insert(
        KindSchema::new(RenderKind::Date)
            // `min`/`max` stay numeric on `number`; dates carry ISO strings.
            .attr(AttributeSpec::new(
                "min_date",
                Allowed::Typed(AttrType::Text),
            ))
            .attr(AttributeSpec::new(
                "max_date",
                Allowed::Typed(AttrType::Text),
            ))
            .attr(AttributeSpec::new(
                "format",
                Allowed::Enumerated(vec![json!("iso"), json!("local")]),
            )),
    );

    store.insert(
        KindSchema::new(RenderKind::File)
            .attr(AttributeSpec::new("accept", Allowed::Typed(AttrType::Text)))
            .attr(
                AttributeSpec::new("multiple", Allowed::Typed(AttrType::Bool))
                    .with_default(json!(false)),
            ),
    );

    // Hidden fields render nothing; no attributes are legal.
    store.insert(KindSchema::new(RenderKind::Hidden));

    store
}
