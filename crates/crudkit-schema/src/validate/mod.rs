//! Schema validation orchestration and shared helpers.

pub mod typing;

use crate::{
    error::ErrorTree,
    node::{SchemaStore, VisitableNode},
    visit::ValidateVisitor,
};

/// Run full store validation in a staged, deterministic order.
pub(crate) fn validate_store(store: &SchemaStore) -> Result<(), ErrorTree> {
    // Phase 1: validate each node (structural + local invariants).
    let mut errors = validate_nodes(store);

    // Phase 2: enforce store-wide invariants.
    validate_global(store, &mut errors);

    errors.result()
}

// Validate all nodes via a visitor to retain route-aware error aggregation.
fn validate_nodes(store: &SchemaStore) -> ErrorTree {
    let mut visitor = ValidateVisitor::new();
    store.accept(&mut visitor);

    visitor.errors
}

// Run global validation passes that require a full store view.
fn validate_global(store: &SchemaStore, errors: &mut ErrorTree) {
    typing::validate_attribute_typing(store, errors);
}
