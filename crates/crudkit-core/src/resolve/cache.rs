//! Request-scoped resolution memo.

use crate::resolve::{FieldDescriptor, ResolutionContext, ResolveError, Resolver};
use std::{cell::RefCell, collections::BTreeMap};

///
/// CachedResolver
///
/// Memoizes resolution for exactly one context; several consumers on the
/// same page request overlapping fields, and resolution is pure, so the
/// memo is a performance choice, not a correctness requirement. Discard at
/// request end.
///

pub struct CachedResolver<'a> {
    inner: Resolver<'a>,
    ctx: ResolutionContext,
    memo: RefCell<BTreeMap<String, Result<FieldDescriptor, ResolveError>>>,
}

impl<'a> CachedResolver<'a> {
    #[must_use]
    pub const fn new(inner: Resolver<'a>, ctx: ResolutionContext) -> Self {
        Self {
            inner,
            ctx,
            memo: RefCell::new(BTreeMap::new()),
        }
    }

    #[must_use]
    pub const fn context(&self) -> &ResolutionContext {
        &self.ctx
    }

    pub fn resolve(&self, field: &str) -> Result<FieldDescriptor, ResolveError> {
        if let Some(hit) = self.memo.borrow().get(field) {
            return hit.clone();
        }

        let result = self.inner.resolve(field, &self.ctx);
        self.memo
            .borrow_mut()
            .insert(field.to_string(), result.clone());

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigSet, InMemorySource};
    use crudkit_schema::node::SchemaStore;
    use serde_json::json;

    fn config() -> ConfigSet {
        ConfigSet::new(
            InMemorySource::new().scope(
                "article",
                serde_json::from_value(json!({"title": {}})).expect("scope"),
            ),
            InMemorySource::new(),
        )
    }

    #[test]
    fn memo_returns_the_same_descriptor() {
        let schema = SchemaStore::new();
        let config = config();
        let cached = CachedResolver::new(
            Resolver::new(&schema, &config),
            ResolutionContext::new("articles.list", "article"),
        );

        let first = cached.resolve("title").expect("resolve");
        let second = cached.resolve("title").expect("resolve");
        assert_eq!(first, second);
        assert_eq!(cached.memo.borrow().len(), 1);
    }

    #[test]
    fn not_found_is_memoized_too() {
        let schema = SchemaStore::new();
        let config = config();
        let cached = CachedResolver::new(
            Resolver::new(&schema, &config),
            ResolutionContext::new("articles.list", "article"),
        );

        assert!(cached.resolve("ghost").is_err());
        assert!(cached.resolve("ghost").is_err());
        assert_eq!(cached.memo.borrow().len(), 1);
    }
}
