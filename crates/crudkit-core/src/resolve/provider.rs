//! Options providers: configuration values computed at resolve time.
//!
//! Configuration stays declarative; a value of shape
//! `{"$provider": "<name>"}` names a provider registered here, and the
//! Resolver invokes it with the resolution context during merging.

use crate::resolve::ResolutionContext;
use serde_json::Value;
use std::collections::BTreeMap;

///
/// OptionsProvider
///

pub trait OptionsProvider {
    /// Produce the value the referencing attribute should carry in `ctx`.
    fn provide(&self, ctx: &ResolutionContext) -> Value;
}

///
/// ProviderRegistry
///

#[derive(Default)]
pub struct ProviderRegistry {
    providers: BTreeMap<String, Box<dyn OptionsProvider>>,
}

impl ProviderRegistry {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            providers: BTreeMap::new(),
        }
    }

    pub fn register(&mut self, name: impl Into<String>, provider: impl OptionsProvider + 'static) {
        self.providers.insert(name.into(), Box::new(provider));
    }

    // get
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn OptionsProvider> {
        self.providers.get(name).map(Box::as_ref)
    }
}
