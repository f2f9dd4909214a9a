use crate::config::{ConfigSource, ScopeConfig};
use std::collections::BTreeMap;

///
/// InMemorySource
///
/// Config source over an in-process map, for embedded-constant deployments
/// and tests. Scope keys are entity names or page keys depending on which
/// slot of the [`ConfigSet`](crate::config::ConfigSet) it fills.
///

#[derive(Debug, Default)]
pub struct InMemorySource {
    scopes: BTreeMap<String, ScopeConfig>,
}

impl InMemorySource {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            scopes: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn scope(mut self, key: impl Into<String>, config: ScopeConfig) -> Self {
        self.scopes.insert(key.into(), config);
        self
    }

    /// Parse a `{scope_key: {field: def}}` JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        let scopes: BTreeMap<String, ScopeConfig> = serde_json::from_str(json)?;
        Ok(Self { scopes })
    }
}

impl ConfigSource for InMemorySource {
    fn load(&self, scope_key: &str) -> Option<&ScopeConfig> {
        self.scopes.get(scope_key)
    }
}
