use crate::{Error, error::ErrorTree, node::SchemaStore, validate::validate_store};
use std::sync::{LazyLock, OnceLock, RwLock, RwLockReadGuard, RwLockWriteGuard};
use thiserror::Error as ThisError;

///
/// BuildError
///

#[derive(Debug, ThisError)]
pub enum BuildError {
    #[error("validation failed: {0}")]
    Validation(ErrorTree),
}

///
/// STORE
/// the static base schema
///

static STORE: LazyLock<RwLock<SchemaStore>> = LazyLock::new(|| RwLock::new(SchemaStore::new()));

static STORE_VALIDATED: OnceLock<bool> = OnceLock::new();

/// Acquire a write guard to the global store during startup registration.
pub fn store_write() -> RwLockWriteGuard<'static, SchemaStore> {
    STORE
        .write()
        .expect("schema store RwLock poisoned while acquiring write lock")
}

// store_read
// just reads the store directly without validation
pub(crate) fn store_read() -> RwLockReadGuard<'static, SchemaStore> {
    STORE
        .read()
        .expect("schema store RwLock poisoned while acquiring read lock")
}

/// Read the global store, validating it exactly once per process.
pub fn get_store() -> Result<RwLockReadGuard<'static, SchemaStore>, Error> {
    let store = store_read();
    validate(&store).map_err(BuildError::Validation)?;

    Ok(store)
}

// validate
fn validate(store: &SchemaStore) -> Result<(), ErrorTree> {
    if STORE_VALIDATED.get().copied().unwrap_or(false) {
        return Ok(());
    }

    validate_store(store)?;

    STORE_VALIDATED.set(true).ok();

    Ok(())
}
