//! Process-wide formatter strictness.
//!
//! Read once at startup and held for the process lifetime; never re-read
//! per request.

use derive_more::Display;
use std::sync::OnceLock;

/// Environment variable consulted on first read.
pub const STRICT_ENV_VAR: &str = "CRUDKIT_STRICT_FORMATTERS";

static MODE: OnceLock<StrictMode> = OnceLock::new();

///
/// StrictMode
///

#[derive(Clone, Copy, Debug, Default, Display, Eq, PartialEq)]
pub enum StrictMode {
    #[default]
    Lenient,
    Strict,
}

impl StrictMode {
    #[must_use]
    pub const fn is_strict(self) -> bool {
        matches!(self, Self::Strict)
    }
}

/// Pin the process-wide mode explicitly. First write wins; a later call is a
/// no-op so startup wiring cannot flip the mode mid-process.
pub fn set_strict_mode(mode: StrictMode) {
    MODE.set(mode).ok();
}

/// The process-wide mode, reading the environment exactly once.
pub fn strict_mode() -> StrictMode {
    *MODE.get_or_init(from_env)
}

fn from_env() -> StrictMode {
    match std::env::var(STRICT_ENV_VAR) {
        Ok(value)
            if value.eq_ignore_ascii_case("1")
                || value.eq_ignore_ascii_case("true")
                || value.eq_ignore_ascii_case("strict") =>
        {
            StrictMode::Strict
        }
        _ => StrictMode::Lenient,
    }
}
