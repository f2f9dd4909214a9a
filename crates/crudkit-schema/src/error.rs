//! Route-aware validation error aggregation.

use serde::Serialize;
use std::fmt;

///
/// ErrorTree
///
/// Flat list of validation messages, each tagged with the route of the
/// node that produced it. Routes are dotted paths built by the visitor.
///

#[derive(Clone, Debug, Default, Serialize)]
pub struct ErrorTree {
    entries: Vec<ErrorEntry>,
}

#[derive(Clone, Debug, Serialize)]
struct ErrorEntry {
    route: Option<String>,
    message: String,
}

impl ErrorTree {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Record a message at the current (local) route.
    pub fn add(&mut self, message: impl fmt::Display) {
        self.entries.push(ErrorEntry {
            route: None,
            message: message.to_string(),
        });
    }

    /// Fold another tree into this one, prefixing its entries with `route`.
    pub fn merge_under(&mut self, route: &str, other: Self) {
        for entry in other.entries {
            let route = match entry.route {
                Some(inner) if route.is_empty() => Some(inner),
                Some(inner) => Some(format!("{route}.{inner}")),
                None if route.is_empty() => None,
                None => Some(route.to_string()),
            };
            self.entries.push(ErrorEntry {
                route,
                message: entry.message,
            });
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Collapse to `Err(self)` if any message was recorded.
    pub fn result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ErrorTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            match &entry.route {
                Some(route) => write!(f, "{route}: {}", entry.message)?,
                None => write!(f, "{}", entry.message)?,
            }
        }
        Ok(())
    }
}

impl std::error::Error for ErrorTree {}

// err
/// Push a formatted message onto an [`ErrorTree`].
#[macro_export]
macro_rules! err {
    ($errs:expr, $($arg:tt)*) => {
        $errs.add(format!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_under_prefixes_routes() {
        let mut inner = ErrorTree::new();
        inner.add("bad default");

        let mut mid = ErrorTree::new();
        mid.merge_under("maxlength", inner);

        let mut outer = ErrorTree::new();
        outer.merge_under("text", mid);

        let rendered = outer.to_string();
        assert_eq!(rendered, "text.maxlength: bad default");
    }

    #[test]
    fn result_roundtrip() {
        assert!(ErrorTree::new().result().is_ok());

        let mut errs = ErrorTree::new();
        err!(errs, "attribute `{}` is broken", "rows");
        let err = errs.result().expect_err("non-empty tree must fail");
        assert!(err.to_string().contains("`rows`"));
    }
}
