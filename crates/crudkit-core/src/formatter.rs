//! Formatter invocations and chain safety validation.
//!
//! An HTML-producing formatter ordered before an HTML-escaping one yields
//! markup that the escaping step then mangles. The validator flags that
//! ordering; it never reorders a chain on the caller's behalf.

use crate::{
    obs::{self, WarnEvent},
    strict::StrictMode,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error as ThisError;

///
/// FormatterInvocation
///
/// One `(name, options)` step in a field's ordered output chain.
/// Loads from either a bare name string or a `{name, options}` object.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(from = "RawInvocation")]
pub struct FormatterInvocation {
    pub name: String,

    #[serde(skip_serializing_if = "Value::is_null")]
    pub options: Value,
}

impl FormatterInvocation {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: Value::Null,
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: Value) -> Self {
        self.options = options;
        self
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawInvocation {
    Name(String),
    Full {
        name: String,
        #[serde(default)]
        options: Value,
    },
}

impl From<RawInvocation> for FormatterInvocation {
    fn from(raw: RawInvocation) -> Self {
        match raw {
            RawInvocation::Name(name) => Self {
                name,
                options: Value::Null,
            },
            RawInvocation::Full { name, options } => Self { name, options },
        }
    }
}

///
/// FormatterCategory
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[remain::sorted]
pub enum FormatterCategory {
    /// Input is treated as plain text; markup characters are escaped.
    HtmlEscaping,
    /// Output is meant to be inserted verbatim (badges, links, images).
    HtmlProducing,
    /// No opinion on markup; exempt from the ordering check.
    #[default]
    Neutral,
}

///
/// FormatterCatalog
///
/// Name-to-category mapping. Third-party formatters self-declare through
/// [`register`](Self::register); unregistered names are `Neutral`.
///

#[derive(Clone, Debug, Default)]
pub struct FormatterCatalog {
    categories: BTreeMap<String, FormatterCategory>,
}

impl FormatterCatalog {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            categories: BTreeMap::new(),
        }
    }

    /// The catalog seeded with the built-in formatter sets.
    #[must_use]
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        for name in ["badge", "color", "image", "link"] {
            catalog.register(name, FormatterCategory::HtmlProducing);
        }
        for name in ["escape", "text", "truncate"] {
            catalog.register(name, FormatterCategory::HtmlEscaping);
        }
        catalog
    }

    pub fn register(&mut self, name: impl Into<String>, category: FormatterCategory) {
        self.categories.insert(name.into(), category);
    }

    #[must_use]
    pub fn category(&self, name: &str) -> FormatterCategory {
        self.categories.get(name).copied().unwrap_or_default()
    }
}

///
/// ChainWarning
///
/// Details of an unsafe ordering tolerated under lenient mode.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ChainWarning {
    pub field: String,
    pub producer: String,
    pub escaper: String,
}

///
/// ChainOutcome
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ChainOutcome {
    Safe,
    SafeWithWarning(ChainWarning),
}

impl ChainOutcome {
    #[must_use]
    pub const fn warning(&self) -> Option<&ChainWarning> {
        match self {
            Self::Safe => None,
            Self::SafeWithWarning(warning) => Some(warning),
        }
    }
}

///
/// ChainError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ChainError {
    #[error(
        "unsafe formatter chain for field `{field}`: `{producer}` produces HTML before `{escaper}` escapes it (chain: {}); reorder the chain or remove the escaping step",
        .chain.join(" -> ")
    )]
    UnsafeChain {
        field: String,
        producer: String,
        escaper: String,
        chain: Vec<String>,
    },
}

/// Validate one field's ordered formatter chain.
///
/// Strict mode turns an unsafe ordering into a hard failure; lenient mode
/// records a warning and keeps the chain as configured. Chains shorter than
/// two entries cannot exhibit the conflict and are trivially safe.
pub fn validate_chain(
    field: &str,
    chain: &[FormatterInvocation],
    mode: StrictMode,
    catalog: &FormatterCatalog,
) -> Result<ChainOutcome, ChainError> {
    if chain.len() < 2 {
        return Ok(ChainOutcome::Safe);
    }

    let mut first_producer: Option<usize> = None;
    let mut first_escaper: Option<usize> = None;

    for (index, invocation) in chain.iter().enumerate() {
        match catalog.category(&invocation.name) {
            FormatterCategory::HtmlProducing => {
                first_producer.get_or_insert(index);
            }
            FormatterCategory::HtmlEscaping => {
                first_escaper.get_or_insert(index);
            }
            FormatterCategory::Neutral => {}
        }
    }

    let (Some(producer_at), Some(escaper_at)) = (first_producer, first_escaper) else {
        return Ok(ChainOutcome::Safe);
    };
    if producer_at >= escaper_at {
        return Ok(ChainOutcome::Safe);
    }

    let producer = chain[producer_at].name.clone();
    let escaper = chain[escaper_at].name.clone();

    if mode.is_strict() {
        return Err(ChainError::UnsafeChain {
            field: field.to_string(),
            producer,
            escaper,
            chain: chain.iter().map(|i| i.name.clone()).collect(),
        });
    }

    obs::record(&WarnEvent::UnsafeFormatterChain {
        field: field.to_string(),
        producer: producer.clone(),
        escaper: escaper.clone(),
    });

    Ok(ChainOutcome::SafeWithWarning(ChainWarning {
        field: field.to_string(),
        producer,
        escaper,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn chain(names: &[&str]) -> Vec<FormatterInvocation> {
        names.iter().map(|name| FormatterInvocation::new(*name)).collect()
    }

    #[test]
    fn producer_before_escaper_fails_under_strict() {
        let err = validate_chain(
            "status",
            &chain(&["badge", "text"]),
            StrictMode::Strict,
            &FormatterCatalog::builtin(),
        )
        .expect_err("producer before escaper must fail in strict mode");

        let ChainError::UnsafeChain {
            field,
            producer,
            escaper,
            chain,
        } = err;
        assert_eq!(field, "status");
        assert_eq!(producer, "badge");
        assert_eq!(escaper, "text");
        assert_eq!(chain, vec!["badge".to_string(), "text".to_string()]);
    }

    #[test]
    fn producer_before_escaper_warns_under_lenient() {
        let outcome = validate_chain(
            "status",
            &chain(&["badge", "text"]),
            StrictMode::Lenient,
            &FormatterCatalog::builtin(),
        )
        .expect("lenient mode must not hard-fail");

        let warning = outcome.warning().expect("warning expected");
        assert_eq!(warning.producer, "badge");
        assert_eq!(warning.escaper, "text");
    }

    #[test]
    fn escaper_before_producer_is_safe_in_both_modes() {
        for mode in [StrictMode::Strict, StrictMode::Lenient] {
            let outcome = validate_chain(
                "status",
                &chain(&["text", "badge"]),
                mode,
                &FormatterCatalog::builtin(),
            )
            .expect("reverse order is safe");
            assert_eq!(outcome, ChainOutcome::Safe);
        }
    }

    #[test]
    fn short_chains_are_trivially_safe() {
        let catalog = FormatterCatalog::builtin();
        assert_eq!(
            validate_chain("status", &[], StrictMode::Strict, &catalog),
            Ok(ChainOutcome::Safe)
        );
        assert_eq!(
            validate_chain("status", &chain(&["badge"]), StrictMode::Strict, &catalog),
            Ok(ChainOutcome::Safe)
        );
    }

    #[test]
    fn neutral_formatters_are_exempt() {
        let outcome = validate_chain(
            "status",
            &chain(&["date", "uppercase"]),
            StrictMode::Strict,
            &FormatterCatalog::builtin(),
        )
        .expect("unregistered names are neutral");
        assert_eq!(outcome, ChainOutcome::Safe);
    }

    #[test]
    fn registered_custom_formatter_participates() {
        let mut catalog = FormatterCatalog::builtin();
        catalog.register("sparkline", FormatterCategory::HtmlProducing);

        let err = validate_chain(
            "trend",
            &chain(&["sparkline", "escape"]),
            StrictMode::Strict,
            &catalog,
        )
        .expect_err("self-declared producer must participate in the check");
        assert!(err.to_string().contains("`sparkline`"));
    }

    #[test]
    fn invocation_loads_from_bare_name_or_object() {
        let parsed: Vec<FormatterInvocation> =
            serde_json::from_value(json!(["text", {"name": "truncate", "options": {"at": 80}}]))
                .expect("deserialize");

        assert_eq!(parsed[0], FormatterInvocation::new("text"));
        assert_eq!(parsed[1].name, "truncate");
        assert_eq!(parsed[1].options, json!({"at": 80}));
    }
}
