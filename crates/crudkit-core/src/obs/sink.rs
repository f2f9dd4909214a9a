use crate::obs::counters;
use crudkit_schema::types::Facet;
use derive_more::Display;
use std::{cell::RefCell, fmt, rc::Rc};

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<Rc<dyn WarnSink>>> = const { RefCell::new(None) };
}

///
/// StripReason
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
#[remain::sorted]
pub enum StripReason {
    /// The kind schema marks the attribute `Inapplicable`.
    Inapplicable,
    /// The schema names no applicable attribute of this name for the kind.
    Unknown,
    /// The merged value violates the attribute's allowed values.
    ValueRejected,
}

///
/// WarnEvent
///
/// Structured warnings the core emits; one variant per taxonomy entry.
///

#[derive(Clone, Debug, Eq, PartialEq)]
#[remain::sorted]
pub enum WarnEvent {
    AttributeStripped {
        field: String,
        facet: Facet,
        attribute: String,
        reason: StripReason,
    },
    FieldNotFound {
        field: String,
        page_key: String,
        entity_name: String,
    },
    FieldReferenceDropped {
        section: String,
        field: String,
    },
    ProviderMissing {
        field: String,
        facet: Facet,
        attribute: String,
        provider: String,
    },
    SectionDropped {
        section: String,
    },
    UnsafeFormatterChain {
        field: String,
        producer: String,
        escaper: String,
    },
}

impl fmt::Display for WarnEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AttributeStripped {
                field,
                facet,
                attribute,
                reason,
            } => write!(
                f,
                "stripped attribute `{attribute}` ({facet}) from field `{field}`: {reason}"
            ),
            Self::FieldNotFound {
                field,
                page_key,
                entity_name,
            } => write!(
                f,
                "field `{field}` has no definition in any scope (page `{page_key}`, entity `{entity_name}`)"
            ),
            Self::FieldReferenceDropped { section, field } => write!(
                f,
                "layout section `{section}` references unresolved field `{field}`"
            ),
            Self::ProviderMissing {
                field,
                facet,
                attribute,
                provider,
            } => write!(
                f,
                "no provider `{provider}` registered for attribute `{attribute}` ({facet}) on field `{field}`"
            ),
            Self::SectionDropped { section } => {
                write!(f, "layout section `{section}` has no valid fields left")
            }
            Self::UnsafeFormatterChain {
                field,
                producer,
                escaper,
            } => write!(
                f,
                "field `{field}`: formatter `{producer}` produces HTML before `{escaper}` escapes it"
            ),
        }
    }
}

///
/// WarnSink
///

pub trait WarnSink {
    fn record(&self, event: &WarnEvent);
}

/// GlobalWarnSink
/// Default process-local sink that writes into global warning state.
/// Acts as the concrete sink when no scoped override is installed.

pub(crate) struct GlobalWarnSink;

impl WarnSink for GlobalWarnSink {
    fn record(&self, event: &WarnEvent) {
        counters::with_state_mut(|state| {
            match event {
                WarnEvent::AttributeStripped { .. } => {
                    state.counters.attribute_stripped =
                        state.counters.attribute_stripped.saturating_add(1);
                }
                WarnEvent::FieldNotFound { .. } => {
                    state.counters.field_not_found =
                        state.counters.field_not_found.saturating_add(1);
                }
                WarnEvent::FieldReferenceDropped { .. } => {
                    state.counters.field_reference_dropped =
                        state.counters.field_reference_dropped.saturating_add(1);
                }
                WarnEvent::ProviderMissing { .. } => {
                    state.counters.provider_missing =
                        state.counters.provider_missing.saturating_add(1);
                }
                WarnEvent::SectionDropped { .. } => {
                    state.counters.section_dropped =
                        state.counters.section_dropped.saturating_add(1);
                }
                WarnEvent::UnsafeFormatterChain { .. } => {
                    state.counters.unsafe_formatter_chain =
                        state.counters.unsafe_formatter_chain.saturating_add(1);
                }
            }
            state.push_recent(event.to_string());
        });
    }
}

pub(crate) const GLOBAL_WARN_SINK: GlobalWarnSink = GlobalWarnSink;

pub(crate) fn record(event: &WarnEvent) {
    let sink = SINK_OVERRIDE.with(|cell| cell.borrow().clone());
    if let Some(sink) = sink {
        sink.record(event);
    } else {
        GLOBAL_WARN_SINK.record(event);
    }
}

/// Run a closure with a temporary warning sink override.
/// The previous sink is restored on all exits, including unwind.
pub fn with_warn_sink<T>(sink: Rc<dyn WarnSink>, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<Rc<dyn WarnSink>>);

    impl Drop for Guard {
        fn drop(&mut self) {
            let prev = self.0.take();
            SINK_OVERRIDE.with(|cell| {
                *cell.borrow_mut() = prev;
            });
        }
    }

    let prev = SINK_OVERRIDE.with(|cell| cell.borrow_mut().replace(sink));
    let _guard = Guard(prev);

    f()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::{AssertUnwindSafe, catch_unwind};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSink {
        calls: Rc<AtomicUsize>,
    }

    impl WarnSink for CountingSink {
        fn record(&self, _: &WarnEvent) {
            self.calls.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn sample_event() -> WarnEvent {
        WarnEvent::SectionDropped {
            section: "Info".to_string(),
        }
    }

    #[test]
    fn with_warn_sink_routes_and_restores_nested_overrides() {
        SINK_OVERRIDE.with(|cell| {
            *cell.borrow_mut() = None;
        });

        let outer_calls = Rc::new(AtomicUsize::new(0));
        let inner_calls = Rc::new(AtomicUsize::new(0));
        let outer = Rc::new(CountingSink {
            calls: Rc::clone(&outer_calls),
        });
        let inner = Rc::new(CountingSink {
            calls: Rc::clone(&inner_calls),
        });

        with_warn_sink(outer, || {
            record(&sample_event());
            assert_eq!(outer_calls.load(Ordering::SeqCst), 1);
            assert_eq!(inner_calls.load(Ordering::SeqCst), 0);

            with_warn_sink(inner, || {
                record(&sample_event());
            });

            // Inner override was restored to outer override.
            record(&sample_event());
        });

        assert_eq!(outer_calls.load(Ordering::SeqCst), 2);
        assert_eq!(inner_calls.load(Ordering::SeqCst), 1);

        // Outer override was restored to previous (none).
        SINK_OVERRIDE.with(|cell| {
            assert!(cell.borrow().is_none());
        });
    }

    #[test]
    fn with_warn_sink_restores_override_on_panic() {
        SINK_OVERRIDE.with(|cell| {
            *cell.borrow_mut() = None;
        });

        let calls = Rc::new(AtomicUsize::new(0));
        let sink = Rc::new(CountingSink {
            calls: Rc::clone(&calls),
        });

        let panicked = catch_unwind(AssertUnwindSafe(|| {
            with_warn_sink(sink, || {
                record(&sample_event());
                panic!("intentional panic for guard test");
            });
        }))
        .is_err();
        assert!(panicked);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        // Guard restored TLS slot after unwind.
        SINK_OVERRIDE.with(|cell| {
            assert!(cell.borrow().is_none());
        });
    }

    #[test]
    fn events_render_their_details() {
        let event = WarnEvent::UnsafeFormatterChain {
            field: "status".to_string(),
            producer: "badge".to_string(),
            escaper: "text".to_string(),
        };
        let rendered = event.to_string();
        assert!(rendered.contains("`status`"));
        assert!(rendered.contains("`badge`"));
        assert!(rendered.contains("`text`"));
    }
}
