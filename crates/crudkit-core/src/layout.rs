//! Declared-layout consistency repair.
//!
//! A layout may reference fields that failed to resolve; repair drops the
//! broken references and any section left empty, and never fails. Whether an
//! entirely empty repaired layout is itself an error is the caller's call.

use crate::obs::{self, WarnEvent};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

///
/// LayoutSection
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct LayoutSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    pub fields: Vec<String>,

    pub divider: bool,
}

impl LayoutSection {
    #[must_use]
    pub fn new(fields: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn titled(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    // label
    // id wins over title; positional fallback for anonymous sections
    fn label(&self, index: usize) -> String {
        self.id
            .clone()
            .or_else(|| self.title.clone())
            .unwrap_or_else(|| format!("#{index}"))
    }
}

/// Repair a declared layout against the set of field names that resolved.
///
/// Sections keep their original order and internal field order; field
/// membership is exact (no prefix or fuzzy matching). Dropped references and
/// sections are reported through the warning sink.
#[must_use]
pub fn repair(sections: &[LayoutSection], resolved: &BTreeSet<String>) -> Vec<LayoutSection> {
    let mut repaired = Vec::with_capacity(sections.len());

    for (index, section) in sections.iter().enumerate() {
        let label = section.label(index);

        let kept: Vec<String> = section
            .fields
            .iter()
            .filter(|field| {
                let valid = resolved.contains(*field);
                if !valid {
                    obs::record(&WarnEvent::FieldReferenceDropped {
                        section: label.clone(),
                        field: (*field).clone(),
                    });
                }
                valid
            })
            .cloned()
            .collect();

        if kept.is_empty() {
            obs::record(&WarnEvent::SectionDropped { section: label });
            continue;
        }

        repaired.push(LayoutSection {
            fields: kept,
            ..section.clone()
        });
    }

    repaired
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::obs::{WarnSink, with_warn_sink};
    use proptest::prelude::*;
    use std::{cell::RefCell, rc::Rc};

    #[derive(Default)]
    struct CapturingSink {
        events: RefCell<Vec<WarnEvent>>,
    }

    impl WarnSink for CapturingSink {
        fn record(&self, event: &WarnEvent) {
            self.events.borrow_mut().push(event.clone());
        }
    }

    fn resolved(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|n| (*n).to_string()).collect()
    }

    #[test]
    fn invalid_reference_is_dropped_and_warned() {
        let sections = vec![LayoutSection::new(["name", "ghost_field"]).titled("Info")];
        let sink = Rc::new(CapturingSink::default());

        let repaired = with_warn_sink(Rc::clone(&sink) as Rc<dyn WarnSink>, || {
            repair(&sections, &resolved(&["name"]))
        });

        assert_eq!(repaired.len(), 1);
        assert_eq!(repaired[0].title.as_deref(), Some("Info"));
        assert_eq!(repaired[0].fields, vec!["name".to_string()]);

        let events = sink.events.borrow();
        assert_eq!(events.len(), 1);
        assert_eq!(
            events[0],
            WarnEvent::FieldReferenceDropped {
                section: "Info".to_string(),
                field: "ghost_field".to_string(),
            }
        );
    }

    #[test]
    fn empty_sections_do_not_survive() {
        let sections = vec![
            LayoutSection::new(["ghost"]).titled("Empty"),
            LayoutSection::new(["name", "email"]).titled("Contact"),
            LayoutSection::new(["phantom", "spectre"]),
        ];
        let sink = Rc::new(CapturingSink::default());

        let repaired = with_warn_sink(Rc::clone(&sink) as Rc<dyn WarnSink>, || {
            repair(&sections, &resolved(&["name", "email"]))
        });

        assert_eq!(repaired.len(), 1);
        assert_eq!(repaired[0].fields, vec!["name", "email"]);

        let events = sink.events.borrow();
        let dropped_sections: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, WarnEvent::SectionDropped { .. }))
            .collect();
        assert_eq!(dropped_sections.len(), 2);
        // Anonymous sections fall back to their declared position.
        assert_eq!(
            dropped_sections[1],
            &WarnEvent::SectionDropped {
                section: "#2".to_string()
            }
        );
    }

    #[test]
    fn all_invalid_repairs_to_empty_without_failing() {
        let sections = vec![LayoutSection::new(["a"]), LayoutSection::new(["b"])];
        let repaired = repair(&sections, &BTreeSet::new());
        assert!(repaired.is_empty());
    }

    #[test]
    fn field_order_within_sections_is_preserved() {
        let sections = vec![LayoutSection::new(["z", "ghost", "a", "m"])];
        let repaired = repair(&sections, &resolved(&["a", "m", "z"]));
        assert_eq!(repaired[0].fields, vec!["z", "a", "m"]);
    }

    proptest! {
        // Repairing an already-repaired layout is a no-op.
        #[test]
        fn repair_is_idempotent(
            declared in prop::collection::vec(
                prop::collection::vec("[a-e]{1,2}", 0..5),
                0..5
            ),
            resolved_names in prop::collection::btree_set("[a-e]{1,2}", 0..8),
        ) {
            let sections: Vec<LayoutSection> =
                declared.into_iter().map(LayoutSection::new).collect();

            let once = repair(&sections, &resolved_names);
            let twice = repair(&once, &resolved_names);
            prop_assert_eq!(&once, &twice);

            // No empty section survives.
            prop_assert!(once.iter().all(|s| !s.fields.is_empty()));
        }
    }
}
