//! Process-local warning counters behind the default sink.

use std::cell::RefCell;
use std::collections::VecDeque;

const RECENT_CAP: usize = 32;

thread_local! {
    static STATE: RefCell<WarnState> = RefCell::new(WarnState::default());
}

///
/// WarnCounters
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct WarnCounters {
    pub attribute_stripped: u64,
    pub field_not_found: u64,
    pub field_reference_dropped: u64,
    pub provider_missing: u64,
    pub section_dropped: u64,
    pub unsafe_formatter_chain: u64,
}

impl WarnCounters {
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.attribute_stripped
            + self.field_not_found
            + self.field_reference_dropped
            + self.provider_missing
            + self.section_dropped
            + self.unsafe_formatter_chain
    }
}

///
/// WarnState
///

#[derive(Debug, Default)]
pub(crate) struct WarnState {
    pub counters: WarnCounters,
    recent: VecDeque<String>,
}

impl WarnState {
    pub fn push_recent(&mut self, message: String) {
        if self.recent.len() == RECENT_CAP {
            self.recent.pop_front();
        }
        self.recent.push_back(message);
    }
}

///
/// WarnReport
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct WarnReport {
    pub counters: WarnCounters,
    pub recent: Vec<String>,
}

pub(crate) fn with_state_mut<T>(f: impl FnOnce(&mut WarnState) -> T) -> T {
    STATE.with(|state| f(&mut state.borrow_mut()))
}

/// Snapshot the current warning state for endpoint/test plumbing.
#[must_use]
pub fn warn_report() -> WarnReport {
    STATE.with(|state| {
        let state = state.borrow();
        WarnReport {
            counters: state.counters,
            recent: state.recent.iter().cloned().collect(),
        }
    })
}

/// Reset all warning state (counters + recent messages).
pub fn warn_reset_all() {
    STATE.with(|state| {
        *state.borrow_mut() = WarnState::default();
    });
}
