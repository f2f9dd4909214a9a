//! Warning sink boundary.
//!
//! Core resolution logic never decides how warnings are displayed or
//! persisted; it emits structured [`WarnEvent`]s through [`WarnSink`].
//! This module is the only bridge between the engine and warning state.

mod counters;
mod sink;

pub use counters::{WarnCounters, WarnReport, warn_report, warn_reset_all};
pub use sink::{StripReason, WarnEvent, WarnSink, with_warn_sink};

pub(crate) use sink::record;
