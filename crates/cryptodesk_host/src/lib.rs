//! Typed host-service contracts shared by the desktop runtime and its platform adapters.
//!
//! The runtime never talks to browser storage or the metrics backend directly. It goes through
//! the traits in this crate, and hosts inject concrete adapters. The `Noop*` and `Memory*`
//! adapters cover unsupported targets and tests.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod metrics;
pub mod storage;

pub use metrics::{MemoryMetricsSink, MetricEvent, MetricsFuture, MetricsSink, NoopMetricsSink};
pub use storage::prefs::{
    load_pref_with, save_pref_with, MemoryPrefsStore, NoopPrefsStore, PrefsStore, PrefsStoreFuture,
};
