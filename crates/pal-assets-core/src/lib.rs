#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::multiple_crate_versions)]
//! Debounced submission logic for the PAL assets filter form.
//!
//! Text edits wait for a short quiet period before submitting; selection changes submit at
//! once. A submission only happens when the canonical query differs from the last one
//! submitted. Everything here is target-independent; the browser glue lives in
//! `pal-assets-ui` and plugs in through [`FilterPage`], [`FormHost`] and [`Scheduler`].

pub mod binding;
pub mod config;
pub mod error;
pub mod page;
pub mod query;
pub mod submitter;

#[cfg(test)]
mod testing;

pub use binding::{Binding, ControlRole, DomEvent, Trigger, binding_for};
pub use config::FilterConfig;
pub use error::{FilterError, FilterResult};
pub use page::{FilterHandle, FilterPage, install};
pub use query::{ControlKind, FormControl, FormSnapshot, SelectedOption};
pub use submitter::{
    DebounceState, DebouncedSubmitter, FormHost, Scheduler, SubmitOutcome, SubmitPath,
    SubmitStats,
};
