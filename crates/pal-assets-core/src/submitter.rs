//! Debounced form submission.
//!
//! # Design
//! - One submitter per form, alive for the page lifetime; clones share state.
//! - At most one timer is pending. Scheduling a new one drops the previous handle,
//!   and dropping a handle cancels it.
//! - The last submitted canonical query is cached before the host submits, so a
//!   failing submit is not retried for the same state.
//! - Timer callbacks hold a `Weak` reference and a generation number; callbacks from
//!   a dropped submitter or a superseded schedule do nothing.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

use tracing::{debug, error};

use crate::binding::Trigger;
use crate::error::{FilterError, FilterResult};
use crate::query::FormSnapshot;

/// Capabilities the submitter needs from the page.
pub trait FormHost {
    /// Current form state.
    ///
    /// # Errors
    ///
    /// Returns an error when the host cannot read the form.
    fn snapshot(&self) -> FilterResult<FormSnapshot>;

    /// Whether the non-navigating submission primitive is available.
    fn supports_request_submit(&self) -> bool;

    /// Submit through the non-navigating primitive.
    ///
    /// # Errors
    ///
    /// Returns an error when the host rejects the submission.
    fn request_submit(&self) -> FilterResult<()>;

    /// Submit through the navigating primitive.
    ///
    /// # Errors
    ///
    /// Returns an error when the host rejects the submission.
    fn submit(&self) -> FilterResult<()>;

    /// Surface an error raised where no caller can receive it (timer callbacks, listeners).
    fn report(&self, err: &FilterError) {
        error!(error = %err, detail = ?err, "filter submission error");
    }
}

/// One-shot timer facility. Dropping a handle cancels its callback.
pub trait Scheduler {
    /// Handle for a scheduled callback.
    type Handle;

    /// Run `callback` once after `delay`.
    fn schedule(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> Self::Handle;
}

/// Submission primitive that was used.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitPath {
    /// `requestSubmit()`: validation and `submit` event run, no forced navigation.
    Request,
    /// `submit()`: navigating fallback.
    Navigate,
}

impl SubmitPath {
    /// Stable label for logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Request => "request_submit",
            Self::Navigate => "submit",
        }
    }
}

/// Result of a submission decision.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The form was submitted carrying `query`.
    Submitted {
        /// Primitive used.
        path: SubmitPath,
        /// Canonical query that was submitted.
        query: String,
    },
    /// The canonical query matched the last submission.
    Unchanged,
}

/// Debounce path state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DebounceState {
    /// No timer pending.
    Idle,
    /// A timer is pending.
    Pending,
}

/// Counters for diagnostics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SubmitStats {
    /// Submissions handed to the host.
    pub submitted: u64,
    /// Decisions skipped because the query was unchanged.
    pub suppressed: u64,
    /// Pending timers cancelled before firing.
    pub cancelled: u64,
}

struct State<T> {
    timer: Option<T>,
    pending: bool,
    generation: u64,
    last_query: Option<String>,
    stats: SubmitStats,
}

struct Inner<H, S: Scheduler> {
    host: H,
    scheduler: S,
    state: RefCell<State<S::Handle>>,
}

/// Debounced submitter for one form.
pub struct DebouncedSubmitter<H, S: Scheduler> {
    inner: Rc<Inner<H, S>>,
}

impl<H, S: Scheduler> Clone for DebouncedSubmitter<H, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<H, S> DebouncedSubmitter<H, S>
where
    H: FormHost + 'static,
    S: Scheduler + 'static,
{
    /// Create an idle submitter with an empty cache.
    #[must_use]
    pub fn new(host: H, scheduler: S) -> Self {
        Self {
            inner: Rc::new(Inner {
                host,
                scheduler,
                state: RefCell::new(State {
                    timer: None,
                    pending: false,
                    generation: 0,
                    last_query: None,
                    stats: SubmitStats::default(),
                }),
            }),
        }
    }

    /// Cancel any pending submission and schedule a new one after `delay`.
    ///
    /// When the timer fires the form is submitted only if its canonical query
    /// differs from the last submitted one.
    pub fn submit_with_debounce(&self, delay: Duration) {
        let generation = {
            let mut state = self.inner.state.borrow_mut();
            cancel_pending(&mut state);
            state.generation = state.generation.wrapping_add(1);
            state.pending = true;
            state.generation
        };

        let weak: Weak<Inner<H, S>> = Rc::downgrade(&self.inner);
        let handle = self.inner.scheduler.schedule(
            delay,
            Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.fire(generation);
                }
            }),
        );
        debug!(delay = ?delay, generation, "filter submit scheduled");

        let mut state = self.inner.state.borrow_mut();
        if state.pending && state.generation == generation {
            state.timer = Some(handle);
        }
    }

    /// Cancel any pending submission and submit now if the query changed.
    ///
    /// # Errors
    ///
    /// Returns an error when the host cannot read the form or rejects the submission.
    pub fn submit_immediately(&self) -> FilterResult<SubmitOutcome> {
        cancel_pending(&mut self.inner.state.borrow_mut());
        self.inner.submit_if_changed()
    }

    /// Route a trigger to the matching operation, reporting errors through the host.
    pub fn dispatch(&self, trigger: Trigger, delay: Duration) {
        match trigger {
            Trigger::Debounced => self.submit_with_debounce(delay),
            Trigger::Immediate => {
                if let Err(err) = self.submit_immediately() {
                    self.inner.host.report(&err);
                }
            }
        }
    }
}

impl<H, S: Scheduler> DebouncedSubmitter<H, S> {
    /// Cancel the pending submission, if any.
    pub fn cancel(&self) {
        cancel_pending(&mut self.inner.state.borrow_mut());
    }

    /// Current debounce state.
    #[must_use]
    pub fn state(&self) -> DebounceState {
        if self.inner.state.borrow().pending {
            DebounceState::Pending
        } else {
            DebounceState::Idle
        }
    }

    /// Canonical query of the last submission decision.
    #[must_use]
    pub fn last_query(&self) -> Option<String> {
        self.inner.state.borrow().last_query.clone()
    }

    /// Diagnostic counters.
    #[must_use]
    pub fn stats(&self) -> SubmitStats {
        self.inner.state.borrow().stats
    }
}

impl<H: FormHost, S: Scheduler> Inner<H, S> {
    fn fire(&self, generation: u64) {
        {
            let mut state = self.state.borrow_mut();
            if !state.pending || state.generation != generation {
                debug!(generation, "stale filter timer ignored");
                return;
            }
            // The handle of the running timer stays parked until the next schedule;
            // a timer must not free its own callback while it runs.
            state.pending = false;
        }
        if let Err(err) = self.submit_if_changed() {
            self.host.report(&err);
        }
    }

    fn submit_if_changed(&self) -> FilterResult<SubmitOutcome> {
        let query = self.host.snapshot()?.canonical_query();
        {
            let mut state = self.state.borrow_mut();
            if state.last_query.as_deref() == Some(query.as_str()) {
                state.stats.suppressed += 1;
                debug!(query = %query, "filter query unchanged; submission suppressed");
                return Ok(SubmitOutcome::Unchanged);
            }
            state.last_query = Some(query.clone());
            state.stats.submitted += 1;
        }

        let path = if self.host.supports_request_submit() {
            self.host.request_submit()?;
            SubmitPath::Request
        } else {
            self.host.submit()?;
            SubmitPath::Navigate
        };
        debug!(query = %query, path = path.as_str(), "filter form submitted");
        Ok(SubmitOutcome::Submitted { path, query })
    }
}

fn cancel_pending<T>(state: &mut State<T>) {
    if state.pending {
        state.stats.cancelled += 1;
        debug!(generation = state.generation, "pending filter submit cancelled");
    }
    state.pending = false;
    state.timer = None;
}
