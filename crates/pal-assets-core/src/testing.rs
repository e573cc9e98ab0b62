//! In-memory host, scheduler and page fakes for submitter tests.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use crate::binding::DomEvent;
use crate::error::{FilterError, FilterResult};
use crate::page::FilterPage;
use crate::query::{ControlKind, FormSnapshot};
use crate::submitter::{FormHost, Scheduler, SubmitPath};

#[derive(Default)]
struct HostState {
    fields: Vec<(String, String)>,
    request_submit_unsupported: bool,
    submit_failure: Option<String>,
    snapshot_failure: Option<String>,
    submissions: Vec<(SubmitPath, String)>,
    reported: Vec<FilterError>,
}

/// Form host that records every submission and reported error.
#[derive(Clone, Default)]
pub(crate) struct RecordingHost {
    state: Rc<RefCell<HostState>>,
}

impl RecordingHost {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Set a field, keeping its original position when it already exists.
    pub(crate) fn set_field(&self, name: &str, value: &str) {
        let mut state = self.state.borrow_mut();
        if let Some(field) = state.fields.iter_mut().find(|(key, _)| key == name) {
            field.1 = value.to_string();
        } else {
            state.fields.push((name.to_string(), value.to_string()));
        }
    }

    pub(crate) fn set_request_submit_supported(&self, supported: bool) {
        self.state.borrow_mut().request_submit_unsupported = !supported;
    }

    pub(crate) fn fail_submissions(&self, detail: &str) {
        self.state.borrow_mut().submit_failure = Some(detail.to_string());
    }

    pub(crate) fn fail_snapshots(&self, detail: &str) {
        self.state.borrow_mut().snapshot_failure = Some(detail.to_string());
    }

    /// Canonical queries of successful submissions, oldest first.
    pub(crate) fn submissions(&self) -> Vec<String> {
        self.state
            .borrow()
            .submissions
            .iter()
            .map(|(_, query)| query.clone())
            .collect()
    }

    pub(crate) fn paths(&self) -> Vec<SubmitPath> {
        self.state
            .borrow()
            .submissions
            .iter()
            .map(|(path, _)| *path)
            .collect()
    }

    pub(crate) fn reported(&self) -> Vec<FilterError> {
        self.state.borrow().reported.clone()
    }

    fn record(&self, path: SubmitPath) -> FilterResult<()> {
        let mut state = self.state.borrow_mut();
        if let Some(detail) = state.submit_failure.clone() {
            return Err(FilterError::submit(path, detail));
        }
        let query = state
            .fields
            .iter()
            .fold(FormSnapshot::new(), |snapshot, (name, value)| {
                snapshot.with(name.as_str(), value.as_str())
            })
            .canonical_query();
        state.submissions.push((path, query));
        Ok(())
    }
}

impl FormHost for RecordingHost {
    fn snapshot(&self) -> FilterResult<FormSnapshot> {
        let state = self.state.borrow();
        if let Some(detail) = &state.snapshot_failure {
            return Err(FilterError::host("snapshot", detail.as_str()));
        }
        let mut snapshot = FormSnapshot::new();
        for (name, value) in &state.fields {
            snapshot.push(name.as_str(), value.as_str());
        }
        Ok(snapshot)
    }

    fn supports_request_submit(&self) -> bool {
        !self.state.borrow().request_submit_unsupported
    }

    fn request_submit(&self) -> FilterResult<()> {
        self.record(SubmitPath::Request)
    }

    fn submit(&self) -> FilterResult<()> {
        self.record(SubmitPath::Navigate)
    }

    fn report(&self, err: &FilterError) {
        self.state.borrow_mut().reported.push(err.clone());
    }
}

struct Entry {
    due: Duration,
    seq: u64,
    cancelled: Rc<Cell<bool>>,
    callback: Option<Box<dyn FnOnce()>>,
}

#[derive(Default)]
struct Clock {
    now: Duration,
    seq: u64,
    entries: Vec<Entry>,
    ignore_cancellation: bool,
}

/// Virtual-time scheduler; callbacks run only from [`ManualScheduler::advance`].
#[derive(Clone, Default)]
pub(crate) struct ManualScheduler {
    clock: Rc<RefCell<Clock>>,
}

/// Handle that cancels its entry when dropped.
pub(crate) struct ManualHandle {
    cancelled: Rc<Cell<bool>>,
    honour_cancel: bool,
}

impl Drop for ManualHandle {
    fn drop(&mut self) {
        if self.honour_cancel {
            self.cancelled.set(true);
        }
    }
}

impl ManualScheduler {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Keep firing callbacks whose handle was dropped, like a late host timer.
    pub(crate) fn ignore_cancellation(&self) {
        self.clock.borrow_mut().ignore_cancellation = true;
    }

    /// Move virtual time forward, running due callbacks in schedule order.
    pub(crate) fn advance(&self, by: Duration) {
        let now = {
            let mut clock = self.clock.borrow_mut();
            clock.now += by;
            clock.now
        };
        loop {
            let next = {
                let mut clock = self.clock.borrow_mut();
                clock.entries.retain(|entry| entry.callback.is_some());
                let position = clock
                    .entries
                    .iter()
                    .enumerate()
                    .filter(|(_, entry)| entry.due <= now && !entry.cancelled.get())
                    .min_by_key(|(_, entry)| (entry.due, entry.seq))
                    .map(|(index, _)| index);
                position.and_then(|index| clock.entries[index].callback.take())
            };
            match next {
                Some(callback) => callback(),
                None => break,
            }
        }
    }

    /// Callbacks that are neither cancelled nor fired.
    pub(crate) fn live_timers(&self) -> usize {
        self.clock
            .borrow()
            .entries
            .iter()
            .filter(|entry| entry.callback.is_some() && !entry.cancelled.get())
            .count()
    }
}

impl Scheduler for ManualScheduler {
    type Handle = ManualHandle;

    fn schedule(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> Self::Handle {
        let mut clock = self.clock.borrow_mut();
        let cancelled = Rc::new(Cell::new(false));
        clock.seq += 1;
        let entry = Entry {
            due: clock.now + delay,
            seq: clock.seq,
            cancelled: Rc::clone(&cancelled),
            callback: Some(callback),
        };
        clock.entries.push(entry);
        ManualHandle {
            cancelled,
            honour_cancel: !clock.ignore_cancellation,
        }
    }
}

struct Registration {
    control: String,
    event: DomEvent,
    attached: Rc<Cell<bool>>,
    handler: Option<Box<dyn FnMut()>>,
}

#[derive(Default)]
struct PageState {
    form_id: Option<String>,
    form_attributes: HashMap<String, String>,
    controls: HashMap<String, ControlKind>,
    registrations: Vec<Registration>,
    reported: Vec<FilterError>,
}

/// Page with an optional form, controls by id, and listeners fired on demand.
#[derive(Clone, Default)]
pub(crate) struct FakePage {
    state: Rc<RefCell<PageState>>,
    host: RecordingHost,
}

/// Listener handle that detaches its registration when dropped.
pub(crate) struct FakeListener {
    attached: Rc<Cell<bool>>,
}

impl Drop for FakeListener {
    fn drop(&mut self) {
        self.attached.set(false);
    }
}

impl FakePage {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_form(self, id: &str) -> Self {
        self.state.borrow_mut().form_id = Some(id.to_string());
        self
    }

    pub(crate) fn with_form_attribute(self, name: &str, value: &str) -> Self {
        self.state
            .borrow_mut()
            .form_attributes
            .insert(name.to_string(), value.to_string());
        self
    }

    pub(crate) fn with_control(self, id: &str, kind: ControlKind) -> Self {
        self.state
            .borrow_mut()
            .controls
            .insert(id.to_string(), kind);
        self
    }

    /// Host the installed submitter reads from and submits through.
    pub(crate) const fn host(&self) -> &RecordingHost {
        &self.host
    }

    pub(crate) fn reported(&self) -> Vec<FilterError> {
        self.state.borrow().reported.clone()
    }

    pub(crate) fn attached_listeners(&self) -> usize {
        self.state
            .borrow()
            .registrations
            .iter()
            .filter(|registration| registration.attached.get())
            .count()
    }

    /// Dispatch `event` on `control`; returns how many handlers ran.
    pub(crate) fn fire(&self, control: &str, event: DomEvent) -> usize {
        let count = self.state.borrow().registrations.len();
        let mut fired = 0;
        for index in 0..count {
            let handler = {
                let mut state = self.state.borrow_mut();
                let registration = &mut state.registrations[index];
                if registration.control == control
                    && registration.event == event
                    && registration.attached.get()
                {
                    registration.handler.take()
                } else {
                    None
                }
            };
            if let Some(mut handler) = handler {
                handler();
                fired += 1;
                self.state.borrow_mut().registrations[index].handler = Some(handler);
            }
        }
        fired
    }
}

impl FilterPage for FakePage {
    type Form = String;
    type Control = String;
    type Listener = FakeListener;
    type Host = RecordingHost;

    fn find_form(&self, id: &str) -> Option<Self::Form> {
        self.state
            .borrow()
            .form_id
            .as_deref()
            .filter(|form_id| *form_id == id)
            .map(str::to_string)
    }

    fn form_attribute(&self, _form: &Self::Form, name: &str) -> Option<String> {
        self.state.borrow().form_attributes.get(name).cloned()
    }

    fn form_host(&self, _form: Self::Form) -> Self::Host {
        self.host.clone()
    }

    fn find_control(&self, id: &str) -> Option<Self::Control> {
        self.state
            .borrow()
            .controls
            .contains_key(id)
            .then(|| id.to_string())
    }

    fn control_kind(&self, control: &Self::Control) -> ControlKind {
        self.state
            .borrow()
            .controls
            .get(control)
            .copied()
            .unwrap_or(ControlKind::Other)
    }

    fn listen(
        &self,
        control: &Self::Control,
        event: DomEvent,
        handler: Box<dyn FnMut()>,
    ) -> Self::Listener {
        let attached = Rc::new(Cell::new(true));
        self.state.borrow_mut().registrations.push(Registration {
            control: control.clone(),
            event,
            attached: Rc::clone(&attached),
            handler: Some(handler),
        });
        FakeListener { attached }
    }

    fn report(&self, err: &FilterError) {
        self.state.borrow_mut().reported.push(err.clone());
    }
}
