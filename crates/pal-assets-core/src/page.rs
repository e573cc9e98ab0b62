//! Resolve the filter form on a page and bind its controls.
//!
//! # Design
//! - A missing form or a missing control is a normal page state; it only skips work.
//! - Every listener shares one submitter. Dropping the [`FilterHandle`] detaches the
//!   listeners and cancels a pending submission.

use tracing::debug;

use crate::binding::{Binding, ControlRole, DomEvent, binding_for};
use crate::config::FilterConfig;
use crate::error::FilterError;
use crate::query::ControlKind;
use crate::submitter::{DebouncedSubmitter, FormHost, Scheduler};

/// Element lookup and event registration on the hosting page.
pub trait FilterPage {
    /// Resolved form element.
    type Form;
    /// Resolved control element.
    type Control;
    /// Registered listener; dropping it detaches the handler.
    type Listener;
    /// Form host built from a resolved form.
    type Host: FormHost + 'static;

    /// Form with the given identifier, if the page has one.
    fn find_form(&self, id: &str) -> Option<Self::Form>;

    /// Attribute value on the resolved form.
    fn form_attribute(&self, form: &Self::Form, name: &str) -> Option<String>;

    /// Wrap the resolved form for the submitter.
    fn form_host(&self, form: Self::Form) -> Self::Host;

    /// Control with the given identifier, if present.
    fn find_control(&self, id: &str) -> Option<Self::Control>;

    /// Element kind of a resolved control.
    fn control_kind(&self, control: &Self::Control) -> ControlKind;

    /// Run `handler` every time `event` fires on `control`.
    fn listen(
        &self,
        control: &Self::Control,
        event: DomEvent,
        handler: Box<dyn FnMut()>,
    ) -> Self::Listener;

    /// Surface a rejected configuration override.
    fn report(&self, err: &FilterError) {
        debug!(error = ?err, "filter config override ignored");
    }
}

/// Listeners and submitter for one attached form.
pub struct FilterHandle<H, S: Scheduler, L> {
    listeners: Vec<(Binding, L)>,
    submitter: DebouncedSubmitter<H, S>,
}

impl<H, S: Scheduler, L> FilterHandle<H, S, L> {
    /// Number of attached listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Bindings in attachment order.
    pub fn bindings(&self) -> impl Iterator<Item = Binding> + '_ {
        self.listeners.iter().map(|(binding, _)| *binding)
    }

    /// Shared submitter driving this form.
    #[must_use]
    pub const fn submitter(&self) -> &DebouncedSubmitter<H, S> {
        &self.submitter
    }

    /// Hand every listener to `keep` so it outlives the handle, e.g. for the page lifetime.
    pub fn keep_alive<F>(mut self, keep: F)
    where
        F: FnMut(L),
    {
        self.listeners.drain(..).map(|(_, listener)| listener).for_each(keep);
    }
}

impl<H, S: Scheduler, L> Drop for FilterHandle<H, S, L> {
    fn drop(&mut self) {
        self.submitter.cancel();
    }
}

/// Resolve the configured form on `page` and bind its present controls.
///
/// Returns `None` when the page has no filter form.
pub fn install<P, S>(
    page: &P,
    config: FilterConfig,
    scheduler: S,
) -> Option<FilterHandle<P::Host, S, P::Listener>>
where
    P: FilterPage,
    S: Scheduler + 'static,
{
    let Some(form) = page.find_form(&config.form_id) else {
        debug!(form_id = %config.form_id, "filter form absent; nothing to bind");
        return None;
    };
    let (config, rejected) = config.with_overrides(|attr| page.form_attribute(&form, attr));
    for err in &rejected {
        page.report(err);
    }

    let submitter = DebouncedSubmitter::new(page.form_host(form), scheduler);
    let delay = config.debounce();
    let mut listeners = Vec::new();
    for role in ControlRole::all() {
        let Some(control) = page.find_control(config.control_id(role)) else {
            continue;
        };
        let binding = binding_for(role, page.control_kind(&control));
        let shared = submitter.clone();
        let listener = page.listen(
            &control,
            binding.event,
            Box::new(move || shared.dispatch(binding.trigger, delay)),
        );
        debug!(
            role = role.as_str(),
            event = binding.event.as_str(),
            "filter control bound"
        );
        listeners.push((binding, listener));
    }

    Some(FilterHandle {
        listeners,
        submitter,
    })
}
