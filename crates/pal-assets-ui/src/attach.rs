//! [`FilterPage`] over the live document.

use gloo::console;
use gloo::events::EventListener;
use pal_assets_core::{ControlKind, DomEvent, FilterError, FilterPage};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlFormElement};

use crate::dom::{DomForm, control_kind};

/// Document the filter form is looked up in.
#[derive(Clone, Debug)]
pub struct DomPage {
    document: Document,
}

impl DomPage {
    /// Wrap a loaded document.
    #[must_use]
    pub const fn new(document: Document) -> Self {
        Self { document }
    }
}

impl FilterPage for DomPage {
    type Form = HtmlFormElement;
    type Control = Element;
    type Listener = EventListener;
    type Host = DomForm;

    fn find_form(&self, id: &str) -> Option<Self::Form> {
        self.document
            .get_element_by_id(id)?
            .dyn_into::<HtmlFormElement>()
            .ok()
    }

    fn form_attribute(&self, form: &Self::Form, name: &str) -> Option<String> {
        form.get_attribute(name)
    }

    fn form_host(&self, form: Self::Form) -> Self::Host {
        DomForm::new(form)
    }

    fn find_control(&self, id: &str) -> Option<Self::Control> {
        self.document.get_element_by_id(id)
    }

    fn control_kind(&self, control: &Self::Control) -> ControlKind {
        control_kind(control)
    }

    fn listen(
        &self,
        control: &Self::Control,
        event: DomEvent,
        mut handler: Box<dyn FnMut()>,
    ) -> Self::Listener {
        EventListener::new(control, event.as_str(), move |_event| handler())
    }

    fn report(&self, err: &FilterError) {
        console::warn!("pal assets filter override ignored", format!("{err:?}"));
    }
}
