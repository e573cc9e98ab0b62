//! [`FormHost`] over a live `<form>` element.

use gloo::console;
use js_sys::Reflect;
use pal_assets_core::{
    ControlKind, FilterError, FilterResult, FormControl, FormHost, FormSnapshot, SelectedOption,
    SubmitPath,
};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Element, HtmlFormElement, HtmlInputElement, HtmlOptionElement, HtmlSelectElement,
    HtmlTextAreaElement,
};

/// Filter form as seen by the submitter.
#[derive(Clone, Debug)]
pub struct DomForm {
    form: HtmlFormElement,
}

impl DomForm {
    /// Wrap a resolved form element.
    #[must_use]
    pub const fn new(form: HtmlFormElement) -> Self {
        Self { form }
    }
}

impl FormHost for DomForm {
    fn snapshot(&self) -> FilterResult<FormSnapshot> {
        let elements = self.form.elements();
        let controls = (0..elements.length())
            .filter_map(|index| elements.item(index))
            .filter_map(|element| read_control(&element));
        Ok(FormSnapshot::from_controls(controls))
    }

    fn supports_request_submit(&self) -> bool {
        Reflect::has(self.form.as_ref(), &JsValue::from_str("requestSubmit")).unwrap_or(false)
    }

    fn request_submit(&self) -> FilterResult<()> {
        self.form
            .request_submit()
            .map_err(|err| FilterError::submit(SubmitPath::Request, js_detail(&err)))
    }

    fn submit(&self) -> FilterResult<()> {
        self.form
            .submit()
            .map_err(|err| FilterError::submit(SubmitPath::Navigate, js_detail(&err)))
    }

    fn report(&self, err: &FilterError) {
        console::error!("pal assets filter failed", err.to_string(), format!("{err:?}"));
    }
}

/// Classify an element for binding and form-data purposes.
#[must_use]
pub fn control_kind(element: &Element) -> ControlKind {
    ControlKind::classify(
        &element.tag_name(),
        element.get_attribute("type").as_deref(),
        element.has_attribute("multiple"),
    )
}

fn read_control(element: &Element) -> Option<FormControl> {
    let kind = control_kind(element);
    // `:disabled` also covers controls inside a disabled fieldset.
    let disabled = element.matches(":disabled").unwrap_or(false);

    if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
        let options = select.selected_options();
        let selected = (0..options.length())
            .filter_map(|index| options.item(index))
            .filter_map(|option| option.dyn_into::<HtmlOptionElement>().ok())
            .map(|option| SelectedOption {
                value: option.value(),
                disabled: option.disabled(),
            });
        return Some(FormControl::from_selected_options(
            select.name(),
            select.multiple(),
            disabled,
            selected,
        ));
    }

    let (name, checked, values) = if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        (input.name(), input.checked(), vec![input.value()])
    } else if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
        (area.name(), false, vec![area.value()])
    } else {
        return None;
    };

    Some(FormControl {
        name,
        kind,
        disabled,
        checked,
        values,
    })
}

fn js_detail(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}
