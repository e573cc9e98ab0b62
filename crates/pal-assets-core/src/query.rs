//! Form snapshots and canonical query encoding.
//!
//! # Design
//! - Hosts report raw control state; inclusion rules live here so they can be tested natively.
//! - Field order is document order. Encoding is `application/x-www-form-urlencoded`.

/// Element kind of a form control, as far as filtering cares.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlKind {
    /// Text-like `<input>` (text, search, number, hidden, date, ...).
    Text,
    /// `<textarea>`.
    TextArea,
    /// `<select>`, single or multiple.
    Select {
        /// Whether the select accepts multiple options.
        multiple: bool,
    },
    /// Checkbox or radio input.
    Checkable,
    /// Button-like input (`submit`, `reset`, `button`, `image`) or `<button>`.
    Button,
    /// File input.
    File,
    /// Any other element listed by the form (fieldset, output, object).
    Other,
}

impl ControlKind {
    /// Classify an element from its tag name, `type` attribute and `multiple` flag.
    ///
    /// Tag and type comparisons ignore ASCII case; DOM tag names are upper case.
    #[must_use]
    pub fn classify(tag_name: &str, input_type: Option<&str>, multiple: bool) -> Self {
        if tag_name.eq_ignore_ascii_case("select") {
            return Self::Select { multiple };
        }
        if tag_name.eq_ignore_ascii_case("textarea") {
            return Self::TextArea;
        }
        if tag_name.eq_ignore_ascii_case("button") {
            return Self::Button;
        }
        if !tag_name.eq_ignore_ascii_case("input") {
            return Self::Other;
        }
        let input_type = input_type.unwrap_or("text").trim().to_ascii_lowercase();
        match input_type.as_str() {
            "checkbox" | "radio" => Self::Checkable,
            "submit" | "reset" | "button" | "image" => Self::Button,
            "file" => Self::File,
            _ => Self::Text,
        }
    }

    /// Whether the control is a selection list.
    #[must_use]
    pub const fn is_select(self) -> bool {
        matches!(self, Self::Select { .. })
    }
}

/// A selected `<option>` as read from the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectedOption {
    /// Option value.
    pub value: String,
    /// Whether the option itself is disabled.
    pub disabled: bool,
}

/// Raw state of one control as read from the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormControl {
    /// Control `name`; unnamed controls never contribute.
    pub name: String,
    /// Element kind.
    pub kind: ControlKind,
    /// Whether the control is disabled.
    pub disabled: bool,
    /// Checked flag; only meaningful for [`ControlKind::Checkable`].
    pub checked: bool,
    /// Current values: the selected options for a select, otherwise one value.
    pub values: Vec<String>,
}

impl FormControl {
    /// A named text control holding `value`.
    #[must_use]
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ControlKind::Text,
            disabled: false,
            checked: false,
            values: vec![value.into()],
        }
    }

    /// A named single select with `value` selected.
    #[must_use]
    pub fn select(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ControlKind::Select { multiple: false },
            disabled: false,
            checked: false,
            values: vec![value.into()],
        }
    }

    /// A `<select>` carrying its selected options; disabled options are dropped.
    #[must_use]
    pub fn from_selected_options<I>(
        name: impl Into<String>,
        multiple: bool,
        disabled: bool,
        options: I,
    ) -> Self
    where
        I: IntoIterator<Item = SelectedOption>,
    {
        Self {
            name: name.into(),
            kind: ControlKind::Select { multiple },
            disabled,
            checked: false,
            values: options
                .into_iter()
                .filter(|option| !option.disabled)
                .map(|option| option.value)
                .collect(),
        }
    }

    fn contributes(&self) -> bool {
        if self.name.is_empty() || self.disabled {
            return false;
        }
        match self.kind {
            ControlKind::Text | ControlKind::TextArea | ControlKind::Select { .. } => true,
            ControlKind::Checkable => self.checked,
            ControlKind::Button | ControlKind::File | ControlKind::Other => false,
        }
    }
}

/// Ordered `(name, value)` pairs describing the current form state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormSnapshot {
    fields: Vec<(String, String)>,
}

impl FormSnapshot {
    /// Empty snapshot.
    #[must_use]
    pub const fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Build a snapshot from controls in document order, applying form-data inclusion rules.
    #[must_use]
    pub fn from_controls<I>(controls: I) -> Self
    where
        I: IntoIterator<Item = FormControl>,
    {
        let mut snapshot = Self::new();
        for control in controls {
            if !control.contributes() {
                continue;
            }
            let FormControl { name, values, .. } = control;
            for value in values {
                snapshot.push(name.clone(), value);
            }
        }
        snapshot
    }

    /// Append a field.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.push((name.into(), value.into()));
    }

    /// Builder-style [`FormSnapshot::push`].
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(name, value);
        self
    }

    /// Fields in document order.
    #[must_use]
    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    /// Whether no field contributes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Canonical `key=value&...` encoding used to detect duplicate submissions.
    #[must_use]
    pub fn canonical_query(&self) -> String {
        let mut out = String::new();
        for (index, (name, value)) in self.fields.iter().enumerate() {
            if index > 0 {
                out.push('&');
            }
            out.push_str(&encode_component(name));
            out.push('=');
            out.push_str(&encode_component(value));
        }
        out
    }
}

/// Percent-encode one component; spaces become `+` as in form submissions.
#[must_use]
pub fn encode_component(raw: &str) -> String {
    urlencoding::encode(raw).replace("%20", "+")
}
