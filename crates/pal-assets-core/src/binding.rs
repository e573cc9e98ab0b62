//! Which DOM event each filter control listens to, and how it submits.

use crate::query::ControlKind;

/// Filter control roles on the assets page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlRole {
    /// Free-text query field.
    Query,
    /// Location field; a select or a text input depending on the page.
    Location,
    /// Condition selection field.
    Condition,
}

impl ControlRole {
    /// All roles in binding order.
    #[must_use]
    pub const fn all() -> [Self; 3] {
        [Self::Query, Self::Location, Self::Condition]
    }

    /// Stable label for logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Location => "location",
            Self::Condition => "condition",
        }
    }
}

/// DOM events the filter listens to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DomEvent {
    /// Fires on every edit of a text control.
    Input,
    /// Fires when a selection is committed.
    Change,
}

impl DomEvent {
    /// Event type name passed to `addEventListener`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Change => "change",
        }
    }
}

/// How an event turns into a submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trigger {
    /// Wait for the configured quiet period.
    Debounced,
    /// Submit now, cancelling any pending debounce.
    Immediate,
}

/// One listener to attach.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Binding {
    /// Control the listener belongs to.
    pub role: ControlRole,
    /// Event to listen for.
    pub event: DomEvent,
    /// Submission behaviour on that event.
    pub trigger: Trigger,
}

/// Binding for a control of the given role and element kind.
#[must_use]
pub const fn binding_for(role: ControlRole, kind: ControlKind) -> Binding {
    let (event, trigger) = match role {
        ControlRole::Query => (DomEvent::Input, Trigger::Debounced),
        ControlRole::Location if kind.is_select() => (DomEvent::Change, Trigger::Immediate),
        ControlRole::Location => (DomEvent::Input, Trigger::Debounced),
        ControlRole::Condition => (DomEvent::Change, Trigger::Immediate),
    };
    Binding {
        role,
        event,
        trigger,
    }
}
