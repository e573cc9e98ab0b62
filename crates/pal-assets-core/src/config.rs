//! Element identifiers and debounce timing for the filter form.
//!
//! Defaults match the `/pal/assets` page. The form element may override them
//! through `data-*` attributes; rejected overrides fall back to the default
//! for that field and are returned to the caller for logging.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::binding::ControlRole;
use crate::error::{FilterError, FilterResult};

/// Identifier of the filter form.
pub const DEFAULT_FORM_ID: &str = "pal-assets-filter";
/// Identifier of the free-text query field.
pub const DEFAULT_QUERY_ID: &str = "pal-search-q";
/// Identifier of the location field.
pub const DEFAULT_LOCATION_ID: &str = "pal-search-location";
/// Identifier of the condition selection field.
pub const DEFAULT_CONDITION_ID: &str = "pal-search-condition";
/// Quiet period before a text edit submits the form.
pub const DEFAULT_DEBOUNCE_MS: u32 = 120;
/// Upper bound accepted for a debounce override.
pub const MAX_DEBOUNCE_MS: u32 = 10_000;

/// Form attribute overriding [`FilterConfig::debounce_ms`].
pub const DEBOUNCE_ATTR: &str = "data-debounce-ms";
/// Form attribute overriding [`FilterConfig::query_id`].
pub const QUERY_ID_ATTR: &str = "data-query-id";
/// Form attribute overriding [`FilterConfig::location_id`].
pub const LOCATION_ID_ATTR: &str = "data-location-id";
/// Form attribute overriding [`FilterConfig::condition_id`].
pub const CONDITION_ID_ATTR: &str = "data-condition-id";

/// Resolved configuration for one filter form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Identifier of the form element.
    pub form_id: String,
    /// Identifier of the free-text query field.
    pub query_id: String,
    /// Identifier of the location field.
    pub location_id: String,
    /// Identifier of the condition selection field.
    pub condition_id: String,
    /// Debounce delay for text controls, in milliseconds.
    pub debounce_ms: u32,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            form_id: DEFAULT_FORM_ID.to_string(),
            query_id: DEFAULT_QUERY_ID.to_string(),
            location_id: DEFAULT_LOCATION_ID.to_string(),
            condition_id: DEFAULT_CONDITION_ID.to_string(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

impl FilterConfig {
    /// Debounce delay as a [`Duration`].
    #[must_use]
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(u64::from(self.debounce_ms))
    }

    /// Element identifier configured for `role`.
    #[must_use]
    pub fn control_id(&self, role: ControlRole) -> &str {
        match role {
            ControlRole::Query => &self.query_id,
            ControlRole::Location => &self.location_id,
            ControlRole::Condition => &self.condition_id,
        }
    }

    /// Apply attribute overrides read through `lookup`.
    ///
    /// Missing attributes keep the current value. Invalid attributes keep the
    /// current value too and are returned alongside the config.
    #[must_use]
    pub fn with_overrides<F>(mut self, lookup: F) -> (Self, Vec<FilterError>)
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut rejected = Vec::new();

        if let Some(raw) = lookup(DEBOUNCE_ATTR) {
            match parse_debounce_ms(&raw) {
                Ok(ms) => self.debounce_ms = ms,
                Err(err) => rejected.push(err),
            }
        }

        let id_fields: [(&'static str, &'static str, &mut String); 3] = [
            (QUERY_ID_ATTR, "query_id", &mut self.query_id),
            (LOCATION_ID_ATTR, "location_id", &mut self.location_id),
            (CONDITION_ID_ATTR, "condition_id", &mut self.condition_id),
        ];
        for (attr, field, slot) in id_fields {
            if let Some(raw) = lookup(attr) {
                match parse_element_id(field, &raw) {
                    Ok(id) => *slot = id,
                    Err(err) => rejected.push(err),
                }
            }
        }

        for err in &rejected {
            if let FilterError::InvalidConfig { field, reason, .. } = err {
                warn!(field, reason, "filter config override rejected; keeping default");
            }
        }

        (self, rejected)
    }
}

fn parse_debounce_ms(raw: &str) -> FilterResult<u32> {
    let trimmed = raw.trim();
    let ms = trimmed
        .parse::<u32>()
        .map_err(|_| FilterError::invalid_config("debounce_ms", Some(trimmed), "not_an_integer"))?;
    if ms > MAX_DEBOUNCE_MS {
        return Err(FilterError::invalid_config(
            "debounce_ms",
            Some(trimmed),
            "exceeds_maximum",
        ));
    }
    Ok(ms)
}

fn parse_element_id(field: &'static str, raw: &str) -> FilterResult<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FilterError::invalid_config(field, None, "empty"));
    }
    Ok(trimmed.to_string())
}
