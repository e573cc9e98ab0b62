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
//! Browser entry point for the PAL assets filter form.
//!
//! Loaded as a wasm module on `/pal/assets`. Once the document is ready it looks up the
//! filter form, debounces the text fields and submits selection changes at once. Pages
//! without the form are left untouched.

use std::time::Duration;

#[cfg(target_arch = "wasm32")]
pub mod attach;
#[cfg(target_arch = "wasm32")]
pub mod dom;
#[cfg(target_arch = "wasm32")]
pub mod timer;

/// Whether a document in `ready_state` can be wired up without waiting for `DOMContentLoaded`.
#[must_use]
pub fn can_init_now(ready_state: &str) -> bool {
    !ready_state.eq_ignore_ascii_case("loading")
}

/// Timer delay in whole milliseconds, saturating at `u32::MAX`.
#[must_use]
pub fn delay_millis(delay: Duration) -> u32 {
    u32::try_from(delay.as_millis()).unwrap_or(u32::MAX)
}

/// Module start hook: attach to the filter form once the document is ready.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    use gloo::events::EventListener;

    console_error_panic_hook::set_once();
    let document = gloo::utils::document();
    if can_init_now(&document.ready_state()) {
        init(&document);
    } else {
        EventListener::once(&document, "DOMContentLoaded", |_event| {
            init(&gloo::utils::document());
        })
        .forget();
    }
}

#[cfg(target_arch = "wasm32")]
fn init(document: &web_sys::Document) {
    let page = attach::DomPage::new(document.clone());
    let config = pal_assets_core::FilterConfig::default();
    if let Some(handle) = pal_assets_core::install(&page, config, timer::TimeoutScheduler) {
        handle.keep_alive(gloo::events::EventListener::forget);
    }
}
