//! Contact Action
//!
//! Buttons marked `data-action="contact"` show a placeholder message.
//! `handleContact` is exported for inline `onclick` handlers.

use wasm_bindgen::prelude::*;
use web_sys::{Document, Window};

use crate::config::PageConfig;
use crate::dom::{listen, query_all};
use crate::error::{js_message, PageError};

const CONTACT_SELECTOR: &str = "[data-action=\"contact\"]";

fn alert(window: &Window, message: &str) {
    if let Err(e) = window.alert_with_message(message) {
        tracing::warn!("contact alert failed: {}", js_message(&e));
    }
}

#[wasm_bindgen(js_name = handleContact)]
pub fn handle_contact() {
    match web_sys::window() {
        Some(window) => alert(&window, &PageConfig::default().contact_message),
        None => tracing::warn!("handleContact called without a window"),
    }
}

pub fn wire(document: &Document, window: &Window, config: &PageConfig) -> Result<(), PageError> {
    let buttons = query_all(document, CONTACT_SELECTOR)?;
    for button in &buttons {
        let window = window.clone();
        let message = config.contact_message.clone();
        listen(button.html(), "click", move |_| alert(&window, &message))?;
    }
    tracing::debug!(buttons = buttons.len(), "contact buttons wired");
    Ok(())
}
