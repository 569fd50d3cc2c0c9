//! Page Errors
//!
//! Failures while wiring behaviors onto the page. None of these reach the
//! visitor: callers log them and skip the affected behavior.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PageError {
    #[error("window is not available")]
    WindowNotAvailable,

    #[error("document is not available")]
    DocumentNotAvailable,

    #[error("invalid selector `{selector}`: {message}")]
    Selector { selector: String, message: String },

    #[error("failed to bind `{event}` listener: {message}")]
    Listen { event: String, message: String },

    #[error("failed to create visibility observer: {0}")]
    Observer(String),

    #[error("failed to request animation frame: {0}")]
    Frame(String),

    #[error("invalid page config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("invalid page config object: {0}")]
    ConfigObject(String),
}

/// Render a thrown JS value for error messages
pub(crate) fn js_message(value: &wasm_bindgen::JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}
