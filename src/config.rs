//! Page Configuration
//!
//! Every knob has a default matching the shipped page. A page may override
//! any subset through `window.__PAGE_CONFIG__` or a
//! `<script id="page-config" type="application/json">` block.

use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;

use crate::error::PageError;

/// Global JS object checked first
const GLOBAL_CONFIG_KEY: &str = "__PAGE_CONFIG__";
/// JSON script tag checked second
const CONFIG_SCRIPT_ID: &str = "page-config";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageConfig {
    /// `trace`, `debug`, `info`, `warn` or `error`
    pub log_level: String,
    pub fade_threshold_px: f64,
    pub tab_scroll_step_px: f64,
    /// Filter key that matches every card
    pub all_filter_key: String,
    /// Seconds
    pub nav_scroll_duration: f64,
    pub tab_scroll_duration: f64,
    pub fade_duration: f64,
    pub filter_duration: f64,
    pub hidden_card_scale: f64,
    pub resize_debounce_ms: u32,
    pub reveal: RevealConfig,
    pub drag: DragConfig,
    pub backdrop: BackdropConfig,
    pub contact_message: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            fade_threshold_px: 8.0,
            tab_scroll_step_px: 220.0,
            all_filter_key: "all".to_string(),
            nav_scroll_duration: 1.0,
            tab_scroll_duration: 0.5,
            fade_duration: 0.3,
            filter_duration: 0.4,
            hidden_card_scale: 0.95,
            resize_debounce_ms: 100,
            reveal: RevealConfig::default(),
            drag: DragConfig::default(),
            backdrop: BackdropConfig::default(),
            contact_message: "Let's talk! You can add your contact form or email link here.".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RevealConfig {
    pub selector: String,
    /// Fraction of the element that must be visible
    pub threshold: f64,
    pub root_margin: String,
    /// Initial downward offset in px
    pub offset_px: f64,
    pub transition: String,
    /// Stop watching an element after it has been revealed
    pub one_shot: bool,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            selector: ".project-card, .faq-item".to_string(),
            threshold: 0.1,
            root_margin: "0px 0px -100px 0px".to_string(),
            offset_px: 20.0,
            transition: "opacity 0.6s ease, transform 0.6s ease".to_string(),
            one_shot: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DragConfig {
    pub threshold_px: f64,
    pub edge_resistance: f64,
    pub friction: f64,
}

impl Default for DragConfig {
    fn default() -> Self {
        let d = leptos_dragscroll::DragScrollOptions::default();
        Self {
            threshold_px: d.threshold_px,
            edge_resistance: d.edge_resistance,
            friction: d.friction,
        }
    }
}

impl From<&DragConfig> for leptos_dragscroll::DragScrollOptions {
    fn from(c: &DragConfig) -> Self {
        Self {
            threshold_px: c.threshold_px,
            edge_resistance: c.edge_resistance,
            friction: c.friction,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BackdropConfig {
    pub enabled: bool,
    /// Seconds per leg of the yoyo
    pub leg_duration: f64,
}

impl Default for BackdropConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            leg_duration: 15.0,
        }
    }
}

impl PageConfig {
    pub fn from_json(json: &str) -> Result<Self, PageError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read overrides from the page. An override that is present but
    /// invalid is an error; an absent one yields the defaults.
    pub fn load() -> Result<Self, PageError> {
        let Some(window) = web_sys::window() else {
            return Ok(Self::default());
        };

        if let Ok(value) = js_sys::Reflect::get(&window, &JsValue::from_str(GLOBAL_CONFIG_KEY)) {
            if !value.is_undefined() && !value.is_null() {
                return serde_wasm_bindgen::from_value(value)
                    .map_err(|e| PageError::ConfigObject(e.to_string()));
            }
        }

        let script = window
            .document()
            .and_then(|d| d.get_element_by_id(CONFIG_SCRIPT_ID))
            .and_then(|el| el.text_content());
        match script {
            Some(json) => Self::from_json(&json),
            None => Ok(Self::default()),
        }
    }
}
