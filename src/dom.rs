//! DOM Access
//!
//! `UiElement` and `Viewport` are what page behaviors see of the DOM.
//! `DomElement` and `WebViewport` implement them over web-sys; tests use
//! in-memory fakes.

use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{AddEventListenerOptions, Document, Event, EventTarget, HtmlElement, NodeList, Window};

use crate::error::{js_message, PageError};
use crate::filter::{clamp_scroll, max_scroll, Span};
use crate::motion::{Animatable, Prop, Rgba, Value};

/// An element a behavior can restyle, inspect, and animate
pub trait UiElement: Animatable {
    fn set_class(&self, class: &str, on: bool);
    fn has_class(&self, class: &str) -> bool;
    fn attr(&self, name: &str) -> Option<String>;
    fn id(&self) -> String;
    fn text(&self) -> String;
    /// An empty value removes the inline property
    fn set_style(&self, prop: &str, value: &str);
    fn offset_left(&self) -> f64;
    fn offset_width(&self) -> f64;
    fn scroll_left(&self) -> f64;
    fn scroll_width(&self) -> f64;
    fn client_width(&self) -> f64;
    /// Current top/bottom edges relative to the viewport
    fn viewport_span(&self) -> Span;

    fn max_scroll(&self) -> f64 {
        max_scroll(self.scroll_width(), self.client_width())
    }
}

/// The scrolling window
pub trait Viewport: Animatable {
    fn scroll_y(&self) -> f64;
    fn height(&self) -> f64;
}

// ========================
// web-sys adapters
// ========================

/// Translate/scale last written by a tween. Kept here so x, y and scale
/// can be animated independently and still compose into one transform.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Transform {
    x: f64,
    y: f64,
    scale: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self { x: 0.0, y: 0.0, scale: 1.0 }
    }
}

impl Transform {
    fn css(&self) -> String {
        format!("translate({}px, {}px) scale({})", self.x, self.y, self.scale)
    }
}

pub struct DomElement {
    el: HtmlElement,
    transform: Cell<Transform>,
}

impl DomElement {
    pub fn new(el: HtmlElement) -> Self {
        Self { el, transform: Cell::new(Transform::default()) }
    }

    pub fn html(&self) -> &HtmlElement {
        &self.el
    }

    /// First descendant matching `selector`
    pub fn query(&self, selector: &str) -> Option<Rc<DomElement>> {
        self.el
            .query_selector(selector)
            .ok()
            .flatten()
            .and_then(|e| e.dyn_into::<HtmlElement>().ok())
            .map(|e| Rc::new(DomElement::new(e)))
    }

    fn computed(&self, prop: &str) -> Option<String> {
        web_sys::window()?
            .get_computed_style(&self.el)
            .ok()
            .flatten()?
            .get_property_value(prop)
            .ok()
    }
}

impl Animatable for DomElement {
    fn read(&self, prop: Prop) -> Value {
        let t = self.transform.get();
        match prop {
            Prop::X => Value::Num(t.x),
            Prop::Y => Value::Num(t.y),
            Prop::Scale => Value::Num(t.scale),
            Prop::Opacity => Value::Num(
                self.computed("opacity")
                    .and_then(|v| v.trim().parse().ok())
                    .unwrap_or(1.0),
            ),
            Prop::BackgroundColor => Value::Color(
                self.computed("background-color")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(Rgba::TRANSPARENT),
            ),
            Prop::ScrollLeft => Value::Num(UiElement::scroll_left(self)),
            Prop::ScrollY => Value::Num(0.0),
        }
    }

    fn write(&self, prop: Prop, value: Value) {
        let style = self.el.style();
        match (prop, value) {
            (Prop::X | Prop::Y | Prop::Scale, Value::Num(n)) => {
                let mut t = self.transform.get();
                match prop {
                    Prop::X => t.x = n,
                    Prop::Y => t.y = n,
                    _ => t.scale = n,
                }
                self.transform.set(t);
                let _ = style.set_property("transform", &t.css());
            }
            (Prop::Opacity, Value::Num(n)) => {
                let _ = style.set_property("opacity", &n.to_string());
            }
            (Prop::BackgroundColor, Value::Color(c)) => {
                let _ = style.set_property("background-color", &c.to_string());
            }
            (Prop::ScrollLeft, Value::Num(n)) => {
                let offset = clamp_scroll(n, self.max_scroll());
                self.el.set_scroll_left(offset.round() as i32);
            }
            _ => tracing::trace!(?prop, ?value, "unsupported property write"),
        }
    }
}

impl UiElement for DomElement {
    fn set_class(&self, class: &str, on: bool) {
        let _ = self.el.class_list().toggle_with_force(class, on);
    }

    fn has_class(&self, class: &str) -> bool {
        self.el.class_list().contains(class)
    }

    fn attr(&self, name: &str) -> Option<String> {
        self.el.get_attribute(name)
    }

    fn id(&self) -> String {
        self.el.id()
    }

    fn text(&self) -> String {
        self.el.text_content().unwrap_or_default()
    }

    fn set_style(&self, prop: &str, value: &str) {
        let style = self.el.style();
        if value.is_empty() {
            let _ = style.remove_property(prop);
        } else {
            let _ = style.set_property(prop, value);
        }
    }

    fn offset_left(&self) -> f64 {
        f64::from(self.el.offset_left())
    }

    fn offset_width(&self) -> f64 {
        f64::from(self.el.offset_width())
    }

    fn scroll_left(&self) -> f64 {
        f64::from(self.el.scroll_left())
    }

    fn scroll_width(&self) -> f64 {
        f64::from(self.el.scroll_width())
    }

    fn client_width(&self) -> f64 {
        f64::from(self.el.client_width())
    }

    fn viewport_span(&self) -> Span {
        let rect = self.el.get_bounding_client_rect();
        Span::new(rect.top(), rect.bottom())
    }
}

pub struct WebViewport {
    window: Window,
}

impl WebViewport {
    pub fn new(window: Window) -> Self {
        Self { window }
    }

    pub fn window(&self) -> &Window {
        &self.window
    }
}

impl Animatable for WebViewport {
    fn read(&self, prop: Prop) -> Value {
        match prop {
            Prop::ScrollY => Value::Num(self.scroll_y()),
            _ => Value::Num(0.0),
        }
    }

    fn write(&self, prop: Prop, value: Value) {
        if let (Prop::ScrollY, Value::Num(y)) = (prop, value) {
            let x = self.window.scroll_x().unwrap_or(0.0);
            self.window.scroll_to_with_x_and_y(x, y);
        }
    }
}

impl Viewport for WebViewport {
    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn height(&self) -> f64 {
        self.window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0)
    }
}

// ========================
// Lookup
// ========================

pub fn window() -> Result<Window, PageError> {
    web_sys::window().ok_or(PageError::WindowNotAvailable)
}

pub fn document(window: &Window) -> Result<Document, PageError> {
    window.document().ok_or(PageError::DocumentNotAvailable)
}

fn collect(list: NodeList) -> Vec<Rc<DomElement>> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .map(|el| Rc::new(DomElement::new(el)))
        .collect()
}

/// All elements matching `selector`, in document order
pub fn query_all(document: &Document, selector: &str) -> Result<Vec<Rc<DomElement>>, PageError> {
    document
        .query_selector_all(selector)
        .map(collect)
        .map_err(|e| PageError::Selector {
            selector: selector.to_string(),
            message: js_message(&e),
        })
}

/// Matching descendants of `parent`
pub fn query_all_in(parent: &DomElement, selector: &str) -> Result<Vec<Rc<DomElement>>, PageError> {
    parent
        .html()
        .query_selector_all(selector)
        .map(collect)
        .map_err(|e| PageError::Selector {
            selector: selector.to_string(),
            message: js_message(&e),
        })
}

pub fn by_id(document: &Document, id: &str) -> Option<Rc<DomElement>> {
    document
        .get_element_by_id(id)
        .and_then(|e| e.dyn_into::<HtmlElement>().ok())
        .map(|e| Rc::new(DomElement::new(e)))
}

// ========================
// Events
// ========================

/// Bind `handler` for the rest of the page's life
pub fn listen<F>(target: &EventTarget, event: &str, handler: F) -> Result<(), PageError>
where
    F: FnMut(Event) + 'static,
{
    let cb = Closure::<dyn FnMut(Event)>::new(handler);
    target
        .add_event_listener_with_callback(event, cb.as_ref().unchecked_ref())
        .map_err(|e| PageError::Listen {
            event: event.to_string(),
            message: js_message(&e),
        })?;
    cb.forget();
    Ok(())
}

/// Like `listen`, but promises the browser the handler never cancels the event
pub fn listen_passive<F>(target: &EventTarget, event: &str, handler: F) -> Result<(), PageError>
where
    F: FnMut(Event) + 'static,
{
    let cb = Closure::<dyn FnMut(Event)>::new(handler);
    let options = AddEventListenerOptions::new();
    options.set_passive(true);
    target
        .add_event_listener_with_callback_and_add_event_listener_options(
            event,
            cb.as_ref().unchecked_ref(),
            &options,
        )
        .map_err(|e| PageError::Listen {
            event: event.to_string(),
            message: js_message(&e),
        })?;
    cb.forget();
    Ok(())
}


#[cfg(test)]
#[cfg(target_arch = "wasm32")]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn make_element() -> Result<DomElement, String> {
        let window = web_sys::window().ok_or("No window object")?;
        let document = window.document().ok_or("No document object")?;
        let el = document
            .create_element("div")
            .map_err(|e| format!("Failed to create div: {:?}", e))?
            .dyn_into::<HtmlElement>()
            .map_err(|_| "Failed to cast to HtmlElement")?;
        Ok(DomElement::new(el))
    }

    #[wasm_bindgen_test]
    fn test_class_toggle() -> Result<(), String> {
        let el = make_element()?;
        el.set_class("active", true);
        assert!(el.has_class("active"));
        el.set_class("active", false);
        assert!(!el.has_class("active"));
        Ok(())
    }

    #[wasm_bindgen_test]
    fn test_transform_composes() -> Result<(), String> {
        let el = make_element()?;
        el.write(Prop::X, Value::Num(10.0));
        el.write(Prop::Scale, Value::Num(0.95));
        assert_eq!(el.read(Prop::X), Value::Num(10.0));
        assert_eq!(
            el.html().style().get_property_value("transform").ok().as_deref(),
            Some("translate(10px, 0px) scale(0.95)")
        );
        Ok(())
    }

    #[wasm_bindgen_test]
    fn test_empty_style_removes_property() -> Result<(), String> {
        let el = make_element()?;
        el.set_style("display", "none");
        el.set_style("display", "");
        assert_eq!(el.html().style().get_property_value("display").ok().as_deref(), Some(""));
        Ok(())
    }
}
