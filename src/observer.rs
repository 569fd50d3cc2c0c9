//! Visibility Observation
//!
//! Reports when watched elements scroll into view. The browser adapter wraps
//! `IntersectionObserver`.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::dom::DomElement;
use crate::error::{js_message, PageError};

/// What to do with an element after it became visible
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Watch {
    Keep,
    Stop,
}

pub trait VisibilityObserver<E> {
    /// Call `on_visible` each time `target` enters the observed area
    fn observe(&self, target: Rc<E>, on_visible: Box<dyn FnMut(&E) -> Watch>);
}

type Watcher = (Rc<DomElement>, Box<dyn FnMut(&DomElement) -> Watch>);

pub struct WebVisibilityObserver {
    observer: IntersectionObserver,
    watched: Rc<RefCell<Vec<Watcher>>>,
}

impl WebVisibilityObserver {
    /// `threshold` is the visible fraction that counts as entering;
    /// `root_margin` grows or shrinks the viewport like a CSS margin.
    pub fn new(threshold: f64, root_margin: &str) -> Result<Self, PageError> {
        let watched: Rc<RefCell<Vec<Watcher>>> = Rc::default();

        let callback = {
            let watched = watched.clone();
            Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
                move |entries: js_sys::Array, observer: IntersectionObserver| {
                    for entry in entries.iter() {
                        let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                            continue;
                        };
                        if !entry.is_intersecting() {
                            continue;
                        }
                        let target = entry.target();
                        let node: &web_sys::Node = target.as_ref();
                        watched.borrow_mut().retain_mut(|(el, on_visible)| {
                            if !el.html().is_same_node(Some(node)) {
                                return true;
                            }
                            match on_visible(el) {
                                Watch::Keep => true,
                                Watch::Stop => {
                                    observer.unobserve(&target);
                                    false
                                }
                            }
                        });
                    }
                },
            )
        };

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(threshold));
        init.set_root_margin(root_margin);

        let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
            .map_err(|e| PageError::Observer(js_message(&e)))?;
        callback.forget();

        Ok(Self { observer, watched })
    }
}

impl VisibilityObserver<DomElement> for WebVisibilityObserver {
    fn observe(&self, target: Rc<DomElement>, on_visible: Box<dyn FnMut(&DomElement) -> Watch>) {
        self.observer.observe(target.html());
        self.watched.borrow_mut().push((target, on_visible));
    }
}
