//! RequestAnimationFrame ticker
//!
//! Drives the motion engine once per frame for the life of the page.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::Window;

use crate::error::{js_message, PageError};
use crate::motion::Motion;

/// The frame callback holds a handle to itself so it can re-arm, which
/// also keeps it alive after `start_ticker` returns.
type RafClosure = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn schedule(window: &Window, closure: &RafClosure) -> Result<i32, PageError> {
    let cb = closure.borrow();
    let cb = cb
        .as_ref()
        .ok_or_else(|| PageError::Frame("frame callback missing".to_string()))?;
    window
        .request_animation_frame(cb.as_ref().unchecked_ref())
        .map_err(|e| PageError::Frame(js_message(&e)))
}

/// Tick `motion` on every animation frame. The loop ends only if the
/// browser refuses a frame request.
pub fn start_ticker(window: &Window, motion: Motion) -> Result<(), PageError> {
    let closure: RafClosure = Rc::new(RefCell::new(None));
    {
        let closure_handle = closure.clone();
        let window = window.clone();
        *closure.borrow_mut() = Some(Closure::<dyn FnMut(f64)>::new(move |timestamp: f64| {
            motion.tick(timestamp);
            if let Err(e) = schedule(&window, &closure_handle) {
                tracing::error!("animation ticker stopped: {e}");
            }
        }));
    }

    schedule(window, &closure)?;
    tracing::debug!("animation ticker started");
    Ok(())
}
