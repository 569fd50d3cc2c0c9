//! Leptos DragScroll Utilities
//!
//! Drag-to-scroll for horizontal strips using mouse events.
//! Uses movement threshold to distinguish click from drag, and throws the
//! strip with inertia on release.

use leptos::prelude::*;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

/// Movement threshold in pixels to start dragging
pub const DRAG_THRESHOLD_PX: f64 = 5.0;

/// How long a finished drag keeps swallowing the click that follows it
const CLICK_SUPPRESS_MS: i32 = 100;

/// Only pointer samples this recent count towards release velocity
const VELOCITY_WINDOW_MS: f64 = 100.0;

/// Friction is expressed per reference frame of this length
const FRAME_MS: f64 = 16.0;

/// Throws slower than this (px/ms) come to rest
const MIN_VELOCITY: f64 = 0.01;

/// Tuning for a drag-scroll strip
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragScrollOptions {
    /// Pointer travel before a press becomes a drag
    pub threshold_px: f64,
    /// 0..1, how hard the strip resists being pulled past an edge. Scales
    /// drag overshoot and brakes a throw heading past an edge.
    pub edge_resistance: f64,
    /// Velocity kept per 16ms frame while coasting
    pub friction: f64,
}

impl Default for DragScrollOptions {
    fn default() -> Self {
        Self {
            threshold_px: DRAG_THRESHOLD_PX,
            edge_resistance: 0.65,
            friction: 0.95,
        }
    }
}

/// Inclusive scroll range
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    /// A range whose max never falls below its min
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max: max.max(min) }
    }

    /// Scroll range of an element: `[0, scrollWidth - clientWidth]`
    pub fn for_scroll(scroll_width: f64, client_width: f64) -> Self {
        Self::new(0.0, scroll_width - client_width)
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

/// Where a drag puts the strip
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragFrame {
    /// Scroll offset, always inside the bounds
    pub scroll: f64,
    /// Resisted pull past an edge: negative before the start, positive past the end
    pub overshoot: f64,
}

/// Frame for a drag that started at `start_scroll` and has moved `dx`
pub fn drag_frame(start_scroll: f64, dx: f64, bounds: Bounds, edge_resistance: f64) -> DragFrame {
    let raw = start_scroll - dx;
    let scroll = bounds.clamp(raw);
    DragFrame {
        scroll,
        overshoot: (raw - scroll) * (1.0 - edge_resistance.clamp(0.0, 1.0)),
    }
}

// ========================
// Velocity tracking
// ========================

/// Recent (time, position) samples for release velocity
#[derive(Clone, Debug, Default)]
pub struct VelocityTracker {
    samples: VecDeque<(f64, f64)>,
}

impl VelocityTracker {
    pub fn reset(&mut self) {
        self.samples.clear();
    }

    pub fn record(&mut self, time_ms: f64, position: f64) {
        self.samples.push_back((time_ms, position));
        while self.samples.len() > 2 {
            match self.samples.front() {
                Some(&(t, _)) if time_ms - t > VELOCITY_WINDOW_MS => {
                    self.samples.pop_front();
                }
                _ => break,
            }
        }
    }

    /// Pixels per millisecond across the window ending at `now_ms`. Samples
    /// older than the window are ignored, so a pause reads as standing still.
    pub fn velocity(&self, now_ms: f64) -> f64 {
        let mut recent = self
            .samples
            .iter()
            .filter(|&&(t, _)| now_ms - t <= VELOCITY_WINDOW_MS);
        let first = recent.next();
        let last = recent.last();
        match (first, last) {
            (Some(&(t0, p0)), Some(&(t1, p1))) if t1 > t0 => (p1 - p0) / (t1 - t0),
            _ => 0.0,
        }
    }
}

// ========================
// Inertia
// ========================

/// A coasting strip after release
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Throw {
    pub position: f64,
    pub velocity: f64,
    bounds: Bounds,
    options: DragScrollOptions,
}

impl Throw {
    pub fn new(position: f64, velocity: f64, bounds: Bounds, options: DragScrollOptions) -> Self {
        let options = DragScrollOptions {
            friction: options.friction.clamp(0.0, 0.999),
            edge_resistance: options.edge_resistance.clamp(0.0, 1.0),
            ..options
        };
        Self {
            position: bounds.clamp(position),
            velocity,
            bounds,
            options,
        }
    }

    pub fn is_moving(&self) -> bool {
        self.velocity.abs() >= MIN_VELOCITY
    }

    /// Distance the throw would still cover if left to friction alone
    fn coast_distance(&self) -> f64 {
        let f = self.options.friction;
        self.velocity * FRAME_MS * f / (1.0 - f)
    }

    /// Advance by `dt_ms`; returns whether the strip is still moving
    pub fn step(&mut self, dt_ms: f64) -> bool {
        if dt_ms <= 0.0 || !self.is_moving() {
            return self.is_moving();
        }
        let frames = dt_ms / FRAME_MS;

        let landing = self.position + self.coast_distance();
        if landing < self.bounds.min || landing > self.bounds.max {
            self.velocity *= (1.0 - self.options.edge_resistance).powf(frames);
        }

        self.position = self.bounds.clamp(self.position + self.velocity * dt_ms);
        self.velocity *= self.options.friction.powf(frames);

        let pinned_low = self.position <= self.bounds.min && self.velocity < 0.0;
        let pinned_high = self.position >= self.bounds.max && self.velocity > 0.0;
        if pinned_low || pinned_high || !self.is_moving() {
            self.velocity = 0.0;
        }
        self.is_moving()
    }
}

// ========================
// Signals
// ========================

/// Drag state signals
#[derive(Clone, Copy)]
pub struct DragScrollSignals {
    pub dragging_read: ReadSignal<bool>,
    pub dragging_write: WriteSignal<bool>,
    /// True briefly after a drag so the trailing click can be ignored
    pub drag_just_ended_read: ReadSignal<bool>,
    pub drag_just_ended_write: WriteSignal<bool>,
    pub throwing_read: ReadSignal<bool>,
    pub throwing_write: WriteSignal<bool>,
}

pub fn create_drag_scroll_signals() -> DragScrollSignals {
    let (dragging_read, dragging_write) = signal(false);
    let (drag_just_ended_read, drag_just_ended_write) = signal(false);
    let (throwing_read, throwing_write) = signal(false);
    DragScrollSignals {
        dragging_read,
        dragging_write,
        drag_just_ended_read,
        drag_just_ended_write,
        throwing_read,
        throwing_write,
    }
}

impl DragScrollSignals {
    /// False while the click that ends a drag may still arrive
    pub fn click_allowed(&self) -> bool {
        !self.drag_just_ended_read.get_untracked()
    }
}

/// Leave the dragging state and start swallowing clicks
pub fn mark_drag_ended(signals: &DragScrollSignals) {
    signals.dragging_write.set(false);
    signals.drag_just_ended_write.set(true);
}

/// End drag operation; clicks are accepted again after a short delay
pub fn end_drag(signals: &DragScrollSignals) {
    mark_drag_ended(signals);

    if let Some(win) = web_sys::window() {
        let clear = signals.drag_just_ended_write;
        let cb = Closure::<dyn FnMut()>::new(move || {
            clear.set(false);
        });
        let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(
            cb.as_ref().unchecked_ref(),
            CLICK_SUPPRESS_MS,
        );
        cb.forget();
    }
}

// ========================
// DOM binding
// ========================

type FrameClosure = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

#[derive(Default)]
struct DragSession {
    pending: bool,
    start_x: f64,
    start_scroll: f64,
    tracker: VelocityTracker,
    throw: Option<Throw>,
    last_frame: Option<f64>,
    frame_id: Option<i32>,
    /// Overshoot currently shown as a transform
    overshoot: f64,
}

const SPRING_BACK: &str = "transform 0.3s ease-out";

fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

fn strip_bounds(strip: &web_sys::HtmlElement) -> Bounds {
    Bounds::for_scroll(f64::from(strip.scroll_width()), f64::from(strip.client_width()))
}

fn cancel_throw(session: &mut DragSession, signals: &DragScrollSignals) {
    if let (Some(id), Some(win)) = (session.frame_id.take(), web_sys::window()) {
        let _ = win.cancel_animation_frame(id);
    }
    session.throw = None;
    session.last_frame = None;
    signals.throwing_write.set(false);
}

/// Show `overshoot` by shifting the strip; zero springs it back into place
fn show_overshoot(strip: &web_sys::HtmlElement, overshoot: f64) {
    let style = strip.style();
    if overshoot == 0.0 {
        let _ = style.set_property("transition", SPRING_BACK);
        let _ = style.remove_property("transform");
    } else {
        let _ = style.set_property("transition", "none");
        let _ = style.set_property("transform", &format!("translateX({}px)", -overshoot));
    }
}

fn request_frame(closure: &FrameClosure) -> Option<i32> {
    let win = web_sys::window()?;
    let cb = closure.borrow();
    let cb = cb.as_ref()?;
    win.request_animation_frame(cb.as_ref().unchecked_ref()).ok()
}

/// Make `strip` draggable along x. `on_update` runs after every scroll
/// change caused by a drag or throw.
pub fn bind_drag_scroll<F>(
    strip: web_sys::HtmlElement,
    options: DragScrollOptions,
    on_update: F,
) -> DragScrollSignals
where
    F: Fn() + 'static,
{
    let signals = create_drag_scroll_signals();
    let session = Rc::new(RefCell::new(DragSession::default()));
    let on_update: Rc<dyn Fn()> = Rc::new(on_update);

    // Throw animation frame
    let frame: FrameClosure = Rc::new(RefCell::new(None));
    {
        let frame_handle = frame.clone();
        let session = session.clone();
        let strip = strip.clone();
        let on_update = on_update.clone();
        *frame.borrow_mut() = Some(Closure::<dyn FnMut(f64)>::new(move |timestamp: f64| {
            let moving = {
                let mut s = session.borrow_mut();
                let dt = s.last_frame.map_or(0.0, |last| timestamp - last);
                s.last_frame = Some(timestamp);
                match s.throw.as_mut() {
                    Some(throw) => {
                        let moving = throw.step(dt);
                        strip.set_scroll_left(throw.position.round() as i32);
                        moving
                    }
                    None => false,
                }
            };
            on_update();

            let mut s = session.borrow_mut();
            if moving {
                s.frame_id = request_frame(&frame_handle);
            } else {
                s.throw = None;
                s.last_frame = None;
                s.frame_id = None;
                signals.throwing_write.set(false);
            }
        }));
    }

    // Press arms a pending drag
    let on_mousedown = {
        let session = session.clone();
        let strip = strip.clone();
        Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
            if ev.button() != 0 {
                return;
            }
            let mut s = session.borrow_mut();
            cancel_throw(&mut s, &signals);
            s.pending = true;
            s.start_x = f64::from(ev.client_x());
            let start = f64::from(strip.scroll_left());
            s.start_scroll = start;
            s.tracker.reset();
            s.tracker.record(now_ms(), start);
        })
    };

    let on_mousemove = {
        let session = session.clone();
        let strip = strip.clone();
        let on_update = on_update.clone();
        Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
            {
                let mut s = session.borrow_mut();
                if !s.pending {
                    return;
                }
                let dx = f64::from(ev.client_x()) - s.start_x;
                if !signals.dragging_read.get_untracked() {
                    if dx.abs() <= options.threshold_px {
                        return;
                    }
                    signals.dragging_write.set(true);
                }
                ev.prevent_default();
                let frame = drag_frame(s.start_scroll, dx, strip_bounds(&strip), options.edge_resistance);
                strip.set_scroll_left(frame.scroll.round() as i32);
                if frame.overshoot != s.overshoot {
                    show_overshoot(&strip, frame.overshoot);
                    s.overshoot = frame.overshoot;
                }
                s.tracker.record(now_ms(), frame.scroll);
            }
            on_update();
        })
    };

    let on_mouseup = {
        let session = session.clone();
        let strip = strip.clone();
        let frame = frame.clone();
        Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |_ev: web_sys::MouseEvent| {
            let mut s = session.borrow_mut();
            s.pending = false;
            if !signals.dragging_read.get_untracked() {
                return;
            }
            end_drag(&signals);
            if s.overshoot != 0.0 {
                show_overshoot(&strip, 0.0);
                s.overshoot = 0.0;
            }

            let now = now_ms();
            let position = f64::from(strip.scroll_left());
            s.tracker.record(now, position);
            let throw = Throw::new(position, s.tracker.velocity(now), strip_bounds(&strip), options);
            if throw.is_moving() {
                s.throw = Some(throw);
                s.last_frame = None;
                signals.throwing_write.set(true);
                s.frame_id = request_frame(&frame);
            }
        })
    };

    let _ = strip.add_event_listener_with_callback("mousedown", on_mousedown.as_ref().unchecked_ref());
    if let Some(doc) = web_sys::window().and_then(|w| w.document()) {
        let _ = doc.add_event_listener_with_callback("mousemove", on_mousemove.as_ref().unchecked_ref());
        let _ = doc.add_event_listener_with_callback("mouseup", on_mouseup.as_ref().unchecked_ref());
    }
    on_mousedown.forget();
    on_mousemove.forget();
    on_mouseup.forget();

    signals
}
