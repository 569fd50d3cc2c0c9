//! In-memory stand-ins for the DOM, used by unit tests.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeSet, HashMap};
use std::rc::Rc;

use crate::dom::{UiElement, Viewport};
use crate::filter::{clamp_scroll, Span};
use crate::motion::{Animatable, Prop, Rgba, Value};
use crate::observer::{VisibilityObserver, Watch};

#[derive(Clone, Copy, Debug, Default)]
pub struct Geometry {
    pub offset_left: f64,
    pub offset_width: f64,
    pub scroll_width: f64,
    pub client_width: f64,
}

#[derive(Default)]
pub struct FakeElement {
    id: String,
    text: String,
    attrs: HashMap<String, String>,
    classes: RefCell<BTreeSet<String>>,
    styles: RefCell<HashMap<String, String>>,
    values: RefCell<HashMap<Prop, Value>>,
    geometry: Geometry,
    span: Cell<Span>,
}

impl FakeElement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_geometry(mut self, geometry: Geometry) -> Self {
        self.geometry = geometry;
        self
    }

    pub fn with_span(self, top: f64, bottom: f64) -> Self {
        self.span.set(Span::new(top, bottom));
        self
    }

    pub fn set_span(&self, span: Span) {
        self.span.set(span);
    }

    pub fn style(&self, prop: &str) -> Option<String> {
        self.styles.borrow().get(prop).cloned()
    }

    pub fn num(&self, prop: Prop) -> f64 {
        self.read(prop).as_num().unwrap_or(f64::NAN)
    }

    /// Simulate a native scroll
    pub fn scroll_to(&self, offset: f64) {
        self.write(Prop::ScrollLeft, Value::Num(offset));
    }
}

impl Animatable for FakeElement {
    fn read(&self, prop: Prop) -> Value {
        if let Some(v) = self.values.borrow().get(&prop) {
            return *v;
        }
        match prop {
            Prop::Opacity | Prop::Scale => Value::Num(1.0),
            Prop::BackgroundColor => Value::Color(Rgba::TRANSPARENT),
            _ => Value::Num(0.0),
        }
    }

    fn write(&self, prop: Prop, value: Value) {
        let value = match (prop, value) {
            (Prop::ScrollLeft, Value::Num(n)) => Value::Num(clamp_scroll(n, self.max_scroll())),
            _ => value,
        };
        self.values.borrow_mut().insert(prop, value);
    }
}

impl UiElement for FakeElement {
    fn set_class(&self, class: &str, on: bool) {
        let mut classes = self.classes.borrow_mut();
        if on {
            classes.insert(class.to_string());
        } else {
            classes.remove(class);
        }
    }

    fn has_class(&self, class: &str) -> bool {
        self.classes.borrow().contains(class)
    }

    fn attr(&self, name: &str) -> Option<String> {
        self.attrs.get(name).cloned()
    }

    fn id(&self) -> String {
        self.id.clone()
    }

    fn text(&self) -> String {
        self.text.clone()
    }

    fn set_style(&self, prop: &str, value: &str) {
        let mut styles = self.styles.borrow_mut();
        if value.is_empty() {
            styles.remove(prop);
        } else {
            styles.insert(prop.to_string(), value.to_string());
        }
    }

    fn offset_left(&self) -> f64 {
        self.geometry.offset_left
    }

    fn offset_width(&self) -> f64 {
        self.geometry.offset_width
    }

    fn scroll_left(&self) -> f64 {
        self.num(Prop::ScrollLeft)
    }

    fn scroll_width(&self) -> f64 {
        self.geometry.scroll_width
    }

    fn client_width(&self) -> f64 {
        self.geometry.client_width
    }

    fn viewport_span(&self) -> Span {
        self.span.get()
    }
}

#[derive(Default)]
pub struct FakeViewport {
    pub scroll: Cell<f64>,
    pub height: f64,
}

impl FakeViewport {
    pub fn new(height: f64) -> Self {
        Self { scroll: Cell::new(0.0), height }
    }
}

impl Animatable for FakeViewport {
    fn read(&self, prop: Prop) -> Value {
        match prop {
            Prop::ScrollY => Value::Num(self.scroll.get()),
            _ => Value::Num(0.0),
        }
    }

    fn write(&self, prop: Prop, value: Value) {
        if let (Prop::ScrollY, Value::Num(y)) = (prop, value) {
            self.scroll.set(y);
        }
    }
}

impl Viewport for FakeViewport {
    fn scroll_y(&self) -> f64 {
        self.scroll.get()
    }

    fn height(&self) -> f64 {
        self.height
    }
}

type Watcher = (Rc<FakeElement>, Box<dyn FnMut(&FakeElement) -> Watch>);

/// Records observed elements; tests decide when they intersect
#[derive(Default)]
pub struct FakeObserver {
    watched: RefCell<Vec<Watcher>>,
}

impl FakeObserver {
    pub fn watching(&self) -> usize {
        self.watched.borrow().len()
    }

    /// Report `target` as intersecting
    pub fn intersect(&self, target: &Rc<FakeElement>) {
        let mut watched = self.watched.borrow_mut();
        watched.retain_mut(|(el, on_visible)| {
            if !Rc::ptr_eq(el, target) {
                return true;
            }
            on_visible(el) == Watch::Keep
        });
    }
}

impl VisibilityObserver<FakeElement> for FakeObserver {
    fn observe(&self, target: Rc<FakeElement>, on_visible: Box<dyn FnMut(&FakeElement) -> Watch>) {
        self.watched.borrow_mut().push((target, on_visible));
    }
}
