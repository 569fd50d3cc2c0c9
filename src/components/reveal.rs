//! Scroll Reveal
//!
//! Cards and FAQ items start hidden and slightly lowered, and ease into
//! place the first time they scroll into view. The easing itself is a CSS
//! transition.

use std::rc::Rc;

use web_sys::Document;

use crate::config::RevealConfig;
use crate::dom::{query_all, DomElement, UiElement};
use crate::error::PageError;
use crate::observer::{VisibilityObserver, Watch, WebVisibilityObserver};

#[derive(Clone, Debug, PartialEq)]
pub struct Reveal {
    pub offset_px: f64,
    pub transition: String,
    /// Stop watching an element once it has been revealed
    pub one_shot: bool,
}

impl From<&RevealConfig> for Reveal {
    fn from(c: &RevealConfig) -> Self {
        Self {
            offset_px: c.offset_px,
            transition: c.transition.clone(),
            one_shot: c.one_shot,
        }
    }
}

impl Reveal {
    pub fn prepare<E: UiElement>(&self, el: &E) {
        el.set_style("opacity", "0");
        el.set_style("transform", &format!("translateY({}px)", self.offset_px));
        el.set_style("transition", &self.transition);
    }

    pub fn show<E: UiElement>(el: &E) {
        el.set_style("opacity", "1");
        el.set_style("transform", "translateY(0)");
    }

    /// Hide every element now and reveal each one as `observer` reports it
    pub fn watch<E, O>(&self, elements: Vec<Rc<E>>, observer: &O)
    where
        E: UiElement + 'static,
        O: VisibilityObserver<E>,
    {
        let decision = if self.one_shot { Watch::Stop } else { Watch::Keep };
        for el in elements {
            self.prepare(el.as_ref());
            observer.observe(
                el,
                Box::new(move |el: &E| {
                    Self::show(el);
                    decision
                }),
            );
        }
    }
}

pub fn wire(document: &Document, config: &RevealConfig) -> Result<(), PageError> {
    let elements: Vec<Rc<DomElement>> = query_all(document, &config.selector)?;
    if elements.is_empty() {
        return Ok(());
    }
    let observer = WebVisibilityObserver::new(config.threshold, &config.root_margin)?;
    let count = elements.len();
    Reveal::from(config).watch(elements, &observer);
    // observes for the life of the page
    std::mem::forget(observer);
    tracing::debug!(count, one_shot = config.one_shot, "scroll reveal wired");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeElement, FakeObserver};

    fn reveal(one_shot: bool) -> Reveal {
        Reveal { one_shot, ..Reveal::from(&RevealConfig::default()) }
    }

    fn elements(n: usize) -> Vec<Rc<FakeElement>> {
        (0..n).map(|_| Rc::new(FakeElement::new())).collect()
    }

    #[test]
    fn test_elements_start_hidden() {
        let els = elements(2);
        let observer = FakeObserver::default();
        reveal(true).watch(els.clone(), &observer);

        assert_eq!(observer.watching(), 2);
        for el in &els {
            assert_eq!(el.style("opacity").as_deref(), Some("0"));
            assert_eq!(el.style("transform").as_deref(), Some("translateY(20px)"));
            assert_eq!(
                el.style("transition").as_deref(),
                Some("opacity 0.6s ease, transform 0.6s ease")
            );
        }
    }

    #[test]
    fn test_intersection_reveals_only_target() {
        let els = elements(3);
        let observer = FakeObserver::default();
        reveal(true).watch(els.clone(), &observer);

        observer.intersect(&els[1]);
        assert_eq!(els[1].style("opacity").as_deref(), Some("1"));
        assert_eq!(els[1].style("transform").as_deref(), Some("translateY(0)"));
        assert_eq!(els[0].style("opacity").as_deref(), Some("0"));
        assert_eq!(els[2].style("opacity").as_deref(), Some("0"));
    }

    #[test]
    fn test_one_shot_stops_watching() {
        let els = elements(2);
        let observer = FakeObserver::default();
        reveal(true).watch(els.clone(), &observer);
        observer.intersect(&els[0]);
        assert_eq!(observer.watching(), 1);
    }

    #[test]
    fn test_persistent_never_rehides() {
        let els = elements(1);
        let observer = FakeObserver::default();
        reveal(false).watch(els.clone(), &observer);
        observer.intersect(&els[0]);
        observer.intersect(&els[0]);
        assert_eq!(observer.watching(), 1);
        assert_eq!(els[0].style("opacity").as_deref(), Some("1"));
    }
}
