//! Navigation Scroll-Spy
//!
//! Highlights the nav link of the section crossing the viewport's center
//! line, and smooth-scrolls to a section when its link is clicked.

use std::cell::Cell;
use std::rc::Rc;

use leptos::prelude::GetUntracked;
use web_sys::{Document, Event};

use crate::config::PageConfig;
use crate::context::PageContext;
use crate::dom::{listen, listen_passive, query_all, UiElement, Viewport, WebViewport};
use crate::error::PageError;
use crate::filter::section_at;
use crate::motion::{Ease, Prop, TweenScheduler, TweenVars};

const ACTIVE: &str = "active";
const SECTION_ATTR: &str = "data-section";

pub struct NavSpy<E, V> {
    links: Vec<Rc<E>>,
    sections: Vec<Rc<E>>,
    viewport: Rc<V>,
    scheduler: Rc<dyn TweenScheduler>,
    ctx: PageContext,
    /// Seconds
    scroll_duration: f64,
    /// Section currently under the center line
    crossed: Cell<Option<usize>>,
}

impl<E, V> NavSpy<E, V>
where
    E: UiElement + 'static,
    V: Viewport + 'static,
{
    pub fn new(
        links: Vec<Rc<E>>,
        sections: Vec<Rc<E>>,
        viewport: Rc<V>,
        scheduler: Rc<dyn TweenScheduler>,
        ctx: PageContext,
        scroll_duration: f64,
    ) -> Self {
        Self {
            links,
            sections,
            viewport,
            scheduler,
            ctx,
            scroll_duration,
            crossed: Cell::new(None),
        }
    }

    /// Nav link `index` was clicked
    pub fn click(&self, index: usize) {
        let Some(link) = self.links.get(index) else {
            return;
        };
        for (i, l) in self.links.iter().enumerate() {
            l.set_class(ACTIVE, i == index);
        }

        let target = link.attr(SECTION_ATTR).unwrap_or_default();
        self.ctx.activate_section(&target);

        match self.sections.iter().find(|s| s.id() == target) {
            Some(section) => {
                let y = (self.viewport.scroll_y() + section.viewport_span().top).max(0.0);
                self.scheduler.to(
                    self.viewport.clone(),
                    TweenVars::new()
                        .set(Prop::ScrollY, y)
                        .duration(self.scroll_duration)
                        .ease(Ease::Power2InOut),
                );
            }
            None => tracing::debug!(section = %target, "nav target not on page"),
        }
    }

    /// Re-check which section straddles the center line. Only a change
    /// counts as a crossing; a click's highlight stands until then.
    pub fn on_scroll(&self) {
        let line = self.viewport.height() / 2.0;
        let current = section_at(self.sections.iter().map(|s| s.viewport_span()), line);
        if self.crossed.replace(current) == current {
            return;
        }
        let Some(index) = current else {
            return;
        };
        let id = self.sections[index].id();
        tracing::trace!(section = %id, "section crossed center");
        self.ctx.activate_section(&id);
        self.project_active_section();
    }

    /// Highlight the links that point at the active section
    fn project_active_section(&self) {
        let active = self.ctx.active_section.get_untracked();
        for link in &self.links {
            link.set_class(ACTIVE, active.is_some() && link.attr(SECTION_ATTR) == active);
        }
    }
}

pub fn wire(
    document: &Document,
    viewport: Rc<WebViewport>,
    scheduler: &Rc<dyn TweenScheduler>,
    ctx: PageContext,
    config: &PageConfig,
) -> Result<(), PageError> {
    let links = query_all(document, ".nav-link")?;
    if links.is_empty() {
        tracing::debug!("no nav links; scroll-spy skipped");
        return Ok(());
    }
    let sections = query_all(document, "section")?;

    let spy = Rc::new(NavSpy::new(
        links.clone(),
        sections,
        viewport.clone(),
        scheduler.clone(),
        ctx,
        config.nav_scroll_duration,
    ));

    for (i, link) in links.iter().enumerate() {
        let spy = spy.clone();
        listen(link.html(), "click", move |ev: Event| {
            ev.prevent_default();
            spy.click(i);
        })?;
    }

    let window = viewport.window();
    {
        let spy = spy.clone();
        listen_passive(window, "scroll", move |_| spy.on_scroll())?;
    }
    {
        let spy = spy.clone();
        listen_passive(window, "resize", move |_| spy.on_scroll())?;
    }

    spy.on_scroll();
    tracing::debug!(links = links.len(), "scroll-spy wired");
    Ok(())
}
