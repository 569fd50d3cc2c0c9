//! Work Tabs
//!
//! A horizontally scrollable strip of filter tabs above the project cards.
//! The strip scrolls by drag (with inertia), by the arrow buttons, or
//! natively; edge fades show when there is more to scroll. Selecting a tab
//! filters the cards by category and centers the tab.

use std::rc::Rc;

use gloo_timers::callback::Timeout;
use leptos::prelude::GetUntracked;
use leptos_dragscroll::{bind_drag_scroll, DragScrollSignals};
use web_sys::{Document, Window};

use crate::config::PageConfig;
use crate::context::PageContext;
use crate::dom::{by_id, listen, listen_passive, query_all, query_all_in, UiElement};
use crate::error::PageError;
use crate::filter::{category_matches, centered_offset, clamp_scroll, fade_state};
use crate::motion::{Ease, Prop, TweenScheduler, TweenVars};

const ACTIVE: &str = "active";

pub struct Card<E> {
    pub el: Rc<E>,
    /// Trimmed text of the card's category label
    pub category: String,
}

pub struct Fades<E> {
    pub left: Rc<E>,
    pub right: Rc<E>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TabSettings {
    pub fade_threshold: f64,
    pub all_key: String,
    pub scroll_duration: f64,
    pub fade_duration: f64,
    pub filter_duration: f64,
    pub hidden_scale: f64,
}

impl From<&PageConfig> for TabSettings {
    fn from(c: &PageConfig) -> Self {
        Self {
            fade_threshold: c.fade_threshold_px,
            all_key: c.all_filter_key.clone(),
            scroll_duration: c.tab_scroll_duration,
            fade_duration: c.fade_duration,
            filter_duration: c.filter_duration,
            hidden_scale: c.hidden_card_scale,
        }
    }
}

pub struct WorkTabs<E> {
    strip: Rc<E>,
    tabs: Vec<Rc<E>>,
    cards: Vec<Card<E>>,
    fades: Option<Fades<E>>,
    scheduler: Rc<dyn TweenScheduler>,
    ctx: PageContext,
    settings: TabSettings,
}

impl<E: UiElement + 'static> WorkTabs<E> {
    pub fn new(
        strip: Rc<E>,
        tabs: Vec<Rc<E>>,
        cards: Vec<Card<E>>,
        fades: Option<Fades<E>>,
        scheduler: Rc<dyn TweenScheduler>,
        ctx: PageContext,
        settings: TabSettings,
    ) -> Self {
        Self { strip, tabs, cards, fades, scheduler, ctx, settings }
    }

    /// Fade the edge indicators in or out to match the scroll offset
    pub fn update_fade(&self) {
        let Some(fades) = &self.fades else {
            return;
        };
        let state = fade_state(
            self.strip.scroll_left(),
            self.strip.max_scroll(),
            self.settings.fade_threshold,
        );
        for (el, visible) in [(&fades.left, state.left), (&fades.right, state.right)] {
            self.scheduler.to(
                el.clone(),
                TweenVars::new()
                    .set(Prop::Opacity, if visible { 1.0 } else { 0.0 })
                    .duration(self.settings.fade_duration),
            );
        }
    }

    /// Smooth-scroll the strip by `delta` px, staying in range
    pub fn scroll_by(&self, delta: f64) {
        let target = clamp_scroll(self.strip.scroll_left() + delta, self.strip.max_scroll());
        self.scroll_to(target);
    }

    fn scroll_to(&self, offset: f64) {
        self.scheduler.to(
            self.strip.clone(),
            TweenVars::new()
                .set(Prop::ScrollLeft, offset)
                .duration(self.settings.scroll_duration)
                .ease(Ease::Power2Out),
        );
    }

    /// Tab `index` was clicked. Ignored when the click ends a drag;
    /// returns whether the tab was selected.
    pub fn click(&self, index: usize, drag: &DragScrollSignals) -> bool {
        if !drag.click_allowed() {
            tracing::trace!(index, "click after drag ignored");
            return false;
        }
        self.select(index);
        true
    }

    /// Activate tab `index`, filter the cards, and center the tab.
    /// Re-selecting the current filter only re-centers.
    pub fn select(&self, index: usize) {
        let Some(tab) = self.tabs.get(index) else {
            return;
        };
        for (i, t) in self.tabs.iter().enumerate() {
            t.set_class(ACTIVE, i == index);
        }

        let key = tab.attr("data-filter").unwrap_or_default();
        if self.ctx.active_filter.get_untracked().as_deref() != Some(key.as_str()) {
            let visibility: Vec<bool> = self
                .cards
                .iter()
                .map(|c| category_matches(&key, &c.category, &self.settings.all_key))
                .collect();
            tracing::debug!(filter = %key, shown = visibility.iter().filter(|v| **v).count(), "filter selected");
            self.ctx.select_filter(&key, visibility);

            for (card, show) in self.cards.iter().zip(self.ctx.card_visibility.get_untracked()) {
                self.animate_card(&card.el, show);
            }
        }

        let offset = centered_offset(
            tab.offset_left(),
            tab.offset_width(),
            self.strip.client_width(),
            self.strip.max_scroll(),
        );
        self.scroll_to(offset);
    }

    fn animate_card(&self, el: &Rc<E>, show: bool) {
        let duration = self.settings.filter_duration;
        let hidden_scale = self.settings.hidden_scale;
        let scheduler = self.scheduler.clone();
        let card = el.clone();

        self.scheduler.to(
            el.clone(),
            TweenVars::new()
                .set(Prop::Opacity, if show { 1.0 } else { 0.0 })
                .set(Prop::Scale, if show { 1.0 } else { hidden_scale })
                .duration(duration)
                .ease(Ease::Power2InOut)
                .on_complete(move || {
                    card.set_style("display", if show { "" } else { "none" });
                    if show {
                        scheduler.from(
                            card,
                            TweenVars::new()
                                .set(Prop::Opacity, 0.0)
                                .set(Prop::Scale, hidden_scale)
                                .duration(duration)
                                .ease(Ease::Power2Out),
                        );
                    }
                }),
        );
    }
}

pub fn wire(
    document: &Document,
    window: &Window,
    scheduler: &Rc<dyn TweenScheduler>,
    ctx: PageContext,
    config: &PageConfig,
) -> Result<(), PageError> {
    let Some(strip) = by_id(document, "workTabs") else {
        tracing::debug!("no #workTabs; tab wiring skipped");
        return Ok(());
    };
    let tabs = query_all_in(&strip, ".tab")?;
    let cards = query_all(document, ".project-card")?
        .into_iter()
        .map(|el| {
            let category = el
                .query(".project-category")
                .map(|c| c.text().trim().to_string())
                .unwrap_or_default();
            Card { el, category }
        })
        .collect();
    let fades = match (by_id(document, "tabs-fade-left"), by_id(document, "tabs-fade-right")) {
        (Some(left), Some(right)) => Some(Fades { left, right }),
        _ => None,
    };

    let controller = Rc::new(WorkTabs::new(
        strip.clone(),
        tabs.clone(),
        cards,
        fades,
        scheduler.clone(),
        ctx,
        TabSettings::from(config),
    ));

    let drag = {
        let c = controller.clone();
        bind_drag_scroll(strip.html().clone(), (&config.drag).into(), move || c.update_fade())
    };

    {
        let c = controller.clone();
        listen_passive(strip.html(), "scroll", move |_| c.update_fade())?;
    }

    {
        let c = controller.clone();
        let delay = config.resize_debounce_ms;
        let mut pending: Option<Timeout> = None;
        listen_passive(window, "resize", move |_| {
            if let Some(previous) = pending.take() {
                let _ = previous.cancel();
            }
            let c = c.clone();
            pending = Some(Timeout::new(delay, move || c.update_fade()));
        })?;
    }

    let step = config.tab_scroll_step_px;
    for (id, delta) in [("tabs-scroll-left", -step), ("tabs-scroll-right", step)] {
        let Some(button) = by_id(document, id) else {
            continue;
        };
        let c = controller.clone();
        listen(button.html(), "click", move |_| c.scroll_by(delta))?;
    }

    for (i, tab) in tabs.iter().enumerate() {
        let c = controller.clone();
        listen(tab.html(), "click", move |_| {
            c.click(i, &drag);
        })?;
    }

    controller.update_fade();
    tracing::debug!(tabs = tabs.len(), "work tabs wired");
    Ok(())
}
