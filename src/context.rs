//! Page Context
//!
//! The page's transient UI flags, held in signals. Behaviors write them
//! through these methods and project them onto their elements.

use leptos::prelude::*;

#[derive(Clone, Copy)]
pub struct PageContext {
    /// Id of the section whose nav link is highlighted - read
    pub active_section: ReadSignal<Option<String>>,
    set_active_section: WriteSignal<Option<String>>,
    /// Filter key of the selected work tab - read
    pub active_filter: ReadSignal<Option<String>>,
    set_active_filter: WriteSignal<Option<String>>,
    /// Index of the open FAQ item - read
    pub open_faq: ReadSignal<Option<usize>>,
    set_open_faq: WriteSignal<Option<usize>>,
    /// Whether each project card passes the current filter - read
    pub card_visibility: ReadSignal<Vec<bool>>,
    set_card_visibility: WriteSignal<Vec<bool>>,
}

impl PageContext {
    pub fn new() -> Self {
        let (active_section, set_active_section) = signal(None::<String>);
        let (active_filter, set_active_filter) = signal(None::<String>);
        let (open_faq, set_open_faq) = signal(None::<usize>);
        let (card_visibility, set_card_visibility) = signal(Vec::<bool>::new());
        Self {
            active_section,
            set_active_section,
            active_filter,
            set_active_filter,
            open_faq,
            set_open_faq,
            card_visibility,
            set_card_visibility,
        }
    }

    pub fn activate_section(&self, id: &str) {
        self.set_active_section.set(Some(id.to_string()));
    }

    pub fn select_filter(&self, key: &str, visibility: Vec<bool>) {
        self.set_active_filter.set(Some(key.to_string()));
        self.set_card_visibility.set(visibility);
    }

    /// Toggle item `index`; opening it closes whichever was open.
    /// Returns the open item afterwards.
    pub fn toggle_faq(&self, index: usize) -> Option<usize> {
        self.set_open_faq.update(|open| {
            *open = if *open == Some(index) { None } else { Some(index) };
        });
        self.open_faq.get_untracked()
    }
}

impl Default for PageContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_faq_keeps_one_open() {
        let ctx = PageContext::new();
        assert_eq!(ctx.toggle_faq(2), Some(2));
        assert_eq!(ctx.toggle_faq(0), Some(0));
        assert_eq!(ctx.toggle_faq(0), None);
    }

    #[test]
    fn test_select_filter_records_visibility() {
        let ctx = PageContext::new();
        ctx.select_filter("web", vec![true, false, true]);
        assert_eq!(ctx.active_filter.get_untracked().as_deref(), Some("web"));
        assert_eq!(ctx.card_visibility.get_untracked(), vec![true, false, true]);
    }
}
