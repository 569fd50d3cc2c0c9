//! Page Rules
//!
//! Pure decisions behind the page behaviors, kept apart from the DOM.

/// Vertical extent of an element relative to the viewport
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Span {
    pub top: f64,
    pub bottom: f64,
}

impl Span {
    pub fn new(top: f64, bottom: f64) -> Self {
        Self { top, bottom }
    }

    /// The line is inside once the top has reached it and until the bottom does
    pub fn contains(&self, line: f64) -> bool {
        self.top <= line && line < self.bottom
    }
}

/// Index of the first span the line passes through
pub fn section_at(spans: impl IntoIterator<Item = Span>, line: f64) -> Option<usize> {
    spans.into_iter().position(|s| s.contains(line))
}

/// Whether a card with `category` passes `filter`.
/// The key is compared as written; only the category text is trimmed.
pub fn category_matches(filter: &str, category: &str, all_key: &str) -> bool {
    filter.eq_ignore_ascii_case(all_key) || category.trim().to_lowercase() == filter.to_lowercase()
}

/// Largest valid scroll offset of a strip
pub fn max_scroll(scroll_width: f64, client_width: f64) -> f64 {
    (scroll_width - client_width).max(0.0)
}

pub fn clamp_scroll(offset: f64, max: f64) -> f64 {
    offset.clamp(0.0, max.max(0.0))
}

/// Scroll offset that centers a tab within its strip
pub fn centered_offset(tab_left: f64, tab_width: f64, client_width: f64, max: f64) -> f64 {
    clamp_scroll(tab_left - client_width / 2.0 + tab_width / 2.0, max)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FadeState {
    pub left: bool,
    pub right: bool,
}

/// Edge fades show while there is more than `threshold` px left to scroll
pub fn fade_state(offset: f64, max: f64, threshold: f64) -> FadeState {
    FadeState {
        left: offset > threshold,
        right: offset < max - threshold,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_matching() {
        assert!(category_matches("web", " Web ", "all"));
        assert!(!category_matches("web", "Mobile", "all"));
        assert!(category_matches("all", "Mobile", "all"));
        assert!(category_matches("ALL", "", "all"));
        assert!(!category_matches("", "Web", "all"));
    }

    #[test]
    fn test_filter_key_not_trimmed() {
        assert!(!category_matches(" web", "Web", "all"));
        assert!(!category_matches("all ", "Web", "all"));
    }

    #[test]
    fn test_section_at_center_line() {
        let spans = [Span::new(-500.0, -100.0), Span::new(-100.0, 350.0), Span::new(350.0, 900.0)];
        assert_eq!(section_at(spans, 300.0), Some(1));
        assert_eq!(section_at(spans, 350.0), Some(2));
        assert_eq!(section_at(spans, 950.0), None);
    }

    #[test]
    fn test_fade_thresholds() {
        assert_eq!(fade_state(0.0, 400.0, 8.0), FadeState { left: false, right: true });
        assert_eq!(fade_state(8.0, 400.0, 8.0), FadeState { left: false, right: true });
        assert_eq!(fade_state(9.0, 400.0, 8.0), FadeState { left: true, right: true });
        assert_eq!(fade_state(392.0, 400.0, 8.0), FadeState { left: true, right: false });
        assert_eq!(fade_state(0.0, 0.0, 8.0), FadeState { left: false, right: false });
    }

    #[test]
    fn test_centered_offset_clamped() {
        assert_eq!(centered_offset(500.0, 100.0, 400.0, 1000.0), 350.0);
        assert_eq!(centered_offset(10.0, 100.0, 400.0, 1000.0), 0.0);
        assert_eq!(centered_offset(1300.0, 100.0, 400.0, 1000.0), 1000.0);
    }

    #[test]
    fn test_max_scroll_never_negative() {
        assert_eq!(max_scroll(300.0, 500.0), 0.0);
        assert_eq!(clamp_scroll(-20.0, 100.0), 0.0);
        assert_eq!(clamp_scroll(120.0, 100.0), 100.0);
    }
}
