//! Page-number pagination: the current page, the reported total, and the
//! window of page buttons shown at once.

use serde::Serialize;

/// Page buttons shown per window.
pub const PAGES_TO_SHOW: u32 = 10;

/// Inclusive range of page buttons. Empty when `end < start` (no pages yet).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageWindow {
    pub start: u32,
    pub end: u32,
}

impl PageWindow {
    /// Window for `current_page`, derived from `(current_page, total_pages)` only.
    ///
    /// `start = floor((current-1)/pages_to_show)*pages_to_show + 1`,
    /// `end = min(start + pages_to_show - 1, total_pages)`.
    pub fn compute(current_page: u32, total_pages: u32, pages_to_show: u32) -> Self {
        let pages_to_show = pages_to_show.max(1);
        let current = current_page.max(1);
        let start = (current - 1) / pages_to_show * pages_to_show + 1;
        let end = start.saturating_add(pages_to_show - 1).min(total_pages);
        PageWindow { start, end }
    }

    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }

    pub fn contains(&self, page: u32) -> bool {
        (self.start..=self.end).contains(&page)
    }

    pub fn pages(&self) -> impl Iterator<Item = u32> {
        self.start..=self.end
    }

    /// Last page of the previous window, if there is one.
    pub fn previous_page(&self) -> Option<u32> {
        (self.start > 1).then(|| self.start - 1)
    }

    /// First page of the next window, if the total reaches past this one.
    pub fn next_page(&self, total_pages: u32) -> Option<u32> {
        (!self.is_empty() && self.end < total_pages).then(|| self.end + 1)
    }
}

/// Current page (1-based), total pages (0 = unknown/empty) and page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationState {
    pub current_page: u32,
    pub total_pages: u32,
    pub page_size: u32,
}

impl PaginationState {
    pub fn new(page_size: u32) -> Self {
        Self {
            current_page: 1,
            total_pages: 0,
            page_size: page_size.max(1),
        }
    }

    /// Move to `page`, never below 1. Pages past the total are kept as-is;
    /// the source answers them with an empty page.
    pub fn go_to(&mut self, page: u32) {
        self.current_page = page.max(1);
    }

    /// Changing the size invalidates the page numbering, so start over at 1.
    pub fn resize(&mut self, page_size: u32) {
        self.page_size = page_size.max(1);
        self.current_page = 1;
    }

    pub fn window(&self, pages_to_show: u32) -> PageWindow {
        PageWindow::compute(self.current_page, self.total_pages, pages_to_show)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_first_block() {
        let w = PageWindow::compute(1, 4, PAGES_TO_SHOW);
        assert_eq!(w, PageWindow { start: 1, end: 4 });
        assert_eq!(w.pages().collect::<Vec<_>>(), vec![1, 2, 3, 4]);
        assert_eq!(w.previous_page(), None);
        assert_eq!(w.next_page(4), None);
    }

    #[test]
    fn test_window_block_boundaries() {
        assert_eq!(PageWindow::compute(10, 25, 10), PageWindow { start: 1, end: 10 });
        assert_eq!(PageWindow::compute(11, 25, 10), PageWindow { start: 11, end: 20 });
        assert_eq!(PageWindow::compute(25, 25, 10), PageWindow { start: 21, end: 25 });

        let w = PageWindow::compute(11, 25, 10);
        assert_eq!(w.previous_page(), Some(10));
        assert_eq!(w.next_page(25), Some(21));
    }

    #[test]
    fn test_window_contains_current_and_stays_bounded() {
        for total in 0..=45u32 {
            for current in 1..=50u32 {
                let w = PageWindow::compute(current, total, PAGES_TO_SHOW);
                assert!(w.end <= total, "end {} > total {}", w.end, total);
                if total >= current {
                    assert!(w.contains(current), "window {:?} misses {}", w, current);
                }
            }
        }
    }

    #[test]
    fn test_window_with_no_pages_is_empty() {
        let w = PageWindow::compute(1, 0, PAGES_TO_SHOW);
        assert!(w.is_empty());
        assert_eq!(w.pages().count(), 0);
        assert_eq!(w.next_page(0), None);
    }

    #[test]
    fn test_out_of_range_page_does_not_panic() {
        // 12 reviews at size 3 is 4 pages; page 5 is past the end.
        let mut state = PaginationState::new(3);
        state.total_pages = 4;
        state.go_to(5);
        assert_eq!(state.current_page, 5);
        let w = state.window(PAGES_TO_SHOW);
        assert_eq!(w, PageWindow { start: 1, end: 4 });
        assert!(!w.contains(5));
    }

    #[test]
    fn test_page_zero_is_clamped() {
        let mut state = PaginationState::new(0);
        assert_eq!(state.page_size, 1);
        state.go_to(0);
        assert_eq!(state.current_page, 1);
        assert_eq!(PageWindow::compute(0, 3, 0), PageWindow { start: 1, end: 1 });
    }

    #[test]
    fn test_resize_resets_to_first_page() {
        let mut state = PaginationState::new(5);
        state.go_to(3);
        state.resize(10);
        assert_eq!(state.current_page, 1);
        assert_eq!(state.page_size, 10);
    }
}
