use serde::Serialize;

/// Number of posts requested per page.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 10;

/// Number of page links shown in the navigation strip.
pub const DEFAULT_WINDOW_SIZE: usize = 5;

/// Computes the sliding window of page numbers around `current_page`.
///
/// Returns an empty strip when there is at most one page. The window never
/// exceeds `window_size` entries, stays within `1..=total_pages` and is shifted
/// left to stay full near the last page.
pub fn page_window(current_page: usize, total_pages: usize, window_size: usize) -> Vec<usize> {
    if total_pages <= 1 || window_size == 0 {
        return vec![];
    }

    let current_page = current_page.clamp(1, total_pages);
    let mut start = 1.max(current_page.saturating_sub(window_size / 2));
    let end = total_pages.min(start + window_size - 1);

    if end + 1 - start < window_size {
        start = 1.max((end + 1).saturating_sub(window_size));
    }

    (start..=end).collect()
}

/// Page position of the list view.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub struct PaginationState {
    current_page: usize,
    total_pages: usize,
    page_size: usize,
}

impl PaginationState {
    /// Starts on page 1 of 1 with `page_size` posts per page (at least one).
    pub fn new(page_size: usize) -> Self {
        Self {
            current_page: 1,
            total_pages: 1,
            page_size: page_size.max(1),
        }
    }

    /// The 1-based page being displayed.
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Number of pages last reported by the service, never below 1.
    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Posts requested per page.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Clamps `page` into `1..=total_pages` and makes it current.
    pub fn go_to(&mut self, page: usize) -> usize {
        self.current_page = page.clamp(1, self.total_pages);
        self.current_page
    }

    /// Records the page count reported by the service. A report of zero pages
    /// (no results) is stored as one page.
    ///
    /// Returns `true` when the current page had to be clamped.
    pub fn set_total_pages(&mut self, total_pages: usize) -> bool {
        self.total_pages = total_pages.max(1);
        if self.current_page > self.total_pages {
            self.current_page = self.total_pages;
            true
        } else {
            false
        }
    }

    /// Returns to page 1, keeping the known page count.
    pub fn reset(&mut self) {
        self.current_page = 1;
    }
}

/// Page of items along with the navigation strip.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pages: Vec<usize>,
    pub page: usize,
    pub total_pages: usize,
}

impl<T> Paginated<T> {
    /// Wraps one page of items with the default window size.
    pub fn new(items: Vec<T>, current_page: usize, total_pages: usize) -> Self {
        Self::with_window(items, current_page, total_pages, DEFAULT_WINDOW_SIZE)
    }

    /// Wraps one page of items and computes a page strip of at most `window_size` entries.
    pub fn with_window(
        items: Vec<T>,
        current_page: usize,
        total_pages: usize,
        window_size: usize,
    ) -> Self {
        let current_page = if current_page == 0 { 1 } else { current_page };

        let pages = page_window(current_page, total_pages, window_size);

        Self {
            items,
            pages,
            page: current_page,
            total_pages: total_pages.max(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_properties_hold_for_small_page_counts() {
        for total in [1usize, 3, 5, 8] {
            for current in 1..=total {
                let window = page_window(current, total, DEFAULT_WINDOW_SIZE);
                if total <= 1 {
                    assert!(window.is_empty());
                    continue;
                }
                assert_eq!(window.len(), DEFAULT_WINDOW_SIZE.min(total));
                assert!(window.windows(2).all(|w| w[1] == w[0] + 1));
                assert!(window.contains(&current));
                assert!(window[0] >= 1);
                assert!(*window.last().unwrap() <= total);
            }
        }
    }

    #[test]
    fn window_is_left_shifted_near_the_end() {
        assert_eq!(page_window(8, 8, 5), vec![4, 5, 6, 7, 8]);
        assert_eq!(page_window(7, 8, 5), vec![4, 5, 6, 7, 8]);
        assert_eq!(page_window(5, 8, 5), vec![3, 4, 5, 6, 7]);
    }

    #[test]
    fn window_starts_at_one_on_first_page() {
        assert_eq!(page_window(1, 8, 5), vec![1, 2, 3, 4, 5]);
        assert_eq!(page_window(2, 3, 5), vec![1, 2, 3]);
    }

    #[test]
    fn single_page_has_no_strip() {
        assert!(page_window(1, 1, 5).is_empty());
        assert!(page_window(1, 0, 5).is_empty());
    }

    #[test]
    fn pagination_state_clamps_pages() {
        let mut state = PaginationState::new(10);
        assert!(!state.set_total_pages(10));
        assert_eq!(state.go_to(7), 7);
        assert_eq!(state.go_to(0), 1);
        assert_eq!(state.go_to(42), 10);

        state.go_to(7);
        assert!(state.set_total_pages(2));
        assert_eq!(state.current_page(), 2);

        assert!(state.set_total_pages(0));
        assert_eq!(state.total_pages(), 1);
        assert_eq!(state.current_page(), 1);
    }

    #[test]
    fn paginated_treats_page_zero_as_first() {
        let page = Paginated::new(vec!["a", "b"], 0, 3);
        assert_eq!(page.page, 1);
        assert_eq!(page.pages, vec![1, 2, 3]);
    }
}
