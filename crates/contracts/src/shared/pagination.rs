//! Page/limit bookkeeping for list pages. Pages are 1-based.

pub const DEFAULT_LIMIT: usize = 10;
pub const PAGE_SIZE_OPTIONS: [usize; 4] = [10, 25, 50, 100];

/// Paging metadata as sent by the server. Some endpoints send `totalPages`,
/// others only a `results` count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListMeta {
    pub total_pages: Option<u64>,
    pub results: Option<u64>,
}

impl ListMeta {
    /// Returns `(total_pages, total_items)`. A positive server `totalPages`
    /// wins, then `ceil(results / limit)`, then the size of the page itself.
    pub fn normalize(&self, limit: usize, records_on_page: usize) -> (usize, usize) {
        let total_items = self.results.map(|r| r as usize).unwrap_or(records_on_page);
        let total_pages = match self.total_pages.filter(|p| *p > 0) {
            Some(pages) => pages as usize,
            None => total_pages_for(total_items, limit),
        };
        (total_pages.max(1), total_items)
    }
}

pub fn total_pages_for(total_items: usize, limit: usize) -> usize {
    let limit = limit.max(1);
    total_items.div_ceil(limit).max(1)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    pub current_page: usize,
    pub limit: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::with_limit(DEFAULT_LIMIT)
    }
}

impl PaginationState {
    pub fn with_limit(limit: usize) -> Self {
        Self {
            current_page: 1,
            limit: limit.max(1),
            total_pages: 1,
            total_items: 0,
        }
    }

    pub fn clamp_page(&self, requested: usize) -> usize {
        requested.clamp(1, self.total_pages.max(1))
    }

    /// Clamps the request into range. Returns the page to fetch, or `None`
    /// when the clamped page is the one already shown.
    pub fn go_to(&mut self, requested: usize) -> Option<usize> {
        let page = self.clamp_page(requested);
        if page == self.current_page {
            return None;
        }
        self.current_page = page;
        Some(page)
    }

    /// A new page size always restarts from page 1.
    pub fn set_limit(&mut self, limit: usize) {
        self.limit = limit.max(1);
        self.current_page = 1;
    }

    pub fn reset_page(&mut self) {
        self.current_page = 1;
    }

    /// Takes the totals from a list response and keeps `current_page` in range.
    pub fn apply(&mut self, meta: &ListMeta, records_on_page: usize) {
        let (total_pages, total_items) = meta.normalize(self.limit, records_on_page);
        self.total_pages = total_pages;
        self.total_items = total_items;
        self.current_page = self.clamp_page(self.current_page);
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// 1-based index range of the rows shown, for "11-20 of 57".
    pub fn visible_range(&self, records_on_page: usize) -> Option<(usize, usize)> {
        if records_on_page == 0 {
            return None;
        }
        let start = (self.current_page - 1) * self.limit + 1;
        Some((start, start + records_on_page - 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with(total_items: usize, limit: usize) -> PaginationState {
        let mut state = PaginationState::with_limit(limit);
        state.apply(
            &ListMeta {
                total_pages: None,
                results: Some(total_items as u64),
            },
            limit.min(total_items),
        );
        state
    }

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(total_pages_for(57, 10), 6);
        assert_eq!(total_pages_for(60, 10), 6);
        assert_eq!(total_pages_for(0, 10), 1);
        assert_eq!(total_pages_for(5, 0), 5);
    }

    #[test]
    fn test_out_of_range_page_is_clamped() {
        let mut state = state_with(57, 10);
        assert_eq!(state.total_pages, 6);
        assert_eq!(state.go_to(7), Some(6));
        assert_eq!(state.current_page, 6);
        // Already on the last page: nothing to request.
        assert_eq!(state.go_to(42), None);
        assert_eq!(state.go_to(0), Some(1));
    }

    #[test]
    fn test_limit_change_resets_page() {
        let mut state = state_with(57, 10);
        state.go_to(4);
        assert_eq!(state.current_page, 4);
        state.set_limit(25);
        assert_eq!(state.current_page, 1);
        assert_eq!(state.limit, 25);
    }

    #[test]
    fn test_server_total_pages_wins() {
        let meta = ListMeta {
            total_pages: Some(9),
            results: Some(57),
        };
        assert_eq!(meta.normalize(10, 10), (9, 57));
    }

    #[test]
    fn test_normalize_without_counts_uses_page_size() {
        let meta = ListMeta::default();
        assert_eq!(meta.normalize(10, 4), (1, 4));
        let zero_pages = ListMeta {
            total_pages: Some(0),
            results: Some(0),
        };
        assert_eq!(zero_pages.normalize(10, 0), (1, 0));
    }

    #[test]
    fn test_apply_pulls_current_page_back_in_range() {
        let mut state = state_with(57, 10);
        state.go_to(6);
        state.apply(
            &ListMeta {
                total_pages: None,
                results: Some(12),
            },
            2,
        );
        assert_eq!(state.total_pages, 2);
        assert_eq!(state.current_page, 2);
    }

    #[test]
    fn test_visible_range() {
        let mut state = state_with(57, 10);
        state.go_to(6);
        assert_eq!(state.visible_range(7), Some((51, 57)));
        assert_eq!(state.visible_range(0), None);
    }
}
