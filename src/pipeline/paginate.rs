//! Fixed-size pagination.

/// Records per page.
pub const PAGE_SIZE: usize = 50;

/// Number of pages needed for `total` items; never less than one.
#[must_use]
pub const fn total_pages(total: usize) -> usize {
    if total == 0 {
        1
    } else {
        total.div_ceil(PAGE_SIZE)
    }
}

/// Current 1-based page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self { page: 1 }
    }
}

impl Pagination {
    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    /// Page clamped into `[1, total_pages]`.
    #[must_use]
    pub fn clamped(&self, total_pages: usize) -> usize {
        self.page.clamp(1, total_pages.max(1))
    }

    pub fn go_to(&mut self, page: usize, total_pages: usize) {
        self.page = page.clamp(1, total_pages.max(1));
    }

    pub fn next(&mut self, total_pages: usize) {
        self.go_to(self.clamped(total_pages).saturating_add(1), total_pages);
    }

    pub fn prev(&mut self, total_pages: usize) {
        self.go_to(self.clamped(total_pages).saturating_sub(1), total_pages);
    }

    pub fn reset(&mut self) {
        self.page = 1;
    }
}

/// One page of an ordered result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    /// Page actually shown, after clamping.
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

/// Slices `items` to the requested page, clamping out-of-range requests.
#[must_use]
pub fn paginate<T>(items: &[T], requested: usize) -> Page<'_, T> {
    let total_pages = total_pages(items.len());
    let page = requested.clamp(1, total_pages);
    let start = ((page - 1) * PAGE_SIZE).min(items.len());
    let end = (page * PAGE_SIZE).min(items.len());

    Page {
        items: &items[start..end],
        page,
        total_pages,
        total_items: items.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hundred_twenty_items_make_three_pages() {
        let items: Vec<usize> = (0..120).collect();

        let first = paginate(&items, 1);
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.items.len(), 50);
        assert_eq!(first.items[0], 0);

        let last = paginate(&items, 3);
        assert_eq!(last.items.len(), 20);
        assert_eq!(last.items[0], 100);

        let beyond = paginate(&items, 4);
        assert_eq!(beyond.page, 3);
        assert_eq!(beyond.items, last.items);
    }

    #[test]
    fn empty_input_has_one_empty_page() {
        let items: Vec<usize> = Vec::new();
        let page = paginate(&items, 7);
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 1);
        assert!(page.items.is_empty());
    }

    #[test]
    fn page_zero_clamps_to_first() {
        let items: Vec<usize> = (0..10).collect();
        assert_eq!(paginate(&items, 0).page, 1);
    }

    #[test]
    fn navigation_stays_in_bounds() {
        let mut pagination = Pagination::default();
        pagination.prev(3);
        assert_eq!(pagination.page(), 1);

        pagination.next(3);
        pagination.next(3);
        pagination.next(3);
        assert_eq!(pagination.page(), 3);

        pagination.go_to(4, 3);
        assert_eq!(pagination.page(), 3);

        pagination.reset();
        assert_eq!(pagination.page(), 1);
    }

    #[test]
    fn exact_multiple_does_not_add_a_page() {
        assert_eq!(total_pages(50), 1);
        assert_eq!(total_pages(51), 2);
        assert_eq!(total_pages(100), 2);
    }
}
