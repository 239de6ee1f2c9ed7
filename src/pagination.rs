use serde::Serialize;

/// Number of vehicle cards shown per page.
pub const PAGE_SIZE: usize = 8;

/// Number of pages needed for `total_items`, never less than one so that an
/// empty listing still reads "page 1 of 1".
pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    total_items.div_ceil(page_size.max(1)).max(1)
}

/// Returns the `page`-th (1-indexed) slice of `items`.
///
/// Out-of-range pages yield an empty slice.
pub fn visible_page<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    let page = page.max(1);
    let start = (page - 1).saturating_mul(page_size).min(items.len());
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

/// Current page of a listing, always kept within `1..=total_pages`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pager {
    page: usize,
}

impl Default for Pager {
    fn default() -> Self {
        Self { page: 1 }
    }
}

impl Pager {
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn reset(&mut self) {
        self.page = 1;
    }

    /// Moves to `page`, silently clamped into `1..=total_pages`.
    pub fn go_to(&mut self, page: usize, total_pages: usize) {
        self.page = page.clamp(1, total_pages.max(1));
    }

    pub fn next(&mut self, total_pages: usize) {
        self.go_to(self.page.saturating_add(1), total_pages);
    }

    pub fn prev(&mut self, total_pages: usize) {
        self.go_to(self.page.saturating_sub(1), total_pages);
    }

    /// Re-applies the bounds after the result set changed size.
    pub fn clamp(&mut self, total_pages: usize) {
        self.go_to(self.page, total_pages);
    }
}

fn get_pages(
    total_pages: usize,
    current_page: usize,
    left_edge: usize,
    left_current: usize,
    right_current: usize,
    right_edge: usize,
) -> Vec<Option<usize>> {
    let last_page = total_pages;

    if last_page == 0 {
        return vec![];
    }

    let mut pages = Vec::new();

    let left_end = (1 + left_edge).min(last_page + 1);
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current_page.saturating_sub(left_current));
    let mid_end = (current_page + right_current + 1).min(last_page + 1);

    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(last_page.saturating_sub(right_edge) + 1);

    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=last_page).map(Some));

    pages
}

/// One page of items together with a compact page indicator.
///
/// `pages` lists the page links to render; `None` marks an elided gap.
#[derive(Clone, Debug, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pages: Vec<Option<usize>>,
    pub page: usize,
    pub total_pages: usize,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, current_page: usize, total_pages: usize) -> Self {
        let total_pages = total_pages.max(1);
        let current_page = current_page.clamp(1, total_pages);

        let pages = get_pages(total_pages, current_page, 2, 2, 4, 2);

        Self {
            items,
            pages,
            page: current_page,
            total_pages,
        }
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}
