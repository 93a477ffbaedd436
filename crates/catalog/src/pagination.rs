//! Fixed-size page slicing and prev/next navigation.

use serde::Serialize;

/// Number of pages needed for `len` items; zero for an empty list.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    len.div_ceil(page_size)
}

/// Items of 1-based `page`. Out-of-range pages (including 0) are empty.
pub fn slice<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    if page == 0 || page_size == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

/// Current page cursor. `page` is always ≥ 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: usize,
    page_size: usize,
}

impl Pagination {
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn reset(&mut self) {
        self.page = 1;
    }

    /// Jump to `page`, clamped to `[1, total_pages]`.
    pub fn go_to(&mut self, page: usize, total_pages: usize) {
        self.page = page.clamp(1, total_pages.max(1));
    }

    /// Step back one page. Returns whether the page changed.
    pub fn prev(&mut self) -> bool {
        if self.page > 1 {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    /// Step forward one page. Returns whether the page changed.
    pub fn next(&mut self, total_pages: usize) -> bool {
        if self.page < total_pages {
            self.page += 1;
            true
        } else {
            false
        }
    }

    pub fn info(&self, total_items: usize) -> PageInfo {
        let total_pages = total_pages(total_items, self.page_size);
        let shown = slice_len(total_items, self.page, self.page_size);
        let range_start = if shown == 0 { 0 } else { (self.page - 1) * self.page_size + 1 };
        PageInfo {
            current_page: self.page,
            total_pages,
            has_prev: self.page > 1,
            has_next: self.page < total_pages,
            total_items,
            range_start,
            range_end: if shown == 0 { 0 } else { range_start + shown - 1 },
        }
    }
}

fn slice_len(len: usize, page: usize, page_size: usize) -> usize {
    let start = (page - 1).saturating_mul(page_size);
    len.saturating_sub(start).min(page_size)
}

/// Pagination metadata handed to renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    pub current_page: usize,
    pub total_pages: usize,
    pub has_prev: bool,
    pub has_next: bool,
    pub total_items: usize,
    /// 1-based index of the first visible item, 0 when nothing is shown.
    pub range_start: usize,
    pub range_end: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, 20), 0);
        assert_eq!(total_pages(1, 20), 1);
        assert_eq!(total_pages(20, 20), 1);
        assert_eq!(total_pages(21, 20), 2);
        assert_eq!(total_pages(45, 20), 3);
    }

    #[test]
    fn last_page_is_partial() {
        let items: Vec<u32> = (0..45).collect();
        assert_eq!(slice(&items, 3, 20).len(), 5);
        assert_eq!(slice(&items, 3, 20)[0], 40);
    }

    #[test]
    fn out_of_range_pages_are_empty() {
        let items: Vec<u32> = (0..45).collect();
        assert!(slice(&items, 0, 20).is_empty());
        assert!(slice(&items, 4, 20).is_empty());
        assert!(slice(&items, usize::MAX, 20).is_empty());
        assert!(slice::<u32>(&[], 1, 20).is_empty());
    }

    #[test]
    fn pages_reconstruct_list() {
        for len in [0usize, 1, 19, 20, 21, 45, 100] {
            let items: Vec<usize> = (0..len).collect();
            let mut rebuilt = Vec::new();
            for page in 1..=total_pages(len, 20) {
                let chunk = slice(&items, page, 20);
                assert!(chunk.len() <= 20);
                rebuilt.extend_from_slice(chunk);
            }
            assert_eq!(rebuilt, items);
        }
    }

    #[test]
    fn navigation_clamps() {
        let mut p = Pagination::new(20);
        assert!(!p.prev());
        assert_eq!(p.page(), 1);
        assert!(p.next(3));
        assert!(p.next(3));
        assert_eq!(p.page(), 3);
        assert!(!p.next(3));
        assert_eq!(p.page(), 3);
        assert!(p.prev());
        assert_eq!(p.page(), 2);
    }

    #[test]
    fn next_on_empty_list_is_noop() {
        let mut p = Pagination::new(20);
        assert!(!p.next(0));
        assert_eq!(p.page(), 1);
    }

    #[test]
    fn go_to_clamps() {
        let mut p = Pagination::new(10);
        p.go_to(9, 3);
        assert_eq!(p.page(), 3);
        p.go_to(0, 3);
        assert_eq!(p.page(), 1);
        p.go_to(5, 0);
        assert_eq!(p.page(), 1);
    }

    #[test]
    fn info_describes_visible_range() {
        let mut p = Pagination::new(20);
        p.go_to(3, 3);
        let info = p.info(45);
        assert_eq!(info.total_pages, 3);
        assert!(info.has_prev);
        assert!(!info.has_next);
        assert_eq!((info.range_start, info.range_end), (41, 45));

        let empty = Pagination::new(20).info(0);
        assert_eq!(empty.total_pages, 0);
        assert!(!empty.has_prev && !empty.has_next);
        assert_eq!((empty.range_start, empty.range_end), (0, 0));
    }
}
