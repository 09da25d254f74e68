//! Fixed-size pages over a filtered list, with wraparound navigation.

use std::ops::Range;

use crate::error::EngineError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paginator {
    page_size: usize,
    total_items: usize,
    current_page: usize,
}

impl Paginator {
    pub fn new(page_size: usize, total_items: usize) -> Result<Self, EngineError> {
        if page_size == 0 {
            return Err(EngineError::InvalidPageSize);
        }
        Ok(Self {
            page_size,
            total_items,
            current_page: 0,
        })
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_pages(&self) -> usize {
        self.total_items.div_ceil(self.page_size)
    }

    /// Advances one page, wrapping from the last page to the first.
    pub fn next(&mut self) {
        let total = self.total_pages();
        if total > 1 {
            self.current_page = (self.current_page + 1) % total;
        }
    }

    /// Goes back one page, wrapping from the first page to the last.
    pub fn prev(&mut self) {
        let total = self.total_pages();
        if total > 1 {
            self.current_page = (self.current_page + total - 1) % total;
        }
    }

    /// Out-of-range pages are rejected and leave the current page untouched.
    pub fn goto(&mut self, page: usize) -> Result<(), EngineError> {
        let total_pages = self.total_pages();
        if page >= total_pages {
            return Err(EngineError::PageOutOfRange {
                requested: page,
                total_pages,
            });
        }
        self.current_page = page;
        Ok(())
    }

    /// Points the paginator at a new list. Always returns to the first page.
    pub fn set_total_items(&mut self, total_items: usize) {
        self.total_items = total_items;
        self.current_page = 0;
    }

    pub fn page_range(&self) -> Range<usize> {
        let start = (self.current_page * self.page_size).min(self.total_items);
        let end = (start + self.page_size).min(self.total_items);
        start..end
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let range = self.page_range();
        let end = range.end.min(items.len());
        let start = range.start.min(end);
        &items[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_page_size_is_a_precondition_error() {
        assert_eq!(Paginator::new(0, 10), Err(EngineError::InvalidPageSize));
    }

    #[test]
    fn fourteen_items_in_pages_of_six() {
        let items: Vec<usize> = (0..14).collect();
        let mut pager = Paginator::new(6, items.len()).unwrap();

        assert_eq!(pager.total_pages(), 3);
        assert_eq!(pager.slice(&items), &[0, 1, 2, 3, 4, 5]);

        pager.goto(2).unwrap();
        assert_eq!(pager.slice(&items), &[12, 13]);
    }

    #[test]
    fn next_wraps_to_first_page() {
        let mut pager = Paginator::new(6, 14).unwrap();
        pager.next();
        pager.next();
        pager.next();
        assert_eq!(pager.current_page(), 0);
    }

    #[test]
    fn prev_wraps_to_last_page() {
        let mut pager = Paginator::new(6, 14).unwrap();
        pager.prev();
        assert_eq!(pager.current_page(), 2);
    }

    #[test]
    fn navigation_is_a_noop_with_one_or_zero_pages() {
        let mut single = Paginator::new(6, 4).unwrap();
        single.next();
        single.prev();
        assert_eq!(single.current_page(), 0);

        let mut empty = Paginator::new(6, 0).unwrap();
        empty.next();
        empty.prev();
        assert_eq!(empty.current_page(), 0);
        assert_eq!(empty.total_pages(), 0);
    }

    #[test]
    fn empty_list_has_no_pages_and_an_empty_slice() {
        let items: Vec<u8> = Vec::new();
        let pager = Paginator::new(6, 0).unwrap();
        assert!(pager.slice(&items).is_empty());
        assert_eq!(pager.page_range(), 0..0);
    }

    #[test]
    fn goto_rejects_out_of_range_pages() {
        let mut pager = Paginator::new(6, 14).unwrap();
        pager.goto(1).unwrap();

        assert_eq!(
            pager.goto(3),
            Err(EngineError::PageOutOfRange { requested: 3, total_pages: 3 })
        );
        assert_eq!(pager.current_page(), 1);

        let mut empty = Paginator::new(6, 0).unwrap();
        assert!(empty.goto(0).is_err());
    }

    #[test]
    fn new_list_resets_to_first_page() {
        let mut pager = Paginator::new(6, 14).unwrap();
        pager.goto(2).unwrap();
        pager.set_total_items(30);
        assert_eq!(pager.current_page(), 0);
        assert_eq!(pager.total_pages(), 5);
    }

    #[test]
    fn slice_tolerates_a_shorter_list_than_announced() {
        let items = vec!['a', 'b'];
        let mut pager = Paginator::new(2, 6).unwrap();
        pager.goto(2).unwrap();
        assert!(pager.slice(&items).is_empty());
    }
}
