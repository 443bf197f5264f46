//! Page-number pagination for post listings.

use std::num::IntErrorKind;

use serde::Serialize;

/// Posts shown per page on every listing.
pub const POSTS_PER_PAGE: i64 = 10;

/// Splits a collection of `count` items into numbered pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    count: i64,
    per_page: i64,
}

impl Paginator {
    /// Create a paginator over `count` items.
    pub fn new(count: i64, per_page: i64) -> Self {
        Self {
            count: count.max(0),
            per_page: per_page.max(1),
        }
    }

    /// Total number of items.
    pub fn count(&self) -> i64 {
        self.count
    }

    /// Number of pages. An empty collection still has one (empty) page.
    pub fn num_pages(&self) -> i64 {
        if self.count == 0 {
            1
        } else {
            (self.count + self.per_page - 1) / self.per_page
        }
    }

    /// Turn the raw `page` query value into a valid page number.
    ///
    /// Missing or non-numeric values give the first page; numbers outside
    /// `1..=num_pages` give the last page, including ones too large for `i64`.
    pub fn resolve(&self, raw: Option<&str>) -> i64 {
        let number = match raw.map(str::trim).map(str::parse::<i64>) {
            Some(Ok(n)) => n,
            Some(Err(e))
                if matches!(e.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) =>
            {
                return self.num_pages();
            }
            _ => return 1,
        };
        if number < 1 || number > self.num_pages() {
            self.num_pages()
        } else {
            number
        }
    }

    /// Offset of the first item on page `number`.
    pub fn offset(&self, number: i64) -> i64 {
        (number - 1) * self.per_page
    }

    /// Items per page.
    pub fn per_page(&self) -> i64 {
        self.per_page
    }

    /// Wrap the items of page `number`.
    pub fn page<T>(&self, number: i64, items: Vec<T>) -> Page<T> {
        let num_pages = self.num_pages();
        let start_index = if self.count == 0 {
            0
        } else {
            self.offset(number) + 1
        };

        Page {
            number,
            num_pages,
            count: self.count,
            per_page: self.per_page,
            has_previous: number > 1,
            has_next: number < num_pages,
            previous_page_number: (number > 1).then(|| number - 1),
            next_page_number: (number < num_pages).then(|| number + 1),
            page_range: (1..=num_pages).collect(),
            start_index,
            items,
        }
    }
}

/// One page of a listing, as handed to templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    /// Items on this page, in listing order.
    pub items: Vec<T>,
    /// 1-based page number.
    pub number: i64,
    /// Total number of pages.
    pub num_pages: i64,
    /// Total number of items across all pages.
    pub count: i64,
    /// Page size.
    pub per_page: i64,
    pub has_previous: bool,
    pub has_next: bool,
    pub previous_page_number: Option<i64>,
    pub next_page_number: Option<i64>,
    /// Every page number, for the page links.
    pub page_range: Vec<i64>,
    /// 1-based index of the first item (0 when the listing is empty).
    pub start_index: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_num_pages() {
        assert_eq!(Paginator::new(0, 10).num_pages(), 1);
        assert_eq!(Paginator::new(1, 10).num_pages(), 1);
        assert_eq!(Paginator::new(10, 10).num_pages(), 1);
        assert_eq!(Paginator::new(11, 10).num_pages(), 2);
        assert_eq!(Paginator::new(13, 10).num_pages(), 2);
    }

    #[test]
    fn test_resolve_defaults_to_first_page() {
        let paginator = Paginator::new(25, 10);
        assert_eq!(paginator.resolve(None), 1);
        assert_eq!(paginator.resolve(Some("")), 1);
        assert_eq!(paginator.resolve(Some("abc")), 1);
        assert_eq!(paginator.resolve(Some("2.5")), 1);
    }

    #[test]
    fn test_resolve_out_of_range_gives_last_page() {
        let paginator = Paginator::new(25, 10);
        assert_eq!(paginator.resolve(Some("2")), 2);
        assert_eq!(paginator.resolve(Some("3")), 3);
        assert_eq!(paginator.resolve(Some("4")), 3);
        assert_eq!(paginator.resolve(Some("999")), 3);
        assert_eq!(paginator.resolve(Some("0")), 3);
        assert_eq!(paginator.resolve(Some("-1")), 3);
    }

    #[test]
    fn test_resolve_overflowing_number_gives_last_page() {
        let paginator = Paginator::new(25, 10);
        assert_eq!(paginator.resolve(Some("99999999999999999999")), 3);
        assert_eq!(paginator.resolve(Some("-99999999999999999999")), 3);
        assert_eq!(paginator.resolve(Some("9999999999999999999x")), 1);
    }

    #[test]
    fn test_resolve_empty_collection() {
        let paginator = Paginator::new(0, 10);
        assert_eq!(paginator.resolve(Some("5")), 1);
        assert_eq!(paginator.resolve(None), 1);
    }

    #[test]
    fn test_page_links() {
        let paginator = Paginator::new(13, 10);

        let first = paginator.page(1, vec![(); 10]);
        assert!(!first.has_previous);
        assert!(first.has_next);
        assert_eq!(first.next_page_number, Some(2));
        assert_eq!(first.previous_page_number, None);
        assert_eq!(first.page_range, vec![1, 2]);
        assert_eq!(first.start_index, 1);

        let second = paginator.page(2, vec![(); 3]);
        assert!(second.has_previous);
        assert!(!second.has_next);
        assert_eq!(second.previous_page_number, Some(1));
        assert_eq!(second.start_index, 11);
        assert_eq!(paginator.offset(2), 10);
    }

    #[test]
    fn test_empty_page() {
        let page = Paginator::new(0, 10).page::<i64>(1, Vec::new());
        assert_eq!(page.num_pages, 1);
        assert_eq!(page.start_index, 0);
        assert!(!page.has_next);
        assert!(!page.has_previous);
    }
}
