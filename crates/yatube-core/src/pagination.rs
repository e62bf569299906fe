//! Page-number pagination for post feeds.
//!
//! Requested page numbers never fail: anything that is not an integer maps to
//! the first page and anything out of range maps to the last page.

use serde::Serialize;

/// Default number of posts shown per feed page.
pub const POSTS_PER_PAGE: u64 = 10;

/// Computes page windows for a fixed page size.
#[derive(Debug, Clone, Copy)]
pub struct Paginator {
    per_page: u64,
}

/// The resolved position of a page inside a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// 1-based page number.
    pub number: u64,
    pub num_pages: u64,
    pub count: u64,
    pub offset: u64,
    pub limit: u64,
}

impl Paginator {
    pub fn new(per_page: u64) -> Self {
        Self {
            per_page: per_page.max(1),
        }
    }

    /// Number of pages for `count` items. An empty result still has one page.
    pub fn num_pages(&self, count: u64) -> u64 {
        if count == 0 {
            1
        } else {
            count.div_ceil(self.per_page)
        }
    }

    /// Resolve a raw `page` query value against a result set of `count` items.
    pub fn window(&self, requested: Option<&str>, count: u64) -> PageWindow {
        let num_pages = self.num_pages(count);

        let number = match requested.map(str::trim) {
            None => 1,
            Some(raw) => match raw.parse::<i64>() {
                Ok(n) if n < 1 || n as u64 > num_pages => num_pages,
                Ok(n) => n as u64,
                // Too large for i64 but still an integer.
                Err(_) if is_integer(raw) => num_pages,
                Err(_) => 1,
            },
        };

        let offset = (number - 1) * self.per_page;
        PageWindow {
            number,
            num_pages,
            count,
            offset,
            limit: self.per_page.min(count.saturating_sub(offset)),
        }
    }
}

/// An optionally signed run of ASCII digits.
fn is_integer(raw: &str) -> bool {
    let digits = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(POSTS_PER_PAGE)
    }
}

/// A page of items together with its position.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub number: u64,
    pub num_pages: u64,
    pub count: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, window: PageWindow) -> Self {
        Self {
            items,
            number: window.number,
            num_pages: window.num_pages,
            count: window.count,
        }
    }

    pub fn has_next(&self) -> bool {
        self.number < self.num_pages
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            number: self.number,
            num_pages: self.num_pages,
            count: self.count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thirteen_items_split_ten_and_three() {
        let paginator = Paginator::default();

        let first = paginator.window(None, 13);
        assert_eq!(first.number, 1);
        assert_eq!(first.num_pages, 2);
        assert_eq!((first.offset, first.limit), (0, 10));

        let second = paginator.window(Some("2"), 13);
        assert_eq!(second.number, 2);
        assert_eq!((second.offset, second.limit), (10, 3));
    }

    #[test]
    fn test_out_of_range_clamps_to_last_page() {
        let paginator = Paginator::default();

        assert_eq!(paginator.window(Some("99"), 13).number, 2);
        assert_eq!(paginator.window(Some("0"), 13).number, 2);
        assert_eq!(paginator.window(Some("-4"), 13).number, 2);
    }

    #[test]
    fn test_oversized_page_number_clamps_to_last_page() {
        let paginator = Paginator::default();

        assert_eq!(paginator.window(Some("99999999999999999999"), 13).number, 2);
        assert_eq!(paginator.window(Some("-99999999999999999999"), 13).number, 2);
        assert_eq!(paginator.window(Some("9".repeat(40).as_str()), 13).number, 2);
        assert_eq!(paginator.window(Some("1e30"), 13).number, 1);
    }

    #[test]
    fn test_non_integer_falls_back_to_first_page() {
        let paginator = Paginator::default();

        assert_eq!(paginator.window(Some("abc"), 25).number, 1);
        assert_eq!(paginator.window(Some("2.5"), 25).number, 1);
        assert_eq!(paginator.window(Some(""), 25).number, 1);
        assert_eq!(paginator.window(Some(" 3 "), 25).number, 3);
    }

    #[test]
    fn test_empty_result_has_single_empty_page() {
        let window = Paginator::default().window(Some("5"), 0);

        assert_eq!(window.number, 1);
        assert_eq!(window.num_pages, 1);
        assert_eq!(window.limit, 0);
    }

    #[test]
    fn test_page_navigation_flags() {
        let paginator = Paginator::new(10);
        let page = Page::new(vec![1, 2, 3], paginator.window(Some("2"), 13));

        assert!(page.has_previous());
        assert!(!page.has_next());
        assert_eq!(page.map(|n| n * 2).items, vec![2, 4, 6]);
    }
}
