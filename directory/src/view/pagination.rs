use serde::Serialize;

use crate::consts::consts::MAX_PAGES_WITHOUT_ELLIPSIS;

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageItem {
    Page(usize),
    Ellipsis,
}

pub fn total_pages(item_count: usize, page_size: usize) -> usize {
    item_count.div_ceil(page_size.max(1))
}

/// Pulls `page` back into `1..=total_pages`, page 1 when there are no pages at all
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    if total_pages == 0 {
        1
    } else {
        page.clamp(1, total_pages)
    }
}

/// Page numbers to render. Long runs collapse into an ellipsis, the first and last page are always shown
pub fn page_items(current: usize, total: usize) -> Vec<PageItem> {
    if total <= MAX_PAGES_WITHOUT_ELLIPSIS {
        return (1..=total).map(PageItem::Page).collect();
    }

    let mut items = vec![PageItem::Page(1)];

    if current > 4 {
        items.push(PageItem::Ellipsis);
    }

    let start = current.saturating_sub(2).max(2);
    let end = (current + 2).min(total - 1);
    items.extend((start..=end).map(PageItem::Page));

    if current + 3 < total {
        items.push(PageItem::Ellipsis);
    }

    items.push(PageItem::Page(total));

    items
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct Pagination {
    pub current_page: usize,
    pub total_pages: usize,
    pub items: Vec<PageItem>,
    pub has_first: bool,
    pub has_previous: bool,
    pub has_next: bool,
    pub has_last: bool,
}

impl Pagination {
    /// `current_page` must already be clamped
    pub fn new(current_page: usize, total_pages: usize) -> Self {
        let not_first = total_pages > 0 && current_page > 1;
        let not_last = current_page < total_pages;

        Pagination {
            current_page,
            total_pages,
            items: page_items(current_page, total_pages),
            has_first: not_first,
            has_previous: not_first,
            has_next: not_last,
            has_last: not_last,
        }
    }

    pub fn page_info(&self) -> String {
        if self.total_pages == 0 {
            "No results".to_string()
        } else {
            format!("Page {} of {}", self.current_page, self.total_pages)
        }
    }

    /// Compact single line form, e.g. `« ‹ 1 … 4 [5] 6 … 10 › »`
    pub fn render(&self) -> String {
        let mut parts = Vec::new();

        if self.has_first {
            parts.push("«".to_string());
        }
        if self.has_previous {
            parts.push("‹".to_string());
        }

        for item in &self.items {
            parts.push(match item {
                PageItem::Page(page) if *page == self.current_page => format!("[{}]", page),
                PageItem::Page(page) => page.to_string(),
                PageItem::Ellipsis => "…".to_string(),
            });
        }

        if self.has_next {
            parts.push("›".to_string());
        }
        if self.has_last {
            parts.push("»".to_string());
        }

        parts.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use PageItem::{Ellipsis, Page};

    #[rstest]
    #[case(0, 4, 0)]
    #[case(1, 4, 1)]
    #[case(4, 4, 1)]
    #[case(5, 4, 2)]
    #[case(16, 4, 4)]
    fn counts_pages(#[case] items: usize, #[case] size: usize, #[case] expected: usize) {
        assert_eq!(total_pages(items, size), expected);
    }

    #[rstest]
    #[case(3, 0, 1)]
    #[case(0, 5, 1)]
    #[case(9, 5, 5)]
    #[case(3, 5, 3)]
    fn clamps_page(#[case] page: usize, #[case] total: usize, #[case] expected: usize) {
        assert_eq!(clamp_page(page, total), expected);
    }

    #[rstest]
    #[case(1, 0, vec![])]
    #[case(3, 7, vec![Page(1), Page(2), Page(3), Page(4), Page(5), Page(6), Page(7)])]
    #[case(1, 10, vec![Page(1), Page(2), Page(3), Ellipsis, Page(10)])]
    #[case(4, 10, vec![Page(1), Page(2), Page(3), Page(4), Page(5), Page(6), Ellipsis, Page(10)])]
    #[case(5, 10, vec![Page(1), Ellipsis, Page(3), Page(4), Page(5), Page(6), Page(7), Ellipsis, Page(10)])]
    #[case(7, 10, vec![Page(1), Ellipsis, Page(5), Page(6), Page(7), Page(8), Page(9), Page(10)])]
    #[case(10, 10, vec![Page(1), Ellipsis, Page(8), Page(9), Page(10)])]
    fn elides_long_runs(#[case] current: usize, #[case] total: usize, #[case] expected: Vec<PageItem>) {
        assert_eq!(page_items(current, total), expected);
    }

    #[test]
    fn navigation_flags_follow_position() {
        let first = Pagination::new(1, 3);
        assert!(!first.has_first && !first.has_previous);
        assert!(first.has_next && first.has_last);

        let last = Pagination::new(3, 3);
        assert!(last.has_first && last.has_previous);
        assert!(!last.has_next && !last.has_last);

        let empty = Pagination::new(1, 0);
        assert!(!empty.has_first && !empty.has_previous && !empty.has_next && !empty.has_last);
    }

    #[test]
    fn page_info_text() {
        assert_eq!(Pagination::new(2, 5).page_info(), "Page 2 of 5");
        assert_eq!(Pagination::new(1, 0).page_info(), "No results");
    }

    #[test]
    fn renders_current_page_in_brackets() {
        assert_eq!(Pagination::new(2, 3).render(), "« ‹ 1 [2] 3 › »");
    }
}
