/// Pages shown on each side of the current page
const WINDOW: i64 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(u32),
    /// Collapsed run of pages, shown as `...`
    Gap,
}

/// Page buttons for the pagination bar.
///
/// Always shows the first and last page plus up to two pages either side of
/// `current`; empty when there is at most one page.
pub fn visible_pages(current: u32, total: u32) -> Vec<PageItem> {
    if total <= 1 {
        return Vec::new();
    }

    let (current, last) = (i64::from(current), i64::from(total));
    let mut items = vec![PageItem::Page(1)];

    if current - WINDOW > 2 {
        items.push(PageItem::Gap);
    }

    let start = (current - WINDOW).max(2);
    let end = (current + WINDOW).min(last - 1);
    items.extend((start..=end).map(|p| PageItem::Page(p as u32)));

    if current + WINDOW < last - 1 {
        items.push(PageItem::Gap);
    }
    items.push(PageItem::Page(total));

    items
}

pub fn has_previous(current: u32) -> bool {
    current > 1
}

pub fn has_next(current: u32, total: u32) -> bool {
    current < total
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::PageItem::{Gap, Page};
    use super::*;

    #[test]
    fn single_page_has_no_bar() {
        assert!(visible_pages(1, 0).is_empty());
        assert!(visible_pages(1, 1).is_empty());
    }

    #[test]
    fn short_ranges_are_listed_in_full() {
        assert_eq!(visible_pages(1, 2), vec![Page(1), Page(2)]);
        assert_eq!(visible_pages(2, 3), vec![Page(1), Page(2), Page(3)]);
        assert_eq!(
            visible_pages(3, 5),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5)]
        );
    }

    #[test]
    fn middle_page_collapses_both_sides() {
        assert_eq!(
            visible_pages(10, 20),
            vec![Page(1), Gap, Page(8), Page(9), Page(10), Page(11), Page(12), Gap, Page(20)]
        );
    }

    #[test]
    fn edges_collapse_one_side() {
        assert_eq!(
            visible_pages(1, 20),
            vec![Page(1), Page(2), Page(3), Gap, Page(20)]
        );
        assert_eq!(
            visible_pages(20, 20),
            vec![Page(1), Gap, Page(18), Page(19), Page(20)]
        );
    }

    #[test]
    fn neighbours() {
        assert!(!has_previous(1));
        assert!(has_previous(2));
        assert!(has_next(2, 3));
        assert!(!has_next(3, 3));
    }
}
