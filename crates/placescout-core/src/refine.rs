//! Client-side refinement of a search result: keyword filtering and
//! page-based slicing for display.
//!
//! Nothing here does I/O or returns an error. Empty input, a zero page size,
//! or an out-of-range page all degrade to a valid (possibly empty) page.

use crate::types::PlaceRecord;

/// Records per page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Page counts up to this value are listed in full by [`page_window`].
const FULL_WINDOW_MAX: usize = 7;

/// Filters `records` by a free-text keyword.
///
/// A blank keyword keeps every record. Otherwise a record is kept when the
/// trimmed keyword occurs, ignoring case, in its title, its address, or its
/// review texts joined by a single space. Order is preserved.
#[must_use]
pub fn filter_records<'a>(records: &'a [PlaceRecord], keyword: &str) -> Vec<&'a PlaceRecord> {
    let needle = keyword.trim().to_lowercase();
    if needle.is_empty() {
        return records.iter().collect();
    }
    records
        .iter()
        .filter(|record| record.matches_lowercase(&needle))
        .collect()
}

/// One page of items together with the clamped page number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub current_page: usize,
    pub total_pages: usize,
    /// Index of `items[0]` within the full list, for 1-based card numbering.
    pub offset: usize,
}

/// Total page count for `len` items; never less than one.
#[must_use]
pub fn total_pages(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1)).max(1)
}

/// Clamps `page` into `[1, total_pages]`.
#[must_use]
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Slices `items` into the requested page, clamping the page number first.
#[must_use]
pub fn paginate<T>(items: &[T], page_size: usize, page: usize) -> Page<'_, T> {
    let page_size = page_size.max(1);
    let total_pages = total_pages(items.len(), page_size);
    let current_page = clamp_page(page, total_pages);

    let start = ((current_page - 1) * page_size).min(items.len());
    let end = start.saturating_add(page_size).min(items.len());

    Page {
        items: &items[start..end],
        current_page,
        total_pages,
        offset: start,
    }
}

/// An entry in the page-number strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLink {
    Page(usize),
    Ellipsis,
}

impl std::fmt::Display for PageLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PageLink::Page(n) => write!(f, "{n}"),
            PageLink::Ellipsis => write!(f, "..."),
        }
    }
}

/// Compact page-number strip for `(current_page, total_pages)`.
///
/// | current page          | strip                                   |
/// |-----------------------|-----------------------------------------|
/// | total ≤ 7             | `1 … total` in full                     |
/// | ≤ 4                   | `1 2 3 4 5 ... last`                    |
/// | ≥ last − 3            | `1 ... last-4 … last`                   |
/// | otherwise             | `1 ... cur-1 cur cur+1 ... last`        |
#[must_use]
pub fn page_window(current_page: usize, total_pages: usize) -> Vec<PageLink> {
    let total = total_pages.max(1);
    let current = clamp_page(current_page, total);

    if total <= FULL_WINDOW_MAX {
        return (1..=total).map(PageLink::Page).collect();
    }

    let mut links = Vec::with_capacity(FULL_WINDOW_MAX);
    if current <= 4 {
        links.extend((1..=5).map(PageLink::Page));
        links.push(PageLink::Ellipsis);
        links.push(PageLink::Page(total));
    } else if current >= total - 3 {
        links.push(PageLink::Page(1));
        links.push(PageLink::Ellipsis);
        links.extend((total - 4..=total).map(PageLink::Page));
    } else {
        links.push(PageLink::Page(1));
        links.push(PageLink::Ellipsis);
        links.extend((current - 1..=current + 1).map(PageLink::Page));
        links.push(PageLink::Ellipsis);
        links.push(PageLink::Page(total));
    }
    links
}

#[cfg(test)]
#[path = "refine_test.rs"]
mod tests;
