//! Page math and pagination indicators shared by the dashboard tables.

/// The rows-per-page choices offered by the table footer.
pub const PER_PAGE_OPTIONS: [usize; 3] = [5, 10, 25];

/// The rows per page used when the query does not specify one.
pub const DEFAULT_PER_PAGE: usize = 10;

/// The maximum number of numbered pages to show before collapsing the rest
/// behind an ellipsis.
const MAX_NUMBERED_PAGES: usize = 5;

/// One element of the pagination footer.
#[derive(Debug, PartialEq, Eq)]
pub enum PageIndicator {
    /// A link to the given page.
    Page(usize),
    /// The page currently shown, rendered without a link.
    CurrentPage(usize),
    /// A gap between page numbers.
    Ellipsis,
    /// The link to the next page.
    Next(usize),
    /// The link to the previous page.
    Back(usize),
}

/// The number of pages needed to show `row_count` rows.
///
/// An empty table still has one page so the view always has a current page
/// to highlight.
pub fn page_count(row_count: usize, per_page: usize) -> usize {
    row_count.div_ceil(per_page.max(1)).max(1)
}

/// Clamp a requested page number into `1..=page_count`.
pub fn clamp_page(page: usize, page_count: usize) -> usize {
    page.clamp(1, page_count)
}

/// Snap a requested rows-per-page value to the nearest offered option,
/// defaulting when missing or unlisted.
pub fn normalize_per_page(requested: Option<usize>) -> usize {
    match requested {
        Some(value) if PER_PAGE_OPTIONS.contains(&value) => value,
        _ => DEFAULT_PER_PAGE,
    }
}

/// Build the pagination footer for the given current page.
///
/// Shows at most [MAX_NUMBERED_PAGES] numbered pages centered on the current
/// page, with the first and last page plus an ellipsis on the collapsed
/// sides, and back/next links when they lead somewhere.
pub fn page_indicators(current_page: usize, page_count: usize) -> Vec<PageIndicator> {
    let window = MAX_NUMBERED_PAGES;
    let map_page = |page| {
        if page == current_page {
            PageIndicator::CurrentPage(page)
        } else {
            PageIndicator::Page(page)
        }
    };

    let mut indicators: Vec<PageIndicator> = if page_count <= window {
        (1..=page_count).map(map_page).collect()
    } else if current_page <= window / 2 {
        (1..=window).map(map_page).collect()
    } else if current_page > page_count - window / 2 {
        ((page_count - window + 1)..=page_count).map(map_page).collect()
    } else {
        ((current_page - window / 2)..=(current_page + window / 2))
            .map(map_page)
            .collect()
    };

    if page_count > window {
        if current_page > window / 2 + 1 {
            indicators.insert(0, PageIndicator::Page(1));
            indicators.insert(1, PageIndicator::Ellipsis);
        }

        if current_page < page_count - window / 2 {
            indicators.push(PageIndicator::Ellipsis);
            indicators.push(PageIndicator::Page(page_count));
        }
    }

    if current_page > 1 {
        indicators.insert(0, PageIndicator::Back(current_page - 1));
    }

    if current_page < page_count {
        indicators.push(PageIndicator::Next(current_page + 1));
    }

    indicators
}
