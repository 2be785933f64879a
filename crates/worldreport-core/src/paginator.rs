// crates/worldreport-core/src/paginator.rs

//! # Paginator
//!
//! Pure windowing over the in-memory dataset. Out-of-range page numbers never
//! fail: the slice is simply clamped (possibly to nothing).

use crate::state::PageSize;
use serde::Serialize;

/// One window of a dataset plus the navigation affordances for it.
#[derive(Debug, Clone, PartialEq)]
pub struct PageView<'a, T> {
    pub rows: &'a [T],
    pub page: usize,
    pub total_pages: usize,
    pub nav: Navigation,
}

/// What the pagination controls should offer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Navigation {
    pub prev_enabled: bool,
    pub next_enabled: bool,
    /// `Page 2 / 7` or `Showing all 130 records`.
    pub info: String,
}

/// `max(1, ceil(len / size))`; always 1 when paging is disabled.
pub fn total_pages(len: usize, page_size: PageSize) -> usize {
    match page_size {
        PageSize::All => 1,
        PageSize::Rows(size) => len.div_ceil(size.max(1)).max(1),
    }
}

/// Navigation state for `page` of a dataset with `len` rows.
pub fn navigation(len: usize, page_size: PageSize, page: usize) -> Navigation {
    match page_size {
        PageSize::All => Navigation {
            prev_enabled: false,
            next_enabled: false,
            info: format!("Showing all {len} records"),
        },
        PageSize::Rows(_) => {
            let total = total_pages(len, page_size);
            Navigation {
                prev_enabled: page > 1,
                next_enabled: page < total,
                info: format!("Page {page} / {total}"),
            }
        }
    }
}

/// Slice `[(page-1)*size, page*size)` of `data`, or all of it when paging is
/// disabled.
pub fn paginate<T>(data: &[T], page_size: PageSize, page: usize) -> PageView<'_, T> {
    let rows = match page_size {
        PageSize::All => data,
        PageSize::Rows(size) => {
            let start = page.saturating_sub(1).saturating_mul(size).min(data.len());
            let end = start.saturating_add(size).min(data.len());
            &data[start..end]
        }
    };
    PageView {
        rows,
        page,
        total_pages: total_pages(data.len(), page_size),
        nav: navigation(data.len(), page_size, page),
    }
}
