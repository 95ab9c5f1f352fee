//! Fixed-size, 1-based pagination shared by the list views.

use serde::Serialize;

pub const TEAMS_PAGE_SIZE: u64 = 12;
pub const PLAYERS_PAGE_SIZE: u64 = 20;
pub const MATCHES_PAGE_SIZE: u64 = 12;

/// The page a caller asked for, before it is clamped to what exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
}

impl PageRequest {
    /// Absent, non-numeric or below 1 -> page 1. Numbers too large to
    /// represent are kept as "beyond the end" and clamp to the last page.
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
            return Self::first();
        };
        let page = match raw.parse::<i64>() {
            Ok(n) if n >= 1 => n as u64,
            Ok(_) => 1,
            Err(_) if raw.bytes().all(|b| b.is_ascii_digit()) => u64::MAX,
            Err(_) => 1,
        };
        Self { page }
    }

    pub fn first() -> Self {
        Self { page: 1 }
    }

    /// Clamp against `total` rows. An empty listing still has one page.
    pub fn window(self, total: u64, page_size: u64) -> PageWindow {
        let page_size = page_size.max(1);
        let num_pages = total.div_ceil(page_size).max(1);
        let number = self.page.clamp(1, num_pages);
        PageWindow {
            number,
            num_pages,
            page_size,
            total,
            offset: (number - 1) * page_size,
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first()
    }
}

/// A resolved page: which rows to fetch and how to describe them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub number: u64,
    pub num_pages: u64,
    pub page_size: u64,
    pub total: u64,
    pub offset: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub number: u64,
    pub num_pages: u64,
    pub page_size: u64,
    pub total: u64,
    pub has_previous: bool,
    pub has_next: bool,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, window: PageWindow) -> Self {
        Self {
            items,
            number: window.number,
            num_pages: window.num_pages,
            page_size: window.page_size,
            total: window.total,
            has_previous: window.number > 1,
            has_next: window.number < window.num_pages,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            number: self.number,
            num_pages: self.num_pages,
            page_size: self.page_size,
            total: self.total,
            has_previous: self.has_previous,
            has_next: self.has_next,
        }
    }
}
