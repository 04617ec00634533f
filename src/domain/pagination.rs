//! Page arithmetic shared by song listing and verse paging.

use crate::domain::error::{SongError, SongResult};
use crate::domain::song::VERSE_DELIMITER;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// 1-indexed page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub page: i64,
    pub page_size: i64,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Page {
    pub fn new(page: i64, page_size: i64) -> Self {
        Self { page, page_size }
    }

    /// Builds a page from raw query values. Missing, non-numeric or non-positive values
    /// fall back to the defaults independently of each other.
    pub fn from_query(page: Option<&str>, page_size: Option<&str>) -> Self {
        Self {
            page: parse_positive(page).unwrap_or(DEFAULT_PAGE),
            page_size: parse_positive(page_size).unwrap_or(DEFAULT_PAGE_SIZE),
        }
    }

    /// `(page - 1) * page_size`, saturating instead of overflowing.
    pub fn offset(&self) -> i64 {
        self.page.saturating_sub(1).saturating_mul(self.page_size)
    }

    pub fn limit(&self) -> i64 {
        self.page_size
    }
}

fn parse_positive(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|v| v.trim().parse::<i64>().ok()).filter(|v| *v >= 1)
}

/// Splits stored song text into verses. An empty text is a single empty verse.
pub fn split_verses(text: &str) -> Vec<&str> {
    text.split(VERSE_DELIMITER).collect()
}

/// Returns the verses on `page`, or `NoMoreVerses` when the page starts past the end.
pub fn paginate_verses(text: &str, page: Page) -> SongResult<Vec<String>> {
    let verses = split_verses(text);
    let total = verses.len();

    let start = usize::try_from(page.offset()).map_err(|_| SongError::NoMoreVerses)?;
    if start >= total {
        return Err(SongError::NoMoreVerses);
    }
    let size = usize::try_from(page.page_size).unwrap_or(0);
    let end = start.saturating_add(size).min(total);

    Ok(verses[start..end].iter().map(|v| v.to_string()).collect())
}
