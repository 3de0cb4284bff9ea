//! Page resolution for the listing endpoints.
//!
//! The page size is fixed; callers only choose which page they want. Any
//! page value that cannot be read as a positive integer falls back to the
//! first page instead of being reported as an error.

/// Number of records per page. Not caller-controllable.
pub const PAGE_SIZE: i64 = 50;

/// Resolved pagination window for a single listing query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based page number.
    pub page: i64,
    /// Number of records to skip.
    pub skip: i64,
    /// Maximum number of records to return.
    pub limit: i64,
}

impl Pagination {
    /// Builds the window for `page`, treating anything below 1 as page 1.
    pub fn for_page(page: i64) -> Self {
        let page = page.max(1);
        Self {
            page,
            skip: (page - 1).saturating_mul(PAGE_SIZE),
            limit: PAGE_SIZE,
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::for_page(1)
    }
}

/// Resolves a raw `page` query value into a pagination window.
///
/// The value is read leniently: leading whitespace is skipped and the
/// longest run of leading digits (with an optional sign) is used, so `"3"`,
/// `" 3"` and `"3abc"` all mean page 3. Missing, unparseable, overflowing or
/// non-positive values resolve to page 1.
pub fn resolve_page(raw: Option<&str>) -> Pagination {
    raw.and_then(parse_leading_int)
        .filter(|page| *page >= 1)
        .map_or_else(Pagination::default, Pagination::for_page)
}

fn parse_leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first()? {
        b'-' => (true, &s[1..]),
        b'+' => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let value: i64 = digits[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}
