use serde::Serialize;

/// Hard ceiling on any page size
pub const MAX_PAGE_LIMIT: i64 = 1000;
/// Default page size for bank and per-bank branch listings
pub const DEFAULT_LIST_LIMIT: i64 = 100;
/// Default page size for the general branch search
pub const DEFAULT_SEARCH_LIMIT: i64 = 50;

/// Effective pagination window after clamping the request values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Page {
    pub limit: i64,
    pub offset: i64,
}

impl Page {
    /// Resolve requested values: `limit` is clamped to `[1, MAX_PAGE_LIMIT]`,
    /// a negative `offset` becomes 0.
    pub fn resolve(limit: Option<i64>, offset: Option<i64>, default_limit: i64) -> Self {
        Self {
            limit: limit.unwrap_or(default_limit).clamp(1, MAX_PAGE_LIMIT),
            offset: offset.unwrap_or(0).max(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(
            Page::resolve(None, None, DEFAULT_LIST_LIMIT),
            Page { limit: 100, offset: 0 }
        );
        assert_eq!(Page::resolve(None, None, DEFAULT_SEARCH_LIMIT).limit, 50);
    }

    #[test]
    fn test_limit_is_clamped() {
        assert_eq!(Page::resolve(Some(5000), None, DEFAULT_LIST_LIMIT).limit, 1000);
        assert_eq!(Page::resolve(Some(0), None, DEFAULT_LIST_LIMIT).limit, 1);
        assert_eq!(Page::resolve(Some(-7), None, DEFAULT_LIST_LIMIT).limit, 1);
        assert_eq!(Page::resolve(Some(1000), None, DEFAULT_LIST_LIMIT).limit, 1000);
    }

    #[test]
    fn test_offset_has_no_upper_bound() {
        assert_eq!(Page::resolve(None, Some(-3), DEFAULT_LIST_LIMIT).offset, 0);
        assert_eq!(
            Page::resolve(None, Some(1_000_000), DEFAULT_LIST_LIMIT).offset,
            1_000_000
        );
    }
}
