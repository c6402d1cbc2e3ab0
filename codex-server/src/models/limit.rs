//! Result limit for search

/// Largest accepted limit
pub const MAX_LIMIT: u32 = 100;

/// Limit used when none (or an invalid one) is given
pub const DEFAULT_LIMIT: u32 = 20;

/// Number of search results to return, always within 1..=100
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimit(u32);

impl SearchLimit {
    /// Parse the raw `limit` query value.
    ///
    /// Anything that is not an integer in 1..=100 falls back to the default
    /// rather than being rejected.
    pub fn parse(raw: Option<&str>) -> Self {
        let limit = raw
            .and_then(|s| s.trim().parse::<u32>().ok())
            .filter(|n| (1..=MAX_LIMIT).contains(n))
            .unwrap_or(DEFAULT_LIMIT);
        Self(limit)
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for SearchLimit {
    fn default() -> Self {
        Self(DEFAULT_LIMIT)
    }
}
