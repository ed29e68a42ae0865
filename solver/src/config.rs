//! Resource limits for a single search invocation.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Caps the number of frontier nodes expanded before giving up. `None`
    /// means search until the frontier is exhausted, which is unbounded on
    /// adversarial layouts (see the search engine's failure semantics).
    pub max_expansions: Option<usize>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { max_expansions: Some(500_000) }
    }
}

impl SearchConfig {
    pub fn unbounded() -> Self {
        Self { max_expansions: None }
    }

    pub fn with_max_expansions(max_expansions: usize) -> Self {
        Self { max_expansions: Some(max_expansions) }
    }
}
