//! Neighbor selection policy.
//!
//! Which discovered neighbors qualify for a rename is site-specific (access
//! points only, a hostname convention, everything). The policy is injected
//! as a regular expression searched against the advertised system name; with
//! no pattern configured every neighbor is selected.

use regex::Regex;

/// Predicate over advertised neighbor names.
#[derive(Debug, Clone)]
pub struct NamePolicy {
    pattern: Option<Regex>,
}

impl NamePolicy {
    /// Select every neighbor.
    pub fn any() -> Self {
        Self { pattern: None }
    }

    /// Select neighbors whose name matches `pattern` (unanchored search).
    pub fn matching(pattern: Regex) -> Self {
        Self {
            pattern: Some(pattern),
        }
    }

    /// Whether a neighbor with this advertised name qualifies.
    pub fn selects(&self, name: &str) -> bool {
        match &self.pattern {
            Some(re) => re.is_match(name),
            None => true,
        }
    }
}

impl Default for NamePolicy {
    fn default() -> Self {
        Self::any()
    }
}

impl From<Option<Regex>> for NamePolicy {
    fn from(pattern: Option<Regex>) -> Self {
        Self { pattern }
    }
}
