//! Compiled `regex` rules, kept for the lifetime of a [`Checker`].
//!
//! [`Checker`]: crate::Checker

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use regex::Regex;

/// Patterns compiled so far, keyed by their source text.
#[derive(Debug, Default)]
pub(crate) struct PatternCache {
    compiled: Mutex<HashMap<String, Regex>>,
}

impl PatternCache {
    /// Match `value` against `pattern`, compiling the pattern on first use.
    pub(crate) fn is_match(&self, pattern: &str, value: &str) -> Result<bool, regex::Error> {
        let mut compiled = self.compiled.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(re) = compiled.get(pattern) {
            return Ok(re.is_match(value));
        }
        let re = Regex::new(pattern)?;
        tracing::trace!(pattern, "compiled regex rule");
        let matched = re.is_match(value);
        compiled.insert(pattern.to_string(), re);
        Ok(matched)
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.compiled.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compiles_each_pattern_once() {
        let cache = PatternCache::default();
        assert!(cache.is_match("^[a-z]+$", "abc").unwrap());
        assert!(!cache.is_match("^[a-z]+$", "ABC").unwrap());
        assert_eq!(cache.len(), 1);
        assert!(cache.is_match("^\\d+$", "42").unwrap());
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn invalid_pattern_is_not_cached() {
        let cache = PatternCache::default();
        assert!(cache.is_match("(", "x").is_err());
        assert_eq!(cache.len(), 0);
    }
}
