//! Per-process dedup tracker
//!
//! The tracker remembers every URL this worker process has received or
//! published. It is insert-only, starts empty, and dies with the process.
//! Two workers each hold their own tracker and do not deduplicate against
//! each other.

use std::collections::HashSet;

/// Set of URLs already observed by this worker process
#[derive(Debug, Default, Clone)]
pub struct DedupTracker {
    seen: HashSet<String>,
}

impl DedupTracker {
    /// Creates an empty tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if `url` has been marked before
    ///
    /// Comparison is exact string equality, so `https://example.com/a` and
    /// `https://example.com/a/` are different URLs.
    pub fn seen(&self, url: &str) -> bool {
        self.seen.contains(url)
    }

    /// Marks `url` as seen
    ///
    /// # Returns
    ///
    /// `true` if the URL was not marked before
    pub fn mark_seen(&mut self, url: &str) -> bool {
        if self.seen.contains(url) {
            return false;
        }
        self.seen.insert(url.to_string())
    }

    /// Number of distinct URLs marked so far
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    /// Returns true if nothing has been marked yet
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_empty() {
        let tracker = DedupTracker::new();
        assert!(tracker.is_empty());
        assert!(!tracker.seen("https://example.com/"));
    }

    #[test]
    fn test_mark_then_seen() {
        let mut tracker = DedupTracker::new();
        assert!(tracker.mark_seen("https://example.com/a"));
        assert!(tracker.seen("https://example.com/a"));
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn test_mark_twice_reports_duplicate() {
        let mut tracker = DedupTracker::new();
        assert!(tracker.mark_seen("https://example.com/a"));
        assert!(!tracker.mark_seen("https://example.com/a"));
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn test_identity_is_exact_string() {
        let mut tracker = DedupTracker::new();
        tracker.mark_seen("https://example.com/a");

        assert!(!tracker.seen("https://example.com/a/"));
        assert!(!tracker.seen("https://example.com/a?x=1"));
        assert!(!tracker.seen("https://example.com/a#top"));
    }
}
