//! Allowed-drift path matching

use regex::Regex;
use tracing::warn;

/// Compiled allowed-drift patterns
///
/// Built once per comparison and applied to every difference. `*` matches
/// exactly one non-dot path segment; a leading `$.` or `$` is stripped from
/// patterns and paths alike.
#[derive(Debug, Default)]
pub struct DriftMatcher {
    patterns: Vec<Regex>,
}

impl DriftMatcher {
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Self {
        let patterns = patterns
            .iter()
            .filter_map(|p| {
                let source = Self::to_regex(p.as_ref());
                match Regex::new(&source) {
                    Ok(re) => Some(re),
                    Err(e) => {
                        warn!(pattern = p.as_ref(), error = %e, "ignoring allowed-drift pattern");
                        None
                    }
                }
            })
            .collect();
        Self { patterns }
    }

    /// Check if a difference path is allowed to drift
    pub fn is_allowed(&self, path: &str) -> bool {
        let path = strip_root(path);
        self.patterns.iter().any(|re| re.is_match(path))
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    fn to_regex(pattern: &str) -> String {
        let escaped = regex::escape(strip_root(pattern)).replace(r"\*", "[^.]+");
        format!("^{}$", escaped)
    }
}

fn strip_root(path: &str) -> &str {
    path.strip_prefix("$.")
        .or_else(|| path.strip_prefix('$'))
        .unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_path_only() {
        let matcher = DriftMatcher::new(&["$.timestamp"]);
        assert!(matcher.is_allowed("$.timestamp"));
        assert!(!matcher.is_allowed("$.timestamp2"));
        assert!(!matcher.is_allowed("$.other.timestamp"));
    }

    #[test]
    fn test_root_anchoring_is_ignored() {
        let matcher = DriftMatcher::new(&["meta.id"]);
        assert!(matcher.is_allowed("$.meta.id"));
        assert!(matcher.is_allowed("meta.id"));

        let anchored = DriftMatcher::new(&["$meta.id"]);
        assert!(anchored.is_allowed("$.meta.id"));
    }

    #[test]
    fn test_wildcard_matches_one_segment() {
        let matcher = DriftMatcher::new(&["$.items.*.id"]);
        assert!(matcher.is_allowed("$.items.first.id"));
        assert!(!matcher.is_allowed("$.items.a.b.id"));
        assert!(!matcher.is_allowed("$.items.id"));
    }

    #[test]
    fn test_wildcard_in_brackets() {
        let matcher = DriftMatcher::new(&["$.lines[*]"]);
        assert!(matcher.is_allowed("$.lines[3]"));
        assert!(!matcher.is_allowed("$.lines"));
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        let matcher = DriftMatcher::new(&["$.a+b"]);
        assert!(matcher.is_allowed("$.a+b"));
        assert!(!matcher.is_allowed("$.aab"));
    }

    #[test]
    fn test_empty_matcher_allows_nothing() {
        let matcher = DriftMatcher::new::<&str>(&[]);
        assert!(matcher.is_empty());
        assert!(!matcher.is_allowed("$"));
    }
}
