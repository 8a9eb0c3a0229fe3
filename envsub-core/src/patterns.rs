//! Glob patterns, used by prefix and suffix trimming.

use crate::trace_categories;

/// A single element of a compiled pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PatternToken {
    /// Matches exactly this character.
    Literal(char),
    /// `?`: matches exactly one character, any character.
    AnyChar,
    /// `*`: matches any run of zero or more characters.
    AnyString,
}

/// Encapsulates a glob pattern, matched against whole strings only.
#[derive(Clone, Debug)]
pub(crate) struct Pattern {
    tokens: Vec<PatternToken>,
}

impl From<&str> for Pattern {
    fn from(value: &str) -> Self {
        let mut tokens = vec![];
        let mut chars = value.chars();
        while let Some(c) = chars.next() {
            let token = match c {
                '*' => PatternToken::AnyString,
                '?' => PatternToken::AnyChar,
                // A trailing backslash escapes nothing and matches itself.
                '\\' => PatternToken::Literal(chars.next().unwrap_or('\\')),
                c => PatternToken::Literal(c),
            };

            // A run of '*' matches the same strings as a single one.
            if matches!(token, PatternToken::AnyString)
                && matches!(tokens.last(), Some(PatternToken::AnyString))
            {
                continue;
            }

            tokens.push(token);
        }

        tracing::debug!(target: trace_categories::PATTERN, "compiled pattern '{value}' => {tokens:?}");

        Self { tokens }
    }
}

impl Pattern {
    /// Checks if the pattern exactly matches the given string, anchored at
    /// both ends.
    ///
    /// # Arguments
    ///
    /// * `value` - The string to check for a match.
    pub fn exactly_matches(&self, value: &str) -> bool {
        Self::matches_from(&self.tokens, value)
    }

    fn matches_from(tokens: &[PatternToken], value: &str) -> bool {
        match tokens.split_first() {
            None => value.is_empty(),
            Some((PatternToken::Literal(c), rest)) => value
                .strip_prefix(*c)
                .is_some_and(|remainder| Self::matches_from(rest, remainder)),
            Some((PatternToken::AnyChar, rest)) => {
                let mut chars = value.chars();
                chars.next().is_some() && Self::matches_from(rest, chars.as_str())
            }
            Some((PatternToken::AnyString, rest)) => {
                // Try consuming zero characters first, then backtrack by
                // extending the consumed run one character at a time.
                let mut remainder = value;
                loop {
                    if Self::matches_from(rest, remainder) {
                        return true;
                    }

                    let mut chars = remainder.chars();
                    if chars.next().is_none() {
                        return false;
                    }
                    remainder = chars.as_str();
                }
            }
        }
    }
}

/// Removes the largest prefix from a string that matches the given pattern.
/// The string is returned unchanged if no prefix matches. Candidates are
/// tried whole-string first, so a pattern that only matches empty removes
/// nothing.
///
/// # Arguments
///
/// * `s` - The string to remove the prefix from.
/// * `pattern` - The pattern to match.
pub(crate) fn remove_largest_matching_prefix<'a>(s: &'a str, pattern: &Pattern) -> &'a str {
    let mut end = s.len();
    for (idx, _) in s.char_indices().rev() {
        if pattern.exactly_matches(&s[..end]) {
            return &s[end..];
        }

        end = idx;
    }
    s
}

/// Removes the smallest prefix from a string that matches the given pattern.
///
/// # Arguments
///
/// * `s` - The string to remove the prefix from.
/// * `pattern` - The pattern to match.
pub(crate) fn remove_smallest_matching_prefix<'a>(s: &'a str, pattern: &Pattern) -> &'a str {
    // The shortest candidate is the empty prefix: a pattern that can match
    // empty (such as a bare '*') removes nothing.
    if pattern.exactly_matches("") {
        return s;
    }

    for (idx, c) in s.char_indices() {
        let end = idx + c.len_utf8();
        if pattern.exactly_matches(&s[..end]) {
            return &s[end..];
        }
    }
    s
}

/// Removes the largest suffix from a string that matches the given pattern.
///
/// # Arguments
///
/// * `s` - The string to remove the suffix from.
/// * `pattern` - The pattern to match.
pub(crate) fn remove_largest_matching_suffix<'a>(s: &'a str, pattern: &Pattern) -> &'a str {
    for (idx, _) in s.char_indices() {
        if pattern.exactly_matches(&s[idx..]) {
            return &s[..idx];
        }
    }
    s
}

/// Removes the smallest suffix from a string that matches the given pattern.
///
/// # Arguments
///
/// * `s` - The string to remove the suffix from.
/// * `pattern` - The pattern to match.
pub(crate) fn remove_smallest_matching_suffix<'a>(s: &'a str, pattern: &Pattern) -> &'a str {
    // The shortest candidate is the empty suffix.
    if pattern.exactly_matches("") {
        return s;
    }

    for (idx, _) in s.char_indices().rev() {
        if pattern.exactly_matches(&s[idx..]) {
            return &s[..idx];
        }
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_exact_match() {
        assert!(Pattern::from("").exactly_matches(""));
        assert!(!Pattern::from("").exactly_matches("a"));

        assert!(Pattern::from("abc").exactly_matches("abc"));
        assert!(!Pattern::from("abc").exactly_matches("abcd"));
        assert!(!Pattern::from("abc").exactly_matches("ab"));
    }

    #[test]
    fn test_any_string() {
        assert!(Pattern::from("*").exactly_matches(""));
        assert!(Pattern::from("*").exactly_matches("anything at all"));

        assert!(Pattern::from("a*c").exactly_matches("ac"));
        assert!(Pattern::from("a*c").exactly_matches("abbbc"));
        assert!(!Pattern::from("a*c").exactly_matches("abbb"));

        assert!(Pattern::from("*.txt").exactly_matches("notes.txt"));
        assert!(!Pattern::from("*.txt").exactly_matches("notes.txt.bak"));

        // Backtracking across multiple wildcards.
        assert!(Pattern::from("a*b*c").exactly_matches("aXbYbZc"));
        assert!(Pattern::from("**").exactly_matches("ab"));
    }

    #[test]
    fn test_any_char() {
        assert!(Pattern::from("?").exactly_matches("a"));
        assert!(Pattern::from("?").exactly_matches("🚀"));
        assert!(!Pattern::from("?").exactly_matches(""));
        assert!(!Pattern::from("?").exactly_matches("ab"));

        assert!(Pattern::from("a?c").exactly_matches("abc"));
        assert!(!Pattern::from("a?c").exactly_matches("ac"));
    }

    #[test]
    fn test_escapes() {
        assert!(Pattern::from(r"\*").exactly_matches("*"));
        assert!(!Pattern::from(r"\*").exactly_matches("a"));
        assert!(Pattern::from(r"\?").exactly_matches("?"));
        assert!(Pattern::from(r"a\\b").exactly_matches(r"a\b"));
        assert!(Pattern::from("a\\").exactly_matches("a\\"));
    }

    #[test]
    fn test_remove_largest_matching_prefix() {
        assert_eq!(
            remove_largest_matching_prefix("ooof", &Pattern::from("")),
            "ooof"
        );
        assert_eq!(
            remove_largest_matching_prefix("ooof", &Pattern::from("x")),
            "ooof"
        );
        assert_eq!(
            remove_largest_matching_prefix("ooof", &Pattern::from("o")),
            "oof"
        );
        assert_eq!(
            remove_largest_matching_prefix("ooof", &Pattern::from("o*o")),
            "f"
        );
        assert_eq!(
            remove_largest_matching_prefix("ooof", &Pattern::from("o*")),
            ""
        );
        // Longest match for a bare '*' is the whole string.
        assert_eq!(remove_largest_matching_prefix("ooof", &Pattern::from("*")), "");
        assert_eq!(
            remove_largest_matching_prefix("🚀🚀🚀rocket", &Pattern::from("🚀")),
            "🚀🚀rocket"
        );
    }

    #[test]
    fn test_remove_smallest_matching_prefix() {
        assert_eq!(
            remove_smallest_matching_prefix("ooof", &Pattern::from("")),
            "ooof"
        );
        assert_eq!(
            remove_smallest_matching_prefix("ooof", &Pattern::from("x")),
            "ooof"
        );
        assert_eq!(
            remove_smallest_matching_prefix("ooof", &Pattern::from("o")),
            "oof"
        );
        assert_eq!(
            remove_smallest_matching_prefix("ooof", &Pattern::from("o*o")),
            "of"
        );
        assert_eq!(
            remove_smallest_matching_prefix("ooof", &Pattern::from("o*")),
            "oof"
        );
        // '*' can match empty, and empty is the shortest candidate.
        assert_eq!(
            remove_smallest_matching_prefix("ooof", &Pattern::from("*")),
            "ooof"
        );
        assert_eq!(
            remove_smallest_matching_prefix("ooof", &Pattern::from("*o")),
            "oof"
        );
        assert_eq!(
            remove_smallest_matching_prefix("ooof", &Pattern::from("ooof")),
            ""
        );
        assert_eq!(
            remove_smallest_matching_prefix("🚀🚀🚀rocket", &Pattern::from("🚀")),
            "🚀🚀rocket"
        );
    }

    #[test]
    fn test_remove_largest_matching_suffix() {
        assert_eq!(
            remove_largest_matching_suffix("foo", &Pattern::from("")),
            "foo"
        );
        assert_eq!(
            remove_largest_matching_suffix("foo", &Pattern::from("x")),
            "foo"
        );
        assert_eq!(
            remove_largest_matching_suffix("foo", &Pattern::from("o")),
            "fo"
        );
        assert_eq!(remove_largest_matching_suffix("foo", &Pattern::from("o*")), "f");
        assert_eq!(
            remove_largest_matching_suffix("foo", &Pattern::from("foo")),
            ""
        );
        assert_eq!(
            remove_largest_matching_suffix("rocket🚀🚀🚀", &Pattern::from("🚀")),
            "rocket🚀🚀"
        );
    }

    #[test]
    fn test_remove_smallest_matching_suffix() {
        assert_eq!(
            remove_smallest_matching_suffix("fooo", &Pattern::from("")),
            "fooo"
        );
        assert_eq!(
            remove_smallest_matching_suffix("fooo", &Pattern::from("x")),
            "fooo"
        );
        assert_eq!(
            remove_smallest_matching_suffix("fooo", &Pattern::from("o")),
            "foo"
        );
        assert_eq!(
            remove_smallest_matching_suffix("fooo", &Pattern::from("o*o")),
            "fo"
        );
        assert_eq!(
            remove_smallest_matching_suffix("fooo", &Pattern::from("*")),
            "fooo"
        );
        assert_eq!(
            remove_smallest_matching_suffix("fooo", &Pattern::from("fooo")),
            ""
        );
        assert_eq!(
            remove_smallest_matching_suffix("rocket🚀🚀🚀", &Pattern::from("🚀")),
            "rocket🚀🚀"
        );
    }
}
