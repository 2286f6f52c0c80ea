//! Glob pattern compilation
//!
//! Patterns use three wildcards:
//! - `**` matches any run of characters, `/` included. When `**` is a whole
//!   segment it also matches zero directories: `**/iam` matches both `iam`
//!   and `a/b/iam`, and `stacks/**` matches `stacks` itself.
//! - `*` matches any run of characters except `/`.
//! - `?` matches exactly one character except `/`.
//!
//! Every other character matches itself. Matching is against the whole path.

use regex::Regex;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GlobError {
    #[error("Invalid glob pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// A compiled glob pattern
#[derive(Clone)]
pub struct GlobMatcher {
    pattern: String,
    regex: Regex,
}

impl GlobMatcher {
    pub fn compile(pattern: &str) -> Result<Self, GlobError> {
        let expr = format!("^{}$", translate(pattern));
        let regex = Regex::new(&expr).map_err(|source| GlobError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;

        Ok(Self {
            pattern: pattern.to_string(),
            regex,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn test(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }
}

impl fmt::Debug for GlobMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlobMatcher")
            .field("pattern", &self.pattern)
            .field("regex", &self.regex.as_str())
            .finish()
    }
}

/// Translates a glob into an unanchored regex body.
///
/// `**` is consumed before a lone `*` is considered; reading it as two `*`
/// tokens would stop it from crossing separators. Only a `**` that is a whole
/// path segment may stand for zero directories.
fn translate(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut i = 0;

    while i < chars.len() {
        let segment_start = i == 0 || chars[i - 1] == '/';
        match chars[i] {
            '/' if i + 3 == chars.len() && chars[i + 1] == '*' && chars[i + 2] == '*' => {
                out.push_str("(?:/.*)?");
                i += 3;
            }
            '*' if chars.get(i + 1) == Some(&'*') => {
                if segment_start && chars.get(i + 2) == Some(&'/') {
                    out.push_str("(?:.*/)?");
                    i += 3;
                } else {
                    out.push_str(".*");
                    i += 2;
                }
            }
            '*' => {
                out.push_str("[^/]*");
                i += 1;
            }
            '?' => {
                out.push_str("[^/]");
                i += 1;
            }
            c => {
                let mut buf = [0u8; 4];
                out.push_str(&regex::escape(c.encode_utf8(&mut buf)));
                i += 1;
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use yare::parameterized;

    #[parameterized(
        globstar_nested = { "**/networking", "envs/dev/networking", true },
        globstar_top_level = { "**/networking", "networking", true },
        globstar_wrong_leaf = { "**/networking", "envs/dev/networking-data", false },
        star_one_segment = { "*/networking", "dev/networking", true },
        star_not_two_segments = { "*/networking", "envs/dev/networking", false },
        star_suffix = { "**/load-balancing-*", "stacks/dev/load-balancing-public", true },
        star_suffix_no_slash = { "**/load-balancing-*", "stacks/dev/load-balancing-a/b", false },
        star_infix_data = { "**/load-balancing-*-data", "stacks/prod/load-balancing-int-data", true },
        star_leading = { "**/*-data", "stacks/dev/networking-data", true },
        question_one_char = { "dev/ia?", "dev/iam", true },
        question_not_zero = { "dev/ia?", "dev/ia", false },
        question_not_separator = { "dev?iam", "dev/iam", false },
        dot_is_literal = { "dev/app.v1", "dev/appxv1", false },
        dot_matches_dot = { "dev/app.v1", "dev/app.v1", true },
        parens_literal = { "dev/(app)", "dev/(app)", true },
        plus_literal = { "dev/a+b", "dev/aab", false },
        middle_globstar_zero_dirs = { "stacks/**/iam", "stacks/iam", true },
        middle_globstar_many_dirs = { "stacks/**/iam", "stacks/dev/eu/iam", true },
        trailing_globstar = { "stacks/**", "stacks/dev/iam", true },
        trailing_globstar_zero_dirs = { "stacks/**", "stacks", true },
        trailing_globstar_needs_separator = { "stacks/**", "stacksx", false },
        glued_globstar = { "foo**/bar", "foobar", false },
        glued_globstar_crosses_separators = { "foo**/bar", "foox/y/bar", true },
        stacked_globstar_segments = { "**/**/iam", "iam", true },
        full_match_only = { "dev/iam", "stacks/dev/iam", false },
        no_prefix_match = { "dev", "dev/iam", false },
        triple_star = { "a/***", "a/b/c", true },
    )]
    fn test_glob_matching(pattern: &str, path: &str, expected: bool) {
        let matcher = GlobMatcher::compile(pattern).unwrap();
        assert_eq!(matcher.test(path), expected, "{} vs {}", pattern, path);
    }

    #[test]
    fn test_translation() {
        assert_eq!(translate("**/dns"), "(?:.*/)?dns");
        assert_eq!(translate("*/dns"), "[^/]*/dns");
        assert_eq!(translate("a?b"), "a[^/]b");
        assert_eq!(translate("a.b"), "a\\.b");
        assert_eq!(translate("a/**"), "a(?:/.*)?");
        assert_eq!(translate("foo**/bar"), "foo.*/bar");
        assert_eq!(translate("a/**/b"), "a/(?:.*/)?b");
    }

    #[test]
    fn test_keeps_source_pattern() {
        let matcher = GlobMatcher::compile("**/iam").unwrap();
        assert_eq!(matcher.pattern(), "**/iam");
    }

    #[test]
    fn test_metacharacters_never_fail_to_compile() {
        for pattern in ["[", "]", "{", "}", "(", "\\", "^$|", "a{2}"] {
            assert!(GlobMatcher::compile(pattern).is_ok(), "{}", pattern);
        }
    }
}
