//! Output matchers: per-tool pattern extractors turning raw output lines
//! into normalized fragments.
//!
//! Two shapes exist. The single-line matcher applies one pattern per line
//! and fills a fragment from its named captures. The two-line matcher
//! serves tools that split a diagnostic across a header line and an
//! indented continuation line: it owns a carry slot holding the
//! partially-built fragment from the most recent header. Both shapes
//! return `None` for noise lines and never fail on unmatched input.

use regex::{Captures, Regex};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
/// A partial diagnostic extracted from one or more raw output lines.
/// Unmatched optional groups stay empty.
pub struct Fragment {
    pub filename: String,
    pub line_number: String,
    pub level: String,
    pub description: String,
}

/// Line-oriented pattern matcher owned by a runner.
pub enum Matcher {
    /// One pattern captures the whole diagnostic on a single line.
    Single(Regex),
    /// A header pattern primes the carry slot; a continuation pattern
    /// completes it and yields the merged fragment.
    TwoLine {
        header: Regex,
        continuation: Regex,
        carry: Option<Fragment>,
    },
}

impl Matcher {
    /// Feed one raw output line; returns a ready fragment or `None`.
    ///
    /// Two-line rules: a header stores its captures and emits nothing (the
    /// description is still to come); a new header overwrites any
    /// unconsumed carry. A continuation splices its description into the
    /// carried fragment, creating a description-only fragment when nothing
    /// was carried. The carry survives emission, so each further
    /// continuation line re-emits with an updated description.
    pub fn feed(&mut self, line: &str) -> Option<Fragment> {
        match self {
            Matcher::Single(pattern) => pattern.captures(line).map(|caps| fragment_from(&caps)),
            Matcher::TwoLine {
                header,
                continuation,
                carry,
            } => {
                if let Some(caps) = header.captures(line) {
                    *carry = Some(fragment_from(&caps));
                    return None;
                }
                let caps = continuation.captures(line)?;
                let description = named(&caps, "description");
                match carry.as_mut() {
                    Some(frag) => {
                        frag.description = description;
                        Some(frag.clone())
                    }
                    None => {
                        let frag = Fragment {
                            description,
                            ..Fragment::default()
                        };
                        *carry = Some(frag.clone());
                        Some(frag)
                    }
                }
            }
        }
    }
}

fn named(caps: &Captures<'_>, name: &str) -> String {
    caps.name(name)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

fn fragment_from(caps: &Captures<'_>) -> Fragment {
    Fragment {
        filename: named(caps, "filename"),
        line_number: named(caps, "line_number"),
        level: named(caps, "level"),
        description: named(caps, "description"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::ToolKind;

    #[test]
    fn test_single_line_match_and_noise() {
        let mut m = ToolKind::Splint.matcher();
        let frag = m.feed("foo.c:12:3: Warning: bar").unwrap();
        assert_eq!(frag.filename, "foo.c");
        assert_eq!(frag.line_number, "12");
        assert_eq!(frag.description, "Warning: bar");
        assert!(m.feed("Splint 3.1.2 --- 03 May 2009").is_none());
        assert!(m.feed("").is_none());
    }

    #[test]
    fn test_cppcheck_captures_level() {
        let mut m = ToolKind::CppCheck.matcher();
        let frag = m.feed("[baz.c:9]: (style) unused variable x").unwrap();
        assert_eq!(frag.filename, "baz.c");
        assert_eq!(frag.line_number, "9");
        assert_eq!(frag.level, "style");
        assert_eq!(frag.description, "unused variable x");
    }

    #[test]
    fn test_two_line_header_then_continuation() {
        let mut m = ToolKind::Tendra.matcher();
        assert!(m.feed("\"t.c\", line 4: Error:").is_none());
        let frag = m.feed("  'x' is not declared").unwrap();
        assert_eq!(frag.filename, "t.c");
        assert_eq!(frag.line_number, "4");
        assert_eq!(frag.description, "'x' is not declared");
    }

    #[test]
    fn test_two_line_second_header_overwrites_first() {
        let mut m = ToolKind::Tendra.matcher();
        assert!(m.feed("\"a.c\", line 1: Error:").is_none());
        assert!(m.feed("\"b.c\", line 2: Error:").is_none());
        let frag = m.feed("    something went wrong").unwrap();
        assert_eq!(frag.filename, "b.c");
        assert_eq!(frag.line_number, "2");
    }

    #[test]
    fn test_two_line_continuation_without_header() {
        let mut m = ToolKind::Tendra.matcher();
        let frag = m.feed("   stray continuation text").unwrap();
        assert!(frag.filename.is_empty());
        assert!(frag.line_number.is_empty());
        assert_eq!(frag.description, "stray continuation text");
    }

    #[test]
    fn test_two_line_carry_survives_emission() {
        let mut m = ToolKind::Tendra.matcher();
        assert!(m.feed("\"t.c\", line 7: Error:").is_none());
        let first = m.feed("  first detail line").unwrap();
        let second = m.feed("  second detail line").unwrap();
        assert_eq!(first.filename, "t.c");
        assert_eq!(second.filename, "t.c");
        assert_eq!(second.description, "second detail line");
    }

    #[test]
    fn test_two_line_noise_is_ignored() {
        let mut m = ToolKind::Tendra.matcher();
        assert!(m.feed("tchk: 1 error found").is_none());
        assert!(m.feed("").is_none());
    }
}
