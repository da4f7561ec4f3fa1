//! Plural form detection and key expansion.
//!
//! Two source syntaxes are recognised, never mixed in one string:
//!
//! - counted segments: `{0} none|{1} one|[2,*] many`
//! - pipe-only pairs: `apple|apples` (singular, then plural)
//!
//! A plural string is turned into [`PluralSpec`], whose forms become
//! `key_zero`, `key_one` and `key_other` siblings.

use std::{collections::BTreeMap, fmt::Display};

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    /// `{N} text` or `[low,high] text` / `[low,*] text`.
    static ref COUNT_SEGMENT_REGEX: Regex =
        Regex::new(r"(?s)^\s*(?:\{\s*(\d+)\s*\}|\[\s*(\d+)\s*,\s*(\d+|\*)\s*\])(.*)$").unwrap();
}

/// Plural selector, in output precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Selector {
    Zero,
    One,
    Other,
}

impl Selector {
    /// Key suffix used by the output format.
    pub fn suffix(self) -> &'static str {
        match self {
            Selector::Zero => "zero",
            Selector::One => "one",
            Selector::Other => "other",
        }
    }

    /// Builds `{parent}_{suffix}`.
    pub fn key_for(self, parent: &str) -> String {
        format!("{}_{}", parent, self.suffix())
    }
}

impl Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.suffix())
    }
}

/// Count range written in front of a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountBoundary {
    pub low: u64,
    /// `None` for an open upper bound (`*`).
    pub high: Option<u64>,
}

impl CountBoundary {
    pub fn exact(count: u64) -> Self {
        Self {
            low: count,
            high: Some(count),
        }
    }

    pub fn at_least(low: u64) -> Self {
        Self { low, high: None }
    }

    /// Maps the boundary onto the three output selectors: exactly zero and
    /// exactly one keep their own form, every other range is "other".
    pub fn selector(&self) -> Selector {
        match (self.low, self.high) {
            (0, Some(0)) => Selector::Zero,
            (1, Some(1)) => Selector::One,
            _ => Selector::Other,
        }
    }
}

impl Display for CountBoundary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.high {
            Some(high) if high == self.low => write!(f, "{{{}}}", self.low),
            Some(high) => write!(f, "[{},{}]", self.low, high),
            None => write!(f, "[{},*]", self.low),
        }
    }
}

/// Why a string could not be read as plural forms.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PluralError {
    #[error("segment {index} has no count marker while others do")]
    MixedSyntax { index: usize },

    #[error("expected 2 pipe-separated forms, found {count}")]
    SegmentCount { count: usize },

    #[error("segments {first} and {second} both map to `{selector}`")]
    DuplicateSelector {
        selector: Selector,
        first: usize,
        second: usize,
    },

    #[error("invalid count range `{boundary}`")]
    InvalidRange { boundary: CountBoundary },
}

/// Plural forms parsed from one string, ordered zero, one, other.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PluralSpec {
    pub forms: BTreeMap<Selector, String>,
}

impl PluralSpec {
    pub fn get(&self, selector: Selector) -> Option<&str> {
        self.forms.get(&selector).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }

    /// Expands into `(suffixed key, text)` pairs for `parent`.
    pub fn into_keyed(self, parent: &str) -> Vec<(String, String)> {
        self.forms
            .into_iter()
            .map(|(selector, text)| (selector.key_for(parent), text))
            .collect()
    }
}

/// Parses `input` as plural forms.
///
/// Returns `Ok(None)` for strings without `|`, which are not plural.
pub fn parse_plural(input: &str) -> Result<Option<PluralSpec>, PluralError> {
    if !input.contains('|') {
        return Ok(None);
    }

    let segments: Vec<&str> = input.split('|').collect();
    let counted: Vec<Option<(CountBoundary, &str)>> =
        segments.iter().map(|segment| parse_count_segment(segment)).collect();

    let mut selected: Vec<(Selector, String)> = Vec::with_capacity(segments.len());
    if counted.iter().any(Option::is_some) {
        for (index, segment) in counted.into_iter().enumerate() {
            let (boundary, text) = segment.ok_or(PluralError::MixedSyntax { index })?;
            if boundary.high.is_some_and(|high| high < boundary.low) {
                return Err(PluralError::InvalidRange { boundary });
            }
            selected.push((boundary.selector(), text.trim().to_string()));
        }
    } else {
        if segments.len() != 2 {
            return Err(PluralError::SegmentCount {
                count: segments.len(),
            });
        }
        selected.push((Selector::One, segments[0].trim().to_string()));
        selected.push((Selector::Other, segments[1].trim().to_string()));
    }

    let mut spec = PluralSpec::default();
    let mut seen: BTreeMap<Selector, usize> = BTreeMap::new();
    for (index, (selector, text)) in selected.into_iter().enumerate() {
        if let Some(&first) = seen.get(&selector) {
            return Err(PluralError::DuplicateSelector {
                selector,
                first,
                second: index,
            });
        }
        seen.insert(selector, index);
        spec.forms.insert(selector, text);
    }

    Ok(Some(spec))
}

/// Splits a leading `{N}` / `[low,high]` marker from a segment.
fn parse_count_segment(segment: &str) -> Option<(CountBoundary, &str)> {
    let caps = COUNT_SEGMENT_REGEX.captures(segment)?;
    let text = caps.get(4).map_or("", |m| m.as_str());

    if let Some(exact) = caps.get(1) {
        let count = exact.as_str().parse().ok()?;
        return Some((CountBoundary::exact(count), text));
    }

    let low = caps.get(2)?.as_str().parse().ok()?;
    let boundary = match caps.get(3)?.as_str() {
        "*" => CountBoundary::at_least(low),
        high => CountBoundary {
            low,
            high: Some(high.parse().ok()?),
        },
    };
    Some((boundary, text))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forms(spec: &PluralSpec) -> Vec<(Selector, &str)> {
        spec.forms.iter().map(|(s, t)| (*s, t.as_str())).collect()
    }

    #[test]
    fn test_no_pipe_is_not_plural() {
        assert_eq!(parse_plural("Hello {0} [2,*] world"), Ok(None));
        assert_eq!(parse_plural(""), Ok(None));
    }

    #[test]
    fn test_counted_segments() {
        let spec = parse_plural(
            "{0} No :resource created.|{1} :Resource created successfully.|[2,*] Many :resource created successfully.",
        )
        .unwrap()
        .unwrap();
        assert_eq!(
            forms(&spec),
            vec![
                (Selector::Zero, "No :resource created."),
                (Selector::One, ":Resource created successfully."),
                (Selector::Other, "Many :resource created successfully."),
            ]
        );
    }

    #[test]
    fn test_counted_segments_are_reordered() {
        let spec = parse_plural("[2,*] many | {0} none | {1} one").unwrap().unwrap();
        assert_eq!(
            forms(&spec),
            vec![
                (Selector::Zero, "none"),
                (Selector::One, "one"),
                (Selector::Other, "many"),
            ]
        );
    }

    #[test]
    fn test_pipe_only_pair() {
        let spec = parse_plural("user|users").unwrap().unwrap();
        assert_eq!(
            forms(&spec),
            vec![(Selector::One, "user"), (Selector::Other, "users")]
        );
        assert_eq!(spec.get(Selector::Zero), None);
    }

    #[test]
    fn test_pipe_only_wrong_segment_count() {
        assert_eq!(
            parse_plural("a|b|c"),
            Err(PluralError::SegmentCount { count: 3 })
        );
    }

    #[test]
    fn test_mixed_syntax_is_rejected() {
        assert_eq!(
            parse_plural("{0} none|apples"),
            Err(PluralError::MixedSyntax { index: 1 })
        );
    }

    #[test]
    fn test_duplicate_selector_is_rejected() {
        assert_eq!(
            parse_plural("{0} none|[1,19] some|[20,*] many"),
            Err(PluralError::DuplicateSelector {
                selector: Selector::Other,
                first: 1,
                second: 2,
            })
        );
    }

    #[test]
    fn test_inverted_range_is_rejected() {
        assert!(matches!(
            parse_plural("[5,2] x|{1} y"),
            Err(PluralError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_bracket_ranges_map_to_selectors() {
        let spec = parse_plural("[0,0] none|[1,1] one|[2,10] some").unwrap().unwrap();
        assert_eq!(spec.len(), 3);
        assert_eq!(spec.get(Selector::Other), Some("some"));
        assert_eq!(CountBoundary::exact(5).selector(), Selector::Other);
        assert_eq!(CountBoundary::at_least(1).selector(), Selector::Other);
    }

    #[test]
    fn test_into_keyed() {
        let spec = parse_plural("apple|apples").unwrap().unwrap();
        assert_eq!(
            spec.into_keyed("apple"),
            vec![
                ("apple_one".to_string(), "apple".to_string()),
                ("apple_other".to_string(), "apples".to_string()),
            ]
        );
    }

    #[test]
    fn test_multiline_segment_text() {
        let spec = parse_plural("{1} one\nline|[2,*] many\nlines").unwrap().unwrap();
        assert_eq!(spec.get(Selector::One), Some("one\nline"));
    }

    #[test]
    fn test_boundary_display() {
        assert_eq!(CountBoundary::exact(1).to_string(), "{1}");
        assert_eq!(CountBoundary::at_least(2).to_string(), "[2,*]");
        assert_eq!(
            CountBoundary {
                low: 2,
                high: Some(9)
            }
            .to_string(),
            "[2,9]"
        );
    }
}
