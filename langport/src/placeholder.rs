//! Placeholder rewriting from `:name` markers to `{{name}}` interpolations.
//!
//! The casing of the source marker selects a format directive:
//! - `:name`  -> `{{name}}`
//! - `:Name`  -> `{{name, capitalize}}`
//! - `:NAME`  -> `{{name, uppercase}}`

use std::borrow::Cow;

use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    static ref PLACEHOLDER_REGEX: Regex = Regex::new(r":([A-Za-z_][A-Za-z0-9_]*)").unwrap();
}

/// Casing class of a placeholder identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Casing {
    /// Lowercase or mixed case; emitted as written.
    Plain,
    /// First letter uppercase, remaining letters lowercase.
    Capitalized,
    /// Every letter uppercase.
    Upper,
}

impl Casing {
    /// Format directive appended after the identifier, if any.
    pub fn format(self) -> Option<&'static str> {
        match self {
            Casing::Plain => None,
            Casing::Capitalized => Some("capitalize"),
            Casing::Upper => Some("uppercase"),
        }
    }

    /// Renders the interpolation directive for `identifier`.
    pub fn directive(self, identifier: &str) -> String {
        match self.format() {
            Some(format) => format!("{{{{{}, {}}}}}", identifier.to_lowercase(), format),
            None => format!("{{{{{}}}}}", identifier),
        }
    }
}

/// Classifies an identifier by the casing of its letters.
///
/// An identifier whose letters are all uppercase is [`Casing::Upper`], even
/// when it is a single letter. Anything that is neither all-uppercase nor
/// "first letter up, rest down" is [`Casing::Plain`].
pub fn classify(identifier: &str) -> Casing {
    let mut letters = identifier.chars().filter(|c| c.is_alphabetic());
    let Some(first_letter) = letters.next() else {
        return Casing::Plain;
    };

    if identifier.chars().filter(|c| c.is_alphabetic()).all(char::is_uppercase) {
        return Casing::Upper;
    }

    let starts_with_letter = identifier.chars().next() == Some(first_letter);
    if starts_with_letter && first_letter.is_uppercase() && letters.all(char::is_lowercase) {
        return Casing::Capitalized;
    }

    Casing::Plain
}

/// Rewrites every `:identifier` in `input` into an interpolation directive.
///
/// Single pass: generated `{{...}}` text is never scanned again.
pub fn rewrite_placeholders(input: &str) -> Cow<'_, str> {
    PLACEHOLDER_REGEX.replace_all(input, |caps: &Captures| {
        let identifier = &caps[1];
        classify(identifier).directive(identifier)
    })
}
