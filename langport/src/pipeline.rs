//! The per-string transform pipeline: plurals, then placeholders, then markup.
//!
//! Plural splitting runs first because it changes the key structure; the two
//! textual passes then run on every resulting form.

use crate::{
    html::strip_attributes,
    options::TransformOptions,
    placeholder::rewrite_placeholders,
    plural::{PluralError, parse_plural},
};

/// Transforms one leaf into its output `(key, text)` pairs.
///
/// A plain string yields a single pair under `key`; a plural string yields
/// one pair per form, keyed `key_zero` / `key_one` / `key_other`.
///
/// ```rust
/// use langport::{TransformOptions, pipeline::transform_leaf};
/// let pairs = transform_leaf("user", "user|users", &TransformOptions::default()).unwrap();
/// assert_eq!(pairs[0], ("user_one".to_string(), "user".to_string()));
/// assert_eq!(pairs[1], ("user_other".to_string(), "users".to_string()));
/// ```
pub fn transform_leaf(
    key: &str,
    text: &str,
    options: &TransformOptions,
) -> Result<Vec<(String, String)>, PluralError> {
    let spec = if options.plurals {
        parse_plural(text)?
    } else {
        None
    };

    let pairs = match spec {
        Some(spec) => spec
            .into_keyed(key)
            .into_iter()
            .map(|(key, form)| (key, transform_text(&form, options)))
            .collect(),
        None => vec![(key.to_string(), transform_text(text, options))],
    };
    Ok(pairs)
}

/// Applies only the textual stages (placeholders, markup) to `text`.
pub fn transform_text(text: &str, options: &TransformOptions) -> String {
    let text = if options.placeholders {
        rewrite_placeholders(text)
    } else {
        text.into()
    };

    if options.strip_html {
        strip_attributes(&text)
    } else {
        text.into_owned()
    }
}
