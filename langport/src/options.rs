//! Options controlling which transforms run on translation strings.

use serde::{Deserialize, Serialize};

/// Per-stage switches for [`crate::pipeline::transform_leaf`].
///
/// All stages are enabled by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TransformOptions {
    /// Split `a|b` and `{0} …|{1} …|[2,*] …` strings into suffixed keys.
    pub plurals: bool,
    /// Rewrite `:name` markers into `{{name}}` interpolations.
    pub placeholders: bool,
    /// Drop attributes from inline tags.
    pub strip_html: bool,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            plurals: true,
            placeholders: true,
            strip_html: true,
        }
    }
}

impl TransformOptions {
    /// Creates default options (every stage on).
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables/disables plural key expansion.
    pub fn with_plurals(mut self, plurals: bool) -> Self {
        self.plurals = plurals;
        self
    }

    /// Enables/disables placeholder rewriting.
    pub fn with_placeholders(mut self, placeholders: bool) -> Self {
        self.placeholders = placeholders;
        self
    }

    /// Enables/disables tag attribute stripping.
    pub fn with_strip_html(mut self, strip_html: bool) -> Self {
        self.strip_html = strip_html;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_enable_everything() {
        let options = TransformOptions::new();
        assert!(options.plurals && options.placeholders && options.strip_html);
    }

    #[test]
    fn test_builder_setters() {
        let options = TransformOptions::new()
            .with_plurals(false)
            .with_strip_html(false);
        assert!(!options.plurals);
        assert!(options.placeholders);
        assert!(!options.strip_html);
    }

    #[test]
    fn test_partial_deserialize_keeps_defaults() {
        let options: TransformOptions = serde_json::from_str(r#"{"strip_html": false}"#).unwrap();
        assert_eq!(options, TransformOptions::new().with_strip_html(false));
    }
}
