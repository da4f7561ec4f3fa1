//! Source file formats understood by langport.
//!
//! This module re-exports the readers for each format and provides the
//! [`FormatType`] enum used to dispatch on file extensions.

pub mod json;
pub mod php;

use std::{
    borrow::Cow,
    fmt::{Display, Formatter},
    path::Path,
    str::FromStr,
};

pub use php::PhpError;

use crate::{Error, types::TranslationNode};

/// Represents all supported namespace source formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatType {
    /// PHP file returning an array (`return [...];`).
    Php,
    /// JSON object file.
    Json,
}

/// Implements [`std::fmt::Display`] for [`FormatType`].
///
/// ```rust
/// use langport::formats::FormatType;
/// assert_eq!(FormatType::Php.to_string(), "php");
/// assert_eq!(FormatType::Json.to_string(), "json");
/// ```
impl Display for FormatType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Accepts `php` and `json`, case-insensitively.
///
/// Returns [`crate::error::Error::UnsupportedFormat`] for anything else.
impl FromStr for FormatType {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        match s.as_str() {
            "php" => Ok(FormatType::Php),
            "json" => Ok(FormatType::Json),
            other => Err(Error::UnsupportedFormat(other.to_string())),
        }
    }
}

impl FormatType {
    /// Returns the file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            FormatType::Php => "php",
            FormatType::Json => "json",
        }
    }

    /// Infers the format from a file extension; `None` for other files.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        let extension = path.as_ref().extension()?.to_str()?;
        extension.parse().ok()
    }

    /// Parses decoded source text into a tree. `path` is only used for error
    /// messages.
    pub fn parse(&self, path: &Path, text: &str) -> Result<TranslationNode, Error> {
        match self {
            FormatType::Php => {
                php::parse(text).map_err(|e| Error::source_error(path, e.line, e.message))
            }
            FormatType::Json => json::parse(text).map_err(|e| {
                Error::source_error(path, e.line(), e.to_string())
            }),
        }
    }
}

/// Decodes raw source bytes as UTF-8, dropping a byte order mark and
/// replacing invalid sequences.
pub fn decode_source(raw: &[u8]) -> Cow<'_, str> {
    let (text, had_errors) = encoding_rs::UTF_8.decode_with_bom_removal(raw);
    if had_errors {
        tracing::warn!("source contains invalid UTF-8; invalid bytes were replaced");
    }
    text
}
