//! All error types for the langport crate.
//!
//! These are returned from fallible IO and parsing operations. Per-leaf
//! transform problems are not errors; they are collected as
//! [`crate::walker::LeafIssue`]s next to the converted tree.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{}:{line}: {message}", path.display())]
    Source {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("invalid locale `{0}`")]
    InvalidLocale(String),

    #[error("namespace `{namespace}` of locale `{locale}` is defined by more than one file")]
    DuplicateNamespace { locale: String, namespace: String },

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Creates a source parse error pointing at a line of a file.
    pub fn source_error(path: impl Into<PathBuf>, line: usize, message: impl Into<String>) -> Self {
        Error::Source {
            path: path.into(),
            line,
            message: message.into(),
        }
    }

    /// Wraps an IO error with the path that caused it.
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Read {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_io_error() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = Error::Io(io_error);
        assert!(error.to_string().contains("I/O error"));
    }

    #[test]
    fn test_json_error() {
        let json_error = serde_json::from_str::<serde_json::Value>("{ invalid json }").unwrap_err();
        let error = Error::from(json_error);
        assert!(error.to_string().starts_with("JSON error"));
    }

    #[test]
    fn test_source_error_display() {
        let error = Error::source_error("lang/en/auth.php", 4, "expected `=>`");
        assert_eq!(error.to_string(), "lang/en/auth.php:4: expected `=>`");
    }

    #[test]
    fn test_read_error_keeps_path() {
        let error = Error::read_error(
            "lang/fr/missing.php",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        let display = error.to_string();
        assert!(display.contains("lang/fr/missing.php"));
        assert!(display.contains("denied"));
    }

    #[test]
    fn test_unsupported_format_error() {
        let error = Error::UnsupportedFormat("yaml".to_string());
        assert_eq!(error.to_string(), "unsupported format: yaml");
    }

    #[test]
    fn test_duplicate_namespace_error() {
        let error = Error::DuplicateNamespace {
            locale: "en".to_string(),
            namespace: "auth".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "namespace `auth` of locale `en` is defined by more than one file"
        );
    }

    #[test]
    fn test_invalid_locale_error() {
        let error = Error::InvalidLocale("not a locale".to_string());
        assert_eq!(error.to_string(), "invalid locale `not a locale`");
    }
}
