#![forbid(unsafe_code)]
//! Convert Laravel-style translation trees into i18next JSON.
//!
//! Each namespace file of a locale is loaded into a [`TranslationNode`]
//! tree, every string in it goes through the transform pipeline, and the
//! rebuilt tree is written as JSON. A per-locale content hash is kept in a
//! [`VersionMap`] so clients can invalidate cached bundles.
//!
//! # Quick Start
//!
//! ```rust
//! use langport::{TransformOptions, TranslationNode, walker::walk};
//!
//! let tree: TranslationNode = serde_json::from_str(
//!     r#"{"created": "{0} No :resource created.|{1} :Resource created.|[2,*] Many :resource created."}"#,
//! )?;
//! let outcome = walk(&tree, &TransformOptions::default());
//!
//! assert_eq!(
//!     outcome.tree.get_path("created_one"),
//!     Some(&TranslationNode::leaf("{{resource, capitalize}} created."))
//! );
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Transforms
//!
//! - **Plurals**: `{0} …|{1} …|[2,*] …` and `one|many` become `key_zero`,
//!   `key_one`, `key_other` siblings.
//! - **Placeholders**: `:name`, `:Name`, `:NAME` become `{{name}}`,
//!   `{{name, capitalize}}`, `{{name, uppercase}}`.
//! - **Markup**: attributes are removed from inline tags, `<b class="x">`
//!   becomes `<b>`.

pub mod catalog;
pub mod converter;
pub mod error;
pub mod formats;
pub mod html;
pub mod options;
pub mod pipeline;
pub mod placeholder;
pub mod plural;
pub mod traits;
pub mod types;
pub mod version;
pub mod walker;

// Re-export most used types for easy consumption
pub use crate::{
    converter::{
        LocaleOutcome, LocaleSource, NamespaceOutcome, NamespaceSource, RunOutcome,
        convert_locale, convert_run,
    },
    error::Error,
    formats::FormatType,
    options::TransformOptions,
    plural::{PluralError, PluralSpec, Selector},
    types::{Group, TranslationNode},
    version::{VersionEntry, VersionMap, fingerprint},
    walker::{IssueKind, LeafIssue, WalkOutcome, walk},
};
