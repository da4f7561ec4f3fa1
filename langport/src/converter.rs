//! Locale-level conversion on already-loaded namespaces.
//!
//! Nothing here touches the disk: callers hand in namespace trees with their
//! raw source bytes and get back transformed trees plus the locale
//! fingerprint. [`convert_run`] folds a whole run into a [`VersionMap`].

use chrono::{DateTime, Utc};

use crate::{
    options::TransformOptions,
    types::TranslationNode,
    version::{VersionMap, fingerprint},
    walker::{LeafIssue, walk},
};

/// One loaded namespace file of a locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceSource {
    /// Namespace name, e.g. `auth` or `admin/users`.
    pub namespace: String,
    /// File name relative to the locale directory; decides hash order.
    pub file_name: String,
    /// Raw file content as read from storage.
    pub raw: Vec<u8>,
    pub tree: TranslationNode,
}

/// All namespaces of one locale.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LocaleSource {
    pub locale: String,
    pub namespaces: Vec<NamespaceSource>,
}

/// A transformed namespace and the issues found in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceOutcome {
    pub namespace: String,
    pub tree: TranslationNode,
    pub issues: Vec<LeafIssue>,
}

/// Result of converting one locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleOutcome {
    pub locale: String,
    pub namespaces: Vec<NamespaceOutcome>,
    /// Fingerprint of the locale's raw source files.
    pub hash: String,
}

impl LocaleOutcome {
    pub fn issues(&self) -> impl Iterator<Item = (&str, &LeafIssue)> {
        self.namespaces
            .iter()
            .flat_map(|ns| ns.issues.iter().map(move |issue| (ns.namespace.as_str(), issue)))
    }

    pub fn issue_count(&self) -> usize {
        self.namespaces.iter().map(|ns| ns.issues.len()).sum()
    }
}

/// Result of a full run over several locales.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub locales: Vec<LocaleOutcome>,
    pub versions: VersionMap,
}

/// Converts every namespace of a locale and computes its fingerprint.
pub fn convert_locale(source: &LocaleSource, options: &TransformOptions) -> LocaleOutcome {
    let namespaces = source
        .namespaces
        .iter()
        .map(|ns| {
            let outcome = walk(&ns.tree, options);
            for issue in &outcome.issues {
                tracing::debug!(locale = %source.locale, namespace = %ns.namespace, "{}", issue);
            }
            NamespaceOutcome {
                namespace: ns.namespace.clone(),
                tree: outcome.tree,
                issues: outcome.issues,
            }
        })
        .collect();

    let files: Vec<(&str, &[u8])> = source
        .namespaces
        .iter()
        .map(|ns| (ns.file_name.as_str(), ns.raw.as_slice()))
        .collect();

    LocaleOutcome {
        locale: source.locale.clone(),
        namespaces,
        hash: fingerprint(&files),
    }
}

/// Converts all locales and returns them with the updated version map.
///
/// Locales absent from `sources` keep their entries in `previous`.
pub fn convert_run(
    sources: &[LocaleSource],
    previous: VersionMap,
    options: &TransformOptions,
    now: DateTime<Utc>,
) -> RunOutcome {
    let mut versions = previous;
    let locales = sources
        .iter()
        .map(|source| {
            let outcome = convert_locale(source, options);
            if versions.record(&outcome.locale, &outcome.hash, now) {
                tracing::debug!(locale = %outcome.locale, hash = %outcome.hash, "version updated");
            }
            outcome
        })
        .collect();

    RunOutcome { locales, versions }
}
