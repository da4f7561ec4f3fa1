//! Reading a `lang/` directory tree and writing converted namespaces.
//!
//! Layout: `<root>/<locale>/<namespace>.php` (or `.json`), with nested
//! directories giving namespaces such as `admin/users`. The top-level
//! `vendor` directory holds package overrides and is not a locale.

use std::{
    fs,
    path::{Path, PathBuf},
};

use unic_langid::LanguageIdentifier;

use crate::{
    converter::{LocaleOutcome, LocaleSource, NamespaceSource},
    error::Error,
    formats::{FormatType, decode_source},
    traits::Parser,
};

const VENDOR_DIR: &str = "vendor";

/// Whether a directory name looks like a locale code (`en`, `pt_BR`, `zh-Hant`).
pub fn is_locale_code(name: &str) -> bool {
    if name.is_empty() || name == VENDOR_DIR || name.starts_with('.') {
        return false;
    }
    name.replace('_', "-").parse::<LanguageIdentifier>().is_ok()
}

/// Lists locale directories directly under `root`, sorted by name.
pub fn discover_locales<P: AsRef<Path>>(root: P) -> Result<Vec<String>, Error> {
    let root = root.as_ref();
    let mut locales = Vec::new();
    for entry in fs::read_dir(root).map_err(|e| Error::read_error(root, e))? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            continue;
        };
        if is_locale_code(&name) {
            locales.push(name);
        } else {
            tracing::debug!(directory = %name, "skipping non-locale directory");
        }
    }
    locales.sort();
    Ok(locales)
}

/// Loads every namespace file of `locale` under `root`.
///
/// Files keep their raw bytes for fingerprinting. Namespaces are returned
/// sorted by file name.
pub fn load_locale<P: AsRef<Path>>(root: P, locale: &str) -> Result<LocaleSource, Error> {
    if !is_locale_code(locale) {
        return Err(Error::InvalidLocale(locale.to_string()));
    }
    let locale_dir = root.as_ref().join(locale);
    let mut files = Vec::new();
    collect_source_files(&locale_dir, &locale_dir, &mut files)?;
    files.sort_by(|a, b| a.0.cmp(&b.0));

    let mut namespaces: Vec<NamespaceSource> = Vec::with_capacity(files.len());
    for (file_name, path, format) in files {
        let namespace = namespace_name(&file_name);
        if namespaces.iter().any(|ns| ns.namespace == namespace) {
            return Err(Error::DuplicateNamespace {
                locale: locale.to_string(),
                namespace,
            });
        }

        let raw = fs::read(&path).map_err(|e| Error::read_error(&path, e))?;
        let tree = format.parse(&path, &decode_source(&raw))?;
        tracing::debug!(locale, namespace = %namespace, file = %path.display(), "loaded namespace");

        namespaces.push(NamespaceSource {
            namespace,
            file_name,
            raw,
            tree,
        });
    }

    Ok(LocaleSource {
        locale: locale.to_string(),
        namespaces,
    })
}

/// Writes each converted namespace to `<out>/<locale>/<namespace>.json`.
pub fn write_locale<P: AsRef<Path>>(out: P, outcome: &LocaleOutcome) -> Result<Vec<PathBuf>, Error> {
    let locale_dir = out.as_ref().join(&outcome.locale);
    let mut written = Vec::with_capacity(outcome.namespaces.len());
    for ns in &outcome.namespaces {
        let path = locale_dir.join(format!("{}.json", ns.namespace));
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        ns.tree.write_to(&path)?;
        written.push(path);
    }
    Ok(written)
}

/// Collects `(relative name, path, format)` for all source files below `dir`.
fn collect_source_files(
    base: &Path,
    dir: &Path,
    out: &mut Vec<(String, PathBuf, FormatType)>,
) -> Result<(), Error> {
    for entry in fs::read_dir(dir).map_err(|e| Error::read_error(dir, e))? {
        let entry = entry?;
        let path = entry.path();
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        if entry.file_type()?.is_dir() {
            collect_source_files(base, &path, out)?;
            continue;
        }
        let Some(format) = FormatType::from_path(&path) else {
            continue;
        };
        let relative = path
            .strip_prefix(base)
            .unwrap_or(&path)
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join("/");
        out.push((relative, path, format));
    }
    Ok(())
}

/// `admin/users.php` -> `admin/users`.
fn namespace_name(file_name: &str) -> String {
    match file_name.rsplit_once('.') {
        Some((stem, _)) => stem.to_string(),
        None => file_name.to_string(),
    }
}
