//! Per-locale content fingerprints used by clients to invalidate cached
//! translation bundles.
//!
//! The hash depends on source bytes only. File names decide the
//! concatenation order, never the order files were discovered in, so the
//! same tree hashes identically on every machine.

use std::{
    collections::BTreeMap,
    fs,
    io::{BufRead, Write},
    path::Path,
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::{error::Error, traits::Parser};

/// Computes the fingerprint of one locale from `(file name, raw bytes)` pairs.
///
/// Files are sorted by name, their bytes concatenated and hashed with
/// SHA-256; the result is lowercase hex.
pub fn fingerprint<N, B>(files: &[(N, B)]) -> String
where
    N: AsRef<str>,
    B: AsRef<[u8]>,
{
    let mut ordered: Vec<&(N, B)> = files.iter().collect();
    ordered.sort_by(|a, b| a.0.as_ref().cmp(b.0.as_ref()));

    let mut hasher = Sha256::new();
    for (_, content) in ordered {
        hasher.update(content.as_ref());
    }
    hex::encode(hasher.finalize())
}

/// Version information for one locale.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct VersionEntry {
    pub hash: String,
    pub last_updated: DateTime<Utc>,
}

impl VersionEntry {
    pub fn new(hash: impl Into<String>, last_updated: DateTime<Utc>) -> Self {
        Self {
            hash: hash.into(),
            last_updated,
        }
    }
}

/// Locale code → [`VersionEntry`], persisted as one JSON object.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct VersionMap {
    entries: BTreeMap<String, VersionEntry>,
}

impl VersionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, locale: &str) -> Option<&VersionEntry> {
        self.entries.get(locale)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &VersionEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Records the hash computed for `locale` in this run, stamped `now`.
    ///
    /// The entry is always overwritten. Returns `true` when the hash is new
    /// or differs from the previous one.
    pub fn record(&mut self, locale: &str, hash: &str, now: DateTime<Utc>) -> bool {
        self.entries
            .insert(locale.to_string(), VersionEntry::new(hash, now))
            .is_none_or(|previous| previous.hash != hash)
    }

    /// Merges entries from `other`; entries in `other` win.
    pub fn merge(&mut self, other: VersionMap) {
        self.entries.extend(other.entries);
    }

    /// Loads a version map, treating a missing file as an empty map.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::new());
        }
        Self::read_from(path)
    }

    /// Writes the map through a temporary sibling file and renames it into
    /// place, so readers never observe a half-written file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let tmp = path.with_extension("json.tmp");
        self.write_to(&tmp)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }
}

impl Parser for VersionMap {
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        Ok(serde_json::from_reader(reader)?)
    }

    fn to_writer<W: Write>(&self, mut writer: W) -> Result<(), Error> {
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn test_fingerprint_ignores_discovery_order() {
        let a = [("auth.php", "a"), ("validation.php", "v"), ("pagination.php", "p")];
        let b = [("validation.php", "v"), ("pagination.php", "p"), ("auth.php", "a")];
        assert_eq!(fingerprint(&a), fingerprint(&b));
    }

    #[test]
    fn test_fingerprint_changes_with_content() {
        let a = [("auth.php", "return ['x' => 'y'];")];
        let b = [("auth.php", "return ['x' => 'z'];")];
        assert_ne!(fingerprint(&a), fingerprint(&b));
    }

    #[test]
    fn test_fingerprint_is_sha256_of_sorted_concatenation() {
        let files = [("b.php", "world"), ("a.php", "hello ")];
        assert_eq!(
            fingerprint(&files),
            hex::encode(Sha256::digest(b"hello world"))
        );
    }

    #[test]
    fn test_fingerprint_of_nothing() {
        let files: [(&str, &[u8]); 0] = [];
        assert_eq!(
            fingerprint(&files),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_record_overwrites_entry_and_reports_hash_change() {
        let mut map = VersionMap::new();
        assert!(map.record("en", "abc", at(10)));
        assert!(!map.record("en", "abc", at(20)));
        assert_eq!(map.get("en"), Some(&VersionEntry::new("abc", at(20))));

        assert!(map.record("en", "def", at(30)));
        assert_eq!(map.get("en"), Some(&VersionEntry::new("def", at(30))));
    }

    #[test]
    fn test_merge_prefers_incoming_entries() {
        let mut base = VersionMap::new();
        base.record("en", "1", at(1));
        base.record("fr", "2", at(1));

        let mut incoming = VersionMap::new();
        incoming.record("fr", "3", at(2));
        base.merge(incoming);

        assert_eq!(base.get("en").unwrap().hash, "1");
        assert_eq!(base.get("fr").unwrap().hash, "3");
    }

    #[test]
    fn test_serialized_shape() {
        let mut map = VersionMap::new();
        map.record("en", "abc", at(0));
        let json = serde_json::to_value(&map).unwrap();
        assert_eq!(json["en"]["hash"], "abc");
        assert_eq!(json["en"]["last_updated"], "1970-01-01T00:00:00Z");
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("versions.json");

        assert!(VersionMap::load(&path).unwrap().is_empty());

        let mut map = VersionMap::new();
        map.record("en", "abc", at(5));
        map.record("pt_BR", "def", at(6));
        map.save(&path).unwrap();

        assert_eq!(VersionMap::load(&path).unwrap(), map);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_load_rejects_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("versions.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(VersionMap::load(&path), Err(Error::Json(_))));
    }
}
