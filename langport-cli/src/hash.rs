use langport::{VersionMap, fingerprint};
use serde::Serialize;

use crate::config::Settings;
use crate::convert::{load_locales, select_locales};

/// How a locale's current hash compares to the stored version map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HashStatus {
    New,
    Changed,
    Unchanged,
}

impl std::fmt::Display for HashStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HashStatus::New => write!(f, "new"),
            HashStatus::Changed => write!(f, "changed"),
            HashStatus::Unchanged => write!(f, "unchanged"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocaleHash {
    pub locale: String,
    pub hash: String,
    pub status: HashStatus,
}

#[derive(Debug, Default, Serialize)]
pub struct HashReport {
    pub locales: Vec<LocaleHash>,
    pub failed: Vec<(String, String)>,
}

/// Fingerprints each locale without converting or writing anything.
pub fn run_hash_command(settings: &Settings) -> Result<HashReport, String> {
    let locales = select_locales(settings)?;
    let versions = VersionMap::load(&settings.versions).map_err(|e| {
        format!(
            "Cannot read version map {}: {}",
            settings.versions.display(),
            e
        )
    })?;

    let mut report = HashReport::default();
    for (locale, loaded) in load_locales(settings, &locales) {
        let source = match loaded {
            Ok(source) => source,
            Err(e) => {
                tracing::error!(locale = %locale, "{}", e);
                report.failed.push((locale, e.to_string()));
                continue;
            }
        };

        let files: Vec<(&str, &[u8])> = source
            .namespaces
            .iter()
            .map(|ns| (ns.file_name.as_str(), ns.raw.as_slice()))
            .collect();
        let hash = fingerprint(&files);
        let status = match versions.get(&locale) {
            None => HashStatus::New,
            Some(entry) if entry.hash == hash => HashStatus::Unchanged,
            Some(_) => HashStatus::Changed,
        };
        report.locales.push(LocaleHash {
            locale,
            hash,
            status,
        });
    }
    Ok(report)
}

pub fn print_hash_report(report: &HashReport, json: bool) -> Result<(), String> {
    if json {
        let out = serde_json::to_string_pretty(report)
            .map_err(|e| format!("Failed to serialize report: {}", e))?;
        println!("{}", out);
        return Ok(());
    }

    for entry in &report.locales {
        println!("{:<10} {}  {}", entry.locale, entry.hash, entry.status);
    }
    for (locale, reason) in &report.failed {
        eprintln!("Error: {}: {}", locale, reason);
    }
    Ok(())
}
