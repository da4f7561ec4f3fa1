use chrono::Utc;
use langport::{
    IssueKind, LocaleOutcome, LocaleSource, VersionMap,
    catalog::{discover_locales, is_locale_code, load_locale, write_locale},
    convert_locale,
};
use rayon::prelude::*;

use crate::config::Settings;

/// What a convert run did, for the final report and the exit code.
#[derive(Debug, Default)]
pub struct ConvertSummary {
    /// Locales that were converted (and written unless dry-run).
    pub converted: Vec<String>,
    /// Locales whose version entry changed in this run.
    pub updated: Vec<String>,
    /// Locales that could not be read, parsed or written, with the reason.
    pub failed: Vec<(String, String)>,
    pub files_written: usize,
    pub issues: usize,
}

impl ConvertSummary {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Locales named in the settings, or every locale directory under the source.
pub fn select_locales(settings: &Settings) -> Result<Vec<String>, String> {
    if settings.locales.is_empty() {
        return discover_locales(&settings.source).map_err(|e| {
            format!(
                "Cannot list locales in {}: {}",
                settings.source.display(),
                e
            )
        });
    }

    let mut locales = Vec::with_capacity(settings.locales.len());
    for locale in &settings.locales {
        if !is_locale_code(locale) {
            return Err(format!("Invalid locale code: {}", locale));
        }
        if !locales.contains(locale) {
            locales.push(locale.clone());
        }
    }
    Ok(locales)
}

/// Loads each locale in parallel; one failing locale does not stop the others.
pub fn load_locales(
    settings: &Settings,
    locales: &[String],
) -> Vec<(String, Result<LocaleSource, langport::Error>)> {
    locales
        .par_iter()
        .map(|locale| (locale.clone(), load_locale(&settings.source, locale)))
        .collect()
}

fn malformed_count(outcome: &LocaleOutcome) -> usize {
    outcome
        .issues()
        .filter(|(_, issue)| matches!(issue.kind, IssueKind::MalformedPluralSyntax { .. }))
        .count()
}

/// Converts the configured locales and writes their namespaces and the
/// version map.
///
/// Returns `Err` only when nothing could be attempted (bad settings,
/// unreadable version map) or when `strict` rejects malformed plurals; in
/// that case nothing is written. Per-locale failures end up in
/// [`ConvertSummary::failed`].
pub fn run_convert_command(settings: &Settings, dry_run: bool) -> Result<ConvertSummary, String> {
    let locales = select_locales(settings)?;
    if locales.is_empty() {
        tracing::warn!(source = %settings.source.display(), "no locale directories found");
    }

    let mut versions = VersionMap::load(&settings.versions).map_err(|e| {
        format!(
            "Cannot read version map {}: {}",
            settings.versions.display(),
            e
        )
    })?;

    let mut summary = ConvertSummary::default();
    let mut outcomes = Vec::with_capacity(locales.len());

    let options = settings.options;
    let converted: Vec<_> = load_locales(settings, &locales)
        .into_par_iter()
        .map(|(locale, loaded)| (locale, loaded.map(|source| convert_locale(&source, &options))))
        .collect();

    for (locale, result) in converted {
        match result {
            Ok(outcome) => {
                for (namespace, issue) in outcome.issues() {
                    tracing::warn!(locale = %locale, namespace = %namespace, "{}", issue);
                }
                summary.issues += outcome.issue_count();
                outcomes.push(outcome);
            }
            Err(e) => {
                tracing::error!(locale = %locale, "{}", e);
                summary.failed.push((locale, e.to_string()));
            }
        }
    }

    if settings.strict {
        let malformed: usize = outcomes.iter().map(malformed_count).sum();
        if malformed > 0 {
            return Err(format!(
                "Strict mode: {} malformed plural string(s) found, nothing written",
                malformed
            ));
        }
    }

    let now = Utc::now();
    for outcome in &outcomes {
        if dry_run {
            tracing::info!(
                locale = %outcome.locale,
                namespaces = outcome.namespaces.len(),
                "dry run, not writing"
            );
        } else {
            match write_locale(&settings.output, outcome) {
                Ok(written) => {
                    for path in &written {
                        tracing::debug!(file = %path.display(), "wrote namespace");
                    }
                    summary.files_written += written.len();
                }
                Err(e) => {
                    tracing::error!(locale = %outcome.locale, "{}", e);
                    summary.failed.push((outcome.locale.clone(), e.to_string()));
                    continue;
                }
            }
        }

        if versions.record(&outcome.locale, &outcome.hash, now) {
            summary.updated.push(outcome.locale.clone());
        }
        summary.converted.push(outcome.locale.clone());
    }

    if !dry_run {
        versions.save(&settings.versions).map_err(|e| {
            format!(
                "Cannot write version map {}: {}",
                settings.versions.display(),
                e
            )
        })?;
    }

    Ok(summary)
}

pub fn print_summary(summary: &ConvertSummary, dry_run: bool) {
    let verb = if dry_run { "Checked" } else { "Converted" };
    println!(
        "{} {} locale(s), {} file(s) written, {} issue(s)",
        verb,
        summary.converted.len(),
        summary.files_written,
        summary.issues
    );
    if !summary.updated.is_empty() {
        println!("Updated versions: {}", summary.updated.join(", "));
    }
    for (locale, reason) in &summary.failed {
        eprintln!("Error: {}: {}", locale, reason);
    }
}
