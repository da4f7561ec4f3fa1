//! Settings resolution: command-line flags, environment, `langport.toml`,
//! then built-in defaults, in that order of precedence.

use std::path::{Path, PathBuf};

use langport::TransformOptions;
use serde::Deserialize;

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "langport.toml";
pub const DEFAULT_SOURCE: &str = "lang";
pub const DEFAULT_OUTPUT: &str = "public/locales";
pub const VERSIONS_FILE_NAME: &str = "versions.json";

/// Contents of a `langport.toml` file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub source: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub versions: Option<PathBuf>,
    pub locales: Vec<String>,
    pub strict: Option<bool>,
    pub transform: TransformSection,
}

/// `[transform]` table; unset keys fall back to the defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TransformSection {
    pub plurals: Option<bool>,
    pub placeholders: Option<bool>,
    pub strip_html: Option<bool>,
}

impl FileConfig {
    pub fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| format!("Invalid config: {}", e))
    }
}

/// Loads the config file named by `explicit`, or `langport.toml` if it
/// exists in the working directory. A missing default file is not an error.
pub fn load_config(explicit: Option<&Path>) -> Result<FileConfig, String> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let default = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !default.is_file() {
                return Ok(FileConfig::default());
            }
            default
        }
    };

    let content = std::fs::read_to_string(&path)
        .map_err(|e| format!("Cannot read config file {}: {}", path.display(), e))?;
    tracing::debug!(path = %path.display(), "loaded config file");
    FileConfig::parse(&content).map_err(|e| format!("{} ({})", e, path.display()))
}

/// Values given on the command line (or through the environment).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    pub source: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub versions: Option<PathBuf>,
    pub locales: Vec<String>,
    pub strict: bool,
    pub no_plurals: bool,
    pub no_placeholders: bool,
    pub no_strip_html: bool,
}

/// Fully resolved settings for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub source: PathBuf,
    pub output: PathBuf,
    pub versions: PathBuf,
    /// Empty means every locale directory found under `source`.
    pub locales: Vec<String>,
    pub strict: bool,
    pub options: TransformOptions,
}

impl Settings {
    pub fn resolve(cli: CliOverrides, file: FileConfig) -> Self {
        let source = cli
            .source
            .or(file.source)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SOURCE));
        let output = cli
            .output
            .or(file.output)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));
        let versions = cli
            .versions
            .or(file.versions)
            .unwrap_or_else(|| output.join(VERSIONS_FILE_NAME));
        let locales = if cli.locales.is_empty() {
            file.locales
        } else {
            cli.locales
        };

        let section = file.transform;
        let options = TransformOptions::new()
            .with_plurals(!cli.no_plurals && section.plurals.unwrap_or(true))
            .with_placeholders(!cli.no_placeholders && section.placeholders.unwrap_or(true))
            .with_strip_html(!cli.no_strip_html && section.strip_html.unwrap_or(true));

        Settings {
            source,
            output,
            versions,
            locales,
            strict: cli.strict || file.strict.unwrap_or(false),
            options,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::resolve(CliOverrides::default(), FileConfig::default());
        assert_eq!(settings.source, PathBuf::from("lang"));
        assert_eq!(settings.output, PathBuf::from("public/locales"));
        assert_eq!(settings.versions, PathBuf::from("public/locales/versions.json"));
        assert!(settings.locales.is_empty());
        assert!(!settings.strict);
        assert_eq!(settings.options, TransformOptions::default());
    }

    #[test]
    fn test_file_config_parse() {
        let config = FileConfig::parse(
            r#"
source = "resources/lang"
output = "dist/locales"
locales = ["en", "fr"]
strict = true

[transform]
strip_html = false
"#,
        )
        .unwrap();
        assert_eq!(config.source, Some(PathBuf::from("resources/lang")));
        assert_eq!(config.locales, vec!["en", "fr"]);
        assert_eq!(config.transform.strip_html, Some(false));
        assert_eq!(config.transform.plurals, None);

        let settings = Settings::resolve(CliOverrides::default(), config);
        assert_eq!(settings.versions, PathBuf::from("dist/locales/versions.json"));
        assert!(settings.strict);
        assert!(!settings.options.strip_html);
        assert!(settings.options.plurals);
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let err = FileConfig::parse("sauce = \"lang\"").unwrap_err();
        assert!(err.contains("Invalid config"));
    }

    #[test]
    fn test_cli_overrides_file() {
        let file = FileConfig {
            source: Some(PathBuf::from("from-file")),
            locales: vec!["de".to_string()],
            ..FileConfig::default()
        };
        let cli = CliOverrides {
            source: Some(PathBuf::from("from-cli")),
            locales: vec!["en".to_string()],
            no_plurals: true,
            ..CliOverrides::default()
        };
        let settings = Settings::resolve(cli, file);
        assert_eq!(settings.source, PathBuf::from("from-cli"));
        assert_eq!(settings.locales, vec!["en"]);
        assert!(!settings.options.plurals);
    }

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let err = load_config(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(err.contains("Cannot read config file"));
    }
}
