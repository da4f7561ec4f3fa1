use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use langport_cli::{
    CliOverrides, Settings, convert::print_summary, hash::print_hash_report, load_config, logging,
    run_convert_command, run_hash_command,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Increase log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Config file (defaults to ./langport.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    commands: Commands,
}

/// Where to read from and which locales to process.
#[derive(clap::Args, Debug)]
struct SourceArgs {
    /// Directory holding one sub-directory per locale
    #[arg(short, long, env = "LANGPORT_SOURCE")]
    source: Option<PathBuf>,

    /// Version map file (defaults to <output>/versions.json)
    #[arg(long, env = "LANGPORT_VERSIONS")]
    versions: Option<PathBuf>,

    /// Only process these locales (repeatable or comma separated)
    #[arg(short, long = "locale", value_delimiter = ',')]
    locales: Vec<String>,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert a lang/ directory into i18next JSON namespaces.
    Convert {
        #[command(flatten)]
        source: SourceArgs,

        /// Directory that receives <locale>/<namespace>.json
        #[arg(short, long, env = "LANGPORT_OUTPUT")]
        output: Option<PathBuf>,

        /// Keep `a|b` strings as they are
        #[arg(long)]
        no_plurals: bool,

        /// Keep `:name` placeholders as they are
        #[arg(long)]
        no_placeholders: bool,

        /// Keep attributes on HTML tags
        #[arg(long)]
        no_strip_html: bool,

        /// Fail without writing anything when a plural string is malformed
        #[arg(long)]
        strict: bool,

        /// Convert and report, but write no files
        #[arg(long)]
        dry_run: bool,
    },

    /// Print each locale's content hash and compare it with the version map.
    Hash {
        #[command(flatten)]
        source: SourceArgs,

        /// Output directory, used to locate the default version map
        #[arg(short, long, env = "LANGPORT_OUTPUT")]
        output: Option<PathBuf>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.verbose, args.quiet);

    let file_config = match load_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match args.commands {
        Commands::Convert {
            source,
            output,
            no_plurals,
            no_placeholders,
            no_strip_html,
            strict,
            dry_run,
        } => {
            let overrides = CliOverrides {
                source: source.source,
                output,
                versions: source.versions,
                locales: source.locales,
                strict,
                no_plurals,
                no_placeholders,
                no_strip_html,
            };
            let settings = Settings::resolve(overrides, file_config);
            tracing::debug!(?settings, "resolved settings");

            match run_convert_command(&settings, dry_run) {
                Ok(summary) => {
                    print_summary(&summary, dry_run);
                    if summary.is_success() {
                        ExitCode::SUCCESS
                    } else {
                        ExitCode::FAILURE
                    }
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                    ExitCode::FAILURE
                }
            }
        }
        Commands::Hash {
            source,
            output,
            json,
        } => {
            let overrides = CliOverrides {
                source: source.source,
                output,
                versions: source.versions,
                locales: source.locales,
                ..CliOverrides::default()
            };
            let settings = Settings::resolve(overrides, file_config);

            let report = match run_hash_command(&settings) {
                Ok(report) => report,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    return ExitCode::FAILURE;
                }
            };
            if let Err(e) = print_hash_report(&report, json) {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
            if report.failed.is_empty() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
    }
}
