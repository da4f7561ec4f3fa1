//! CLI library for testing purposes

pub mod config;
pub mod convert;
pub mod hash;
pub mod logging;

pub use config::{CliOverrides, FileConfig, Settings, load_config};
pub use convert::{ConvertSummary, run_convert_command};
pub use hash::{HashReport, HashStatus, run_hash_command};
