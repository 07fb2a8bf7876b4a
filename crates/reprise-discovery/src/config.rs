use std::env;
use std::path::PathBuf;

/// Manifest file path for [`crate::manifest::manifest_suite`].
pub const MANIFEST_ENV_VAR: &str = "REPRISE_CUSTOM_TESTS";
/// Comma-separated console-log source locations.
pub const LOG_SOURCES_ENV_VAR: &str = "REPRISE_ERROR_LOG_URL";
/// Comma-separated XML report file paths.
pub const REPORT_FILES_ENV_VAR: &str = "REPRISE_ERROR_SUITE_FILES";

pub const DEFAULT_MANIFEST_FILE: &str = "customtests";

/// Inputs for one assembly invocation, read from the process environment by
/// the enclosing pipeline (or constructed directly by embedding callers).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssemblyConfig {
    pub manifest: Option<PathBuf>,
    pub log_sources: Vec<String>,
    pub report_files: Vec<PathBuf>,
}

impl AssemblyConfig {
    pub fn from_env() -> Self {
        let manifest = env::var_os(MANIFEST_ENV_VAR)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);
        let log_sources = env::var(LOG_SOURCES_ENV_VAR)
            .map(|value| split_list(&value))
            .unwrap_or_default();
        let report_files = env::var(REPORT_FILES_ENV_VAR)
            .map(|value| split_list(&value).into_iter().map(PathBuf::from).collect())
            .unwrap_or_default();

        Self {
            manifest,
            log_sources,
            report_files,
        }
    }

    /// The configured manifest location, or `customtests` in the current
    /// working directory.
    pub fn manifest_path(&self) -> PathBuf {
        self.manifest
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MANIFEST_FILE))
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}
