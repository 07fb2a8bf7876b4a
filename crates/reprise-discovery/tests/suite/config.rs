use std::path::PathBuf;

use pretty_assertions::assert_eq;
use reprise_discovery::config::{
    AssemblyConfig, LOG_SOURCES_ENV_VAR, MANIFEST_ENV_VAR, REPORT_FILES_ENV_VAR,
};

use crate::support::EnvGuard;

#[test]
fn reads_all_inputs_from_the_environment() {
    let _env = EnvGuard::set(&[
        (MANIFEST_ENV_VAR, Some("/srv/ci/mytests")),
        (LOG_SOURCES_ENV_VAR, Some("/srv/ci/a.log,,/srv/ci/b.log")),
        (REPORT_FILES_ENV_VAR, Some("r1.xml,r2.xml,")),
    ]);

    let config = AssemblyConfig::from_env();
    assert_eq!(config.manifest, Some(PathBuf::from("/srv/ci/mytests")));
    assert_eq!(
        config.log_sources,
        vec!["/srv/ci/a.log".to_string(), "/srv/ci/b.log".to_string()]
    );
    assert_eq!(
        config.report_files,
        vec![PathBuf::from("r1.xml"), PathBuf::from("r2.xml")]
    );
}

#[test]
fn unset_environment_yields_the_default_config() {
    let _env = EnvGuard::set(&[
        (MANIFEST_ENV_VAR, None),
        (LOG_SOURCES_ENV_VAR, None),
        (REPORT_FILES_ENV_VAR, None),
    ]);

    let config = AssemblyConfig::from_env();
    assert_eq!(config, AssemblyConfig::default());
    assert_eq!(config.manifest_path(), PathBuf::from("customtests"));
}

#[test]
fn empty_manifest_variable_counts_as_unset() {
    let _env = EnvGuard::set(&[
        (MANIFEST_ENV_VAR, Some("")),
        (LOG_SOURCES_ENV_VAR, None),
        (REPORT_FILES_ENV_VAR, None),
    ]);

    let config = AssemblyConfig::from_env();
    assert_eq!(config.manifest, None);
}
