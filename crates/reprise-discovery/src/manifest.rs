use std::fs;

use reprise_core::{TestIndex, TestSuite};

use crate::config::AssemblyConfig;
use crate::flat::{reject_foreign_runner, resolve_into};

/// Builds the "Custom JUnit tests" suite from the manifest file: one
/// identifier per line, Latin-1 encoded, resolved in file order with no
/// deduplication (a manifest is authored, not machine-aggregated).
///
/// Absence of the file is not an error and yields an empty suite. Any line
/// that is not a loadable identifier (comments, blanks) fails resolution
/// harmlessly and is logged and dropped.
pub fn manifest_suite(config: &AssemblyConfig, index: &TestIndex) -> TestSuite {
    let mut suite = TestSuite::new("Custom JUnit tests");
    let path = config.manifest_path();
    if !path.is_file() {
        return suite;
    }

    match fs::read(&path) {
        Ok(bytes) => {
            let text = decode_latin1(&bytes);
            for line in text.lines() {
                if reject_foreign_runner(line) {
                    continue;
                }
                resolve_into(index, &mut suite, line);
            }
        }
        Err(err) => tracing::error!(
            target: "reprise.discovery",
            path = %path.display(),
            error = %err,
            "error getting tests from manifest"
        ),
    }

    suite
}

/// The manifest charset is a fixed single-byte encoding; every byte maps
/// 1:1 to the Unicode code point of the same value.
fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}
