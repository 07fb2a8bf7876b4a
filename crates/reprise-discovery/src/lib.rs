//! Suite assembly from indirect sources.
//!
//! This crate turns things a build pipeline already has (a directory tree
//! of compiled test classes, CI console logs, JUnit XML report files, a
//! plain-text manifest) into executable suites, without anyone maintaining
//! a suite file by hand.
//!
//! Three suite-builder entry points:
//! - [`tree::build_package_suites`] mirrors a class-file directory tree into
//!   a hierarchical suite, one node per package, empty branches pruned;
//! - [`failed_tests_suite`] re-assembles the tests that failed in a prior CI
//!   run from console logs ([`config::AssemblyConfig::log_sources`]) and
//!   JUnit XML reports ([`config::AssemblyConfig::report_files`]) into one
//!   flat, deduplicated suite;
//! - [`manifest::manifest_suite`] resolves a hand-authored class list, in
//!   file order, with no deduplication.
//!
//! Every identifier goes through the shared `reprise-core` resolver; a
//! failing source or identifier is logged and skipped, never fatal. Assembly
//! is single-threaded and holds no state across invocations.

pub mod config;
pub mod log;
pub mod manifest;
pub mod report;
pub mod tree;

mod flat;

pub use config::AssemblyConfig;
pub use log::LogScanner;
pub use manifest::manifest_suite;
pub use tree::{build_package_suites, SuiteAnchor};

use std::fs::File;
use std::io::BufReader;

use reprise_core::{TestIndex, TestSuite};
use thiserror::Error;

use crate::flat::FlatAssembler;

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("regex error: {0}")]
    Regex(#[from] regex::Error),
    #[error("xml error: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("xml attribute error: {0}")]
    XmlAttr(#[from] quick_xml::events::attributes::AttrError),
}

pub type Result<T> = std::result::Result<T, DiscoveryError>;

/// Builds the flat suite of tests that failed in a prior CI run.
///
/// Console-log sources are processed first, in their listed order, then the
/// XML report files in theirs; all candidates feed one membership set, so an
/// identifier seen from several sources resolves at most once and keeps the
/// position of its first sighting. A source that cannot be opened, read or
/// parsed is logged and skipped; the rest are still processed.
pub fn failed_tests_suite(config: &AssemblyConfig, index: &TestIndex) -> Result<TestSuite> {
    let mut assembler = FlatAssembler::new(index, "Failed JUnit tests");

    for source in &config.log_sources {
        let mut scanner = LogScanner::new()?;
        let outcome = File::open(source).map_err(DiscoveryError::from).and_then(|file| {
            log::scan_reader(&mut scanner, BufReader::new(file), |id| {
                assembler.add_candidate(&id)
            })
        });
        if let Err(err) = outcome {
            tracing::error!(
                target: "reprise.discovery",
                source = %source,
                error = %err,
                "error getting data from log source"
            );
        }
    }

    for path in &config.report_files {
        if !path.is_file() {
            continue;
        }
        if let Err(err) = report::scan_report_file(path, |id| assembler.add_candidate(&id)) {
            tracing::error!(
                target: "reprise.discovery",
                file = %path.display(),
                error = %err,
                "error getting data from suite file"
            );
        }
    }

    Ok(assembler.into_suite())
}
