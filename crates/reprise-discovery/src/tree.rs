use std::fs;
use std::path::{Path, PathBuf};

use reprise_core::{ResolveError, TestIndex, TestSuite};

/// Suite name used when the anchor class lives in the unnamed package.
pub const DEFAULT_PACKAGE_LABEL: &str = "[default package]";

const CLASS_EXTENSION: &str = ".class";

/// Starting location for package-tree discovery: a class used only to
/// locate its class-file directory within a classes root.
#[derive(Debug, Clone)]
pub struct SuiteAnchor {
    classes_root: PathBuf,
    class_name: String,
}

impl SuiteAnchor {
    pub fn new(classes_root: impl Into<PathBuf>, class_name: impl Into<String>) -> Self {
        Self {
            classes_root: classes_root.into(),
            class_name: class_name.into(),
        }
    }

    /// Package portion of the anchor class name; empty for the default
    /// package.
    fn package(&self) -> &str {
        self.class_name
            .rsplit_once('.')
            .map(|(package, _)| package)
            .unwrap_or("")
    }

    fn base_dir(&self) -> PathBuf {
        let mut dir = self.classes_root.clone();
        for segment in self.package().split('.').filter(|s| !s.is_empty()) {
            dir.push(segment);
        }
        dir
    }
}

/// Filename filter for candidate entries: a compiled class whose name ends
/// with the case-sensitive suffix `Test`, or a directory (directories are
/// always traversed so nested packages stay reachable).
///
/// Constructed once per build and passed down the recursion.
#[derive(Debug, Clone)]
pub struct ClassFileFilter {
    suffix: String,
}

impl Default for ClassFileFilter {
    fn default() -> Self {
        Self::new("Test")
    }
}

impl ClassFileFilter {
    pub fn new(stem_suffix: &str) -> Self {
        Self {
            suffix: format!("{stem_suffix}{CLASS_EXTENSION}"),
        }
    }

    fn accept(&self, path: &Path) -> bool {
        if path.is_dir() {
            return true;
        }
        path.file_name()
            .map(|name| name.to_string_lossy().ends_with(&self.suffix))
            .unwrap_or(false)
    }
}

/// Builds one package-mirroring suite per anchor under `root_suite`.
pub fn build_package_suites(anchors: &[SuiteAnchor], index: &TestIndex, root_suite: &mut TestSuite) {
    let filter = ClassFileFilter::default();
    for anchor in anchors {
        build_package_suite(anchor, index, &filter, root_suite);
    }
}

/// Builds the suite tree for one anchor and attaches it to `root_suite`.
///
/// The per-anchor node is attached even when nothing was found; callers
/// tolerate an empty suite. Below it, a node with zero resolved descendants
/// is never attached.
pub fn build_package_suite(
    anchor: &SuiteAnchor,
    index: &TestIndex,
    filter: &ClassFileFilter,
    root_suite: &mut TestSuite,
) {
    let base_dir = anchor.base_dir();
    let base_dir = base_dir.canonicalize().unwrap_or(base_dir);
    let base_package = anchor.package();

    let suite_name = if base_package.is_empty() {
        DEFAULT_PACKAGE_LABEL
    } else {
        base_package
    };
    let mut suite = TestSuite::new(suite_name);

    // The prefix length is fixed here and held constant through the
    // recursion; package names at any depth are derived from the portion of
    // the absolute path beyond it.
    let prefix_len = base_dir.to_string_lossy().len();
    build_level(prefix_len, base_package, &base_dir, filter, index, &mut suite);

    root_suite.add_suite(suite);
}

fn build_level(
    prefix_len: usize,
    base_package: &str,
    dir: &Path,
    filter: &ClassFileFilter,
    index: &TestIndex,
    node: &mut TestSuite,
) {
    let mut entries = list_candidates(dir, filter);
    if entries.is_empty() {
        return;
    }

    let package = package_for(prefix_len, base_package, dir);
    entries.sort();

    let mut class_files = Vec::new();
    for entry in entries {
        if entry.is_dir() {
            let name = entry
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            let mut child = TestSuite::new(name);
            build_level(prefix_len, base_package, &entry, filter, index, &mut child);
            // only if the branch contains tests
            if child.test_count() > 0 {
                node.add_suite(child);
            }
        } else {
            class_files.push(entry);
        }
    }

    for file in class_files {
        let Some(stem) = file
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(|name| name.strip_suffix(CLASS_EXTENSION))
        else {
            continue;
        };
        let class_name = if package.is_empty() {
            stem.to_string()
        } else {
            format!("{package}.{stem}")
        };

        match index.resolve(&class_name) {
            Ok(unit) => node.add_test(unit),
            // abstract classes cannot be standalone test units
            Err(ResolveError::NotInstantiable(_)) => {}
            Err(err) => tracing::error!(
                target: "reprise.discovery",
                class = %class_name,
                kind = err.kind(),
                "unable to load class"
            ),
        }
    }
}

/// Package name for a directory: the base package plus the absolute-path
/// remainder beyond the fixed prefix, separators replaced by `.`.
fn package_for(prefix_len: usize, base_package: &str, dir: &Path) -> String {
    let absolute = dir.to_string_lossy();
    let mut start = prefix_len;
    if base_package.is_empty() && absolute.len() > prefix_len {
        // skip the separator itself so default-package names have no
        // leading dot
        start = prefix_len + 1;
    }

    let mut package = String::from(base_package);
    if absolute.len() > start {
        package.push_str(&absolute[start..].replace(['/', '\\'], "."));
    }
    package
}

fn list_candidates(dir: &Path, filter: &ClassFileFilter) -> Vec<PathBuf> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            // an unlistable location simply has zero candidates
            tracing::debug!(
                target: "reprise.discovery",
                dir = %dir.display(),
                error = %err,
                "directory not listable"
            );
            return Vec::new();
        }
    };

    entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| filter.accept(path))
        .collect()
}
