use std::collections::HashSet;

use reprise_core::{TestIndex, TestSuite};

/// Accumulates candidates from the log and report scanners into one flat,
/// insertion-ordered suite, resolving each distinct identifier at most once
/// no matter how many sources report it.
pub(crate) struct FlatAssembler<'a> {
    index: &'a TestIndex,
    suite: TestSuite,
    processed: HashSet<String>,
}

impl<'a> FlatAssembler<'a> {
    pub(crate) fn new(index: &'a TestIndex, suite_name: &str) -> Self {
        Self {
            index,
            suite: TestSuite::new(suite_name),
            processed: HashSet::new(),
        }
    }

    pub(crate) fn add_candidate(&mut self, id: &str) {
        if reject_foreign_runner(id) {
            return;
        }
        if !self.processed.insert(id.to_string()) {
            return;
        }
        resolve_into(self.index, &mut self.suite, id);
    }

    pub(crate) fn into_suite(self) -> TestSuite {
        self.suite
    }
}

/// Identifiers containing a path separator are produced by a disallowed
/// foreign test runner; they are warned about and never resolved.
pub(crate) fn reject_foreign_runner(id: &str) -> bool {
    if id.contains('/') {
        tracing::warn!(target: "reprise.discovery", identifier = %id, "skipped foreign runner test");
        true
    } else {
        false
    }
}

pub(crate) fn resolve_into(index: &TestIndex, suite: &mut TestSuite, id: &str) {
    match index.resolve(id) {
        Ok(unit) => suite.add_test(unit),
        Err(err) => tracing::error!(
            target: "reprise.discovery",
            identifier = %id,
            kind = err.kind(),
            "unable to load class"
        ),
    }
}
