use crate::schema::{OutlineEntry, OutlineSuite, OutlineTest, SuiteOutline, SCHEMA_VERSION};
use crate::unit::{RunnableUnit, TestUnit};

/// Named, ordered collection of runnable test units and/or nested suites.
///
/// Built once per assembly invocation and handed to the execution framework;
/// order is the composer's insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestSuite {
    name: String,
    entries: Vec<SuiteEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuiteEntry {
    Suite(TestSuite),
    Test(TestUnit),
}

impl TestSuite {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn add_suite(&mut self, suite: TestSuite) {
        self.entries.push(SuiteEntry::Suite(suite));
    }

    pub fn add_test(&mut self, unit: TestUnit) {
        self.entries.push(SuiteEntry::Test(unit));
    }

    pub fn entries(&self) -> &[SuiteEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of resolved test units in this suite, transitively.
    pub fn test_count(&self) -> usize {
        self.entries
            .iter()
            .map(|entry| match entry {
                SuiteEntry::Suite(suite) => suite.test_count(),
                SuiteEntry::Test(_) => 1,
            })
            .sum()
    }

    /// Depth-first, insertion-ordered iterator over the leaf test units.
    pub fn tests(&self) -> Tests<'_> {
        Tests {
            stack: vec![self.entries.iter()],
        }
    }

    /// Serializable outline of the assembled suite.
    pub fn outline(&self) -> SuiteOutline {
        SuiteOutline {
            schema_version: SCHEMA_VERSION,
            suite: outline_suite(self),
        }
    }
}

fn outline_suite(suite: &TestSuite) -> OutlineSuite {
    OutlineSuite {
        name: suite.name.clone(),
        entries: suite
            .entries
            .iter()
            .map(|entry| match entry {
                SuiteEntry::Suite(child) => OutlineEntry::Suite(outline_suite(child)),
                SuiteEntry::Test(unit) => OutlineEntry::Test(OutlineTest {
                    id: unit.id().to_string(),
                    adapter: unit.adapter_kind(),
                    case_count: unit.case_count() as u32,
                }),
            })
            .collect(),
    }
}

pub struct Tests<'a> {
    stack: Vec<std::slice::Iter<'a, SuiteEntry>>,
}

impl<'a> Iterator for Tests<'a> {
    type Item = &'a TestUnit;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(top) = self.stack.last_mut() {
            match top.next() {
                Some(SuiteEntry::Suite(suite)) => self.stack.push(suite.entries.iter()),
                Some(SuiteEntry::Test(unit)) => return Some(unit),
                None => {
                    self.stack.pop();
                }
            }
        }
        None
    }
}
