use crate::index::TestClass;
use crate::schema::AdapterKind;

/// Capability contract consumed by the execution framework: a unit the
/// framework can run, identified and sized for composition.
pub trait RunnableUnit {
    fn id(&self) -> &str;

    fn case_count(&self) -> usize;
}

/// A resolved, classified test unit.
///
/// The classification decides how the execution framework drives the class:
/// `Legacy` classes implement the old assertion-style contract and run by
/// direct test-method invocation; `Modern` classes follow the annotation
/// contract and run through the adapter under the legacy composition API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestUnit {
    Legacy(LegacyCase),
    Modern(ModernAdapter),
}

impl TestUnit {
    pub fn class(&self) -> &TestClass {
        match self {
            TestUnit::Legacy(case) => case.class(),
            TestUnit::Modern(adapter) => adapter.class(),
        }
    }

    pub fn adapter_kind(&self) -> AdapterKind {
        match self {
            TestUnit::Legacy(_) => AdapterKind::Legacy,
            TestUnit::Modern(_) => AdapterKind::Modern,
        }
    }
}

impl RunnableUnit for TestUnit {
    fn id(&self) -> &str {
        self.class().name()
    }

    fn case_count(&self) -> usize {
        self.class().case_count()
    }
}

/// Direct wrapper around a class implementing the legacy base contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyCase {
    class: TestClass,
}

impl LegacyCase {
    pub fn new(class: TestClass) -> Self {
        Self { class }
    }

    pub fn class(&self) -> &TestClass {
        &self.class
    }
}

impl RunnableUnit for LegacyCase {
    fn id(&self) -> &str {
        self.class.name()
    }

    fn case_count(&self) -> usize {
        self.class.case_count()
    }
}

/// Adapter exposing an annotation-style class through the legacy composition
/// API. No validation happens here: a class that turns out not to follow the
/// modern contract fails when the execution framework runs it, not before.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModernAdapter {
    class: TestClass,
}

impl ModernAdapter {
    pub fn new(class: TestClass) -> Self {
        Self { class }
    }

    pub fn class(&self) -> &TestClass {
        &self.class
    }
}

impl RunnableUnit for ModernAdapter {
    fn id(&self) -> &str {
        self.class.name()
    }

    fn case_count(&self) -> usize {
        self.class.case_count()
    }
}
