use std::collections::BTreeMap;

use thiserror::Error;

use crate::unit::{LegacyCase, ModernAdapter, TestUnit};

/// Why an identifier could not be resolved to a runnable unit.
///
/// Every variant is a local failure: callers log one diagnostic naming the
/// identifier and the failure kind ([`ResolveError::kind`]), drop the
/// identifier, and keep going.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("class {0} is not registered")]
    NotFound(String),
    #[error("class {name} failed to load: {reason}")]
    LoadFailed { name: String, reason: String },
    #[error("class {0} is abstract and cannot be a standalone test unit")]
    NotInstantiable(String),
}

impl ResolveError {
    /// Short failure-class label used in skip diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            ResolveError::NotFound(_) => "NotFound",
            ResolveError::LoadFailed { .. } => "LoadFailed",
            ResolveError::NotInstantiable(_) => "NotInstantiable",
        }
    }
}

/// Descriptor for one loadable test class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestClass {
    name: String,
    methods: Vec<String>,
    is_abstract: bool,
    extends_legacy_base: bool,
}

impl TestClass {
    /// A class assignable to the legacy test-case base contract.
    pub fn legacy(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            methods: Vec::new(),
            is_abstract: false,
            extends_legacy_base: true,
        }
    }

    /// An annotation-style class; it does not extend the legacy base and
    /// runs through the modern adapter.
    pub fn annotated(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            methods: Vec::new(),
            is_abstract: false,
            extends_legacy_base: false,
        }
    }

    pub fn with_methods<I, S>(mut self, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.methods = methods.into_iter().map(Into::into).collect();
        self
    }

    pub fn mark_abstract(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn methods(&self) -> &[String] {
        &self.methods
    }

    pub fn is_abstract(&self) -> bool {
        self.is_abstract
    }

    pub fn extends_legacy_base(&self) -> bool {
        self.extends_legacy_base
    }

    /// Number of test cases the class contributes. A class whose methods are
    /// not individually known still counts as one runnable case.
    pub fn case_count(&self) -> usize {
        self.methods.len().max(1)
    }
}

#[derive(Debug, Clone)]
enum Entry {
    Loadable(TestClass),
    Faulty { reason: String },
}

/// Symbol table of loadable test classes, keyed by fully qualified name.
///
/// Population is explicit registration; lookup failure is the explicit
/// [`ResolveError::NotFound`] variant rather than a loader exception. A
/// registration can also be marked faulty to model classes that are present
/// but fail at load time.
#[derive(Debug, Clone, Default)]
pub struct TestIndex {
    entries: BTreeMap<String, Entry>,
}

impl TestIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, class: TestClass) -> &mut Self {
        self.entries
            .insert(class.name().to_string(), Entry::Loadable(class));
        self
    }

    /// Registers a class that exists but fails to load, e.g. a broken static
    /// initializer in the original runtime.
    pub fn register_faulty(&mut self, name: impl Into<String>, reason: impl Into<String>) -> &mut Self {
        self.entries.insert(
            name.into(),
            Entry::Faulty {
                reason: reason.into(),
            },
        );
        self
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Loads and classifies the identifier.
    ///
    /// Classes assignable to the legacy base contract become
    /// [`TestUnit::Legacy`]; everything else is assumed to follow the modern
    /// annotation contract and becomes [`TestUnit::Modern`] without further
    /// validation. A malformed class only surfaces when the execution
    /// framework runs it.
    pub fn resolve(&self, id: &str) -> Result<TestUnit, ResolveError> {
        match self.entries.get(id) {
            None => Err(ResolveError::NotFound(id.to_string())),
            Some(Entry::Faulty { reason }) => Err(ResolveError::LoadFailed {
                name: id.to_string(),
                reason: reason.clone(),
            }),
            Some(Entry::Loadable(class)) => {
                if class.is_abstract() {
                    Err(ResolveError::NotInstantiable(id.to_string()))
                } else if class.extends_legacy_base() {
                    Ok(TestUnit::Legacy(LegacyCase::new(class.clone())))
                } else {
                    Ok(TestUnit::Modern(ModernAdapter::new(class.clone())))
                }
            }
        }
    }
}
