//! Core model for suite assembly.
//!
//! This crate provides the pieces every discoverer shares:
//! - the **test index**, a registered symbol table mapping fully qualified
//!   class names to [`TestClass`] descriptors;
//! - the **resolver**, which classifies a looked-up class into the correct
//!   execution adapter ([`TestUnit::Legacy`] for classes assignable to the
//!   legacy base contract, [`TestUnit::Modern`] for annotation-style classes
//!   wrapped to run under the legacy composition API);
//! - the **suite tree** ([`TestSuite`]) the composers build, with its
//!   serializable [`schema`] outline;
//! - a minimal caller-thread execution strategy ([`CallerExecutor`]).
//!
//! All values live for a single assembly invocation; the crate keeps no
//! state between invocations.

pub mod exec;
pub mod index;
pub mod schema;
pub mod suite;
pub mod unit;

pub use exec::CallerExecutor;
pub use index::{ResolveError, TestClass, TestIndex};
pub use schema::{AdapterKind, SuiteOutline, SCHEMA_VERSION};
pub use suite::{SuiteEntry, TestSuite};
pub use unit::{LegacyCase, ModernAdapter, RunnableUnit, TestUnit};
