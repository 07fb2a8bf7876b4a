//! White-box access to non-public fixture state.
//!
//! Test code occasionally needs to read, mutate or invoke a member that the
//! type under test does not expose. Types opt in by implementing
//! [`Introspect`], which hands out a finite list of [`TypeDescriptor`]s in
//! most-derived-first order; [`get_field`], [`set_field`] and [`invoke`] walk
//! that list and stop at the first matching member, regardless of the
//! member's declared visibility.
//!
//! The walk is forgiving in the middle and strict at the end: a descriptor
//! level that does not match (wrong value type, wrong argument list) is
//! skipped and the next ancestor is tried; only an exhausted walk produces a
//! `NoSuchField`/`NoSuchMethod` error naming the owning type and the member.
//! A failure raised by an invoked member itself is handed back with its
//! original payload intact so callers can downcast it.
//!
//! The accessors touch exactly the one resolved member for the duration of
//! the call; nothing else about the object or its type changes.

use std::any::Any;
use std::fmt;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IntrospectError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("could not access field {type_name}.{field}")]
    NoSuchField { type_name: String, field: String },
    #[error("failed method invocation: {type_name}.{method}()")]
    NoSuchMethod { type_name: String, method: String },
    #[error("invocation target failed")]
    Target(TargetFailure),
}

pub type Result<T> = std::result::Result<T, IntrospectError>;

/// Failure raised by an invoked member, carried with its identity preserved.
pub struct TargetFailure(Box<dyn Any + Send>);

impl TargetFailure {
    pub fn new(failure: Box<dyn Any + Send>) -> Self {
        Self(failure)
    }

    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }

    pub fn into_inner(self) -> Box<dyn Any + Send> {
        self.0
    }
}

impl fmt::Debug for TargetFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TargetFailure(..)")
    }
}

/// Opt-in introspection capability.
///
/// `descriptors` returns one entry per type in the ancestor chain, most
/// derived first; the first entry names the runtime type used in error
/// messages. Accessors of ancestor descriptors are bound to the concrete
/// layout (for composed types they project through the embedded base value).
pub trait Introspect {
    fn descriptors(&self) -> Vec<TypeDescriptor>;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

pub struct TypeDescriptor {
    pub name: &'static str,
    fields: Vec<FieldAccessor>,
    methods: Vec<MethodAccessor>,
}

impl TypeDescriptor {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            fields: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn with_field(mut self, field: FieldAccessor) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_method(mut self, method: MethodAccessor) -> Self {
        self.methods.push(method);
        self
    }
}

type GetFn = Box<dyn Fn(&dyn Any) -> Option<Box<dyn Any>>>;
type SetFn = Box<dyn Fn(&mut dyn Any, Box<dyn Any>) -> SetOutcome>;
type InvokeFn = Box<dyn Fn(&mut dyn Any, Args) -> InvokeOutcome>;

pub struct FieldAccessor {
    name: &'static str,
    get: GetFn,
    set: SetFn,
}

impl FieldAccessor {
    /// `get` returns a copy of the field value, or `None` when the receiver
    /// does not match this descriptor level.
    pub fn new(
        name: &'static str,
        get: impl Fn(&dyn Any) -> Option<Box<dyn Any>> + 'static,
        set: impl Fn(&mut dyn Any, Box<dyn Any>) -> SetOutcome + 'static,
    ) -> Self {
        Self {
            name,
            get: Box::new(get),
            set: Box::new(set),
        }
    }
}

pub enum SetOutcome {
    Applied,
    /// Receiver or value did not match; the value is handed back untouched
    /// so the walk can offer it to the next ancestor.
    Mismatch(Box<dyn Any>),
}

pub struct MethodAccessor {
    name: &'static str,
    invoke: InvokeFn,
}

impl MethodAccessor {
    pub fn new(
        name: &'static str,
        invoke: impl Fn(&mut dyn Any, Args) -> InvokeOutcome + 'static,
    ) -> Self {
        Self {
            name,
            invoke: Box::new(invoke),
        }
    }
}

pub enum InvokeOutcome {
    Completed(Box<dyn Any>),
    Failed(TargetFailure),
    /// Signature did not match (receiver shape, arity or argument types);
    /// the arguments are handed back so the walk can continue.
    Mismatch(Args),
}

/// Positional invocation arguments.
#[derive(Default)]
pub struct Args(Vec<Box<dyn Any>>);

impl Args {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<T: Any>(mut self, value: T) -> Self {
        self.0.push(Box::new(value));
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Non-consuming type probe, used by accessor shims to decide between
    /// accepting the call and returning `Mismatch`.
    pub fn is<T: Any>(&self, index: usize) -> bool {
        self.0
            .get(index)
            .map(|value| value.is::<T>())
            .unwrap_or(false)
    }

    pub fn get<T: Any>(&self, index: usize) -> Option<&T> {
        self.0.get(index).and_then(|value| value.downcast_ref())
    }
}

/// Walks the object's descriptor chain for a method named `method` with a
/// matching argument list and invokes the first match. A failure raised by
/// the target member is propagated unwrapped via [`IntrospectError::Target`].
pub fn invoke(object: &mut dyn Introspect, method: &str, args: Args) -> Result<Box<dyn Any>> {
    let descriptors = object.descriptors();
    let type_name = runtime_type_name(&descriptors)?;

    let mut args = args;
    for descriptor in &descriptors {
        for candidate in descriptor.methods.iter().filter(|m| m.name == method) {
            match (candidate.invoke)(object.as_any_mut(), args) {
                InvokeOutcome::Completed(value) => return Ok(value),
                InvokeOutcome::Failed(failure) => return Err(IntrospectError::Target(failure)),
                InvokeOutcome::Mismatch(returned) => args = returned,
            }
        }
    }

    Err(IntrospectError::NoSuchMethod {
        type_name,
        method: method.to_string(),
    })
}

/// Reads the named field from the object or the nearest ancestor declaring
/// it. Returns a copy of the current value; an unset optional field reads as
/// its absence value.
pub fn get_field(object: &dyn Introspect, field: &str) -> Result<Box<dyn Any>> {
    let descriptors = object.descriptors();
    let type_name = runtime_type_name(&descriptors)?;

    for descriptor in &descriptors {
        for candidate in descriptor.fields.iter().filter(|f| f.name == field) {
            if let Some(value) = (candidate.get)(object.as_any()) {
                return Ok(value);
            }
        }
    }

    Err(IntrospectError::NoSuchField {
        type_name,
        field: field.to_string(),
    })
}

/// Writes the named field on the object or the nearest ancestor declaring it.
pub fn set_field(object: &mut dyn Introspect, field: &str, value: Box<dyn Any>) -> Result<()> {
    let descriptors = object.descriptors();
    let type_name = runtime_type_name(&descriptors)?;

    let mut value = value;
    for descriptor in &descriptors {
        for candidate in descriptor.fields.iter().filter(|f| f.name == field) {
            match (candidate.set)(object.as_any_mut(), value) {
                SetOutcome::Applied => return Ok(()),
                SetOutcome::Mismatch(returned) => value = returned,
            }
        }
    }

    Err(IntrospectError::NoSuchField {
        type_name,
        field: field.to_string(),
    })
}

fn runtime_type_name(descriptors: &[TypeDescriptor]) -> Result<String> {
    descriptors
        .first()
        .map(|descriptor| descriptor.name.to_string())
        .ok_or_else(|| {
            IntrospectError::InvalidArgument("object exposes no type descriptors".to_string())
        })
}
