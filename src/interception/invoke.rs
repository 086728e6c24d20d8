//! Captured member implementations and receiver access.
//!
//! Interception never reflects over the host program: the original implementation of
//! every member is captured as a function value when the type is described, stored
//! behind the binding, and invoked directly by the interceptor. One closure shape
//! exists per kind family; the explicit [`crate::member::MemberKind`] on the
//! descriptor selects which shape a binding carries.

use std::any::Any;

use crate::interception::value::BoxedValue;
use crate::{Error, Result};

/// Captured constructor implementation; produces the new instance from its arguments
pub type ConstructorFn = Box<dyn Fn(&[BoxedValue]) -> Result<Box<dyn Any>> + Send + Sync>;

/// Captured method implementation; `None` result means the method is void
pub type MethodFn =
    Box<dyn Fn(Option<&mut dyn Any>, &[BoxedValue]) -> Result<Option<BoxedValue>> + Send + Sync>;

/// Captured property or indexer read implementation; arguments are the index values,
/// empty for properties
pub type GetterFn =
    Box<dyn Fn(Option<&dyn Any>, &[BoxedValue]) -> Result<BoxedValue> + Send + Sync>;

/// Captured property or indexer write implementation; arguments are the index values,
/// the trailing operand is the assigned value
pub type SetterFn =
    Box<dyn Fn(Option<&mut dyn Any>, &[BoxedValue], BoxedValue) -> Result<()> + Send + Sync>;

/// The captured original implementation behind one binding
pub enum MemberImpl {
    /// Constructor shape
    Constructor(ConstructorFn),
    /// Method shape, void or result-bearing
    Method(MethodFn),
    /// Property or indexer read shape
    Getter(GetterFn),
    /// Property or indexer write shape
    Setter(SetterFn),
}

/// Borrows the receiver as a concrete type.
///
/// # Errors
///
/// [`Error::ReceiverMismatch`] if no receiver was supplied or it has a different
/// concrete type.
pub fn receiver_ref<T: Any>(receiver: Option<&dyn Any>) -> Result<&T> {
    receiver
        .and_then(<dyn Any>::downcast_ref::<T>)
        .ok_or_else(|| Error::ReceiverMismatch {
            expected: std::any::type_name::<T>().to_string(),
        })
}

/// Mutably borrows the receiver as a concrete type.
///
/// # Errors
///
/// [`Error::ReceiverMismatch`] if no receiver was supplied or it has a different
/// concrete type.
pub fn receiver_mut<T: Any>(receiver: Option<&mut dyn Any>) -> Result<&mut T> {
    receiver
        .and_then(<dyn Any>::downcast_mut::<T>)
        .ok_or_else(|| Error::ReceiverMismatch {
            expected: std::any::type_name::<T>().to_string(),
        })
}
