use std::any::Any;
use std::fmt;

use crate::{Error, Result};

/// A dynamically typed argument, result, or assigned value.
///
/// Call interception moves values between the caller, the trace formatter, and the
/// member's real implementation without knowing their concrete types. `Display`
/// supplies the textual rendering used in call records; `Any` supplies the downcasts
/// implementations perform. Every `'static` type with a `Display` impl qualifies
/// through the blanket implementation.
pub trait CallValue: Any + fmt::Display {
    /// Borrows the value for downcasting
    fn as_any(&self) -> &dyn Any;

    /// Consumes the box for by-value downcasting
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T: Any + fmt::Display> CallValue for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// A boxed [`CallValue`], the unit of argument and result passing
pub type BoxedValue = Box<dyn CallValue>;

/// Boxes a displayable value for use as an argument, result, or assigned value.
///
/// # Examples
///
/// ```rust
/// use callscope::interception::boxed;
///
/// let args = vec![boxed(3), boxed("north")];
/// assert_eq!(args[0].to_string(), "3");
/// assert_eq!(args[1].to_string(), "north");
/// ```
#[must_use]
pub fn boxed<T: Any + fmt::Display>(value: T) -> BoxedValue {
    Box::new(value)
}

/// Borrows the argument at `position` as a concrete type.
///
/// # Errors
///
/// [`Error::ArgumentMismatch`] if the position is out of range or the value has a
/// different concrete type.
pub fn arg<T: Any>(args: &[BoxedValue], position: usize) -> Result<&T> {
    args.get(position)
        .and_then(|value| value.as_any().downcast_ref::<T>())
        .ok_or_else(|| Error::ArgumentMismatch {
            position,
            expected: std::any::type_name::<T>().to_string(),
        })
}

/// Consumes a setter's assigned value as a concrete type.
///
/// # Errors
///
/// [`Error::AssignedMismatch`] if the value has a different concrete type.
pub fn assigned<T: Any>(value: BoxedValue) -> Result<T> {
    value
        .into_any()
        .downcast::<T>()
        .map(|value| *value)
        .map_err(|_| Error::AssignedMismatch {
            expected: std::any::type_name::<T>().to_string(),
        })
}
