use thiserror::Error;

use crate::member::MemberKind;

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Failures fall into two families. Configuration-contract violations are raised while a type
/// is being described or woven, before any member is ever invoked; they indicate that the
/// member description itself is wrong and are never retried. Invocation-path errors are raised
/// while a woven member is being called, either by the dispatch layer (lookup and input
/// mismatches) or by the member's own implementation.
///
/// # Error Categories
///
/// ## Configuration-Contract Violations
/// - [`Error::VoidValueType`] - A property or indexer was described with no value type
/// - [`Error::MissingImplementation`] - A described member carries no implementation
/// - [`Error::DuplicateBinding`] - The same member was registered for interception twice
/// - [`Error::TypeAlreadyWoven`] - A type name was woven a second time
///
/// ## Invocation-Path Errors
/// - [`Error::MemberNotFound`] - No interception binding exists for the requested member
/// - [`Error::ReceiverMismatch`] - The receiver is absent or of the wrong concrete type
/// - [`Error::ArgumentMismatch`] - An argument does not have the expected concrete type
/// - [`Error::AssignedMismatch`] - A setter's assigned value has the wrong concrete type
/// - [`Error::Invocation`] - The member's real implementation failed
///
/// # Examples
///
/// ```rust
/// use callscope::{Error, TypeDescriptor};
///
/// match TypeDescriptor::builder("Point").build() {
///     Ok(descriptor) => println!("Described {}", descriptor.name()),
///     Err(Error::MissingImplementation { member, .. }) => {
///         eprintln!("No implementation for {}", member);
///     }
///     Err(e) => eprintln!("Other error: {}", e),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// A property or indexer was described with no value type.
    ///
    /// A readable or writable member must have a value to read or write; a void-typed
    /// description can only mean the member-description step itself is wrong. Raised
    /// while weaving, before any trace line is emitted, and again defensively by the
    /// interceptor should such a descriptor ever reach the invocation path.
    #[error("A property or indexer should not have type void - {type_name}.{member}")]
    VoidValueType {
        /// Name of the declaring type
        type_name: String,
        /// Name of the offending member
        member: String,
    },

    /// A described member carries no implementation.
    ///
    /// Every registered member must capture its original implementation as a function
    /// value; a description without one cannot be dispatched.
    #[error("No implementation was captured for {type_name}.{member}")]
    MissingImplementation {
        /// Name of the declaring type
        type_name: String,
        /// Name of the member lacking an implementation
        member: String,
    },

    /// The same member was registered for interception twice.
    ///
    /// Weaving binds each declared member exactly once; a second registration with the
    /// same kind, name, and arity indicates a faulty type description.
    #[error("Member is already bound for interception - {type_name}.{member} ({kind})")]
    DuplicateBinding {
        /// Name of the declaring type
        type_name: String,
        /// Name of the member bound twice
        member: String,
        /// The member kind of the colliding binding
        kind: MemberKind,
    },

    /// A type name was woven a second time.
    ///
    /// Type preparation applies interception to each type once, before instances of the
    /// type are used. Weaving an already-woven name would re-decorate its members.
    #[error("Type is already woven - {0}")]
    TypeAlreadyWoven(String),

    /// No interception binding exists for the requested member.
    ///
    /// Raised by the invocation surface when a member was never registered, or was
    /// excluded by the weaving filter policy (compiler-generated constructors,
    /// accessor methods, deferred-sequence methods).
    #[error("No binding was found for {type_name}.{member} ({kind})")]
    MemberNotFound {
        /// Name of the declaring type
        type_name: String,
        /// Name of the member that was looked up
        member: String,
        /// The member kind of the failed lookup
        kind: MemberKind,
    },

    /// The receiver is absent or of the wrong concrete type.
    ///
    /// Instance members need a live receiver of the declaring type; static members are
    /// invoked without one.
    #[error("Receiver of type '{expected}' was missing or had the wrong concrete type")]
    ReceiverMismatch {
        /// The concrete Rust type the implementation expected
        expected: String,
    },

    /// An argument does not have the expected concrete type.
    #[error("Argument at position {position} does not have the expected type '{expected}'")]
    ArgumentMismatch {
        /// Zero-based position of the offending argument
        position: usize,
        /// The concrete Rust type the implementation expected
        expected: String,
    },

    /// A setter's assigned value has the wrong concrete type.
    #[error("Assigned value does not have the expected type '{expected}'")]
    AssignedMismatch {
        /// The concrete Rust type the implementation expected
        expected: String,
    },

    /// The member's real implementation failed.
    ///
    /// The interceptor propagates this unchanged to the caller; the matching `Exiting`
    /// trace line is not emitted for the failed call.
    #[error("{0}")]
    Invocation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_void_value_type_message() {
        let error = Error::VoidValueType {
            type_name: "Point".to_string(),
            member: "X".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "A property or indexer should not have type void - Point.X"
        );
    }

    #[test]
    fn test_duplicate_binding_message() {
        let error = Error::DuplicateBinding {
            type_name: "Point".to_string(),
            member: "X".to_string(),
            kind: MemberKind::PropertyGet,
        };
        assert!(error.to_string().contains("Point.X"));
        assert!(error.to_string().contains("PropertyGet"));
    }

    #[test]
    fn test_member_not_found_message() {
        let error = Error::MemberNotFound {
            type_name: "Point".to_string(),
            member: "Translate".to_string(),
            kind: MemberKind::Method,
        };
        assert_eq!(
            error.to_string(),
            "No binding was found for Point.Translate (Method)"
        );
    }

    #[test]
    fn test_invocation_message_passes_through() {
        let error = Error::Invocation("division by zero".to_string());
        assert_eq!(error.to_string(), "division by zero");
    }
}
