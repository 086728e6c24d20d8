//! # callscope Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits
//! from the callscope library. Import this module to get quick access to the essential
//! types for describing, weaving, and invoking intercepted members.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all callscope operations
pub use crate::Error;

/// The result type used throughout callscope
pub use crate::Result;

// ================================================================================================
// Main Entry Points
// ================================================================================================

/// Applies interception to described types
pub use crate::weaver::Weaver;

/// A type whose members route through interception
pub use crate::weaver::WovenType;

/// The registration surface for describing a type's members
pub use crate::weaver::{TypeDescriptor, TypeDescriptorBuilder};

/// Per-member sub-builders used inside type descriptions
pub use crate::weaver::{ConstructorBuilder, IndexerBuilder, MethodBuilder, PropertyBuilder};

/// Per-kind binding statistics
pub use crate::weaver::WeaveStats;

// ================================================================================================
// Member Model
// ================================================================================================

/// Binding identity and member descriptions
pub use crate::member::{BindingId, MemberDescriptor, Param};

/// Kind tags, modifier flags, and the enumeration filter
pub use crate::member::{MemberFilter, MemberKind, MemberModifiers, Visibility};

// ================================================================================================
// Interception
// ================================================================================================

/// The call interception strategy and its call records
pub use crate::interception::{CallRecord, TraceInterceptor};

/// Dynamically typed call values and their helpers
pub use crate::interception::{arg, assigned, boxed, BoxedValue, CallValue};

/// Receiver downcasting inside captured implementations
pub use crate::interception::{receiver_mut, receiver_ref};

/// Trace output channels
pub use crate::interception::{BufferSink, TraceSink, TracingSink};
