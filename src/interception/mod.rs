//! Call interception: records, values, captured implementations, sinks, and the
//! interceptor itself.
//!
//! Every invocation of a woven member flows through one [`TraceInterceptor`], which
//! brackets the real call with an `Entering` and an `Exiting` trace line and passes
//! the outcome through unchanged. The real call is a function value captured when the
//! type was described ([`invoke`]); arguments and results travel as dynamically typed
//! [`value::BoxedValue`]s; the formatted description of each call is a
//! [`record::CallRecord`]; output goes to an injected [`sink::TraceSink`].
//!
//! # Key Types
//!
//! - [`TraceInterceptor`] - Per-kind interception with entering/exiting bracketing
//! - [`CallRecord`] - The shared `Type.Member(args)` description grammar
//! - [`CallValue`] / [`BoxedValue`] - Dynamically typed arguments and results
//! - [`MemberImpl`] - The captured original implementation behind a binding
//! - [`TraceSink`] - Injectable line-oriented output channel

/// Implementation of the per-kind interception strategy
pub mod interceptor;
/// Implementation of captured member implementations and receiver access
pub mod invoke;
/// Implementation of the call description record
pub mod record;
/// Implementation of trace output channels
pub mod sink;
/// Implementation of dynamically typed call values
pub mod value;

pub use interceptor::TraceInterceptor;
pub use invoke::{receiver_mut, receiver_ref, ConstructorFn, GetterFn, MemberImpl, MethodFn, SetterFn};
pub use record::CallRecord;
pub use sink::{BufferSink, TraceSink, TracingSink};
pub use value::{arg, assigned, boxed, BoxedValue, CallValue};
