// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![allow(dead_code)]

//! # callscope
//!
//! [![Crates.io](https://img.shields.io/crates/v/callscope.svg)](https://crates.io/crates/callscope)
//! [![Documentation](https://docs.rs/callscope/badge.svg)](https://docs.rs/callscope)
//! [![License](https://img.shields.io/badge/license-Apache--2.0-blue.svg)](https://github.com/BinFlip/callscope/blob/main/LICENSE-APACHE)
//!
//! A registration-based call interception and tracing framework for instrumenting type members.
//! `callscope` lets a host program describe a type's callable members (constructors, methods,
//! properties, and indexers) together with each member's implementation, and routes every
//! subsequent invocation through an interceptor that brackets the real call with `Entering` and
//! `Exiting` trace lines while passing the outcome through unchanged.
//!
//! ## Features
//!
//! - **🪡 One-pass weaving** - Members are enumerated, filtered, and bound once per type, before use
//! - **🏷️ Explicit member tagging** - Kind, visibility, staticness, and filter-relevant traits are declared, never inferred
//! - **🔍 Faithful pass-through** - Return values, receiver mutation, and failures are untouched by interception
//! - **📜 Deterministic trace grammar** - One formatting convention across all six member kinds
//! - **🔌 Injectable trace sinks** - Output goes to the `tracing` facade, an in-memory buffer, or any custom channel
//! - **🛡️ Fail-fast configuration checks** - Void-typed properties, duplicate bindings, and re-woven types are rejected before any trace line
//!
//! ## Quick Start
//!
//! Add `callscope` to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! callscope = "0.1"
//! ```
//!
//! ### Using the Prelude
//!
//! For convenient access to the most commonly used types, import the prelude:
//!
//! ```rust
//! use std::any::Any;
//! use std::sync::Arc;
//! use callscope::prelude::*;
//!
//! struct Point {
//!     x: i32,
//!     y: i32,
//! }
//!
//! let sink = Arc::new(BufferSink::new());
//! let weaver = Weaver::new(sink.clone());
//!
//! let descriptor = TypeDescriptor::builder("Point")
//!     .constructor(|c| {
//!         c.parameter("x").parameter("y").body(|args| {
//!             let x = *arg::<i32>(args, 0)?;
//!             let y = *arg::<i32>(args, 1)?;
//!             Ok(Box::new(Point { x, y }) as Box<dyn Any>)
//!         })
//!     })
//!     .method("DistanceFromOrigin", |m| {
//!         m.returns("int").body(|receiver, _| {
//!             let point = receiver_mut::<Point>(receiver)?;
//!             let squared = point.x * point.x + point.y * point.y;
//!             Ok(Some(boxed(f64::from(squared).sqrt() as i32)))
//!         })
//!     })
//!     .build()?;
//!
//! let woven = weaver.apply_to_type(descriptor)?;
//!
//! let instance = woven.construct(&[boxed(3), boxed(4)])?;
//! let mut point = *instance.downcast::<Point>().expect("constructed a Point");
//!
//! let receiver: &mut dyn Any = &mut point;
//! let distance = woven.call(Some(receiver), "DistanceFromOrigin", &[])?.unwrap();
//!
//! assert_eq!(distance.to_string(), "5");
//! assert_eq!(
//!     sink.lines(),
//!     vec![
//!         "Entering Point.Point(3, 4)".to_string(),
//!         "Exiting Point.Point(3, 4)".to_string(),
//!         "Entering Point.DistanceFromOrigin()".to_string(),
//!         "Exiting Point.DistanceFromOrigin() with result 5".to_string(),
//!     ]
//! );
//! # Ok::<(), callscope::Error>(())
//! ```
//!
//! ## Architecture
//!
//! `callscope` is organized into several key modules:
//!
//! - [`prelude`] - Convenient re-exports of commonly used types and traits
//! - [`weaver`] - Type descriptions, the weaving pass, and the woven invocation surface
//! - [`interception`] - The interceptor, call records, values, and trace sinks
//! - [`member`] - Member descriptions, kind tags, flags, and binding identity
//! - [`Error`] and [`Result`] - Comprehensive error handling
//!
//! ### Weaving
//!
//! The [`weaver::Weaver`] is the type-preparation entry point. A host describes each type
//! through [`weaver::TypeDescriptor`] and applies it once, before application code uses the
//! type. The weaver enumerates the declared members under a filter that admits instance and
//! static, public and non-public, declared-only members, then skips:
//!
//! - compiler-generated constructors,
//! - methods tagged as property or indexer accessors (the property or indexer itself is
//!   wrapped, so one logical access produces one pair of trace lines),
//! - methods tagged as producing deferred sequences (an `Exiting` line before the sequence
//!   is consumed would misrepresent timing).
//!
//! Every qualifying member receives exactly one interception binding, identified by a
//! kind-tagged [`member::BindingId`].
//!
//! ### Interception
//!
//! The [`interception::TraceInterceptor`] is the sole indirection point between a caller and
//! a bound implementation. Per invocation it renders one [`interception::CallRecord`], emits
//! `Entering {description}`, delegates to the implementation captured at registration time,
//! and emits `Exiting {description}`, with the result appended for result-bearing kinds.
//! A failure from the implementation propagates unchanged and suppresses the `Exiting` line,
//! so an unmatched `Entering` marks an abnormally terminated call in the trace stream.
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, Error>`](Result) with comprehensive error information:
//!
//! ```rust
//! use callscope::{Error, TypeDescriptor};
//!
//! match TypeDescriptor::builder("Point").build() {
//!     Ok(descriptor) => println!("Described {}", descriptor.name()),
//!     Err(Error::MissingImplementation { member, .. }) => {
//!         eprintln!("No implementation for {}", member);
//!     }
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```
//!
//! ## Testing
//!
//! The [`interception::BufferSink`] captures emitted lines in memory, which keeps trace
//! assertions exact:
//!
//! ```bash
//! cargo test
//! ```

#[macro_use]
pub(crate) mod macros;

pub(crate) mod error;

/// Convenient re-exports of the most commonly used types and traits.
///
/// This module provides a curated selection of the most frequently used types
/// from across the callscope library, allowing for convenient glob imports.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use callscope::prelude::*;
///
/// let weaver = Weaver::new(Arc::new(BufferSink::new()));
/// assert_eq!(weaver.binding_count(), 0);
/// ```
pub mod prelude;

/// Call interception: the interceptor, call records, values, implementations, and sinks.
///
/// Every invocation of a woven member flows through the
/// [`interception::TraceInterceptor`], which brackets the real call with an `Entering`
/// and an `Exiting` trace line and passes the outcome through unchanged.
pub mod interception;

/// Member descriptions, kind tags, modifier flags, and binding identity.
///
/// The data model of the interception layer: what a declared member looks like, the
/// explicit kind tag it carries, and the handle identifying its binding.
pub mod member;

/// Type weaving: enumeration, filtering, and binding registration.
///
/// Applying a [`weaver::TypeDescriptor`] to the [`weaver::Weaver`] registers exactly one
/// interception binding per qualifying declared member and yields the
/// [`weaver::WovenType`] application code invokes afterwards.
pub mod weaver;

/// `callscope` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
/// This is used consistently throughout the crate for all fallible operations.
///
/// # Examples
///
/// ```rust
/// use callscope::{Result, TypeDescriptor};
///
/// fn describe() -> Result<TypeDescriptor> {
///     TypeDescriptor::builder("Point").build()
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// `callscope` Error type
///
/// The main error type for all operations in this crate. Provides detailed error
/// information for configuration-contract violations raised while a type is described or
/// woven, and for invocation-path failures raised while a woven member is called.
///
/// # Examples
///
/// ```rust
/// use callscope::{Error, TypeDescriptor};
///
/// match TypeDescriptor::builder("Point").build() {
///     Ok(descriptor) => println!("Described {}", descriptor.name()),
///     Err(Error::VoidValueType { type_name, member }) => {
///         eprintln!("{}.{} has no value type", type_name, member);
///     }
///     Err(e) => eprintln!("Error: {}", e),
/// }
/// ```
pub use error::Error;

/// Main entry points for weaving and invoking intercepted types.
///
/// The [`weaver::Weaver`] applies interception to types described through
/// [`weaver::TypeDescriptor`]; the resulting [`weaver::WovenType`] is the indirection
/// point through which application code invokes the type's members.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use callscope::{BufferSink, TypeDescriptor, Weaver};
/// use callscope::interception::boxed;
///
/// let weaver = Weaver::new(Arc::new(BufferSink::new()));
/// let descriptor = TypeDescriptor::builder("Echo")
///     .method("Repeat", |m| {
///         m.parameter("word").returns("string").body(|_, args| {
///             Ok(Some(boxed(callscope::interception::arg::<&str>(args, 0)?.to_string())))
///         })
///     })
///     .build()?;
///
/// let woven = weaver.apply_to_type(descriptor)?;
/// assert_eq!(woven.binding_count(), 1);
/// # Ok::<(), callscope::Error>(())
/// ```
pub use weaver::{TypeDescriptor, TypeDescriptorBuilder, Weaver, WovenType};

/// Trace output channels for intercepted calls.
///
/// The interceptor's only output obligation is to hand well-formed single-line messages
/// to a [`TraceSink`]:
/// - [`TracingSink`] - Forwards every line to the `tracing` facade at trace level
/// - [`BufferSink`] - Captures lines in memory for later inspection
///
/// # Example
///
/// ```rust
/// use callscope::{BufferSink, TraceSink};
///
/// let sink = BufferSink::new();
/// sink.write_line("Entering Point.X.get()");
/// assert_eq!(sink.lines().len(), 1);
/// ```
pub use interception::{BufferSink, TraceSink, TracingSink};

/// Member identity and kind tags.
///
/// Every interception binding is identified by a [`BindingId`] whose high byte is the
/// one-byte tag of its [`MemberKind`].
///
/// # Example
///
/// ```rust
/// use callscope::{BindingId, MemberKind};
///
/// let id = BindingId::new(MemberKind::PropertyGet, 7);
/// assert_eq!(id.kind(), Some(MemberKind::PropertyGet));
/// assert_eq!(id.sequence(), 7);
/// ```
pub use member::{BindingId, MemberKind};
